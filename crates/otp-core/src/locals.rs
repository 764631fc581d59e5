//! # Density and text scale
//!
//! Geometry is specified in density‑independent points (dp) and font sizes in
//! scale‑independent points (sp). Both are resolved against thread‑local
//! values that a host installs for the duration of a callback:
//!
//! ```rust
//! use otp_core::*;
//!
//! let px = with_density(Density { scale: 2.5 }, || dp(1.0));
//! assert_eq!(px, 3);
//! ```
//!
//! Outside any `with_*` frame the defaults apply (scale 1.0).

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density‑independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Whole device pixels for this length under the current Density,
    /// rounded up. Zero maps to exactly zero.
    pub fn to_px(self) -> u32 {
        if self.0 == 0.0 {
            return 0;
        }
        (f64::from(density().scale) * f64::from(self.0)).ceil().max(0.0) as u32
    }
}

/// Converts a raw dp scalar into whole pixels using the current Density.
pub fn dp(v: f32) -> u32 {
    Dp(v).to_px()
}

/// [`dp`] as a float, for geometry.
pub fn dpf(v: f32) -> f32 {
    dp(v) as f32
}

/// Font size in sp → px; scales with both Density and TextScale, unrounded.
pub fn sp_to_px(v: f32) -> f32 {
    v * density().scale * text_scale().0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextScale(pub f32);
impl Default for TextScale {
    fn default() -> Self {
        Self(1.0)
    }
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

fn local<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Density>(), Box::new(density));
        f()
    })
}

pub fn with_text_scale<R>(ts: TextScale, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<TextScale>(), Box::new(ts));
        f()
    })
}

pub fn density() -> Density {
    local::<Density>()
}

pub fn text_scale() -> TextScale {
    local::<TextScale>()
}

//! # Core primitives
//!
//! Shared vocabulary for the OTP field crates:
//!
//! - `Rect`, `Size`, `Vec2`: pixel geometry.
//! - `Color`: RGBA colors, with strict `#RRGGBB` / `#AARRGGBB` parsing for
//!   configuration.
//! - `Density`, `dp`, `sp_to_px`: unit conversion against thread‑local
//!   density and text scale (see [`locals`]).
//! - `Scene` and the `DrawSink` trait: the draw‑command seam between a widget
//!   and whatever renders it.
//! - `Invalidation`: flags a widget raises when it needs to be measured,
//!   laid out, or drawn again.

pub mod color;
pub mod error;
pub mod geometry;
pub mod invalidate;
pub mod locals;
pub mod render_api;
pub mod scene;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use invalidate::*;
pub use locals::*;
pub use render_api::*;
pub use scene::*;

//! # OTP field
//!
//! A bounded numeric input drawn as a row of underline slots, one per digit.
//!
//! The widget does not own a text buffer. It is composed with a
//! [`TextHost`] that does (a platform text field, or [`BufferHost`] in
//! memory) and reacts to what the host reports:
//!
//! - size changes rebuild the slot rectangles,
//! - selection changes pin the caret to the end of the text,
//! - text changes push per‑digit spacing back to the host,
//! - `draw` emits rounded bars and the typed digits to any `DrawSink`.
//!
//! ```rust
//! use otp_core::*;
//! use otp_text::FixedMeasure;
//! use otp_ui::*;
//!
//! let mut field = OtpField::new(BufferHost::new(), &FixedMeasure::new(16.0), OtpConfig::default());
//! field.measure_and_resize();
//! field.type_text("123456");
//!
//! let mut scene = Scene::default();
//! field.draw(&mut scene);
//! assert_eq!(field.code(), Some("123456"));
//! ```

pub mod canvas;
pub mod config;
pub mod field;
pub mod host;
pub mod layout;
pub mod slots;
pub mod spacing;

pub use canvas::{DrawCommand, DrawScope};
pub use config::{OtpConfig, SlotHighlight};
pub use field::{OtpField, SelectionOutcome, TextOutcome};
pub use host::{BufferHost, InputConstraints, Notification, Notifications, TextHost};
pub use slots::{SlotMetrics, SlotState};
pub use spacing::{FormatPhase, SpacingMarker};

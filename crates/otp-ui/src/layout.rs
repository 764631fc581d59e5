use taffy::prelude::length;
use taffy::style::{Dimension, Style};

/// A taffy style that pins a node to exactly `size`, whatever its parent
/// proposes.
pub fn fixed_style(size: otp_core::Size) -> Style {
    let exact = taffy::geometry::Size::<Dimension> {
        width: length(size.width),
        height: length(size.height),
    };
    Style {
        size: exact,
        min_size: exact,
        max_size: exact,
        flex_shrink: 0.0,
        ..Default::default()
    }
}

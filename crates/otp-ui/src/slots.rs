use otp_core::{Rect, dpf};
use smallvec::SmallVec;

use crate::config::SlotHighlight;

/// Gap between digit columns, in glyph widths.
pub const SPACE_BETWEEN_CHARACTERS_EM: f32 = 2.0;
/// Slot bars run from this far above the bottom edge...
pub const SLOT_TOP_INSET_DP: f32 = 10.0;
/// ...to this far above it.
pub const SLOT_BOTTOM_INSET_DP: f32 = 7.0;

pub type SlotRects = SmallVec<[Rect; 8]>;

/// Everything the slot geometry derives from the measured glyph width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotMetrics {
    /// Width of one digit glyph.
    pub em_size: f32,
    /// Horizontal inset on each side, also the space after each digit.
    pub padding_px: u32,
}

impl SlotMetrics {
    pub fn new(em_size: f32) -> Self {
        Self {
            em_size,
            padding_px: (SPACE_BETWEEN_CHARACTERS_EM * em_size).max(0.0) as u32,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.em_size * 2.0
    }

    /// Digit columns, the gaps between them, and both insets; whole pixels.
    pub fn desired_width(&self, otp_count: usize) -> u32 {
        let char_space_width = self.em_size * SPACE_BETWEEN_CHARACTERS_EM;
        let all_spaces_width = otp_count.saturating_sub(1) as f32 * char_space_width;
        let all_characters_width = otp_count as f32 * self.em_size;
        all_characters_width as u32 + all_spaces_width as u32 + 2 * self.padding_px
    }

    /// One bar per slot, centered under its digit column, sitting near the
    /// bottom edge of a control `height` pixels tall.
    pub fn layout(&self, otp_count: usize, height: f32) -> SlotRects {
        let em = self.em_size;
        let half_line = self.line_width() / 2.0;
        let top = height - dpf(SLOT_TOP_INSET_DP);
        let bottom = height - dpf(SLOT_BOTTOM_INSET_DP);

        let mut rects = SlotRects::with_capacity(otp_count);
        let mut left = self.padding_px as f32 + em / 2.0 - half_line;
        for _ in 0..otp_count {
            let right = left + self.line_width();
            rects.push(Rect::from_ltrb(left, top, right, bottom));
            // back to the previous column's center, one column over, then recenter
            left = right - half_line - em / 2.0 + (em + self.padding_px as f32) + em / 2.0
                - half_line;
        }
        rects
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Active,
    Inactive,
    Success,
}

/// Per-slot state for a caret at `caret`. A full field is all `Success`.
pub fn slot_states(
    otp_count: usize,
    caret: usize,
    highlight: SlotHighlight,
) -> SmallVec<[SlotState; 8]> {
    if otp_count > 0 && caret == otp_count {
        return SmallVec::from_elem(SlotState::Success, otp_count);
    }
    (0..otp_count)
        .map(|i| {
            let active = match highlight {
                SlotHighlight::Filled => i < caret,
                SlotHighlight::FilledAndNext => i <= caret,
            };
            if active {
                SlotState::Active
            } else {
                SlotState::Inactive
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::{Density, with_density};

    #[test]
    fn test_desired_width() {
        let m = SlotMetrics::new(16.0);
        assert_eq!(m.padding_px, 32);
        // 6 columns + 5 gaps of two glyphs + two insets
        assert_eq!(m.desired_width(6), 96 + 160 + 64);
        assert_eq!(m.desired_width(1), 16 + 64);
        assert_eq!(m.desired_width(0), 64);
    }

    #[test]
    fn test_desired_width_truncates_each_term() {
        let m = SlotMetrics::new(10.25);
        assert_eq!(m.padding_px, 20);
        // 61.5 -> 61, 102.5 -> 102
        assert_eq!(m.desired_width(6), 61 + 102 + 40);
    }

    #[test]
    fn test_layout_positions() {
        let m = SlotMetrics::new(16.0);
        let rects = m.layout(6, 56.0);
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], Rect::from_ltrb(24.0, 46.0, 56.0, 49.0));
        for (i, r) in rects.iter().enumerate() {
            assert_eq!(r.left(), 24.0 + 48.0 * i as f32);
            assert_eq!(r.w, 32.0);
        }
    }

    #[test]
    fn test_layout_is_ordered_and_disjoint() {
        for density in [1.0, 2.0, 3.0] {
            with_density(Density { scale: density }, || {
                for count in 1..=10 {
                    let m = SlotMetrics::new(14.5 * density);
                    let rects = m.layout(count, 56.0 * density);
                    assert_eq!(rects.len(), count);
                    for pair in rects.windows(2) {
                        assert!(pair[0].right() <= pair[1].left());
                        assert!(!pair[0].overlaps(&pair[1]));
                    }
                    for r in &rects {
                        assert_eq!(r.h, 3.0 * density);
                    }
                }
            });
        }
    }

    #[test]
    fn test_bars_center_under_digit_columns() {
        let m = SlotMetrics::new(16.0);
        let rects = m.layout(6, 56.0);
        for (i, r) in rects.iter().enumerate() {
            let glyph = crate::spacing::glyph_left(i, 16.0, 6, m.padding_px);
            assert_eq!(r.center().x, glyph + 8.0);
        }
    }

    #[test]
    fn test_empty_layout_for_zero_count() {
        assert!(SlotMetrics::new(16.0).layout(0, 56.0).is_empty());
    }

    #[test]
    fn test_slot_states() {
        use SlotState::*;
        assert_eq!(
            slot_states(6, 3, SlotHighlight::Filled).as_slice(),
            &[Active, Active, Active, Inactive, Inactive, Inactive]
        );
        assert_eq!(
            slot_states(6, 3, SlotHighlight::FilledAndNext).as_slice(),
            &[Active, Active, Active, Active, Inactive, Inactive]
        );
        assert_eq!(slot_states(6, 6, SlotHighlight::Filled).as_slice(), &[Success; 6]);
        assert_eq!(slot_states(4, 0, SlotHighlight::Filled).as_slice(), &[Inactive; 4]);
        assert!(slot_states(0, 0, SlotHighlight::Filled).is_empty());
    }
}

//! Digit spacing.
//!
//! Each typed digit is followed by extra horizontal space so that digit `i`
//! sits over slot `i`. The space is a pure function of the digit index and the
//! slot count; hosts receive the whole set as [`SpacingMarker`]s and replace
//! whatever they applied before.

use smallvec::SmallVec;

/// Extra space a host must leave after the character at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingMarker {
    pub index: usize,
    pub extra_px: u32,
}

pub type SpacingMarkers = SmallVec<[SpacingMarker; 8]>;

/// Whether the field is currently pushing spacing to its host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatPhase {
    #[default]
    Idle,
    Reformatting,
}

/// The last slot gets no trailing space.
pub fn spacing_after(index: usize, otp_count: usize, padding_px: u32) -> u32 {
    if otp_count.checked_sub(1) == Some(index) {
        0
    } else {
        padding_px
    }
}

/// One marker per typed character.
pub fn spacing_markers(text_len: usize, otp_count: usize, padding_px: u32) -> SpacingMarkers {
    (0..text_len)
        .map(|index| SpacingMarker {
            index,
            extra_px: spacing_after(index, otp_count, padding_px),
        })
        .collect()
}

/// Left edge of the glyph at `index` once spacing is applied.
pub fn glyph_left(index: usize, em_size: f32, otp_count: usize, padding_px: u32) -> f32 {
    (0..index).fold(padding_px as f32, |x, i| {
        x + em_size + spacing_after(i, otp_count, padding_px) as f32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_code_markers() {
        let markers = spacing_markers(6, 6, 32);
        assert_eq!(markers.len(), 6);
        assert!(markers[..5].iter().all(|m| m.extra_px == 32));
        assert_eq!(markers[5], SpacingMarker { index: 5, extra_px: 0 });
        assert!(markers.iter().enumerate().all(|(i, m)| m.index == i));
    }

    #[test]
    fn test_partial_code_markers_all_padded() {
        let markers = spacing_markers(3, 6, 20);
        assert_eq!(markers.len(), 3);
        assert!(markers.iter().all(|m| m.extra_px == 20));
        assert!(spacing_markers(0, 6, 20).is_empty());
    }

    #[test]
    fn test_zero_count_never_underflows() {
        assert_eq!(spacing_after(0, 0, 10), 10);
        assert!(spacing_markers(0, 0, 10).is_empty());
    }

    #[test]
    fn test_glyph_left_steps_by_em_plus_padding() {
        assert_eq!(glyph_left(0, 16.0, 6, 32), 32.0);
        assert_eq!(glyph_left(1, 16.0, 6, 32), 80.0);
        assert_eq!(glyph_left(5, 16.0, 6, 32), 272.0);
    }
}

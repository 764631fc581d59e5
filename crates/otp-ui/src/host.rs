use otp_core::Size;
use otp_text::grapheme_len;
use smallvec::{SmallVec, smallvec};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

use crate::spacing::SpacingMarker;

/// Something the host reports back to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    TextChanged,
    SelectionChanged { start: usize, end: usize },
    SizeChanged { width: u32, height: u32 },
}

pub type Notifications = SmallVec<[Notification; 2]>;

/// Limits the host enforces on edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputConstraints {
    pub max_len: usize,
    pub numeric: bool,
}

impl InputConstraints {
    pub fn otp(max_len: usize) -> Self {
        Self {
            max_len,
            numeric: true,
        }
    }

    /// The part of `insertion` that may go into `current`: non-digits are
    /// dropped in numeric mode, then whatever exceeds `max_len`.
    pub fn filter(&self, current: &str, insertion: &str) -> String {
        let room = self.max_len.saturating_sub(grapheme_len(current));
        insertion
            .graphemes(true)
            .filter(|g| !self.numeric || g.chars().all(|c| c.is_ascii_digit()))
            .take(room)
            .collect()
    }
}

/// The editable, sized surface the field is composed with.
///
/// Positions are grapheme indices. Mutating calls return the notifications
/// the change produced; the field dispatches them before returning.
pub trait TextHost {
    fn text(&self) -> &str;
    fn selection(&self) -> Range<usize>;
    /// `None` until the host has been given a pixel size.
    fn size(&self) -> Option<Size>;

    fn set_selection(&mut self, start: usize, end: usize) -> Notifications;
    fn set_constraints(&mut self, constraints: InputConstraints) -> Notifications;
    /// Replaces any previously applied spacing.
    fn apply_spacing(&mut self, markers: &[SpacingMarker]) -> Notifications;

    fn text_len(&self) -> usize {
        grapheme_len(self.text())
    }
}

/// In-memory host: a string, a selection and a size.
#[derive(Clone, Debug)]
pub struct BufferHost {
    text: String,
    selection: Range<usize>,
    size: Option<Size>,
    constraints: InputConstraints,
    spacing: Vec<SpacingMarker>,
    spacing_applications: usize,
    echo_span_edits: bool,
}

impl Default for BufferHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferHost {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection: 0..0,
            size: None,
            constraints: InputConstraints::otp(usize::MAX),
            spacing: Vec::new(),
            spacing_applications: 0,
            echo_span_edits: false,
        }
    }

    /// Report a text change whenever spacing is applied, like platforms whose
    /// span edits count as text edits.
    pub fn echo_span_edits(mut self, on: bool) -> Self {
        self.echo_span_edits = on;
        self
    }

    pub fn constraints(&self) -> InputConstraints {
        self.constraints
    }

    pub fn spacing(&self) -> &[SpacingMarker] {
        &self.spacing
    }

    pub fn spacing_applications(&self) -> usize {
        self.spacing_applications
    }

    /// Types `s` at the caret, replacing any selected range.
    pub fn insert(&mut self, s: &str) -> Notifications {
        let (start, end) = self.clamped_selection();
        let mut kept = self.text.clone();
        kept.replace_range(self.byte_at(start)..self.byte_at(end), "");

        let accepted = self.constraints.filter(&kept, s);
        if accepted.is_empty() {
            return SmallVec::new();
        }
        let range = self.byte_at(start)..self.byte_at(end);
        self.text.replace_range(range, &accepted);
        let caret = start + grapheme_len(&accepted);
        self.selection = caret..caret;
        smallvec![
            Notification::TextChanged,
            Notification::SelectionChanged {
                start: caret,
                end: caret
            }
        ]
    }

    pub fn delete_backward(&mut self) -> Notifications {
        let (mut start, end) = self.clamped_selection();
        if start == end {
            if start == 0 {
                return SmallVec::new();
            }
            start -= 1;
        }
        let range = self.byte_at(start)..self.byte_at(end);
        self.text.replace_range(range, "");
        self.selection = start..start;
        smallvec![
            Notification::TextChanged,
            Notification::SelectionChanged { start, end: start }
        ]
    }

    pub fn clear(&mut self) -> Notifications {
        if self.text.is_empty() {
            return SmallVec::new();
        }
        self.text.clear();
        self.selection = 0..0;
        smallvec![
            Notification::TextChanged,
            Notification::SelectionChanged { start: 0, end: 0 }
        ]
    }

    /// A pointer press placing the caret at `index`.
    pub fn tap(&mut self, index: usize) -> Notifications {
        let i = index.min(self.text_len());
        self.selection = i..i;
        smallvec![Notification::SelectionChanged { start: i, end: i }]
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Notifications {
        self.size = Some(Size::new(width as f32, height as f32));
        smallvec![Notification::SizeChanged { width, height }]
    }

    fn clamped_selection(&self) -> (usize, usize) {
        let len = self.text_len();
        let a = self.selection.start.min(len);
        let b = self.selection.end.min(len);
        (a.min(b), a.max(b))
    }

    fn byte_at(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl TextHost for BufferHost {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn size(&self) -> Option<Size> {
        self.size
    }

    // Always reports, even when nothing moved.
    fn set_selection(&mut self, start: usize, end: usize) -> Notifications {
        let len = self.text_len();
        let (start, end) = (start.min(len), end.min(len));
        self.selection = start..end;
        smallvec![Notification::SelectionChanged { start, end }]
    }

    fn set_constraints(&mut self, constraints: InputConstraints) -> Notifications {
        self.constraints = constraints;
        if self.text_len() <= constraints.max_len {
            return SmallVec::new();
        }
        let cut = self.byte_at(constraints.max_len);
        self.text.truncate(cut);
        let len = self.text_len();
        self.selection = self.selection.start.min(len)..self.selection.end.min(len);
        smallvec![
            Notification::TextChanged,
            Notification::SelectionChanged {
                start: self.selection.start,
                end: self.selection.end
            }
        ]
    }

    fn apply_spacing(&mut self, markers: &[SpacingMarker]) -> Notifications {
        self.spacing.clear();
        self.spacing.extend_from_slice(markers);
        self.spacing_applications += 1;
        if self.echo_span_edits {
            smallvec![Notification::TextChanged]
        } else {
            SmallVec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_numeric_and_length() {
        let c = InputConstraints::otp(4);
        assert_eq!(c.filter("", "12a3-45"), "1234");
        assert_eq!(c.filter("123", "45"), "4");
        assert_eq!(c.filter("1234", "5"), "");

        let free = InputConstraints {
            max_len: 3,
            numeric: false,
        };
        assert_eq!(free.filter("", "ab12"), "ab1");
    }

    #[test]
    fn test_insert_respects_constraints() {
        let mut host = BufferHost::new();
        host.set_constraints(InputConstraints::otp(6));
        let ns = host.insert("12x34");
        assert_eq!(host.text(), "1234");
        assert_eq!(host.selection(), 4..4);
        assert_eq!(
            ns.as_slice(),
            &[
                Notification::TextChanged,
                Notification::SelectionChanged { start: 4, end: 4 }
            ]
        );

        assert!(host.insert("abc").is_empty());
        host.insert("567890");
        assert_eq!(host.text(), "123456");
    }

    #[test]
    fn test_insert_in_middle_and_replace_selection() {
        let mut host = BufferHost::new();
        host.insert("1256");
        host.tap(2);
        host.insert("34");
        assert_eq!(host.text(), "123456");
        assert_eq!(host.selection(), 4..4);

        host.set_constraints(InputConstraints::otp(6));
        host.set_selection(0, 6);
        host.insert("9");
        assert_eq!(host.text(), "9");
    }

    #[test]
    fn test_delete_backward() {
        let mut host = BufferHost::new();
        host.insert("123");
        host.delete_backward();
        assert_eq!(host.text(), "12");
        assert_eq!(host.selection(), 2..2);

        host.tap(0);
        assert!(host.delete_backward().is_empty());
        assert_eq!(host.text(), "12");
    }

    #[test]
    fn test_shrinking_constraints_truncates() {
        let mut host = BufferHost::new();
        host.insert("123456");
        let ns = host.set_constraints(InputConstraints::otp(4));
        assert_eq!(host.text(), "1234");
        assert_eq!(host.selection(), 4..4);
        assert_eq!(ns[0], Notification::TextChanged);

        assert!(host.set_constraints(InputConstraints::otp(8)).is_empty());
    }

    #[test]
    fn test_apply_spacing_replaces() {
        let mut host = BufferHost::new().echo_span_edits(true);
        let m = |index| SpacingMarker { index, extra_px: 5 };
        host.apply_spacing(&[m(0), m(1)]);
        let ns = host.apply_spacing(&[m(0)]);
        assert_eq!(host.spacing(), &[m(0)]);
        assert_eq!(host.spacing_applications(), 2);
        assert_eq!(ns.as_slice(), &[Notification::TextChanged]);
    }
}

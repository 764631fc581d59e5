use ahash::AHashMap;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use once_cell::sync::OnceCell;
use otp_core::OtpError;
use parking_lot::Mutex;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Horizontal advance of a run of text at a pixel size.
pub trait GlyphMeasure {
    fn advance(&self, text: &str, px: f32) -> f32;
}

/// Every grapheme advances by the same fixed width, whatever the size.
/// Deterministic stand-in for hosts without fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMeasure {
    pub width: f32,
}

impl FixedMeasure {
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

impl GlyphMeasure for FixedMeasure {
    fn advance(&self, text: &str, _px: f32) -> f32 {
        grapheme_len(text) as f32 * self.width
    }
}

/// Shaped measurement through the shared cosmic-text font system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapedMeasure {
    /// Font family name; `None` resolves to the generic monospace family.
    pub family: Option<String>,
    pub bold: bool,
}

impl ShapedMeasure {
    pub fn monospace_bold() -> Self {
        Self {
            family: None,
            bold: true,
        }
    }

    pub fn with_family(family: impl Into<String>, bold: bool) -> Self {
        Self {
            family: Some(family.into()),
            bold,
        }
    }
}

impl GlyphMeasure for ShapedMeasure {
    fn advance(&self, text: &str, px: f32) -> f32 {
        let w = shaped_width(text, px, self.family.as_deref(), self.bold);
        if w > 0.0 || text.is_empty() {
            return w;
        }
        // No face resolved (headless box without fonts); rough glyph-width estimate.
        log::warn!("no font resolved for {:?}; estimating advance", self.family);
        grapheme_len(text) as f32 * px * 0.6
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    family: Option<String>,
    bold: bool,
    text: String,
    px_bits: u32,
}

struct Engine {
    fs: FontSystem,
    widths: AHashMap<MeasureKey, f32>,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        Mutex::new(Engine {
            fs: FontSystem::new(),
            widths: AHashMap::new(),
        })
    })
}

// Single-line shaping (no wrapping); width of the widest run.
fn shaped_width(text: &str, px: f32, family: Option<&str>, bold: bool) -> f32 {
    let key = MeasureKey {
        family: family.map(str::to_string),
        bold,
        text: text.to_string(),
        px_bits: px.to_bits(),
    };
    let mut guard = engine().lock();
    if let Some(&w) = guard.widths.get(&key) {
        return w;
    }

    let eng = &mut *guard;
    let attrs = Attrs::new()
        .family(family.map(Family::Name).unwrap_or(Family::Monospace))
        .weight(if bold { Weight::BOLD } else { Weight::NORMAL });
    let mut buf = Buffer::new(&mut eng.fs, Metrics::new(px, px * 1.3));
    {
        let mut b = buf.borrow_with(&mut eng.fs);
        b.set_size(None, None);
        b.set_text(text, &attrs, Shaping::Advanced, None);
        b.shape_until_scroll(true);
    }
    let w = buf
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0f32, f32::max);

    eng.widths.insert(key, w);
    w
}

/// Registers font bytes with the shared font system.
pub fn load_font_data(data: Vec<u8>) -> Result<usize, OtpError> {
    let mut eng = engine().lock();
    let before = eng.fs.db().len();
    eng.fs.db_mut().load_font_data(data);
    let added = eng.fs.db().len() - before;
    if added == 0 {
        return Err(OtpError::Font("no font faces found in data".to_string()));
    }
    eng.widths.clear();
    log::debug!("registered {added} font face(s)");
    Ok(added)
}

/// Registers a font file (TTF/OTF/TTC) with the shared font system.
pub fn load_font_file(path: impl AsRef<Path>) -> Result<usize, OtpError> {
    let path = path.as_ref();
    let data =
        std::fs::read(path).map_err(|e| OtpError::Font(format!("{}: {e}", path.display())))?;
    load_font_data(data).map_err(|e| match e {
        OtpError::Font(msg) => OtpError::Font(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Number of user-perceived characters.
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_measure_counts_graphemes() {
        let m = FixedMeasure::new(10.0);
        assert_eq!(m.advance("1", 26.0), 10.0);
        assert_eq!(m.advance("123", 99.0), 30.0);
        assert_eq!(m.advance("", 26.0), 0.0);
    }

    #[test]
    fn test_grapheme_len() {
        assert_eq!(grapheme_len("123456"), 6);
        assert_eq!(grapheme_len("e\u{301}"), 1);
    }

    #[test]
    fn test_shaped_measure_positive_for_digit() {
        // Falls back to an estimate when the box has no fonts.
        let m = ShapedMeasure::monospace_bold();
        assert!(m.advance("1", 26.0) > 0.0);
        assert_eq!(m.advance("", 26.0), 0.0);
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        assert!(matches!(
            load_font_data(b"definitely not a font".to_vec()),
            Err(OtpError::Font(_))
        ));
        assert!(matches!(
            load_font_file("/nonexistent/otp-font.ttf"),
            Err(OtpError::Font(_))
        ));
    }
}

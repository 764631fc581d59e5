use otp_core::*;
use otp_text::GlyphMeasure;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::OtpConfig;
use crate::host::{BufferHost, InputConstraints, Notification, Notifications, TextHost};
use crate::layout::fixed_style;
use crate::slots::{SlotMetrics, SlotRects, SlotState, slot_states};
use crate::spacing::{FormatPhase, SpacingMarkers, glyph_left, spacing_markers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Selection was already at the end of the text.
    Accepted,
    /// Selection was elsewhere and has been moved to the end.
    Pinned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextOutcome {
    Reformatted { markers: usize },
    /// Arrived while spacing was being applied.
    Suppressed,
}

/// A fixed-length numeric code field: one underline slot per digit, caret
/// always at the end, digits spaced so each sits over its slot.
///
/// The field owns no text. It is composed with a [`TextHost`] and reacts to
/// the host's notifications; draw output goes to any [`DrawSink`].
///
/// Geometry reads the thread-local [`Density`], so hosts call into the field
/// inside `with_density`.
pub struct OtpField<H: TextHost> {
    host: H,
    config: OtpConfig,
    text_style: TextStyle,
    metrics: SlotMetrics,
    slots: SlotRects,
    size: Option<Size>,
    phase: FormatPhase,
    invalid: Invalidation,
    reformat_passes: usize,
}

impl<H: TextHost> OtpField<H> {
    /// Builds the field measuring with the configured font family, shaped
    /// through cosmic-text.
    pub fn from_config(host: H, config: OtpConfig) -> Self {
        let measure = config.glyph_measure();
        Self::new(host, &measure, config)
    }

    /// Measures the digit glyph once, installs the input constraints on the
    /// host and lays out if the host already has a size.
    pub fn new(host: H, measure: &impl GlyphMeasure, config: OtpConfig) -> Self {
        let font_px = sp_to_px(config.font_size_sp);
        let em_size = measure.advance("1", font_px);
        let metrics = SlotMetrics::new(em_size);
        if config.otp_count == 0 {
            log::warn!("otp field created with zero slots; layout will be empty");
        }
        log::debug!(
            "otp field: {} slots, em {em_size:.2}px, padding {}px",
            config.otp_count,
            metrics.padding_px
        );

        let text_style = config.text_style(font_px);
        let mut field = Self {
            host,
            config,
            text_style,
            metrics,
            slots: SlotRects::new(),
            size: None,
            phase: FormatPhase::Idle,
            invalid: Invalidation::full(),
            reformat_passes: 0,
        };
        let ns = field
            .host
            .set_constraints(InputConstraints::otp(field.config.otp_count));
        let reformatted = ns.contains(&Notification::TextChanged);
        field.dispatch_all(ns);
        if let Some(size) = field.host.size() {
            field.on_size_changed(size.width as u32, size.height as u32);
        }
        if !reformatted && !field.host.text().is_empty() {
            field.on_text_changed();
        }
        field
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct host access. Notifications produced through this handle are
    /// not seen by the field unless passed to [`OtpField::dispatch`].
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    pub fn otp_count(&self) -> usize {
        self.config.otp_count
    }

    pub fn em_size(&self) -> f32 {
        self.metrics.em_size
    }

    pub fn padding_px(&self) -> u32 {
        self.metrics.padding_px
    }

    pub fn font_px(&self) -> f32 {
        self.text_style.size
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    pub fn phase(&self) -> FormatPhase {
        self.phase
    }

    /// How many times spacing has been pushed to the host.
    pub fn reformat_passes(&self) -> usize {
        self.reformat_passes
    }

    pub fn invalidation(&self) -> Invalidation {
        self.invalid
    }

    /// Returns the pending invalidation and clears it.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalid)
    }

    /// Changes the slot count. The host's length limit follows, and the
    /// slots are rebuilt right away when a size is already known.
    pub fn set_otp_count(&mut self, otp_count: usize) {
        if otp_count == self.config.otp_count {
            return;
        }
        if otp_count == 0 {
            log::warn!("otp count set to zero; layout will be empty");
        }
        log::debug!("otp count {} -> {otp_count}", self.config.otp_count);
        self.config.otp_count = otp_count;
        self.invalid |= Invalidation::full();
        self.relayout();
        let ns = self.host.set_constraints(InputConstraints::otp(otp_count));
        let reformatted = ns.contains(&Notification::TextChanged);
        self.dispatch_all(ns);
        // the zero-spacing slot moved
        if !reformatted && !self.host.text().is_empty() {
            self.on_text_changed();
        }
    }

    /// The exact size this field occupies. Whatever the host proposes is
    /// ignored.
    pub fn measure(&mut self, proposed: Option<Size>) -> Size {
        let size = Size::new(
            self.metrics.desired_width(self.config.otp_count) as f32,
            dpf(self.config.height_dp),
        );
        if let Some(p) = proposed
            && p != size
        {
            log::trace!("ignoring proposed size {p:?}, requesting {size:?}");
        }
        self.invalid.remove(Invalidation::NEEDS_MEASURE);
        size
    }

    /// Layout style for taffy-based hosts: [`OtpField::measure`] as a
    /// definite, non-shrinking size.
    pub fn layout_style(&mut self) -> taffy::style::Style {
        fixed_style(self.measure(None))
    }

    pub fn dispatch(&mut self, notification: Notification) {
        match notification {
            Notification::TextChanged => {
                self.on_text_changed();
            }
            Notification::SelectionChanged { start, end } => {
                self.on_selection_changed(start, end);
            }
            Notification::SizeChanged { width, height } => self.on_size_changed(width, height),
        }
    }

    pub fn dispatch_all(&mut self, notifications: Notifications) {
        for n in notifications {
            self.dispatch(n);
        }
    }

    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.size = Some(Size::new(width as f32, height as f32));
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some(size) = self.size else {
            return;
        };
        self.slots = self.metrics.layout(self.config.otp_count, size.height);
        self.invalid.remove(Invalidation::NEEDS_LAYOUT);
        self.invalid |= Invalidation::NEEDS_DRAW;
        log::debug!(
            "laid out {} slots for {}x{}",
            self.slots.len(),
            size.width,
            size.height
        );
    }

    /// Keeps the caret after the last digit; any other selection is replaced.
    pub fn on_selection_changed(&mut self, start: usize, end: usize) -> SelectionOutcome {
        let len = self.host.text_len();
        if start != len || end != len {
            log::trace!("pinning selection {start}..{end} to {len}");
            let ns = self.host.set_selection(len, len);
            self.dispatch_all(ns);
            return SelectionOutcome::Pinned;
        }
        self.invalid |= Invalidation::NEEDS_DRAW;
        SelectionOutcome::Accepted
    }

    /// Pushes fresh spacing for the current text to the host. Text changes
    /// the host reports while doing so are not reformatted again.
    pub fn on_text_changed(&mut self) -> TextOutcome {
        if self.phase == FormatPhase::Reformatting {
            log::trace!("text change during reformat suppressed");
            return TextOutcome::Suppressed;
        }
        self.phase = FormatPhase::Reformatting;
        let markers = self.spacing_markers();
        let ns = self.host.apply_spacing(&markers);
        self.reformat_passes += 1;
        self.dispatch_all(ns);
        self.phase = FormatPhase::Idle;
        self.invalid |= Invalidation::NEEDS_DRAW;
        TextOutcome::Reformatted {
            markers: markers.len(),
        }
    }

    pub fn spacing_markers(&self) -> SpacingMarkers {
        spacing_markers(
            self.host.text_len(),
            self.config.otp_count,
            self.metrics.padding_px,
        )
    }

    /// Caret position used for highlighting.
    pub fn caret(&self) -> usize {
        self.host.selection().start
    }

    pub fn slot_states(&self) -> smallvec::SmallVec<[SlotState; 8]> {
        slot_states(self.config.otp_count, self.caret(), self.config.highlight)
    }

    pub fn is_complete(&self) -> bool {
        self.config.otp_count > 0 && self.host.text_len() == self.config.otp_count
    }

    /// The entered code once every slot is filled.
    pub fn code(&self) -> Option<&str> {
        self.is_complete().then(|| self.host.text())
    }

    /// Slot bars, then the typed digits. Nothing is drawn before the first
    /// size change.
    pub fn draw<S: DrawSink + ?Sized>(&mut self, sink: &mut S) {
        let Some(size) = self.size else {
            return;
        };
        let radius = dpf(self.config.corner_radius_dp);
        for (rect, state) in self.slots.iter().zip(self.slot_states()) {
            let color = match state {
                SlotState::Active => self.config.active_color,
                SlotState::Inactive => self.config.inactive_color,
                SlotState::Success => self.config.success_color,
            };
            sink.draw_round_rect(*rect, radius, color);
        }

        let line_h = self.text_style.size * 1.3;
        let y = (size.height - line_h) / 2.0;
        let count = self.config.otp_count;
        for (i, digit) in self.host.text().graphemes(true).take(count).enumerate() {
            let x = glyph_left(i, self.metrics.em_size, count, self.metrics.padding_px);
            sink.draw_text(
                digit,
                Rect {
                    x,
                    y,
                    w: self.metrics.em_size,
                    h: line_h,
                },
                self.config.text_color,
                &self.text_style,
            );
        }
        self.invalid.remove(Invalidation::NEEDS_DRAW);
    }
}

/// Input helpers for the in-memory host: each drives the host and dispatches
/// what it reports.
impl OtpField<BufferHost> {
    pub fn type_text(&mut self, s: &str) {
        let ns = self.host.insert(s);
        self.dispatch_all(ns);
    }

    pub fn backspace(&mut self) {
        let ns = self.host.delete_backward();
        self.dispatch_all(ns);
    }

    pub fn clear(&mut self) {
        let ns = self.host.clear();
        self.dispatch_all(ns);
    }

    pub fn tap_at(&mut self, index: usize) {
        let ns = self.host.tap(index);
        self.dispatch_all(ns);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let ns = self.host.resize(width, height);
        self.dispatch_all(ns);
    }

    /// Measures, then resizes the host to the measured size.
    pub fn measure_and_resize(&mut self) -> Size {
        let size = self.measure(None);
        self.resize(size.width as u32, size.height as u32);
        size
    }
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::Widget,
};

/// Single-row practice gauge. Renders two fills: the committed progress and,
/// while the slider is being dragged, the preview value layered beyond it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressGauge<'a> {
    filled_ratio: f64,
    preview_ratio: f64,
    label: Option<Span<'a>>,
    filled_style: Style,
    preview_style: Style,
    remaining_style: Style,
}

impl<'a> ProgressGauge<'a> {
    pub fn ratios(mut self, filled: f64, preview: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&filled),
            "Filled ratio must be between 0 and 1"
        );
        assert!(
            (0.0..=1.0).contains(&preview),
            "Preview ratio must be between 0 and 1"
        );

        self.filled_ratio = filled;
        self.preview_ratio = preview;
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub fn filled_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.filled_style = style.into();
        self
    }

    pub fn preview_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.preview_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }
}

fn get_unicode_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for ProgressGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = area.width as f64;
        let filled_pos = width * self.filled_ratio;
        let preview_pos = width * self.preview_ratio;

        let label = if let Some(label) = self.label.as_ref() {
            label
        } else {
            &Span::raw(format!(
                "{}%",
                (self.preview_ratio.max(self.filled_ratio) * 100.0).round() as u16
            ))
        };

        let label_col = area.left() + (area.width.saturating_sub(label.width() as u16)) / 2;
        let label_row = area.top() + area.height / 2;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let pos = f64::from(x - area.left());

                let mut symbol = symbols::block::FULL;
                let mut style = self.remaining_style;

                if pos < filled_pos {
                    style = self.filled_style;
                    if pos + 1.0 > filled_pos {
                        symbol = get_unicode_block(filled_pos - pos);
                    }
                } else if pos < preview_pos {
                    style = self.preview_style;
                    if pos + 1.0 > preview_pos {
                        symbol = get_unicode_block(preview_pos - pos);
                    }
                } else {
                    symbol = " ";
                }

                if x >= label_col && x < label_col + label.width() as u16 && y == label_row {
                    symbol = " ";
                    style = style.bg(style.fg.unwrap_or_default());
                }

                buf[(x, y)]
                    .set_symbol(symbol)
                    .set_fg(style.fg.unwrap_or_default())
                    .set_bg(style.bg.unwrap_or_default());
            }
        }

        buf.set_span(label_col, label_row, label, label.width() as u16);
    }
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::http::model::{status, Instrument, Song};
use crate::ui::{
    components::{gauge::ProgressGauge, spinner::Spinner},
    helpers::truncate_to_width,
    state::ViewState,
    theme::Theme,
};

const NAME_COLUMN: usize = 12;

/// The song cards. Each song takes one row plus one row per instrument;
/// the viewport scrolls just enough to keep the selection visible.
pub struct SongList<'a> {
    state: &'a ViewState,
    theme: &'a Theme,
}

impl<'a> SongList<'a> {
    pub fn new(state: &'a ViewState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn selection_row(&self) -> usize {
        let mut row = 0;
        for song in self.state.songs.iter().take(self.state.selected) {
            row += 1 + song.instruments.len();
        }
        if let Some(index) = self.state.instrument {
            row += index + 1;
        }
        row
    }

    fn status_style(&self, song: &Song) -> Style {
        let color = match song.status.as_str() {
            status::MASTERED => self.theme.success,
            status::PRACTICING => self.theme.primary,
            status::WANT_TO_PLAY => self.theme.warning,
            _ => self.theme.muted,
        };
        let style = Style::default().fg(color);
        if self.state.is_locked(song.id) {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    fn render_song_row(&self, song: &Song, selected: bool, area: Rect, buf: &mut Buffer) {
        let chip = format!("[{}]", song.status);
        let chip_width = UnicodeWidthStr::width(chip.as_str()) as u16;

        let marker = if selected { "> " } else { "  " };
        let text_budget = usize::from(area.width.saturating_sub(chip_width + 3));
        let text = truncate_to_width(
            &format!("♪ {} - {}", song.title, song.artist_label()),
            text_budget,
        );

        let row_style = if selected {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        };

        buf.set_string(area.x, area.y, marker, row_style);
        buf.set_string(area.x + 2, area.y, text, row_style);

        if area.width > chip_width {
            let chip_x = area.right().saturating_sub(chip_width);
            buf.set_span(
                chip_x,
                area.y,
                &Span::styled(chip, self.status_style(song)),
                chip_width,
            );
        }
    }

    fn render_instrument_row(
        &self,
        instrument: &Instrument,
        selected: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let marker = if selected { "> " } else { "  " };
        let marker_style = Style::default()
            .fg(self.theme.primary)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x, area.y, marker, marker_style);

        let name = truncate_to_width(&instrument.name, NAME_COLUMN);
        let mut padded = name.clone();
        for _ in UnicodeWidthStr::width(name.as_str())..NAME_COLUMN {
            padded.push(' ');
        }
        let name_style = if selected {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        };
        buf.set_string(area.x + 4, area.y, &padded, name_style);

        let gauge_x = area.x + 4 + NAME_COLUMN as u16 + 1;
        if gauge_x >= area.right() {
            return;
        }
        let gauge_area = Rect::new(gauge_x, area.y, area.right() - gauge_x, 1);

        let saved = f64::from(instrument.progress) / 100.0;
        let (shown, filled, preview) = match &self.state.drag {
            Some(drag) if drag.instrument_id == instrument.id => {
                let dragged = f64::from(drag.value) / 100.0;
                (drag.value, saved.min(dragged), saved.max(dragged))
            }
            _ => (instrument.progress, saved, saved),
        };

        ProgressGauge::default()
            .ratios(filled, preview)
            .label(format!("{}%", shown))
            .filled_style(Style::default().fg(self.theme.primary))
            .preview_style(Style::default().fg(self.theme.secondary))
            .remaining_style(Style::default().fg(self.theme.surface))
            .render(gauge_area, buf);
    }
}

impl Widget for SongList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        if self.state.songs.is_empty() {
            if self.state.loading {
                Spinner::new()
                    .with_label("Loading songs")
                    .with_style(Style::default().fg(self.theme.muted))
                    .render(area, buf);
            } else {
                let message = "No songs yet. Press a to add one.";
                let width = UnicodeWidthStr::width(message) as u16;
                let x = area.x + area.width.saturating_sub(width) / 2;
                let y = area.y + area.height / 2;
                buf.set_string(x, y, message, Style::default().fg(self.theme.muted));
            }
            return;
        }

        let height = usize::from(area.height);
        let sel_row = self.selection_row();
        let offset = if sel_row >= height { sel_row + 1 - height } else { 0 };

        let mut row = 0;
        for (song_index, song) in self.state.songs.iter().enumerate() {
            for line in 0..=song.instruments.len() {
                if row >= offset && row < offset + height {
                    let y = area.y + (row - offset) as u16;
                    let row_area = Rect::new(area.x, y, area.width, 1);
                    if line == 0 {
                        let selected = song_index == self.state.selected
                            && self.state.instrument.is_none();
                        self.render_song_row(song, selected, row_area, buf);
                    } else {
                        let selected = song_index == self.state.selected
                            && self.state.instrument == Some(line - 1);
                        self.render_instrument_row(
                            &song.instruments[line - 1],
                            selected,
                            row_area,
                            buf,
                        );
                    }
                }
                row += 1;
            }
        }
    }
}

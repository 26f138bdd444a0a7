use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::ui::{
    helpers::{centered_rect, truncate_to_width},
    state::DialogChoice,
    theme::Theme,
};

/// Modal delete confirmation. Drawn over the whole screen; clears its own
/// patch so the list underneath does not bleed through.
pub struct DeleteDialogWidget<'a> {
    song_title: &'a str,
    choice: DialogChoice,
    theme: &'a Theme,
}

impl<'a> DeleteDialogWidget<'a> {
    pub fn new(song_title: &'a str, choice: DialogChoice, theme: &'a Theme) -> Self {
        Self {
            song_title,
            choice,
            theme,
        }
    }

    fn button(&self, label: &str, active: bool, danger: bool) -> Span<'static> {
        let mut style = if danger {
            Style::default().fg(self.theme.error)
        } else {
            Style::default().fg(self.theme.text)
        };
        if active {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Span::styled(format!("[ {} ]", label), style)
    }
}

impl Widget for DeleteDialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered_rect(50, 30, area);
        if dialog_area.is_empty() {
            return;
        }

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(self.theme.warning))
            .title(Span::styled(
                "Delete song?",
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.surface));

        let title_budget = usize::from(dialog_area.width.saturating_sub(6));
        let title = truncate_to_width(self.song_title, title_budget);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Delete \"{}\"?", title),
                Style::default().fg(self.theme.text),
            )),
            Line::from(Span::styled(
                "This removes the song and its progress.",
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(vec![
                self.button(
                    "Keep practicing",
                    self.choice == DialogChoice::Cancel,
                    false,
                ),
                Span::raw("   "),
                self.button("Delete it", self.choice == DialogChoice::Delete, true),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(dialog_area, buf);
    }
}

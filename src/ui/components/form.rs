use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::{
    state::{Focus, FormField, SongForm},
    theme::Theme,
};

pub struct SongFormWidget<'a> {
    form: &'a SongForm,
    focus: Focus,
    theme: &'a Theme,
}

impl<'a> SongFormWidget<'a> {
    pub fn new(form: &'a SongForm, focus: Focus, theme: &'a Theme) -> Self {
        Self { form, focus, theme }
    }

    fn is_active(&self, field: FormField) -> bool {
        self.focus == Focus::Form(field)
    }

    fn field_line(&self, name: &str, field: FormField, placeholder: &str) -> Line<'static> {
        let active = self.is_active(field);
        let label_style = if active {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };

        let mut spans = vec![Span::styled(format!("{:<13}", name), label_style)];

        let value = self.form.buffer(field);
        if value.is_empty() {
            spans.push(Span::styled(
                placeholder.to_string(),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(
                value.to_string(),
                Style::default().fg(self.theme.text),
            ));
        }
        if active {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        Line::from(spans)
    }

    /// The instruments row shows the collected chips first, then whatever is
    /// being typed. The chip under the cursor renders reversed.
    fn instruments_line(&self) -> Line<'static> {
        let active = self.is_active(FormField::Instruments);
        let label_style = if active {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };

        let mut spans = vec![Span::styled(format!("{:<13}", "Instruments"), label_style)];

        for (index, tag) in self.form.tags.iter().enumerate() {
            let mut chip_style = Style::default().fg(self.theme.secondary);
            if active && self.form.chip_cursor == Some(index) {
                chip_style = chip_style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("[{}]", tag), chip_style));
            spans.push(Span::raw(" "));
        }

        if self.form.instrument.is_empty() && self.form.tags.is_empty() {
            spans.push(Span::styled(
                "<type a name, Enter adds>".to_string(),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(
                self.form.instrument.clone(),
                Style::default().fg(self.theme.text),
            ));
        }

        if active && self.form.chip_cursor.is_none() {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        Line::from(spans)
    }
}

impl Widget for SongFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let in_form = matches!(self.focus, Focus::Form(_));
        let border_style = if in_form {
            Style::default().fg(self.theme.primary)
        } else {
            Style::default().fg(self.theme.muted)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(border_style)
            .title("Add song");

        let lines = vec![
            self.field_line("Title", FormField::Title, "<required>"),
            self.field_line("Artist", FormField::Artist, "<optional>"),
            self.instruments_line(),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

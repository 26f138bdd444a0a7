use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::ui::{
    app::App,
    components::{
        dialog::DeleteDialogWidget, form::SongFormWidget, song_list::SongList,
    },
    state::{DeleteDialog, Focus, ViewState},
    theme::{Theme, ThemeMode},
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        AppLayout::new(&self.state).render(area, buf);
    }
}

pub struct AppLayout<'a> {
    state: &'a ViewState,
}

impl<'a> AppLayout<'a> {
    pub fn new(state: &'a ViewState) -> Self {
        Self { state }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.state.theme.theme();
        buf.set_style(area, Style::new().bg(theme.background).fg(theme.text));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(theme, chunks[0], buf);

        SongFormWidget::new(&self.state.form, self.state.focus, theme)
            .render(chunks[1], buf);

        let list_border = if self.state.focus == Focus::List {
            Style::default().fg(theme.primary)
        } else {
            Style::default().fg(theme.muted)
        };
        let list_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(list_border)
            .title(format!("Practicing ({})", self.state.songs.len()));
        let list_inner = list_block.inner(chunks[2]);
        list_block.render(chunks[2], buf);
        SongList::new(self.state, theme).render(list_inner, buf);

        self.render_footer(theme, chunks[3], buf);

        if let DeleteDialog::Confirming { song_id, choice } = &self.state.dialog {
            let title = self
                .state
                .songs
                .iter()
                .find(|song| song.id == *song_id)
                .map(|song| song.title.as_str())
                .unwrap_or("this song");
            DeleteDialogWidget::new(title, *choice, theme).render(area, buf);
        }
    }

    fn render_header(&self, theme: &Theme, area: Rect, buf: &mut Buffer) {
        buf.set_string(
            area.x + 1,
            area.y,
            "♫ GrooveLog",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        );

        let mode = match self.state.theme {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        };
        let width = UnicodeWidthStr::width(mode) as u16;
        if area.width > width + 1 {
            buf.set_string(
                area.right() - width - 1,
                area.y,
                mode,
                Style::default().fg(theme.muted),
            );
        }
    }

    fn render_footer(&self, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.muted);

        let pairs: &[(&str, &str)] =
            if matches!(self.state.dialog, DeleteDialog::Confirming { .. }) {
                &[
                    ("[←/→]", " Choose   "),
                    ("[Enter]", " Confirm   "),
                    ("[Esc]", " Cancel"),
                ]
            } else if matches!(self.state.focus, Focus::Form(_)) {
                &[
                    ("[Tab]", " Next field   "),
                    ("[Enter]", " Submit/Add   "),
                    ("[Esc]", " List"),
                ]
            } else if self.state.drag.is_some() {
                &[
                    ("[h/l]", " Adjust   "),
                    ("[Enter]", " Save   "),
                    ("[Esc]", " Discard"),
                ]
            } else {
                &[
                    ("[j/k]", " Move   "),
                    ("[a]", " Add   "),
                    ("[1/2/3]", " Status   "),
                    ("[h/l]", " Progress   "),
                    ("[d]", " Delete   "),
                    ("[t]", " Theme   "),
                    ("[q]", " Quit"),
                ]
            };

        let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
        spans.push(Span::raw(" "));
        for (key, action) in pairs {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::styled(action.to_string(), text_style));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

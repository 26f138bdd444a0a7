use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::events::Event;
use crate::http::model::status;
use crate::ui::state::{DeleteDialog, DialogChoice, Focus, FormField, ViewState};

pub struct InputHandler;

impl InputHandler {
    /// Translate a keypress into a state event. The dialog swallows keys
    /// while open; otherwise the focused panel decides what a key means.
    pub fn map_key(state: &ViewState, key: KeyEvent) -> Option<Event> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Event::Quit);
        }

        if let DeleteDialog::Confirming { choice, .. } = &state.dialog {
            return Self::dialog_key(*choice, key);
        }

        match state.focus {
            Focus::Form(field) => Self::form_key(state, field, key),
            Focus::List => Self::list_key(state, key),
        }
    }

    fn dialog_key(choice: DialogChoice, key: KeyEvent) -> Option<Event> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Event::DialogLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Event::DialogRight),
            KeyCode::Tab | KeyCode::BackTab => match choice {
                DialogChoice::Cancel => Some(Event::DialogRight),
                DialogChoice::Delete => Some(Event::DialogLeft),
            },
            KeyCode::Enter => match choice {
                DialogChoice::Cancel => Some(Event::CancelDelete),
                DialogChoice::Delete => Some(Event::ConfirmDelete),
            },
            KeyCode::Esc | KeyCode::Char('n') => Some(Event::CancelDelete),
            KeyCode::Char('y') => Some(Event::ConfirmDelete),
            _ => None,
        }
    }

    fn form_key(state: &ViewState, field: FormField, key: KeyEvent) -> Option<Event> {
        match key.code {
            KeyCode::Esc => Some(Event::FocusList),
            KeyCode::Tab => Some(Event::FocusNext),
            KeyCode::BackTab => Some(Event::FocusPrev),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Enter => {
                if field == FormField::Instruments && !state.form.instrument.is_empty() {
                    Some(Event::AddInstrument)
                } else {
                    Some(Event::Submit)
                }
            }
            KeyCode::Delete if field == FormField::Instruments => {
                Some(Event::RemoveInstrument)
            }
            KeyCode::Left if field == FormField::Instruments => Some(Event::ChipLeft),
            KeyCode::Right if field == FormField::Instruments => Some(Event::ChipRight),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Event::Input(ch))
            }
            _ => None,
        }
    }

    fn list_key(state: &ViewState, key: KeyEvent) -> Option<Event> {
        match key.code {
            KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Event::SelectDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::SelectUp),
            KeyCode::Char('g') => Some(Event::SelectFirst),
            KeyCode::Char('G') => Some(Event::SelectLast),
            KeyCode::Char('h') | KeyCode::Left => Some(Event::NudgeProgress(-5)),
            KeyCode::Char('l') | KeyCode::Right => Some(Event::NudgeProgress(5)),
            KeyCode::Enter if state.drag.is_some() => Some(Event::CommitProgress),
            KeyCode::Esc if state.drag.is_some() => Some(Event::CancelDrag),
            KeyCode::Char('1') => Some(Event::SetStatus(status::WANT_TO_PLAY.to_string())),
            KeyCode::Char('2') => Some(Event::SetStatus(status::PRACTICING.to_string())),
            KeyCode::Char('3') => Some(Event::SetStatus(status::MASTERED.to_string())),
            KeyCode::Char('d') | KeyCode::Delete => Some(Event::RequestDelete),
            KeyCode::Char('a') => Some(Event::FocusForm),
            KeyCode::Char('t') => Some(Event::ToggleTheme),
            KeyCode::Tab => Some(Event::FocusNext),
            KeyCode::BackTab => Some(Event::FocusPrev),
            _ => None,
        }
    }
}

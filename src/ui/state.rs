use im::{HashSet, Vector};

use crate::event::events::{Command, Event};
use crate::http::model::{CreateSong, Instrument, InstrumentId, Song, SongId};
use crate::ui::theme::ThemeMode;

pub const DEFAULT_INSTRUMENTS: [&str; 4] = ["Guitar", "Bass", "Drums", "Vocals"];

/// Everything the screen is drawn from. One immutable record; every event
/// produces the next record plus the side effects to run, so the lock set,
/// dialog and buffer invariants can be checked without a terminal attached.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub songs: Vector<Song>,
    pub loading: bool,
    pub form: SongForm,
    pub focus: Focus,
    pub selected: usize,
    pub instrument: Option<usize>,
    pub drag: Option<Drag>,
    pub dialog: DeleteDialog,
    pub locked: HashSet<SongId>,
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Form(FormField),
    #[default]
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Artist,
    Instruments,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteDialog {
    #[default]
    Idle,
    Confirming {
        song_id: SongId,
        choice: DialogChoice,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Cancel,
    Delete,
}

/// In-flight slider value for one instrument. Purely presentational until
/// committed; the cached song list keeps the last saved value underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub instrument_id: InstrumentId,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SongForm {
    pub title: String,
    pub artist: String,
    pub instrument: String,
    pub tags: Vector<String>,
    pub chip_cursor: Option<usize>,
}

impl Default for SongForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            instrument: String::new(),
            tags: DEFAULT_INSTRUMENTS.iter().map(|name| name.to_string()).collect(),
            chip_cursor: None,
        }
    }
}

impl SongForm {
    fn buffer_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Artist => &mut self.artist,
            FormField::Instruments => &mut self.instrument,
        }
    }

    pub fn buffer(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Artist => &self.artist,
            FormField::Instruments => &self.instrument,
        }
    }

    fn push_char(&mut self, field: FormField, ch: char) {
        if ch.is_control() {
            return;
        }
        if field == FormField::Instruments {
            self.chip_cursor = None;
        }
        self.buffer_mut(field).push(ch);
    }

    /// Backspace on the instruments field eats the last chip once the text
    /// buffer is empty, like any chip input.
    fn backspace(&mut self, field: FormField) {
        if field == FormField::Instruments && self.instrument.is_empty() {
            self.remove_tag();
            return;
        }
        self.buffer_mut(field).pop();
    }

    /// Add the buffered name as a chip. Empty and duplicate names are
    /// silently dropped, keeping the buffer intact for a retry.
    fn add_tag(&mut self) -> bool {
        let name = self.instrument.trim();
        if name.is_empty() || self.tags.iter().any(|tag| tag == name) {
            return false;
        }
        self.tags.push_back(name.to_string());
        self.instrument.clear();
        self.chip_cursor = None;
        true
    }

    fn remove_tag(&mut self) {
        match self.chip_cursor {
            Some(index) if index < self.tags.len() => {
                self.tags.remove(index);
                self.chip_cursor = if self.tags.is_empty() {
                    None
                } else {
                    Some(index.min(self.tags.len() - 1))
                };
            }
            _ => {
                if self.instrument.is_empty() && !self.tags.is_empty() {
                    self.tags.remove(self.tags.len() - 1);
                }
            }
        }
    }

    fn chip_left(&mut self) {
        self.chip_cursor = match self.chip_cursor {
            None if !self.tags.is_empty() => Some(self.tags.len() - 1),
            Some(index) => Some(index.saturating_sub(1)),
            None => None,
        };
    }

    fn chip_right(&mut self) {
        self.chip_cursor = match self.chip_cursor {
            Some(index) if index + 1 < self.tags.len() => Some(index + 1),
            _ => None,
        };
    }

    /// Build the create payload, or `None` when the title is blank.
    fn create_body(&self) -> Option<CreateSong> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let artist = match self.artist.trim() {
            "" => None,
            artist => Some(artist.to_string()),
        };

        Some(CreateSong {
            title: title.to_string(),
            artist,
            instruments: self.tags.iter().cloned().collect(),
        })
    }
}

impl ViewState {
    /// Apply one event, returning the next state and the effects to run.
    /// Never touches the network or the clock itself.
    pub fn apply(&self, event: &Event) -> (ViewState, Vec<Command>) {
        let mut next = self.clone();
        let mut commands = Vec::new();

        match event {
            Event::Initialize => {
                next.loading = true;
                commands.push(Command::FetchSongs);
            }
            Event::Quit => {}
            Event::ToggleTheme => next.theme = next.theme.toggled(),

            Event::FocusNext => next.focus = next.focus.next(),
            Event::FocusPrev => next.focus = next.focus.prev(),
            Event::FocusForm => next.focus = Focus::Form(FormField::Title),
            Event::FocusList => {
                next.focus = Focus::List;
                next.form.chip_cursor = None;
            }

            Event::Input(ch) => {
                if let Focus::Form(field) = next.focus {
                    next.form.push_char(field, *ch);
                }
            }
            Event::Backspace => {
                if let Focus::Form(field) = next.focus {
                    next.form.backspace(field);
                }
            }
            Event::AddInstrument => {
                next.form.add_tag();
            }
            Event::RemoveInstrument => next.form.remove_tag(),
            Event::ChipLeft => next.form.chip_left(),
            Event::ChipRight => next.form.chip_right(),
            Event::Submit => {
                if let Some(body) = next.form.create_body() {
                    commands.push(Command::CreateSong(body));
                }
            }

            Event::SelectUp => next.select_up(),
            Event::SelectDown => next.select_down(),
            Event::SelectFirst => {
                next.selected = 0;
                next.instrument = None;
                next.drag = None;
            }
            Event::SelectLast => {
                next.drag = None;
                if !next.songs.is_empty() {
                    next.selected = next.songs.len() - 1;
                    next.instrument = match next.songs[next.selected].instruments.len() {
                        0 => None,
                        count => Some(count - 1),
                    };
                }
            }

            Event::SetStatus(status) => {
                if let Some(song) = self.selected_song() {
                    if !self.locked.contains(&song.id) && song.status != *status {
                        next.locked.insert(song.id);
                        commands.push(Command::UpdateStatus(song.id, status.clone()));
                    }
                }
            }
            Event::StatusUpdated(id) => {
                commands.push(Command::ScheduleCooldown(*id));
                commands.push(Command::FetchSongs);
            }
            Event::StatusUpdateFailed(id, _) => {
                next.locked.remove(id);
            }
            Event::CooldownExpired(id) => {
                next.locked.remove(id);
            }

            Event::RequestDelete => {
                if let Some(song) = self.selected_song() {
                    next.dialog = DeleteDialog::Confirming {
                        song_id: song.id,
                        choice: DialogChoice::Delete,
                    };
                }
            }
            Event::DialogLeft => {
                if let DeleteDialog::Confirming { choice, .. } = &mut next.dialog {
                    *choice = DialogChoice::Cancel;
                }
            }
            Event::DialogRight => {
                if let DeleteDialog::Confirming { choice, .. } = &mut next.dialog {
                    *choice = DialogChoice::Delete;
                }
            }
            Event::CancelDelete => next.dialog = DeleteDialog::Idle,
            Event::ConfirmDelete => {
                // Only reachable with the dialog open; anything else is a
                // stray keypress and must not hit the network.
                if let DeleteDialog::Confirming { song_id, .. } = next.dialog {
                    commands.push(Command::DeleteSong(song_id));
                }
            }
            Event::SongDeleted(id) => {
                if matches!(next.dialog, DeleteDialog::Confirming { song_id, .. } if song_id == *id)
                {
                    next.dialog = DeleteDialog::Idle;
                }
                next.locked.remove(id);
                commands.push(Command::CancelCooldown(*id));
                commands.push(Command::FetchSongs);
            }
            Event::SongDeleteFailed(..) => {}

            Event::NudgeProgress(delta) => {
                if let Some(instrument) = self.selected_instrument() {
                    let base = match &self.drag {
                        Some(drag) if drag.instrument_id == instrument.id => drag.value,
                        _ => instrument.progress,
                    };
                    let value = (i16::from(base) + i16::from(*delta)).clamp(0, 100) as u8;
                    next.drag = Some(Drag {
                        instrument_id: instrument.id,
                        value,
                    });
                }
            }
            Event::CommitProgress => {
                if let Some(drag) = next.drag.take() {
                    commands.push(Command::UpdateProgress(drag.instrument_id, drag.value));
                }
            }
            Event::CancelDrag => next.drag = None,
            Event::ProgressUpdated(_) => commands.push(Command::FetchSongs),
            Event::ProgressUpdateFailed(..) => {}

            Event::SongsFetched(songs) => {
                next.songs = songs.iter().cloned().collect();
                next.loading = false;
                next.clamp_selection();
                if let Some(drag) = &next.drag {
                    let known = next.songs.iter().any(|song| {
                        song.instruments.iter().any(|i| i.id == drag.instrument_id)
                    });
                    if !known {
                        next.drag = None;
                    }
                }
            }
            Event::SongsFetchFailed(_) => next.loading = false,

            Event::SongCreated(_) => {
                next.form = SongForm::default();
                commands.push(Command::FetchSongs);
            }
            Event::SongCreateFailed(_) => {}
        }

        (next, commands)
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.songs.get(self.selected)
    }

    pub fn selected_instrument(&self) -> Option<&Instrument> {
        let song = self.selected_song()?;
        song.instruments.get(self.instrument?)
    }

    pub fn is_locked(&self, id: SongId) -> bool {
        self.locked.contains(&id)
    }

    /// Walk one row down through the flattened song/instrument rows.
    fn select_down(&mut self) {
        self.drag = None;
        let Some(song) = self.songs.get(self.selected) else {
            return;
        };
        match self.instrument {
            None if !song.instruments.is_empty() => self.instrument = Some(0),
            Some(index) if index + 1 < song.instruments.len() => {
                self.instrument = Some(index + 1);
            }
            _ => {
                if self.selected + 1 < self.songs.len() {
                    self.selected += 1;
                    self.instrument = None;
                }
            }
        }
    }

    fn select_up(&mut self) {
        self.drag = None;
        match self.instrument {
            Some(0) => self.instrument = None,
            Some(index) => self.instrument = Some(index - 1),
            None => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.instrument = match self.songs[self.selected].instruments.len() {
                        0 => None,
                        count => Some(count - 1),
                    };
                }
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.songs.is_empty() {
            self.selected = 0;
            self.instrument = None;
            return;
        }
        self.selected = self.selected.min(self.songs.len() - 1);
        if let Some(index) = self.instrument {
            if index >= self.songs[self.selected].instruments.len() {
                self.instrument = None;
            }
        }
    }
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Form(FormField::Title) => Self::Form(FormField::Artist),
            Self::Form(FormField::Artist) => Self::Form(FormField::Instruments),
            Self::Form(FormField::Instruments) => Self::List,
            Self::List => Self::Form(FormField::Title),
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Form(FormField::Title) => Self::List,
            Self::Form(FormField::Artist) => Self::Form(FormField::Title),
            Self::Form(FormField::Instruments) => Self::Form(FormField::Artist),
            Self::List => Self::Form(FormField::Instruments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::model::status;

    fn instrument(id: InstrumentId, name: &str, progress: u8) -> Instrument {
        Instrument {
            id,
            name: name.to_string(),
            progress,
        }
    }

    fn song(id: SongId, title: &str, status: &str, instruments: Vec<Instrument>) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: None,
            status: status.to_string(),
            instruments,
        }
    }

    fn state_with(songs: Vec<Song>) -> ViewState {
        let (state, _) = ViewState::default().apply(&Event::SongsFetched(songs));
        state
    }

    fn type_into(state: ViewState, field: FormField, text: &str) -> ViewState {
        let (mut state, _) = state.apply(&Event::FocusForm);
        state.focus = Focus::Form(field);
        for ch in text.chars() {
            state = state.apply(&Event::Input(ch)).0;
        }
        state
    }

    #[test]
    fn initialize_requests_the_song_list() {
        let (state, commands) = ViewState::default().apply(&Event::Initialize);

        assert!(state.loading);
        assert_eq!(commands, vec![Command::FetchSongs]);
    }

    #[test]
    fn submit_with_blank_title_is_a_no_op() {
        let state = type_into(ViewState::default(), FormField::Title, "   ");
        let (next, commands) = state.apply(&Event::Submit);

        assert!(commands.is_empty());
        assert_eq!(next.form, state.form);
    }

    #[test]
    fn submit_builds_create_payload_without_blank_artist() {
        let state = type_into(ViewState::default(), FormField::Title, "Song A");
        let (_, commands) = state.apply(&Event::Submit);

        assert_eq!(
            commands,
            vec![Command::CreateSong(CreateSong {
                title: "Song A".to_string(),
                artist: None,
                instruments: DEFAULT_INSTRUMENTS.iter().map(|s| s.to_string()).collect(),
            })]
        );
    }

    #[test]
    fn submit_keeps_buffers_until_the_create_lands() {
        let state = type_into(ViewState::default(), FormField::Title, "Song A");
        let (after_submit, _) = state.apply(&Event::Submit);

        assert_eq!(after_submit.form.title, "Song A");

        let (after_create, commands) =
            after_submit.apply(&Event::SongCreated(song(1, "Song A", status::WANT_TO_PLAY, vec![])));

        assert_eq!(after_create.form, SongForm::default());
        assert_eq!(commands, vec![Command::FetchSongs]);
    }

    #[test]
    fn create_failure_leaves_buffers_for_retry() {
        let state = type_into(ViewState::default(), FormField::Title, "Song A");
        let (next, commands) = state.apply(&Event::SongCreateFailed("boom".to_string()));

        assert!(commands.is_empty());
        assert_eq!(next.form.title, "Song A");
    }

    #[test]
    fn form_resets_to_the_four_default_instruments() {
        let mut state = type_into(ViewState::default(), FormField::Instruments, "Keys");
        state = state.apply(&Event::AddInstrument).0;
        assert_eq!(state.form.tags.len(), 5);

        let (next, _) =
            state.apply(&Event::SongCreated(song(1, "Song A", status::WANT_TO_PLAY, vec![])));

        let defaults: Vec<_> = next.form.tags.iter().cloned().collect();
        assert_eq!(defaults, DEFAULT_INSTRUMENTS.map(String::from).to_vec());
    }

    #[test]
    fn duplicate_instrument_names_are_rejected() {
        let state = type_into(ViewState::default(), FormField::Instruments, "Guitar");
        let (next, _) = state.apply(&Event::AddInstrument);

        assert_eq!(next.form.tags.len(), DEFAULT_INSTRUMENTS.len());
        // Buffer kept so the user can see what was rejected.
        assert_eq!(next.form.instrument, "Guitar");
    }

    #[test]
    fn unique_instrument_names_append_in_order() {
        let state = type_into(ViewState::default(), FormField::Instruments, "Keys");
        let (next, _) = state.apply(&Event::AddInstrument);

        assert_eq!(next.form.tags.back(), Some(&"Keys".to_string()));
        assert_eq!(next.form.instrument, "");
        assert_eq!(next.form.tags.len(), DEFAULT_INSTRUMENTS.len() + 1);
    }

    #[test]
    fn backspace_on_empty_instrument_buffer_removes_last_chip() {
        let mut state = ViewState::default();
        state.focus = Focus::Form(FormField::Instruments);

        let (next, _) = state.apply(&Event::Backspace);

        assert_eq!(next.form.tags.len(), DEFAULT_INSTRUMENTS.len() - 1);
        assert_eq!(next.form.tags.back(), Some(&"Drums".to_string()));
    }

    #[test]
    fn chip_cursor_walks_left_and_deletes_in_place() {
        let mut state = ViewState::default();
        state.focus = Focus::Form(FormField::Instruments);

        state = state.apply(&Event::ChipLeft).0;
        state = state.apply(&Event::ChipLeft).0;
        assert_eq!(state.form.chip_cursor, Some(2));

        let (next, _) = state.apply(&Event::RemoveInstrument);
        let tags: Vec<_> = next.form.tags.iter().cloned().collect();

        assert_eq!(tags, vec!["Guitar", "Bass", "Vocals"]);
        assert_eq!(next.form.chip_cursor, Some(2));
    }

    #[test]
    fn typing_returns_the_chip_cursor_to_the_buffer() {
        let mut state = ViewState::default();
        state.focus = Focus::Form(FormField::Instruments);
        state = state.apply(&Event::ChipLeft).0;

        let (next, _) = state.apply(&Event::Input('K'));

        assert_eq!(next.form.chip_cursor, None);
        assert_eq!(next.form.instrument, "K");
    }

    #[test]
    fn fetched_songs_replace_the_cache_wholesale() {
        let state = state_with(vec![
            song(1, "Song A", status::PRACTICING, vec![]),
            song(2, "Song B", status::MASTERED, vec![]),
        ]);
        assert_eq!(state.songs.len(), 2);
        assert!(!state.loading);

        let (next, _) =
            state.apply(&Event::SongsFetched(vec![song(3, "Song C", status::WANT_TO_PLAY, vec![])]));

        assert_eq!(next.songs.len(), 1);
        assert_eq!(next.songs[0].id, 3);
    }

    #[test]
    fn fetch_failure_keeps_the_previous_cache() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![])]);
        let (next, commands) = state.apply(&Event::SongsFetchFailed("timeout".to_string()));

        assert!(commands.is_empty());
        assert_eq!(next.songs.len(), 1);
        assert!(!next.loading);
    }

    #[test]
    fn refetch_clamps_a_dangling_selection() {
        let mut state = state_with(vec![
            song(1, "Song A", status::PRACTICING, vec![]),
            song(2, "Song B", status::PRACTICING, vec![instrument(9, "Guitar", 10)]),
        ]);
        state.selected = 1;
        state.instrument = Some(0);

        let (next, _) =
            state.apply(&Event::SongsFetched(vec![song(1, "Song A", status::PRACTICING, vec![])]));

        assert_eq!(next.selected, 0);
        assert_eq!(next.instrument, None);
    }

    #[test]
    fn selection_walks_through_instrument_rows() {
        let state = state_with(vec![
            song(1, "Song A", status::PRACTICING, vec![
                instrument(10, "Guitar", 40),
                instrument(11, "Vocals", 80),
            ]),
            song(2, "Song B", status::MASTERED, vec![]),
        ]);

        let state = state.apply(&Event::SelectDown).0;
        assert_eq!((state.selected, state.instrument), (0, Some(0)));

        let state = state.apply(&Event::SelectDown).0;
        assert_eq!((state.selected, state.instrument), (0, Some(1)));

        let state = state.apply(&Event::SelectDown).0;
        assert_eq!((state.selected, state.instrument), (1, None));

        // Bottom of the list holds.
        let state = state.apply(&Event::SelectDown).0;
        assert_eq!((state.selected, state.instrument), (1, None));

        let state = state.apply(&Event::SelectUp).0;
        assert_eq!((state.selected, state.instrument), (0, Some(1)));
    }

    #[test]
    fn status_change_locks_the_song_and_issues_the_update() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (next, commands) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));

        assert!(next.is_locked(1));
        assert_eq!(
            commands,
            vec![Command::UpdateStatus(1, status::PRACTICING.to_string())]
        );
    }

    #[test]
    fn locked_songs_ignore_further_status_changes() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (locked, _) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));
        let (next, commands) = locked.apply(&Event::SetStatus(status::MASTERED.to_string()));

        assert!(commands.is_empty());
        assert_eq!(next.locked, locked.locked);
    }

    #[test]
    fn setting_the_current_status_again_is_a_no_op() {
        let state = state_with(vec![song(1, "Song A", status::MASTERED, vec![])]);
        let (next, commands) = state.apply(&Event::SetStatus(status::MASTERED.to_string()));

        assert!(commands.is_empty());
        assert!(!next.is_locked(1));
    }

    #[test]
    fn successful_status_update_schedules_the_cooldown() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (locked, _) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));
        let (next, commands) = locked.apply(&Event::StatusUpdated(1));

        // Still locked; only the timer may release it.
        assert!(next.is_locked(1));
        assert_eq!(
            commands,
            vec![Command::ScheduleCooldown(1), Command::FetchSongs]
        );
    }

    #[test]
    fn failed_status_update_releases_the_lock_immediately() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (locked, _) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));
        let (next, commands) =
            locked.apply(&Event::StatusUpdateFailed(1, "server error".to_string()));

        assert!(commands.is_empty());
        assert!(!next.is_locked(1));
    }

    #[test]
    fn cooldown_expiry_releases_the_lock() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (locked, _) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));
        let (next, _) = locked.apply(&Event::CooldownExpired(1));

        assert!(!next.is_locked(1));
    }

    #[test]
    fn delete_dialog_opens_with_the_selected_song_id() {
        let state = state_with(vec![
            song(1, "Song A", status::PRACTICING, vec![]),
            song(2, "Song B", status::PRACTICING, vec![]),
        ]);
        let state = state.apply(&Event::SelectDown).0;
        let (next, commands) = state.apply(&Event::RequestDelete);

        assert!(commands.is_empty());
        assert_eq!(
            next.dialog,
            DeleteDialog::Confirming {
                song_id: 2,
                choice: DialogChoice::Delete,
            }
        );
    }

    #[test]
    fn cancel_closes_the_dialog_without_network_calls() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![])]);
        let (open, _) = state.apply(&Event::RequestDelete);
        let (next, commands) = open.apply(&Event::CancelDelete);

        assert!(commands.is_empty());
        assert_eq!(next.dialog, DeleteDialog::Idle);
    }

    #[test]
    fn confirm_without_an_open_dialog_is_a_no_op() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![])]);
        let (next, commands) = state.apply(&Event::ConfirmDelete);

        assert!(commands.is_empty());
        assert_eq!(next.dialog, DeleteDialog::Idle);
    }

    #[test]
    fn confirm_keeps_the_dialog_open_until_the_delete_lands() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![])]);
        let (open, _) = state.apply(&Event::RequestDelete);
        let (confirming, commands) = open.apply(&Event::ConfirmDelete);

        assert_eq!(commands, vec![Command::DeleteSong(1)]);
        assert!(matches!(
            confirming.dialog,
            DeleteDialog::Confirming { song_id: 1, .. }
        ));

        let (closed, commands) = confirming.apply(&Event::SongDeleted(1));
        assert_eq!(closed.dialog, DeleteDialog::Idle);
        assert_eq!(
            commands,
            vec![Command::CancelCooldown(1), Command::FetchSongs]
        );
    }

    #[test]
    fn failed_delete_leaves_the_dialog_open() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![])]);
        let (open, _) = state.apply(&Event::RequestDelete);
        let (confirming, _) = open.apply(&Event::ConfirmDelete);
        let (next, commands) =
            confirming.apply(&Event::SongDeleteFailed(1, "server error".to_string()));

        assert!(commands.is_empty());
        assert!(matches!(next.dialog, DeleteDialog::Confirming { .. }));
    }

    #[test]
    fn deleting_a_locked_song_cancels_its_cooldown() {
        let state = state_with(vec![song(1, "Song A", status::WANT_TO_PLAY, vec![])]);
        let (locked, _) = state.apply(&Event::SetStatus(status::PRACTICING.to_string()));
        let (next, commands) = locked.apply(&Event::SongDeleted(1));

        assert!(!next.is_locked(1));
        assert!(commands.contains(&Command::CancelCooldown(1)));
    }

    #[test]
    fn nudges_start_from_the_saved_progress_and_clamp() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 97),
        ])]);
        let state = state.apply(&Event::SelectDown).0;

        let (next, commands) = state.apply(&Event::NudgeProgress(5));
        assert!(commands.is_empty());
        assert_eq!(next.drag, Some(Drag { instrument_id: 10, value: 100 }));

        let mut low = next.clone();
        for _ in 0..25 {
            low = low.apply(&Event::NudgeProgress(-5)).0;
        }
        assert_eq!(low.drag.map(|d| d.value), Some(0));
    }

    #[test]
    fn commit_sends_the_dragged_value_and_clears_the_drag() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 40),
        ])]);
        let state = state.apply(&Event::SelectDown).0;
        let state = state.apply(&Event::NudgeProgress(5)).0;

        let (next, commands) = state.apply(&Event::CommitProgress);

        assert_eq!(commands, vec![Command::UpdateProgress(10, 45)]);
        assert_eq!(next.drag, None);
        // No optimistic write: the cached value stays until the refetch.
        assert_eq!(next.songs[0].instruments[0].progress, 40);
    }

    #[test]
    fn commit_without_a_drag_is_a_no_op() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 40),
        ])]);
        let (_, commands) = state.apply(&Event::CommitProgress);

        assert!(commands.is_empty());
    }

    #[test]
    fn moving_the_selection_abandons_the_drag() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 40),
            instrument(11, "Bass", 60),
        ])]);
        let state = state.apply(&Event::SelectDown).0;
        let state = state.apply(&Event::NudgeProgress(5)).0;
        assert!(state.drag.is_some());

        let (next, _) = state.apply(&Event::SelectDown);
        assert_eq!(next.drag, None);
    }

    #[test]
    fn escape_abandons_the_drag_without_committing() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 40),
        ])]);
        let state = state.apply(&Event::SelectDown).0;
        let state = state.apply(&Event::NudgeProgress(-5)).0;

        let (next, commands) = state.apply(&Event::CancelDrag);

        assert!(commands.is_empty());
        assert_eq!(next.drag, None);
    }

    #[test]
    fn two_commits_issue_independent_updates_in_release_order() {
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 75),
        ])]);
        let state = state.apply(&Event::SelectDown).0;

        let state = state.apply(&Event::NudgeProgress(5)).0;
        let (state, first) = state.apply(&Event::CommitProgress);
        let state = state.apply(&Event::NudgeProgress(5)).0;
        let state = state.apply(&Event::NudgeProgress(5)).0;
        let state = state.apply(&Event::NudgeProgress(5)).0;
        let state = state.apply(&Event::NudgeProgress(5)).0;
        let (_, second) = state.apply(&Event::CommitProgress);

        assert_eq!(first, vec![Command::UpdateProgress(10, 80)]);
        assert_eq!(second, vec![Command::UpdateProgress(10, 95)]);
    }

    #[test]
    fn later_arriving_refetch_wins_even_when_stale() {
        // Two refetches land out of order; the cache keeps whichever arrived
        // last, not whichever was issued last.
        let state = state_with(vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 75),
        ])]);

        let fresh = vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 95),
        ])];
        let stale = vec![song(1, "Song A", status::PRACTICING, vec![
            instrument(10, "Guitar", 80),
        ])];

        let (state, _) = state.apply(&Event::SongsFetched(fresh));
        let (state, _) = state.apply(&Event::SongsFetched(stale));

        assert_eq!(state.songs[0].instruments[0].progress, 80);
    }

    #[test]
    fn focus_cycles_through_form_fields_and_list() {
        let state = ViewState::default();
        assert_eq!(state.focus, Focus::List);

        let state = state.apply(&Event::FocusNext).0;
        assert_eq!(state.focus, Focus::Form(FormField::Title));

        let state = state.apply(&Event::FocusNext).0;
        assert_eq!(state.focus, Focus::Form(FormField::Artist));

        let state = state.apply(&Event::FocusNext).0;
        assert_eq!(state.focus, Focus::Form(FormField::Instruments));

        let state = state.apply(&Event::FocusNext).0;
        assert_eq!(state.focus, Focus::List);

        let state = state.apply(&Event::FocusPrev).0;
        assert_eq!(state.focus, Focus::Form(FormField::Instruments));
    }

    #[test]
    fn theme_toggle_flips_between_dark_and_light() {
        let state = ViewState::default();
        assert_eq!(state.theme, ThemeMode::Dark);

        let state = state.apply(&Event::ToggleTheme).0;
        assert_eq!(state.theme, ThemeMode::Light);
    }
}

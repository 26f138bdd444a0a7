use crate::http::model::{CreateSong, InstrumentId, Song, SongId};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Lifecycle
    Initialize,
    Quit,
    ToggleTheme,

    // Focus
    FocusNext,
    FocusPrev,
    FocusForm,
    FocusList,

    // Form editing
    Input(char),
    Backspace,
    Submit,
    AddInstrument,
    RemoveInstrument,
    ChipLeft,
    ChipRight,

    // List navigation
    SelectUp,
    SelectDown,
    SelectFirst,
    SelectLast,

    // Song actions
    SetStatus(String),
    RequestDelete,
    DialogLeft,
    DialogRight,
    ConfirmDelete,
    CancelDelete,
    NudgeProgress(i8),
    CommitProgress,
    CancelDrag,

    // Task completions
    SongsFetched(Vec<Song>),
    SongsFetchFailed(String),
    SongCreated(Song),
    SongCreateFailed(String),
    SongDeleted(SongId),
    SongDeleteFailed(SongId, String),
    StatusUpdated(SongId),
    StatusUpdateFailed(SongId, String),
    ProgressUpdated(InstrumentId),
    ProgressUpdateFailed(InstrumentId, String),
    CooldownExpired(SongId),
}

/// Side effects a state transition asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchSongs,
    CreateSong(CreateSong),
    DeleteSong(SongId),
    UpdateStatus(SongId, String),
    UpdateProgress(InstrumentId, u8),
    ScheduleCooldown(SongId),
    CancelCooldown(SongId),
}

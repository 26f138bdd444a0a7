use std::time::Duration;

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::info;

use crate::{
    event::events::{Command, Event},
    http::model::SongId,
    ui::{
        app::App,
        input::InputHandler,
        tui::{TerminalEvent, Tui},
    },
};

/// How long a song's status control stays disabled after a successful
/// status change.
pub(crate) const STATUS_COOLDOWN: Duration = Duration::from_secs(10);

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_terminal_event(app, evt, tui)? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_event(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    fn handle_terminal_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind == KeyEventKind::Press {
            if let Some(event) = InputHandler::map_key(&app.state, evt) {
                Self::handle_event(app, event);
            }
        }
    }

    pub fn handle_event(app: &mut App, event: Event) {
        if matches!(event, Event::Quit) {
            app.should_quit = true;
            return;
        }

        let (state, commands) = app.state.apply(&event);
        app.state = state;
        for command in commands {
            Self::run_command(app, command);
        }
    }

    /// Network commands are deliberately unkeyed spawns: an in-flight refetch
    /// is never aborted by a later one, responses apply in arrival order.
    fn run_command(app: &mut App, command: Command) {
        match command {
            Command::FetchSongs => {
                let api = app.api.clone();
                let tx = app.event_tx.clone();
                tokio::spawn(async move {
                    match api.fetch_songs().await {
                        Ok(songs) => {
                            let _ = tx.send(Event::SongsFetched(songs));
                        }
                        Err(e) => {
                            info!("Failed to fetch songs: {}", e);
                            let _ = tx.send(Event::SongsFetchFailed(e.to_string()));
                        }
                    }
                });
            }
            Command::CreateSong(body) => {
                let api = app.api.clone();
                let tx = app.event_tx.clone();
                tokio::spawn(async move {
                    match api.create_song(&body).await {
                        Ok(song) => {
                            info!("Created song '{}'", song.title);
                            let _ = tx.send(Event::SongCreated(song));
                        }
                        Err(e) => {
                            info!("Failed to create song: {}", e);
                            let _ = tx.send(Event::SongCreateFailed(e.to_string()));
                        }
                    }
                });
            }
            Command::DeleteSong(id) => {
                let api = app.api.clone();
                let tx = app.event_tx.clone();
                tokio::spawn(async move {
                    match api.delete_song(id).await {
                        Ok(()) => {
                            let _ = tx.send(Event::SongDeleted(id));
                        }
                        Err(e) => {
                            info!("Failed to delete song {}: {}", id, e);
                            let _ = tx.send(Event::SongDeleteFailed(id, e.to_string()));
                        }
                    }
                });
            }
            Command::UpdateStatus(id, status) => {
                let api = app.api.clone();
                let tx = app.event_tx.clone();
                tokio::spawn(async move {
                    match api.update_status(id, &status).await {
                        Ok(()) => {
                            let _ = tx.send(Event::StatusUpdated(id));
                        }
                        Err(e) => {
                            info!("Failed to update status of song {}: {}", id, e);
                            let _ = tx.send(Event::StatusUpdateFailed(id, e.to_string()));
                        }
                    }
                });
            }
            Command::UpdateProgress(id, progress) => {
                let api = app.api.clone();
                let tx = app.event_tx.clone();
                tokio::spawn(async move {
                    match api.update_progress(id, progress).await {
                        Ok(()) => {
                            let _ = tx.send(Event::ProgressUpdated(id));
                        }
                        Err(e) => {
                            info!("Failed to update progress of instrument {}: {}", id, e);
                            let _ = tx.send(Event::ProgressUpdateFailed(id, e.to_string()));
                        }
                    }
                });
            }
            Command::ScheduleCooldown(id) => {
                let timer = spawn_cooldown(app.event_tx.clone(), id);
                app.timers.schedule(id, timer);
            }
            Command::CancelCooldown(id) => app.timers.cancel(id),
        }
    }
}

pub(crate) fn spawn_cooldown(
    tx: flume::Sender<Event>,
    id: SongId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(STATUS_COOLDOWN).await;
        let _ = tx.send(Event::CooldownExpired(id));
    })
}

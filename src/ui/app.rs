use std::sync::Arc;

use flume::{Receiver, Sender};

use ratatui::Frame;

use crate::{
    event::events::Event, http::ApiService, ui::state::ViewState,
    util::task::CooldownTimers,
};

use super::{handler::EventHandler, tui};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub api: Arc<ApiService>,
    pub state: ViewState,
    pub timers: CooldownTimers,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new()?);

        Ok(Self {
            event_rx,
            event_tx,
            api,
            state: ViewState::default(),
            timers: CooldownTimers::new(),
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        EventHandler::handle_event(self, Event::Initialize);
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.timers.cancel_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            frame.render_widget(self, frame.area());
        }
    }
}

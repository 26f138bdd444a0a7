use std::collections::HashMap;
use tokio::task::JoinHandle;

use crate::http::model::SongId;

/// Pending lock-release timers, one per song. Scheduling over an existing
/// entry aborts the old timer so a song never has two releases in flight.
#[derive(Default)]
pub struct CooldownTimers {
    timers: HashMap<SongId, JoinHandle<()>>,
}

impl CooldownTimers {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, id: SongId, timer: JoinHandle<()>) {
        if let Some(handle) = self.timers.insert(id, timer) {
            handle.abort();
        }
    }

    pub fn cancel(&mut self, id: SongId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for handle in self.timers.values() {
            handle.abort();
        }
        self.timers.clear();
    }
}

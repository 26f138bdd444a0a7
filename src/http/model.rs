use serde::{Deserialize, Serialize};

pub type SongId = i64;
pub type InstrumentId = i64;

/// Status values the server is known to hand out. The field stays an open
/// string so unknown values coming back from the API still render.
pub mod status {
    pub const WANT_TO_PLAY: &str = "WANT_TO_PLAY";
    pub const PRACTICING: &str = "PRACTICING";
    pub const MASTERED: &str = "MASTERED";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    pub status: String,
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

impl Song {
    pub fn artist_label(&self) -> &str {
        match self.artist.as_deref() {
            Some(artist) if !artist.trim().is_empty() => artist,
            _ => "Unknown Artist",
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.status == status::MASTERED
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    #[serde(rename = "instrument")]
    pub name: String,
    pub progress: u8,
}

/// Body for `POST /songs`. Empty artist and empty instrument lists are left
/// out of the payload entirely rather than sent as `""` / `[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSong {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instruments: Vec<String>,
}

/// Body for `PATCH /songs/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Body for `PATCH /instruments/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub progress: u8,
}

use std::time::Duration;

use reqwest::Client;

pub mod error;
pub mod model;

use error::ApiError;
use model::{
    CreateSong, InstrumentId, ProgressUpdate, Song, SongId, StatusUpdate,
};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ApiService {
    client: Client,
    base_url: String,
}

impl ApiService {
    pub fn new() -> color_eyre::Result<Self> {
        let base_url = std::env::var("GROOVELOG_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> color_eyre::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_songs(&self) -> Result<Vec<Song>, ApiError> {
        let url = self.endpoint("/songs");
        let response = self.client.get(&url).send().await?;

        Ok(Self::check(response)?.json().await?)
    }

    pub async fn create_song(&self, song: &CreateSong) -> Result<Song, ApiError> {
        let url = self.endpoint("/songs");
        let response = self.client.post(&url).json(song).send().await?;

        Ok(Self::check(response)?.json().await?)
    }

    pub async fn delete_song(&self, id: SongId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/songs/{id}"));
        let response = self.client.delete(&url).send().await?;
        Self::check(response)?;

        Ok(())
    }

    pub async fn update_status(
        &self,
        id: SongId,
        status: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/songs/{id}/status"));
        let body = StatusUpdate {
            status: status.to_string(),
        };
        let response = self.client.patch(&url).json(&body).send().await?;
        Self::check(response)?;

        Ok(())
    }

    pub async fn update_progress(
        &self,
        id: InstrumentId,
        progress: u8,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/instruments/{id}"));
        let body = ProgressUpdate { progress };
        let response = self.client.patch(&url).json(&body).send().await?;
        Self::check(response)?;

        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status,
                url: response.url().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slashes() {
        let api = ApiService::with_base_url("http://localhost:3000/").unwrap();

        assert_eq!(api.endpoint("/songs"), "http://localhost:3000/songs");
        assert_eq!(
            api.endpoint("/songs/12/status"),
            "http://localhost:3000/songs/12/status"
        );
        assert_eq!(
            api.endpoint("/instruments/7"),
            "http://localhost:3000/instruments/7"
        );
    }
}

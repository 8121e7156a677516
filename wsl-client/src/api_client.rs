//! HTTP client for the song API

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;
use wsl_common::{Leader, Song, SongDraft};

use crate::error::{ClientError, ClientResult};

/// Default API base URL, matching the service's default port
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Typed client for `/songs/:leader` endpoints
#[derive(Debug, Clone)]
pub struct SongApiClient {
    http: Client,
    base_url: String,
}

impl SongApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn songs_url(&self, leader: Leader) -> String {
        format!("{}/songs/{}", self.base_url, leader)
    }

    fn song_url(&self, leader: Leader, id: Uuid) -> String {
        format!("{}/songs/{}/{}", self.base_url, leader, id)
    }

    /// GET /api
    pub async fn status(&self) -> ClientResult<String> {
        let response = self.http.get(format!("{}/api", self.base_url)).send().await?;
        Ok(check(response).await?.text().await?)
    }

    /// GET /songs/:leader
    pub async fn list(&self, leader: Leader) -> ClientResult<Vec<Song>> {
        let response = self.http.get(self.songs_url(leader)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// POST /songs/:leader
    pub async fn create(&self, leader: Leader, draft: &SongDraft) -> ClientResult<Song> {
        let response = self.http.post(self.songs_url(leader)).json(draft).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT /songs/:leader/:id
    pub async fn update(&self, leader: Leader, id: Uuid, draft: &SongDraft) -> ClientResult<Song> {
        let response = self.http.put(self.song_url(leader, id)).json(draft).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// DELETE /songs/:leader/:id
    pub async fn delete(&self, leader: Leader, id: Uuid) -> ClientResult<Song> {
        let response = self.http.delete(self.song_url(leader, id)).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn non-success statuses into errors, keeping the server's message
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error.message)
        .unwrap_or(text);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

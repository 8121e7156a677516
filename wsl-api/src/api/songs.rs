//! Song CRUD endpoints
//!
//! Every route is keyed by the leader path segment, which selects the
//! store. Each handler performs exactly one store operation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;
use wsl_common::{Error, Leader, Song, SongDraft, SongPatch};

use crate::{ApiError, ApiResult, AppState};

/// Resolve the leader path segment; unknown names are rejected
fn resolve_leader(name: &str) -> ApiResult<Leader> {
    name.parse().map_err(|_| {
        warn!("Request for unknown worship leader {:?}", name);
        ApiError::UnknownLeader(name.to_string())
    })
}

fn parse_song_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|e| Error::InvalidInput(format!("Invalid song id {:?}: {}", raw, e)))
}

/// POST /songs/:leader
///
/// **Request:** `{"title": "Oceans", "key": "D"}`
/// **Response:** 201 with the created song, including its new id
///
/// **Errors:**
/// - 400 Bad Request: malformed body, or the store rejected the insert
/// - 404 Not Found: unknown leader
pub async fn create_song(
    State(state): State<AppState>,
    Path(leader): Path<String>,
    body: Result<Json<SongDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let leader = resolve_leader(&leader)?;
    let Json(draft) = body?;

    let song = state
        .stores
        .for_leader(leader)
        .insert(draft)
        .await
        .map_err(|e| {
            error!("Error creating song for {}: {}", leader, e);
            ApiError::rejected(e)
        })?;

    info!("Created song {} ({:?}) for {}", song.id, song.title, leader);
    Ok((StatusCode::CREATED, Json(song)))
}

/// GET /songs/:leader
///
/// Returns every song of the leader in store order (not sorted).
///
/// **Errors:**
/// - 404 Not Found: unknown leader
/// - 500 Internal Server Error: store unreachable or failing
pub async fn list_songs(
    State(state): State<AppState>,
    Path(leader): Path<String>,
) -> ApiResult<Json<Vec<Song>>> {
    let leader = resolve_leader(&leader)?;

    let songs = state
        .stores
        .for_leader(leader)
        .list()
        .await
        .map_err(|e| {
            error!("Error listing songs for {}: {}", leader, e);
            ApiError::store(e)
        })?;

    Ok(Json(songs))
}

/// PUT /songs/:leader/:id
///
/// **Request:** `{"title": "...", "key": "..."}`, either field optional
/// **Response:** 200 with the updated song
///
/// **Errors:**
/// - 400 Bad Request: malformed body or id, or the store rejected the update
/// - 404 Not Found: no song with this id (empty body), or unknown leader
pub async fn update_song(
    State(state): State<AppState>,
    Path((leader, id)): Path<(String, String)>,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let leader = resolve_leader(&leader)?;
    let id = parse_song_id(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let Json(patch) = body?;

    let song = state
        .stores
        .for_leader(leader)
        .update(id, patch)
        .await
        .map_err(|e| {
            error!("Error updating song {} for {}: {}", id, leader, e);
            ApiError::rejected(e)
        })?
        .ok_or(ApiError::NotFound)?;

    info!("Updated song {} for {}", song.id, leader);
    Ok(Json(song))
}

/// DELETE /songs/:leader/:id
///
/// **Response:** 200 with the deleted song
///
/// **Errors:**
/// - 404 Not Found: no song with this id (empty body), or unknown leader
/// - 500 Internal Server Error: malformed id, or store failure
pub async fn delete_song(
    State(state): State<AppState>,
    Path((leader, id)): Path<(String, String)>,
) -> ApiResult<Json<Song>> {
    let leader = resolve_leader(&leader)?;
    let id = parse_song_id(&id).map_err(|e| {
        error!("Error deleting song for {}: {}", leader, e);
        ApiError::store(e)
    })?;

    let song = state
        .stores
        .for_leader(leader)
        .delete(id)
        .await
        .map_err(|e| {
            error!("Error deleting song {} for {}: {}", id, leader, e);
            ApiError::store(e)
        })?
        .ok_or(ApiError::NotFound)?;

    info!("Deleted song {} ({:?}) for {}", song.id, song.title, leader);
    Ok(Json(song))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs/:leader", get(list_songs).post(create_song))
        .route("/songs/:leader/:id", put(update_song).delete(delete_song))
}

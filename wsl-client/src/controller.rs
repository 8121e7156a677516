//! Connects a [`ClientSession`] to the song API
//!
//! Each action takes a ticket from the session, performs the HTTP call with
//! the session unlocked, then applies the response. On failure the session is
//! left as it was.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;
use wsl_common::Leader;

use crate::api_client::SongApiClient;
use crate::error::ClientResult;
use crate::session::{ClientSession, SessionView, Submission, Ticket};

/// Drives one client session against the API
#[derive(Clone)]
pub struct SongListController {
    api: SongApiClient,
    session: Arc<Mutex<ClientSession>>,
}

impl SongListController {
    pub fn new(api: SongApiClient, leader: Leader) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(ClientSession::new(leader))),
        }
    }

    /// Run a synchronous edit on the session (query, sort, form fields)
    pub async fn update_session<R>(&self, f: impl FnOnce(&mut ClientSession) -> R) -> R {
        let mut session = self.session.lock().await;
        f(&mut session)
    }

    /// Current rendered view
    pub async fn view(&self) -> SessionView {
        self.session.lock().await.view()
    }

    /// Switch leader and load their songs
    ///
    /// Returns `false` when the response was superseded by a later request.
    pub async fn select_leader(&self, leader: Leader) -> ClientResult<bool> {
        let ticket = self.session.lock().await.select_leader(leader);
        self.fetch(ticket).await
    }

    /// Reload the current leader's songs
    pub async fn refresh(&self) -> ClientResult<bool> {
        let ticket = self.session.lock().await.refresh();
        self.fetch(ticket).await
    }

    async fn fetch(&self, ticket: Ticket) -> ClientResult<bool> {
        let songs = self.api.list(ticket.leader()).await.map_err(|e| {
            error!("Error fetching songs for {}: {}", ticket.leader(), e);
            e
        })?;
        Ok(self.session.lock().await.apply_songs(ticket, songs))
    }

    /// Submit the form: create, or update the song being edited
    pub async fn submit(&self) -> ClientResult<bool> {
        let submission = self.session.lock().await.submit_form();

        match submission {
            Submission::Create { ticket, draft } => {
                let song = self.api.create(ticket.leader(), &draft).await.map_err(|e| {
                    error!("Error creating song: {}", e);
                    e
                })?;
                Ok(self.session.lock().await.apply_created(ticket, song))
            }
            Submission::Update { ticket, id, draft } => {
                let song = self
                    .api
                    .update(ticket.leader(), id, &draft)
                    .await
                    .map_err(|e| {
                        error!("Error updating song {}: {}", id, e);
                        e
                    })?;
                Ok(self.session.lock().await.apply_updated(ticket, song))
            }
        }
    }

    /// Delete a listed song; it is removed locally once the API confirms
    pub async fn delete(&self, id: Uuid) -> ClientResult<bool> {
        let ticket = self.session.lock().await.request_delete(id)?;
        self.api.delete(ticket.leader(), id).await.map_err(|e| {
            error!("Error deleting song {}: {}", id, e);
            e
        })?;
        Ok(self.session.lock().await.apply_deleted(ticket, id))
    }
}

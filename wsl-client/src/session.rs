//! Client session state
//!
//! Holds what the song list screen works from: active leader, last fetched
//! songs, search query, sort state and the add/edit form. Network calls are
//! split in two steps: an operation hands out a [`Ticket`], and the response
//! is applied with that ticket afterwards. Responses belonging to an older
//! leader selection, or to a list fetch that has since been superseded, are
//! dropped so the last request issued wins rather than the last to arrive.

use tracing::debug;
use uuid::Uuid;
use wsl_common::view::{SongListView, SortKey, SortState};
use wsl_common::{Leader, Song, SongDraft};

use crate::error::{ClientError, ClientResult};

/// Identifies one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    leader: Leader,
    epoch: u64,
    /// Set for list fetches only
    fetch_seq: Option<u64>,
}

impl Ticket {
    /// Leader the request must be sent for
    pub fn leader(&self) -> Leader {
        self.leader
    }
}

/// Add/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongForm {
    pub title: String,
    pub key: String,
    /// Song being edited; `None` means the form adds a new song
    pub editing: Option<Uuid>,
    pub visible: bool,
}

impl SongForm {
    pub fn draft(&self) -> SongDraft {
        SongDraft::new(self.title.clone(), self.key.clone())
    }
}

/// Request to send when the form is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create { ticket: Ticket, draft: SongDraft },
    Update { ticket: Ticket, id: Uuid, draft: SongDraft },
}

/// Everything the client renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub list: SongListView,
    pub form_visible: bool,
    /// "Cancel" while the form is open, "Add New Song" otherwise
    pub form_toggle_label: &'static str,
    /// "Update Song" while editing, "Add Song" otherwise
    pub submit_label: &'static str,
}

/// State of one client
#[derive(Debug, Clone)]
pub struct ClientSession {
    leader: Leader,
    songs: Vec<Song>,
    query: String,
    sort: SortState,
    form: SongForm,
    epoch: u64,
    fetch_seq: u64,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new(Leader::default())
    }
}

impl ClientSession {
    pub fn new(leader: Leader) -> Self {
        Self {
            leader,
            songs: Vec::new(),
            query: String::new(),
            sort: SortState::default(),
            form: SongForm::default(),
            epoch: 0,
            fetch_seq: 0,
        }
    }

    pub fn leader(&self) -> Leader {
        self.leader
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn form(&self) -> &SongForm {
        &self.form
    }

    /// Switch leader, discarding the previous leader's songs
    ///
    /// Returns the ticket for fetching the new leader's list.
    pub fn select_leader(&mut self, leader: Leader) -> Ticket {
        self.leader = leader;
        self.songs.clear();
        self.epoch += 1;
        self.refresh()
    }

    /// Ticket for a fresh list fetch; earlier fetches become stale
    pub fn refresh(&mut self) -> Ticket {
        self.fetch_seq += 1;
        Ticket {
            leader: self.leader,
            epoch: self.epoch,
            fetch_seq: Some(self.fetch_seq),
        }
    }

    fn mutation_ticket(&self) -> Ticket {
        Ticket {
            leader: self.leader,
            epoch: self.epoch,
            fetch_seq: None,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.epoch == self.epoch && ticket.leader == self.leader
    }

    /// Replace the song list with a fetch result
    pub fn apply_songs(&mut self, ticket: Ticket, songs: Vec<Song>) -> bool {
        if !self.is_current(&ticket) || ticket.fetch_seq != Some(self.fetch_seq) {
            debug!("Dropping stale song list for {}", ticket.leader);
            return false;
        }
        self.songs = songs;
        true
    }

    /// Open the form on an existing song
    pub fn edit(&mut self, id: Uuid) -> ClientResult<()> {
        let song = self
            .songs
            .iter()
            .find(|song| song.id == id)
            .ok_or(ClientError::UnknownSong(id))?;

        self.form = SongForm {
            title: song.title.clone(),
            key: song.key.clone(),
            editing: Some(id),
            visible: true,
        };
        Ok(())
    }

    pub fn set_form_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_form_key(&mut self, key: impl Into<String>) {
        self.form.key = key.into();
    }

    /// Show or hide the form
    pub fn toggle_form(&mut self) {
        self.form.visible = !self.form.visible;
    }

    /// Clear the form fields and stop editing; visibility is unchanged
    pub fn reset_form(&mut self) {
        self.form.title.clear();
        self.form.key.clear();
        self.form.editing = None;
    }

    /// Request for the current form contents
    pub fn submit_form(&self) -> Submission {
        let ticket = self.mutation_ticket();
        let draft = self.form.draft();
        match self.form.editing {
            Some(id) => Submission::Update { ticket, id, draft },
            None => Submission::Create { ticket, draft },
        }
    }

    /// Append a created song, then clear and hide the form
    pub fn apply_created(&mut self, ticket: Ticket, song: Song) -> bool {
        if !self.is_current(&ticket) {
            debug!("Dropping stale create response for {}", ticket.leader);
            return false;
        }
        self.songs.push(song);
        self.reset_form();
        self.form.visible = false;
        true
    }

    /// Replace the entry of an updated song, then clear the form
    pub fn apply_updated(&mut self, ticket: Ticket, song: Song) -> bool {
        if !self.is_current(&ticket) {
            debug!("Dropping stale update response for {}", ticket.leader);
            return false;
        }
        if let Some(entry) = self.songs.iter_mut().find(|entry| entry.id == song.id) {
            *entry = song;
        }
        self.reset_form();
        true
    }

    /// Ticket for deleting a song; the song stays listed until the response
    pub fn request_delete(&self, id: Uuid) -> ClientResult<Ticket> {
        if !self.songs.iter().any(|song| song.id == id) {
            return Err(ClientError::UnknownSong(id));
        }
        Ok(self.mutation_ticket())
    }

    /// Remove a deleted song from the list
    pub fn apply_deleted(&mut self, ticket: Ticket, id: Uuid) -> bool {
        if !self.is_current(&ticket) {
            debug!("Dropping stale delete response for {}", ticket.leader);
            return false;
        }
        self.songs.retain(|song| song.id != id);
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Click on a sort control (direction always flips)
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    /// Derive what to render from the current state
    pub fn view(&self) -> SessionView {
        SessionView {
            list: SongListView::build(self.leader, &self.songs, &self.query, self.sort),
            form_visible: self.form.visible,
            form_toggle_label: if self.form.visible { "Cancel" } else { "Add New Song" },
            submit_label: if self.form.editing.is_some() {
                "Update Song"
            } else {
                "Add Song"
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, key: &str) -> Song {
        Song {
            id: Uuid::new_v4(),
            title: title.to_string(),
            key: key.to_string(),
        }
    }

    fn loaded(songs: Vec<Song>) -> ClientSession {
        let mut session = ClientSession::new(Leader::Nikita);
        let ticket = session.refresh();
        assert!(session.apply_songs(ticket, songs));
        session
    }

    #[test]
    fn test_select_leader_discards_songs() {
        let mut session = loaded(vec![song("Oceans", "D")]);

        let ticket = session.select_leader(Leader::Grace);
        assert_eq!(ticket.leader(), Leader::Grace);
        assert!(session.songs().is_empty());
        assert_eq!(session.view().list.heading, "Worship Song List: Grace Augustine");
    }

    #[test]
    fn test_superseded_fetch_is_dropped() {
        let mut session = ClientSession::new(Leader::Nikita);
        let first = session.refresh();
        let second = session.refresh();

        assert!(session.apply_songs(second, vec![song("New", "A")]));
        assert!(!session.apply_songs(first, vec![song("Old", "B")]));
        assert_eq!(session.songs()[0].title, "New");
    }

    #[test]
    fn test_fetch_for_previous_leader_is_dropped() {
        let mut session = ClientSession::new(Leader::Nikita);
        let nikita = session.refresh();
        let grace = session.select_leader(Leader::Grace);

        assert!(!session.apply_songs(nikita, vec![song("Nikita's", "D")]));
        assert!(session.songs().is_empty());
        assert!(session.apply_songs(grace, vec![song("Grace's", "E")]));
    }

    #[test]
    fn test_mutation_after_leader_switch_is_dropped() {
        let mut session = loaded(vec![]);
        let Submission::Create { ticket, .. } = session.submit_form() else {
            panic!("Expected create submission");
        };

        session.select_leader(Leader::Grace);
        assert!(!session.apply_created(ticket, song("Oceans", "D")));
        assert!(session.songs().is_empty());
    }

    #[test]
    fn test_submit_without_edit_creates() {
        let mut session = loaded(vec![]);
        session.toggle_form();
        session.set_form_title("Oceans");
        session.set_form_key("D");

        let submission = session.submit_form();
        let Submission::Create { ticket, draft } = submission else {
            panic!("Expected create submission");
        };
        assert_eq!(draft, SongDraft::new("Oceans", "D"));

        let created = song("Oceans", "D");
        assert!(session.apply_created(ticket, created.clone()));
        assert_eq!(session.songs(), &[created]);
        assert_eq!(session.form(), &SongForm::default());
        assert_eq!(session.view().form_toggle_label, "Add New Song");
    }

    #[test]
    fn test_submit_while_editing_updates() {
        let target = song("Oceans", "D");
        let other = song("Gratitude", "A");
        let mut session = loaded(vec![target.clone(), other.clone()]);

        session.edit(target.id).unwrap();
        assert!(session.form().visible);
        assert_eq!(session.form().title, "Oceans");
        assert_eq!(session.view().submit_label, "Update Song");

        session.set_form_title("Oceans (Live)");
        let Submission::Update { ticket, id, draft } = session.submit_form() else {
            panic!("Expected update submission");
        };
        assert_eq!(id, target.id);
        assert_eq!(draft.title, "Oceans (Live)");

        let updated = Song {
            title: "Oceans (Live)".to_string(),
            ..target.clone()
        };
        assert!(session.apply_updated(ticket, updated.clone()));
        assert_eq!(session.songs(), &[updated, other]);
        assert_eq!(session.form().editing, None);
        // Form stays open after an update
        assert!(session.form().visible);
    }

    #[test]
    fn test_edit_unknown_song_fails() {
        let mut session = loaded(vec![song("Oceans", "D")]);
        assert!(matches!(
            session.edit(Uuid::new_v4()),
            Err(ClientError::UnknownSong(_))
        ));
    }

    #[test]
    fn test_delete_removes_only_after_response() {
        let doomed = song("Oceans", "D");
        let mut session = loaded(vec![doomed.clone(), song("Gratitude", "A")]);

        let ticket = session.request_delete(doomed.id).unwrap();
        assert_eq!(session.songs().len(), 2);

        assert!(session.apply_deleted(ticket, doomed.id));
        assert_eq!(session.songs().len(), 1);
        assert!(session.songs().iter().all(|s| s.id != doomed.id));
    }

    #[test]
    fn test_view_applies_search_and_sort() {
        let mut session = loaded(vec![
            song("Way Maker", "E"),
            song("Amazing Grace", "G"),
            song("Grace Alone", "C"),
        ]);
        session.set_query("grace");
        session.sort_by(SortKey::Key);

        let view = session.view();
        assert_eq!(view.list.total_songs, 3);
        let titles: Vec<&str> = view.list.songs.iter().map(|s| s.title.as_str()).collect();
        // Key selected once from the default ascending state: descending by key
        assert_eq!(titles, vec!["Amazing Grace", "Grace Alone"]);
        assert_eq!(view.list.key_sort_label, "Sort Ascending by Key");
    }

    #[test]
    fn test_toggle_form_labels() {
        let mut session = ClientSession::default();
        assert_eq!(session.view().form_toggle_label, "Add New Song");
        session.toggle_form();
        assert!(session.view().form_visible);
        assert_eq!(session.view().form_toggle_label, "Cancel");
        assert_eq!(session.view().submit_label, "Add Song");
    }
}

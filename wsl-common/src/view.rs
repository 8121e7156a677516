//! Song list view model
//!
//! The displayed list is never stored. It is derived from the current songs,
//! the search query and the sort state each time it is rendered.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Leader, Song};

/// Field the list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Key,
}

impl SortKey {
    /// Capitalized name used in button labels
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Key => "Key",
        }
    }

    fn field<'a>(&self, song: &'a Song) -> &'a str {
        match self {
            SortKey::Title => &song.title,
            SortKey::Key => &song.key,
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "key" => Ok(SortKey::Key),
            other => Err(Error::InvalidInput(format!("Unknown sort key: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => f.write_str("title"),
            SortKey::Key => f.write_str("key"),
        }
    }
}

/// Active sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Title,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, ascending: bool) -> Self {
        Self { key, ascending }
    }

    /// Handle a click on a sort control
    ///
    /// The direction flips on every click, also when switching to a
    /// different key. A first click on "title" therefore sorts descending.
    pub fn select(&mut self, key: SortKey) {
        self.key = key;
        self.ascending = !self.ascending;
    }

    /// Label of the sort control for `key`
    pub fn button_label(&self, key: SortKey) -> String {
        if self.ascending && self.key == key {
            format!("Sort Descending by {}", key.label())
        } else {
            format!("Sort Ascending by {}", key.label())
        }
    }

    /// Order two songs by the active key and direction
    pub fn compare(&self, a: &Song, b: &Song) -> Ordering {
        let ordering = compare_text(self.key.field(a), self.key.field(b));
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Case-insensitive text order; texts differing only in case put lowercase first
///
/// Accented letters are not folded and order by code point after their
/// lowercase comparison.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Whether the song title contains the query, ignoring case
///
/// An empty query matches every song. The key is never searched.
pub fn matches_query(song: &Song, query: &str) -> bool {
    song.title.to_lowercase().contains(&query.to_lowercase())
}

/// Sort the songs, then keep those whose title matches the query
pub fn derive_view(songs: &[Song], query: &str, sort: SortState) -> Vec<Song> {
    let mut sorted = songs.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted.retain(|song| matches_query(song, query));
    sorted
}

/// Everything the song list screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongListView {
    pub heading: String,
    /// Count of all songs for the leader, before search filtering
    pub total_songs: usize,
    pub songs: Vec<Song>,
    pub title_sort_label: String,
    pub key_sort_label: String,
}

impl SongListView {
    pub fn build(leader: Leader, songs: &[Song], query: &str, sort: SortState) -> Self {
        Self {
            heading: format!("Worship Song List: {}", leader.display_name()),
            total_songs: songs.len(),
            songs: derive_view(songs, query, sort),
            title_sort_label: sort.button_label(SortKey::Title),
            key_sort_label: sort.button_label(SortKey::Key),
        }
    }
}

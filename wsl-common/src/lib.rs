//! # Worship Song List Common Library
//!
//! Shared code for the worship song list service and its clients:
//! - Song records and request bodies
//! - Worship leader routing tags
//! - Configuration loading
//! - Song list view model (sorting and search)

pub mod config;
pub mod error;
pub mod leader;
pub mod song;
pub mod view;

pub use error::{Error, Result};
pub use leader::Leader;
pub use song::{Song, SongDraft, SongPatch};

//! wsl-client library - client side of the worship song list
//!
//! Typed API client, session state with request sequencing, and the
//! controller tying them together.

pub mod api_client;
pub mod controller;
pub mod error;
pub mod session;

pub use api_client::{SongApiClient, DEFAULT_BASE_URL};
pub use controller::SongListController;
pub use error::{ClientError, ClientResult};
pub use session::{ClientSession, SessionView, SongForm, Submission, Ticket};

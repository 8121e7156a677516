//! Worship leader routing tags
//!
//! Each leader owns one isolated song store. The tag is resolved once from
//! the request path; names that match no leader are rejected rather than
//! routed to a default store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A worship leader, selecting which song store a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Leader {
    #[default]
    Nikita,
    Grace,
}

impl Leader {
    /// Both leaders, in display order
    pub const ALL: [Leader; 2] = [Leader::Nikita, Leader::Grace];

    /// Name used in URLs (`/songs/<name>`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Leader::Nikita => "Nikita",
            Leader::Grace => "Grace",
        }
    }

    /// Full name shown in the list heading
    pub fn display_name(&self) -> &'static str {
        match self {
            Leader::Nikita => "Nikita D",
            Leader::Grace => "Grace Augustine",
        }
    }

    /// Name of the database holding this leader's songs
    pub fn database_name(&self) -> &'static str {
        match self {
            Leader::Nikita => "worship_songs_db",
            Leader::Grace => "grace_worship_songs_db",
        }
    }
}

impl FromStr for Leader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nikita" => Ok(Leader::Nikita),
            "Grace" => Ok(Leader::Grace),
            other => Err(Error::UnknownLeader(other.to_string())),
        }
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

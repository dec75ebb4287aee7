//! Domain API

use serde::{Deserialize, Serialize};

/// A sending domain and its verification state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub id: String,

    pub name: String,

    /// e.g. "verified", "pending", "not_started"
    pub status: String,

    pub created_at: String,

    pub region: String,
}

impl Domain {
    pub fn is_verified(&self) -> bool {
        self.status == "verified"
    }
}

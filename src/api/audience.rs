//! Audience API

use serde::{Deserialize, Serialize};

/// Body of `POST /audiences`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudienceRequest {
    pub name: String,
}

/// A named group of contacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Audience {
    pub id: String,

    pub name: String,

    pub created_at: String,
}

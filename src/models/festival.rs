//! Festival (event) domain types.

use serde::{Deserialize, Serialize};

/// A festival/event record. Authoritative copy lives on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Festival {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Envelope returned by `GET /festivals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalListResponse {
    pub festivals: Vec<Festival>,
}

/// Request body for `POST /festivals` and `PUT /festivals/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalPayload {
    pub name: String,
    pub description: String,
}

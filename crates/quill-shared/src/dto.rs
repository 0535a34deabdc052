//! Data Transfer Objects - request/response types for the API.
//!
//! Bodies reject unknown fields; patch bodies use the double-`Option`
//! convention from [`crate::de::double_option`] for nullable columns.

use serde::{Deserialize, Serialize};

use crate::de;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_time_minutes: Option<i32>,
}

/// Request to partially update a post. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub reading_time_minutes: Option<Option<i32>>,
}

/// Query parameters for listing posts. All filters AND together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostListQuery {
    pub published: Option<bool>,
    pub tag: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Request to create a code snippet under an existing post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSnippetRequest {
    pub post_id: i32,
    #[serde(default)]
    pub title: Option<String>,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: i32,
}

/// Request to partially update a code snippet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSnippetRequest {
    #[serde(default, deserialize_with = "de::double_option")]
    pub title: Option<Option<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub order_index: Option<i32>,
}

/// One entry of the desired snippet set sent by the post editor on save.
/// `id` present means "this stored snippet survives"; absent means "newly
/// authored".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetDraftRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: i32,
}

/// Full desired snippet set for a post; stored snippets not referenced here
/// are deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSnippetsRequest {
    pub snippets: Vec<SnippetDraftRequest>,
}

/// Result of a delete: whether a row was actually removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Summary of an applied snippet reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSnippetsResponse {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// Liveness report served by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::snippet::CodeSnippet;

/// Post entity - a blog article with publishing metadata and tags.
///
/// `tags` is stored as a serialized sequence (JSONB column); insertion order
/// is preserved, but for filtering it behaves as a set of exact strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamped whenever a write sets `published = true`; never cleared by an
    /// un-publish (matches the historical behavior of this system).
    pub published_at: Option<DateTime<Utc>>,
}

/// Input for creating a post. The transport layer guarantees `title` and
/// `slug` are non-empty and `reading_time_minutes` is positive when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<i32>,
}

/// Partial update for a post.
///
/// Every field is presence-wrapped: `None` means "leave unchanged". Nullable
/// columns are double-wrapped so `Some(None)` means "set to null".
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub reading_time_minutes: Option<Option<i32>>,
}

impl PostPatch {
    /// True when the patch carries no field at all. An empty patch still
    /// refreshes `updated_at` when applied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.published.is_none()
            && self.tags.is_none()
            && self.reading_time_minutes.is_none()
    }
}

/// Options for listing posts. All conditions AND together.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Exact match on the published flag; `None` matches both.
    pub published: Option<bool>,
    /// Matches posts whose tag sequence contains this exact string.
    pub tag: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A post together with its snippets, ordered by `order_index` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithSnippets {
    #[serde(flatten)]
    pub post: Post,
    pub code_snippets: Vec<CodeSnippet>,
}

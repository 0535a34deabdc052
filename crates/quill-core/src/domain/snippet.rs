use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Code snippet entity - a titled, ordered block of source code attached to
/// a post. Deleting the post deletes its snippets (store-enforced cascade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub id: i32,
    pub post_id: i32,
    pub title: Option<String>,
    /// Free-form syntax highlighting hint; not validated against a list.
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    /// Display order among snippets of the same post. Not required to be
    /// unique or contiguous; listings sort by it ascending.
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a snippet under an existing post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSnippet {
    pub post_id: i32,
    pub title: Option<String>,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub order_index: i32,
}

/// Partial update for a snippet. Same presence conventions as `PostPatch`.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub title: Option<Option<String>>,
    pub language: Option<String>,
    pub code: Option<String>,
    pub description: Option<Option<String>>,
    pub order_index: Option<i32>,
}

impl SnippetPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.language.is_none()
            && self.code.is_none()
            && self.description.is_none()
            && self.order_index.is_none()
    }
}

/// One entry of the desired snippet set handed to reconciliation.
///
/// `id: None` marks a newly authored snippet; `Some(id)` references a stored
/// one. Each entry carries the full editable field set, as collected by the
/// post editor form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetDraft {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub order_index: i32,
}

impl SnippetDraft {
    /// Create input for a draft with no stored counterpart. Empty-string
    /// title/description collapse to null.
    pub fn into_new(self, post_id: i32) -> NewSnippet {
        NewSnippet {
            post_id,
            title: none_if_empty(self.title),
            language: self.language,
            code: self.code,
            description: none_if_empty(self.description),
            order_index: self.order_index,
        }
    }

    /// Full-field patch for a draft that references a stored snippet.
    pub fn into_patch(self) -> SnippetPatch {
        SnippetPatch {
            title: Some(none_if_empty(self.title)),
            language: Some(self.language),
            code: Some(self.code),
            description: Some(none_if_empty(self.description)),
            order_index: Some(self.order_index),
        }
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

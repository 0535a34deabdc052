//! Ports - trait interfaces implemented by the infrastructure layer.

mod repository;

pub use repository::{PostRepository, SnippetRepository};

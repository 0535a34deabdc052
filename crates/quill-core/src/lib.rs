//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post/snippet entities, the repository ports, the read-side query service,
//! and the snippet reconciliation algorithm used when saving an edited post.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{ReconcileError, RepoError};

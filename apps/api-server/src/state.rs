//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, SnippetRepository};
use quill_core::services::{PostQueryService, SnippetReconciler};
use quill_infra::database::{InMemoryPostRepository, InMemorySnippetRepository, InMemoryStore};
use quill_infra::DatabaseConfig;

#[cfg(feature = "postgres")]
use quill_infra::{PgPostRepository, PgSnippetRepository, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub snippets: Arc<dyn SnippetRepository>,
    pub query: Arc<PostQueryService>,
    pub reconciler: Arc<SnippetReconciler>,
}

type RepoPair = (Arc<dyn PostRepository>, Arc<dyn SnippetRepository>);

fn memory_repos() -> RepoPair {
    let store = InMemoryStore::new();
    (
        Arc::new(InMemoryPostRepository::new(store.clone())),
        Arc::new(InMemorySnippetRepository::new(store)),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (posts, snippets): RepoPair = {
            if let Some(config) = db_config {
                match connect(config).await {
                    Ok(db) => {
                        // One pool, shared by both repositories.
                        let db = Arc::new(db);
                        (
                            Arc::new(PgPostRepository::new(db.clone())),
                            Arc::new(PgSnippetRepository::new(db)),
                        )
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        memory_repos()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_repos()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (posts, snippets): RepoPair = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            memory_repos()
        };

        let query = Arc::new(PostQueryService::new(posts.clone(), snippets.clone()));
        let reconciler = Arc::new(SnippetReconciler::new(snippets.clone()));

        tracing::info!("Application state initialized");

        Self {
            posts,
            snippets,
            query,
            reconciler,
        }
    }
}

#[cfg(test)]
mod memory_tests {
    use std::sync::Arc;

    use quill_core::domain::{NewPost, NewSnippet, PostFilter, PostPatch, SnippetDraft};
    use quill_core::error::RepoError;
    use quill_core::ports::{PostRepository, SnippetRepository};
    use quill_core::services::{PostKey, PostQueryService, SnippetReconciler};

    use crate::database::{InMemoryPostRepository, InMemorySnippetRepository, InMemoryStore};

    fn repos() -> (Arc<InMemoryPostRepository>, Arc<InMemorySnippetRepository>) {
        let store = InMemoryStore::new();
        (
            Arc::new(InMemoryPostRepository::new(store.clone())),
            Arc::new(InMemorySnippetRepository::new(store)),
        )
    }

    fn new_post(slug: &str, published: bool, tags: &[&str]) -> NewPost {
        NewPost {
            title: format!("Post {slug}"),
            slug: slug.to_string(),
            excerpt: None,
            content: "body".to_string(),
            published,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time_minutes: None,
        }
    }

    fn new_snippet(post_id: i32, code: &str, order_index: i32) -> NewSnippet {
        NewSnippet {
            post_id,
            title: None,
            language: "rust".to_string(),
            code: code.to_string(),
            description: None,
            order_index,
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrips_every_field() {
        let (posts, _) = repos();

        let input = NewPost {
            title: "Hello".into(),
            slug: "hello".into(),
            excerpt: Some("intro".into()),
            content: "world".into(),
            published: true,
            tags: vec!["rust".into(), "blog".into()],
            reading_time_minutes: Some(4),
        };

        let created = posts.create(input).await.unwrap();
        let fetched = posts.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.excerpt.as_deref(), Some("intro"));
        assert_eq!(fetched.tags, vec!["rust", "blog"]);
        assert_eq!(fetched.reading_time_minutes, Some(4));
    }

    #[tokio::test]
    async fn duplicate_slug_fails_with_constraint() {
        let (posts, _) = repos();

        posts.create(new_post("same", false, &[])).await.unwrap();
        let err = posts.create(new_post("same", false, &[])).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn published_at_set_only_when_published() {
        let (posts, _) = repos();

        let published = posts.create(new_post("pub", true, &[])).await.unwrap();
        let draft = posts.create(new_post("draft", false, &[])).await.unwrap();

        assert!(published.published_at.is_some());
        assert!(draft.published_at.is_none());
    }

    #[tokio::test]
    async fn publishing_update_restamps_and_unpublish_keeps_published_at() {
        let (posts, _) = repos();
        let post = posts.create(new_post("p", true, &[])).await.unwrap();
        let first_stamp = post.published_at.unwrap();

        // Re-asserting published=true moves the stamp forward.
        let patch = PostPatch {
            published: Some(true),
            ..Default::default()
        };
        let restamped = posts.update(post.id, patch).await.unwrap();
        assert!(restamped.published_at.unwrap() >= first_stamp);

        // Un-publishing leaves the stamp in place.
        let patch = PostPatch {
            published: Some(false),
            ..Default::default()
        };
        let unpublished = posts.update(post.id, patch).await.unwrap();
        assert!(!unpublished.published);
        assert!(unpublished.published_at.is_some());
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() {
        let (posts, _) = repos();
        let post = posts
            .create(NewPost {
                excerpt: Some("old".into()),
                ..new_post("p", false, &["go"])
            })
            .await
            .unwrap();

        let patch = PostPatch {
            title: Some("New title".into()),
            excerpt: Some(None),
            ..Default::default()
        };
        let updated = posts.update(post.id, patch).await.unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.excerpt, None);
        assert_eq!(updated.slug, post.slug);
        assert_eq!(updated.tags, post.tags);
        assert!(updated.updated_at >= post.updated_at);
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn list_filters_and_with_published_and_tag() {
        let (posts, _) = repos();

        posts.create(new_post("a", true, &["go"])).await.unwrap();
        posts.create(new_post("b", false, &["go"])).await.unwrap();
        posts.create(new_post("c", true, &["rust"])).await.unwrap();

        let filter = PostFilter {
            published: Some(true),
            tag: Some("go".into()),
            ..Default::default()
        };
        let results = posts.list(&filter).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "a");
    }

    #[tokio::test]
    async fn list_applies_offset_then_limit() {
        let (posts, _) = repos();
        for i in 0..5 {
            posts
                .create(new_post(&format!("p{i}"), false, &[]))
                .await
                .unwrap();
        }

        let filter = PostFilter {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        let page = posts.list(&filter).await.unwrap();

        assert_eq!(page.len(), 2);
        // Newest first; offset 1 skips the most recent.
        assert_eq!(page[0].slug, "p3");
        assert_eq!(page[1].slug, "p2");
    }

    #[tokio::test]
    async fn snippets_list_sorted_by_order_index_regardless_of_insertion() {
        let (posts, snippets) = repos();
        let post = posts.create(new_post("p", false, &[])).await.unwrap();

        snippets.create(new_snippet(post.id, "third", 2)).await.unwrap();
        snippets.create(new_snippet(post.id, "first", 0)).await.unwrap();
        snippets.create(new_snippet(post.id, "second", 1)).await.unwrap();

        let listed = snippets.list_by_post(post.id).await.unwrap();
        let codes: Vec<&str> = listed.iter().map(|s| s.code.as_str()).collect();

        assert_eq!(codes, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn snippet_create_fails_for_missing_post() {
        let (_, snippets) = repos();

        let err = snippets.create(new_snippet(42, "x", 0)).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn deleting_post_cascades_to_snippets() {
        let (posts, snippets) = repos();
        let post = posts.create(new_post("p", false, &[])).await.unwrap();
        for i in 0..3 {
            snippets.create(new_snippet(post.id, "x", i)).await.unwrap();
        }

        let removed = posts.delete(post.id).await.unwrap();

        assert!(removed);
        assert!(snippets.list_by_post(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_errors_but_delete_missing_reports_false() {
        let (posts, snippets) = repos();

        let err = posts.update(999, PostPatch::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));

        assert!(!posts.delete(999).await.unwrap());
        assert!(!snippets.delete(999).await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_is_not_found_even_when_slug_would_collide() {
        let (posts, _) = repos();
        posts.create(new_post("taken", false, &[])).await.unwrap();

        let patch = PostPatch {
            slug: Some("taken".into()),
            ..Default::default()
        };
        let err = posts.update(999, patch).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn query_service_attaches_ordered_snippets_for_both_keys() {
        let (posts, snippets) = repos();
        let post = posts.create(new_post("detail", false, &[])).await.unwrap();
        snippets.create(new_snippet(post.id, "b", 1)).await.unwrap();
        snippets.create(new_snippet(post.id, "a", 0)).await.unwrap();

        let service = PostQueryService::new(posts.clone(), snippets.clone());

        let by_id = service.get(PostKey::Id(post.id)).await.unwrap().unwrap();
        let by_slug = service
            .get(PostKey::Slug("detail".into()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_id, by_slug);
        assert_eq!(by_id.code_snippets.len(), 2);
        assert_eq!(by_id.code_snippets[0].code, "a");

        assert!(
            service
                .get(PostKey::Slug("missing".into()))
                .await
                .unwrap()
                .is_none()
        );
    }

    fn draft(id: Option<i32>, code: &str, order_index: i32) -> SnippetDraft {
        SnippetDraft {
            id,
            title: None,
            language: "rust".into(),
            code: code.into(),
            description: None,
            order_index,
        }
    }

    #[tokio::test]
    async fn reconciliation_converges_update_create_delete_mix() {
        let (posts, snippets) = repos();
        let post = posts.create(new_post("p", false, &[])).await.unwrap();
        let s1 = snippets.create(new_snippet(post.id, "a", 0)).await.unwrap();
        let s2 = snippets.create(new_snippet(post.id, "b", 1)).await.unwrap();

        let reconciler = SnippetReconciler::new(snippets.clone());

        // Keep s1 with new code, drop s2, add a fresh one.
        let desired = vec![draft(Some(s1.id), "x", 0), draft(None, "y", 1)];
        let report = reconciler.sync(post.id, desired).await.unwrap();

        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.deleted, vec![s2.id]);

        let stored = snippets.list_by_post(post.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, s1.id);
        assert_eq!(stored[0].code, "x");
        assert_eq!(stored[1].code, "y");
        assert!(stored.iter().all(|s| s.id != s2.id));
    }

    #[tokio::test]
    async fn reconciliation_is_idempotent_once_ids_are_assigned() {
        let (posts, snippets) = repos();
        let post = posts.create(new_post("p", false, &[])).await.unwrap();

        let reconciler = SnippetReconciler::new(snippets.clone());

        let first = reconciler
            .sync(post.id, vec![draft(None, "a", 0), draft(None, "b", 1)])
            .await
            .unwrap();
        assert_eq!(first.created.len(), 2);

        let after_first = snippets.list_by_post(post.id).await.unwrap();

        // Second run uses the ids assigned by the first.
        let desired: Vec<SnippetDraft> = after_first
            .iter()
            .map(|s| draft(Some(s.id), &s.code, s.order_index))
            .collect();
        let second = reconciler.sync(post.id, desired).await.unwrap();

        assert!(second.created.is_empty());
        assert!(second.deleted.is_empty());

        let after_second = snippets.list_by_post(post.id).await.unwrap();
        let ids_first: Vec<i32> = after_first.iter().map(|s| s.id).collect();
        let ids_second: Vec<i32> = after_second.iter().map(|s| s.id).collect();
        assert_eq!(ids_first, ids_second);
    }
}

#[cfg(all(test, feature = "postgres"))]
mod postgres_tests {
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use quill_core::domain::NewPost;
    use quill_core::ports::{PostRepository, SnippetRepository};

    use crate::database::entity::code_snippet;
    use crate::database::entity::post::{self, Tags};
    use crate::database::postgres::{PgPostRepository, PgSnippetRepository};

    fn post_model(id: i32, slug: &str) -> post::Model {
        let now = Utc::now();
        post::Model {
            id,
            title: "Test Post".to_owned(),
            slug: slug.to_owned(),
            excerpt: None,
            content: "Content".to_owned(),
            published: true,
            tags: Tags(vec!["rust".to_owned()]),
            reading_time_minutes: Some(3),
            created_at: now,
            updated_at: now,
            published_at: Some(now),
        }
    }

    #[tokio::test]
    async fn get_by_slug_maps_model_to_domain() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, "test-post")]])
            .into_connection();

        let repo = PgPostRepository::new(Arc::new(db));
        let post = repo.get_by_slug("test-post").await.unwrap().unwrap();

        assert_eq!(post.id, 7);
        assert_eq!(post.slug, "test-post");
        assert_eq!(post.tags, vec!["rust"]);
        assert!(post.published_at.is_some());
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_empty_result() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PgPostRepository::new(Arc::new(db));
        assert!(repo.get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(1, "hello")]])
            .into_connection();

        let repo = PgPostRepository::new(Arc::new(db));
        let post = repo
            .create(NewPost {
                title: "Test Post".into(),
                slug: "hello".into(),
                excerpt: None,
                content: "Content".into(),
                published: true,
                tags: vec!["rust".into()],
                reading_time_minutes: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(post.id, 1);
        assert!(post.published_at.is_some());
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PgPostRepository::new(Arc::new(db));
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn both_repositories_serve_from_one_shared_connection() {
        let now = Utc::now();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![post_model(7, "shared")]])
                .append_query_results(vec![vec![code_snippet::Model {
                    id: 1,
                    post_id: 7,
                    title: None,
                    language: "rust".to_owned(),
                    code: "fn main() {}".to_owned(),
                    description: None,
                    order_index: 0,
                    created_at: now,
                }]])
                .into_connection(),
        );

        let posts = PgPostRepository::new(db.clone());
        let snippets = PgSnippetRepository::new(db);

        let post = posts.get_by_id(7).await.unwrap().unwrap();
        let listed = snippets.list_by_post(post.id).await.unwrap();

        assert_eq!(post.slug, "shared");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].post_id, post.id);
    }
}

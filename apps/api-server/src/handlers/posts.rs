//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostFilter, PostPatch, SnippetDraft};
use quill_core::services::PostKey;
use quill_shared::dto::{
    CreatePostRequest, DeleteResponse, PostListQuery, SnippetDraftRequest, SyncSnippetsRequest,
    SyncSnippetsResponse, UpdatePostRequest,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_reading_time(minutes: Option<i32>) -> AppResult<()> {
    if let Some(minutes) = minutes {
        if minutes <= 0 {
            return Err(AppError::BadRequest(
                "reading_time_minutes must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.title.is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if req.slug.is_empty() {
        return Err(AppError::BadRequest("slug must not be empty".to_string()));
    }
    validate_reading_time(req.reading_time_minutes)?;

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            slug: req.slug,
            excerpt: req.excerpt,
            content: req.content,
            published: req.published,
            tags: req.tags,
            reading_time_minutes: req.reading_time_minutes,
        })
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    if query.limit == Some(0) {
        return Err(AppError::BadRequest("limit must be positive".to_string()));
    }

    let posts = state
        .posts
        .list(&PostFilter {
            published: query.published,
            tag: query.tag,
            limit: query.limit,
            offset: query.offset,
        })
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/published
pub async fn list_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .query
        .get(PostKey::Id(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/slug/{slug}
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let post = state
        .query
        .get(PostKey::Slug(slug.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{slug}' not found")))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.title.as_deref() == Some("") {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if req.slug.as_deref() == Some("") {
        return Err(AppError::BadRequest("slug must not be empty".to_string()));
    }
    if let Some(minutes) = req.reading_time_minutes {
        validate_reading_time(minutes)?;
    }

    let post = state
        .posts
        .update(
            id,
            PostPatch {
                title: req.title,
                slug: req.slug,
                excerpt: req.excerpt,
                content: req.content,
                published: req.published,
                tags: req.tags,
                reading_time_minutes: req.reading_time_minutes,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let success = state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { success }))
}

/// PUT /api/posts/{id}/snippets
///
/// Replaces the post's snippet set with the submitted one: entries carrying
/// an id update the stored snippet, entries without one are created, and
/// stored snippets missing from the submission are deleted.
pub async fn sync_snippets(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<SyncSnippetsRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    for entry in &req.snippets {
        if entry.order_index < 0 {
            return Err(AppError::BadRequest(
                "order_index must be non-negative".to_string(),
            ));
        }
    }

    // 404 before touching any snippet row.
    if state.posts.get_by_id(post_id).await?.is_none() {
        return Err(AppError::NotFound(format!("post {post_id} not found")));
    }

    let desired = req.snippets.into_iter().map(into_draft).collect();
    let report = state.reconciler.sync(post_id, desired).await?;

    Ok(HttpResponse::Ok().json(SyncSnippetsResponse {
        created: report.created.len(),
        updated: report.updated.len(),
        deleted: report.deleted.len(),
    }))
}

fn into_draft(entry: SnippetDraftRequest) -> SnippetDraft {
    SnippetDraft {
        id: entry.id,
        title: entry.title,
        language: entry.language,
        code: entry.code,
        description: entry.description,
        order_index: entry.order_index,
    }
}

//! Code snippet handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewSnippet, SnippetPatch};
use quill_shared::dto::{CreateSnippetRequest, DeleteResponse, UpdateSnippetRequest};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_order_index(order_index: i32) -> AppResult<()> {
    if order_index < 0 {
        return Err(AppError::BadRequest(
            "order_index must be non-negative".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/snippets
pub async fn create_snippet(
    state: web::Data<AppState>,
    body: web::Json<CreateSnippetRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_order_index(req.order_index)?;

    let snippet = state
        .snippets
        .create(NewSnippet {
            post_id: req.post_id,
            title: req.title,
            language: req.language,
            code: req.code,
            description: req.description,
            order_index: req.order_index,
        })
        .await?;

    Ok(HttpResponse::Created().json(snippet))
}

/// PATCH /api/snippets/{id}
pub async fn update_snippet(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateSnippetRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(order_index) = req.order_index {
        validate_order_index(order_index)?;
    }

    let snippet = state
        .snippets
        .update(
            id,
            SnippetPatch {
                title: req.title,
                language: req.language,
                code: req.code,
                description: req.description,
                order_index: req.order_index,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(snippet))
}

/// DELETE /api/snippets/{id}
pub async fn delete_snippet(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let success = state.snippets.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { success }))
}

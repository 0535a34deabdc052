//! HTTP handlers and route configuration.

mod health;
mod posts;
mod snippets;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/published", web::get().to(posts::list_published))
                    .route("/slug/{slug}", web::get().to(posts::get_post_by_slug))
                    .route("/{id}", web::get().to(posts::get_post_by_id))
                    .route("/{id}", web::patch().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/snippets", web::put().to(posts::sync_snippets)),
            )
            // Code snippet routes
            .service(
                web::scope("/snippets")
                    .route("", web::post().to(snippets::create_snippet))
                    .route("/{id}", web::patch().to(snippets::update_snippet))
                    .route("/{id}", web::delete().to(snippets::delete_snippet)),
            ),
    );
}

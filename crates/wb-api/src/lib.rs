//! # wb-api
//!
//! The JSON transport layer for Warble. It maps HTTP requests onto the
//! feed store's command/query interface and typed failures onto HTTP
//! statuses. It renders nothing — any presentation layer consumes
//! these endpoints and triggers its own refresh after a successful
//! command.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the feed routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/posts", web::get().to(handlers::list_posts))
            .route("/posts", web::post().to(handlers::create_post))
            .route("/posts/{id}/like", web::post().to(handlers::like_post))
            .route("/posts/{id}/replies", web::post().to(handlers::add_reply))
            .route("/users", web::post().to(handlers::register_user))
            .route("/users/{handle}", web::get().to(handlers::resolve_user)),
    );
}

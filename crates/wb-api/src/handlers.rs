//! # wb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! feed store. Command handlers return the created/updated entity or
//! a typed failure mapped to an HTTP status; the caller re-renders
//! from `GET /posts` after any successful command.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use wb_core::error::FeedError;
use wb_feed::FeedStore;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub feed: Arc<FeedStore>,
    /// Encoded placeholder icon, substituted when a registration
    /// carries no icon of its own.
    pub default_icon: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub display_name: String,
    pub handle: String,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub author: String,
    pub text: String,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplyRequest {
    pub author: String,
    pub text: String,
}

#[derive(Serialize)]
struct LikeResponse {
    post_id: Uuid,
    like_count: u64,
}

/// Maps a feed store failure onto an HTTP response. Validation
/// failures are the caller's to fix; store-level failures are ours.
fn error_response(err: FeedError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        FeedError::DuplicateHandle(_) => HttpResponse::Conflict().json(body),
        FeedError::UnknownAuthor(_) | FeedError::Validation(_) => {
            HttpResponse::BadRequest().json(body)
        }
        FeedError::PostNotFound(_) => HttpResponse::NotFound().json(body),
        FeedError::CorruptStore { .. } | FeedError::Persistence(_) | FeedError::Decode(_) => {
            log::error!("feed command failed: {err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub async fn register_user(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let icon = req.icon.unwrap_or_else(|| state.default_icon.clone());
    match state.feed.register_user(&req.display_name, &req.handle, icon).await {
        Ok(user) => HttpResponse::Created().json(user),
        Err(e) => error_response(e),
    }
}

pub async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<CreatePostRequest>,
) -> impl Responder {
    match state.feed.create_post(&req.author, &req.text, req.image.clone()).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(e) => error_response(e),
    }
}

pub async fn like_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let post_id = path.into_inner();
    match state.feed.like_post(post_id).await {
        Ok(like_count) => HttpResponse::Ok().json(LikeResponse { post_id, like_count }),
        Err(e) => error_response(e),
    }
}

pub async fn add_reply(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ReplyRequest>,
) -> impl Responder {
    match state.feed.add_reply(path.into_inner(), &req.author, &req.text).await {
        Ok(reply) => HttpResponse::Created().json(reply),
        Err(e) => error_response(e),
    }
}

pub async fn list_posts(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.feed.list_posts().await)
}

/// Absent is expected here (weak author references may dangle); the
/// transport reports it as 404 and the consumer falls back to its
/// default display identity.
pub async fn resolve_user(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.feed.resolve_user(&path.into_inner()).await {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "unknown handle" })),
    }
}

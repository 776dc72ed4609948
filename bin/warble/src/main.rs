//! # Warble Binary
//!
//! The entry point that assembles the feed service based on
//! compile-time features and environment configuration.

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use wb_api::handlers::AppState;
use wb_api::{configure_routes, middleware};
use wb_feed::FeedStore;

#[cfg(feature = "storage-json")]
use wb_storage_json::JsonStateStore;

/// Loads the configured default icon, masked to the avatar circle.
/// Falls back to the built-in placeholder when the asset is missing
/// or unreadable.
fn load_default_icon(path: &str) -> anyhow::Result<String> {
    let icon = match std::fs::read(path) {
        Ok(bytes) => {
            let img = wb_imaging::decode_image_bytes(bytes).unwrap_or_else(|e| {
                log::warn!("default icon {path} is not a valid image: {e}");
                wb_imaging::placeholder(48)
            });
            wb_imaging::to_circular_icon(&img, 48)
        }
        Err(e) => {
            log::warn!("default icon {path} unavailable ({e}), using placeholder");
            wb_imaging::placeholder(48)
        }
    };
    Ok(wb_imaging::encode_image(&icon)?)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let data_dir = std::env::var("WARBLE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let bind = std::env::var("WARBLE_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let icon_path = std::env::var("WARBLE_DEFAULT_ICON")
        .unwrap_or_else(|_| "./assets/icon_user_light.png".to_string());

    // 1. Initialize the storage plugin
    #[cfg(feature = "storage-json")]
    let store = Arc::new(JsonStateStore::new(data_dir.clone().into()));

    // 2. Open the feed store. A corrupt document fails startup here
    //    rather than silently resetting a collection.
    let feed = Arc::new(FeedStore::open(store).await?);

    // 3. Deployment-supplied placeholder identity asset
    let default_icon = load_default_icon(&icon_path)?;

    let state = web::Data::new(AppState { feed, default_icon });

    log::info!("warble starting on http://{bind} (data dir: {data_dir})");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::request_logger())
            .wrap(middleware::cors_policy())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}

//! HTTP handlers and route configuration.

mod comments;
mod health;
mod info;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .route("/info", web::get().to(info::info))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("/{id}", web::get().to(posts::get))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete))
                .route("/{id}/comments", web::get().to(comments::list))
                .route("/{id}/comments", web::post().to(comments::create)),
        );
}

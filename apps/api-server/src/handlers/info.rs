use actix_web::{HttpResponse, web};

use crate::state::AppState;

/// GET /info - configured blog properties.
pub async fn info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.blog.as_ref())
}

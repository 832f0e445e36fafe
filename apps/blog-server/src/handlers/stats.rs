use actix_web::{HttpResponse, web};

use crate::state::AppState;

/// GET /stats
pub async fn get_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.stats().await)
}

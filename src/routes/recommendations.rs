use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

use crate::core::Matcher;
use crate::errors::ApiError;
use crate::models::{HealthResponse, RecommendationRequest, RecommendationResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure API routes (mounted under `/api`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend destinations endpoint
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "budget": 5000,
///   "duration": 4,
///   "types": [1, 2]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let request = RecommendationRequest::from_json(&body).map_err(|e| {
        tracing::info!("Rejected recommendation request: {}", e);
        ApiError::from(e)
    })?;

    let query = request.into_query();

    tracing::info!(
        "Recommending cities: budget={}, duration={}, types={:?}",
        query.budget,
        query.duration,
        query.type_ids
    );

    let result = state.matcher.recommend(&query);

    tracing::info!(
        "Returning {} cities ({} of {} bands in range)",
        result.cities.len(),
        result.matched_bands,
        result.total_bands
    );

    Ok(HttpResponse::Ok().json(RecommendationResponse {
        cities: result.cities,
    }))
}

use actix_web::{web, HttpResponse, Responder};

use crate::api::metrics;
use crate::services::auth_service::Claims;
use crate::services::visualization_service::{self, VisualizationResponse};
use crate::storage::{AccountRepository, JsonAccountStore};

#[utoipa::path(
    get,
    path = "/api/v1/visualization",
    tag = "Visualization",
    responses(
        (status = 200, description = "Chart-ready risk series and feature importance", body = VisualizationResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_visualization(
    user: web::ReqData<Claims>,
    accounts: web::Data<JsonAccountStore>,
) -> impl Responder {
    metrics::increment_request_count();
    let identifier = &user.sub;
    log::info!("📊 GET /visualization - account: {}", identifier);

    match accounts.list_predictions(identifier).await {
        Ok(predictions) => {
            let response = visualization_service::assemble(&predictions);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to load history for {}: {}", identifier, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

use actix_web::{web, HttpResponse, Responder};

use crate::api::metrics;
use crate::services::auth_service::Claims;
use crate::services::prediction_service::{self, PredictionRequest, PredictionResponse};
use crate::storage::{AccountRepository, JsonAccountStore, JsonPatientStore};

#[utoipa::path(
    post,
    path = "/api/v1/predictions",
    tag = "Predictions",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction computed and stored", body = PredictionResponse),
        (status = 400, description = "Missing mandatory form fields"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_prediction(
    user: web::ReqData<Claims>,
    accounts: web::Data<JsonAccountStore>,
    patients: web::Data<JsonPatientStore>,
    request: web::Json<PredictionRequest>,
) -> impl Responder {
    metrics::increment_request_count();
    let identifier = &user.sub;
    log::info!("💓 POST /predictions - account: {}", identifier);

    let missing = prediction_service::missing_mandatory_fields(&request);
    if !missing.is_empty() {
        metrics::increment_error_count();
        log::warn!("⚠️  Missing mandatory fields: {:?}", missing);
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Please fill all mandatory fields (Name, Gender, Email)",
            "missing_fields": missing
        }));
    }

    match prediction_service::submit(accounts.get_ref(), patients.get_ref(), identifier, &request)
        .await
    {
        Ok(response) => {
            metrics::increment_prediction_count();
            log::info!(
                "✅ Prediction saved: {} -> {} ({} points)",
                response.record_file,
                response.risk,
                response.points
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Prediction failed for {}: {}", identifier, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/predictions",
    tag = "Predictions",
    responses(
        (status = 200, description = "Stored prediction history for the caller")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_predictions(
    user: web::ReqData<Claims>,
    accounts: web::Data<JsonAccountStore>,
) -> impl Responder {
    metrics::increment_request_count();
    let identifier = &user.sub;
    log::info!("📋 GET /predictions - account: {}", identifier);

    match accounts.list_predictions(identifier).await {
        Ok(predictions) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": predictions.len(),
            "predictions": predictions
        })),
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to load predictions for {}: {}", identifier, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

use actix_web::{web, HttpResponse, Responder};

use crate::api::metrics;
use crate::storage::{JsonPatientStore, PatientRepository};
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "Records",
    responses(
        (status = 200, description = "Stored patient document names")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_records(patients: web::Data<JsonPatientStore>) -> impl Responder {
    metrics::increment_request_count();
    log::info!("📂 GET /records");

    match patients.list().await {
        Ok(records) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": records.len(),
            "records": records
        })),
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to list records: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/records/{file}",
    tag = "Records",
    params(
        ("file" = String, Path, description = "Record file name, e.g. Jane_Doe.json")
    ),
    responses(
        (status = 200, description = "One stored patient document"),
        (status = 404, description = "Record not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_record(
    patients: web::Data<JsonPatientStore>,
    path: web::Path<String>,
) -> impl Responder {
    metrics::increment_request_count();
    let file = path.into_inner();
    log::info!("📄 GET /records/{}", file);

    match patients.load(&file).await {
        Ok(record) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "record": record
        })),
        Err(AppError::NotFound(e)) => {
            metrics::increment_error_count();
            log::warn!("⚠️  {}", e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
        Err(AppError::InvalidRequest(e)) => {
            metrics::increment_error_count();
            log::warn!("⚠️  {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to load record {}: {}", file, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cardio Risk Service API",
        version = "1.0.0",
        description = "API for the heart disease risk dashboard. \n\n**Authentication:** Prediction, record and visualization endpoints require JWT Bearer token authentication.\n\n**Features:**\n- Account registration and login\n- Deterministic threshold-based cardiac risk scoring\n- Per-account prediction history\n- Patient record browser\n- Chart-ready visualization payloads (the predicted series is a placeholder mirroring the actual series; the feature-importance table is illustrative, not computed)",
        contact(
            name = "Cardio Risk Service Team",
            email = "support@cardio-risk-service.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::verify_token,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Predictions
        crate::api::predictions::submit_prediction,
        crate::api::predictions::get_predictions,

        // Records
        crate::api::records::list_records,
        crate::api::records::get_record,

        // Visualization
        crate::api::visualization::get_visualization,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,

            // Predictions
            crate::services::prediction_service::PredictionRequest,
            crate::services::prediction_service::PredictionResponse,
            crate::services::report_service::ReportArtifact,
            crate::models::prediction::PredictionRecord,

            // Visualization
            crate::services::visualization_service::VisualizationResponse,
            crate::services::visualization_service::RiskPoint,
            crate::services::visualization_service::FeatureImportance,
            crate::services::visualization_service::HistoryRow,
        )
    ),
    tags(
        (name = "Auth", description = "Account registration, login and token verification."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Predictions", description = "Risk scoring submissions and per-account prediction history."),
        (name = "Records", description = "Stored patient documents, one JSON file per patient name."),
        (name = "Visualization", description = "Chart-ready history series and the illustrative feature-importance table."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}

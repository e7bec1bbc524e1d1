use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::metrics;
use crate::services::auth_service::{self, AuthResponse, LoginRequest, RegisterRequest};
use crate::storage::JsonAccountStore;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid request or account already exists")
    )
)]
pub async fn register(
    accounts: web::Data<JsonAccountStore>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("📝 POST /auth/register - email: {}", request.email);

    match auth_service::register(accounts.get_ref(), &request).await {
        Ok(true) => {
            log::info!("✅ Account created: {}", request.email);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "message": "Account created. Please log in."
            }))
        }
        Ok(false) => {
            metrics::increment_error_count();
            log::warn!("⚠️  Account already exists: {}", request.email);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Account already exists"
            }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::warn!("❌ Registration failed: {} - {}", request.email, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    accounts: web::Data<JsonAccountStore>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(accounts.get_ref(), &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            metrics::increment_error_count();
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Invalid or expired token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn verify_token(req: HttpRequest) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("✓ GET /auth/verify");

    // Extract token from Authorization header
    let auth_header = req.headers().get("Authorization");

    if let Some(auth_value) = auth_header {
        if let Ok(auth_str) = auth_value.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                match auth_service::verify_token(token) {
                    Ok(claims) => {
                        log::info!("✅ Token valid for account: {}", claims.sub);
                        return HttpResponse::Ok().json(serde_json::json!({
                            "success": true,
                            "valid": true,
                            "email": claims.sub,
                            "exp": claims.exp
                        }));
                    }
                    Err(e) => {
                        metrics::increment_error_count();
                        log::warn!("❌ Invalid token: {}", e);
                        return HttpResponse::Unauthorized().json(serde_json::json!({
                            "success": false,
                            "valid": false,
                            "error": e
                        }));
                    }
                }
            }
        }
    }

    metrics::increment_error_count();
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": "No valid Authorization header"
    }))
}

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::storage::AccountRepository;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // account identifier (email)
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub email: String,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cardio-risk-service".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cardio-dashboard".to_string())
}

// Generate JWT token
pub fn generate_jwt(identifier: &str) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: identifier.to_string(),
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Account creation. Returns `Ok(false)` when the identifier is already
/// taken; the existing account's secret and history are untouched.
pub async fn register(
    accounts: &dyn AccountRepository,
    request: &RegisterRequest,
) -> Result<bool, String> {
    if request.email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if request.password.is_empty() {
        return Err("Password is required".to_string());
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e))?;

    accounts
        .register(request.email.trim(), &password_hash)
        .await
        .map_err(|e| format!("Store error: {}", e))
}

/// Credential check: `true` iff the identifier exists and the secret
/// verifies against the stored hash. Any mismatch is `false`.
pub async fn authenticate(
    accounts: &dyn AccountRepository,
    identifier: &str,
    secret: &str,
) -> Result<bool, String> {
    let account = match accounts
        .find(identifier)
        .await
        .map_err(|e| format!("Store error: {}", e))?
    {
        Some(account) => account,
        None => return Ok(false),
    };

    verify(secret, &account.password)
        .map_err(|e| format!("Password verification error: {}", e))
}

// Account login
pub async fn login(
    accounts: &dyn AccountRepository,
    request: &LoginRequest,
) -> Result<AuthResponse, String> {
    let valid = authenticate(accounts, &request.email, &request.password).await?;
    if !valid {
        return Err("Invalid credentials".to_string());
    }

    let token = generate_jwt(&request.email)?;

    Ok(AuthResponse {
        success: true,
        token,
        email: request.email.clone(),
    })
}

mod api;
mod middleware;
mod models;
mod services;
mod storage;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let users_file = env::var("USERS_FILE").unwrap_or_else(|_| "users.json".to_string());
    let records_dir = env::var("RECORDS_DIR").unwrap_or_else(|_| "records".to_string());

    log::info!("🚀 Starting Cardio Risk Service...");
    log::info!("👥 Users file: {}", users_file);
    log::info!("📂 Records directory: {}", records_dir);

    // Flat-file stores; every mutation is one full read-modify-write cycle
    let accounts = storage::JsonAccountStore::new(&users_file);
    let patients = storage::JsonPatientStore::new(&records_dir);

    let accounts_data = web::Data::new(accounts);
    let patients_data = web::Data::new(patients);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000") // Dashboard front-end
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(accounts_data.clone())
            .app_data(patients_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Auth endpoints
            .service(
                web::scope("/api/v1/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    .route("/verify", web::get().to(api::auth::verify_token)),
            )
            // Predictions: score + persist + history - Requires JWT
            .service(
                web::scope("/api/v1/predictions")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::post().to(api::predictions::submit_prediction))
                    .route("", web::get().to(api::predictions::get_predictions)),
            )
            // Records: stored patient documents - Requires JWT
            .service(
                web::scope("/api/v1/records")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::get().to(api::records::list_records))
                    .route("/{file}", web::get().to(api::records::get_record)),
            )
            // Visualization: chart payloads from stored history - Requires JWT
            .service(
                web::scope("/api/v1/visualization")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::get().to(api::visualization::get_visualization)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}

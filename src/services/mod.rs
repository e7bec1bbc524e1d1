pub mod auth_service;
pub mod prediction_service;
pub mod report_service;
pub mod scoring_service;
pub mod visualization_service;

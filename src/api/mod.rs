pub mod auth;
pub mod health;
pub mod metrics;
pub mod predictions;
pub mod records;
pub mod swagger;
pub mod visualization;

use serde::{Deserialize, Serialize};

/// One stored outcome of the risk scorer plus its full input snapshot.
/// Immutable once written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct PredictionRecord {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub bp: u32,
    pub cholesterol: u32,
    pub blood_sugar: u32,
    pub heart_rate: u32,
    pub bmi: f64,
    pub ecg: String,
    pub smoking: String,
    pub alcohol: String,
    pub physical_activity: String,
    pub risk: String,
    pub timestamp: String,
}

use serde::Serialize;

use crate::models::PredictionRecord;
use crate::services::scoring_service::HIGH_RISK;

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct RiskPoint {
    /// Sequential index starting at 1.
    pub index: usize,
    pub actual: u8,
    pub predicted: u8,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct HistoryRow {
    pub timestamp: String,
    pub age: u32,
    pub cholesterol: u32,
    pub heart_rate: u32,
    pub risk: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VisualizationResponse {
    pub success: bool,
    /// The predicted series mirrors the actual series; no second model
    /// exists behind it.
    pub predicted_is_placeholder: bool,
    pub series: Vec<RiskPoint>,
    /// Illustrative constants, not computed from the data.
    pub feature_importance: Vec<FeatureImportance>,
    /// Newest first.
    pub history: Vec<HistoryRow>,
}

lazy_static::lazy_static! {
    static ref FEATURE_IMPORTANCE: Vec<FeatureImportance> = vec![
        FeatureImportance { feature: "Age".to_string(), importance: 0.35 },
        FeatureImportance { feature: "Cholesterol".to_string(), importance: 0.25 },
        FeatureImportance { feature: "Max HR".to_string(), importance: 0.20 },
        FeatureImportance { feature: "BP".to_string(), importance: 0.15 },
        FeatureImportance { feature: "ST Depression".to_string(), importance: 0.05 },
    ];
}

fn risk_as_binary(label: &str) -> u8 {
    if label == HIGH_RISK {
        1
    } else {
        0
    }
}

/// Reshapes one account's prediction history into chart-ready form.
pub fn assemble(predictions: &[PredictionRecord]) -> VisualizationResponse {
    let series = predictions
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let actual = risk_as_binary(&record.risk);
            RiskPoint {
                index: i + 1,
                actual,
                predicted: actual,
                timestamp: record.timestamp.clone(),
            }
        })
        .collect();

    let mut history: Vec<HistoryRow> = predictions
        .iter()
        .map(|record| HistoryRow {
            timestamp: record.timestamp.clone(),
            age: record.age,
            cholesterol: record.cholesterol,
            heart_rate: record.heart_rate,
            risk: record.risk.clone(),
        })
        .collect();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    VisualizationResponse {
        success: true,
        predicted_is_placeholder: true,
        series,
        feature_importance: FEATURE_IMPORTANCE.clone(),
        history,
    }
}

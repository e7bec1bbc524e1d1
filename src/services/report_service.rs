use base64::Engine;
use serde::Serialize;

use crate::models::PredictionRecord;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReportArtifact {
    pub filename: String,
    pub content_type: String,
    /// Base64 of the plain-text report, suitable for an inline download link.
    pub content_base64: String,
}

/// Plain-text report for one record: demographics, metrics, label.
pub fn build_report(record: &PredictionRecord) -> String {
    format!(
        "Heart Disease Prediction Report\n\
         ----------------------------------------\n\
         Name: {}\n\
         Age: {}\n\
         Gender: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Address: {}\n\
         Time: {}\n\
         \n\
         Blood Pressure: {} mm Hg\n\
         Cholesterol: {} mg/dL\n\
         Blood Sugar: {} mg/dL\n\
         Heart Rate: {} bpm\n\
         BMI: {}\n\
         ECG: {}\n\
         Smoking: {}\n\
         Alcohol: {}\n\
         Activity Level: {}\n\
         \n\
         Risk Prediction: {}\n",
        record.name,
        record.age,
        record.gender,
        record.email,
        record.phone,
        record.address,
        record.timestamp,
        record.bp,
        record.cholesterol,
        record.blood_sugar,
        record.heart_rate,
        record.bmi,
        record.ecg,
        record.smoking,
        record.alcohol,
        record.physical_activity,
        record.risk,
    )
}

pub fn build_artifact(record: &PredictionRecord) -> ReportArtifact {
    let report = build_report(record);
    let content_base64 = base64::engine::general_purpose::STANDARD.encode(report.as_bytes());

    ReportArtifact {
        filename: format!("{}_Heart_Report.txt", record.name.replace(' ', "_")),
        content_type: "text/plain".to_string(),
        content_base64,
    }
}

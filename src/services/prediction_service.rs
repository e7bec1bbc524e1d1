use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::PredictionRecord;
use crate::services::report_service::{self, ReportArtifact};
use crate::services::scoring_service::{self, RiskInputs};
use crate::storage::{AccountRepository, PatientRepository};

/// The full dashboard form payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PredictionRequest {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
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
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PredictionResponse {
    pub success: bool,
    pub risk: String,
    pub points: u8,
    pub timestamp: String,
    /// File the patient document was stored under.
    pub record_file: String,
    pub report: ReportArtifact,
}

/// Mandatory fields: name, gender (actually selected), email.
/// Returns the missing field names, empty when the form is complete.
pub fn missing_mandatory_fields(request: &PredictionRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.gender.trim().is_empty() || request.gender == "Select" {
        missing.push("gender");
    }
    if request.email.trim().is_empty() {
        missing.push("email");
    }
    missing
}

/// One full submit cycle: score, append to the caller's history, save
/// the patient document, assemble the report artifact.
pub async fn submit(
    accounts: &dyn AccountRepository,
    patients: &dyn PatientRepository,
    identifier: &str,
    request: &PredictionRequest,
) -> Result<PredictionResponse, String> {
    let (points, risk) = scoring_service::score(&RiskInputs {
        bp: request.bp,
        cholesterol: request.cholesterol,
        blood_sugar: request.blood_sugar,
        bmi: request.bmi,
        smoking: &request.smoking,
        alcohol: &request.alcohol,
        physical_activity: &request.physical_activity,
    });

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let record = PredictionRecord {
        name: request.name.trim().to_string(),
        age: request.age,
        gender: request.gender.clone(),
        email: request.email.trim().to_string(),
        phone: request.phone.clone(),
        address: request.address.clone(),
        bp: request.bp,
        cholesterol: request.cholesterol,
        blood_sugar: request.blood_sugar,
        heart_rate: request.heart_rate,
        bmi: request.bmi,
        ecg: request.ecg.clone(),
        smoking: request.smoking.clone(),
        alcohol: request.alcohol.clone(),
        physical_activity: request.physical_activity.clone(),
        risk: risk.to_string(),
        timestamp: timestamp.clone(),
    };

    let appended = accounts
        .append_prediction(identifier, record.clone())
        .await
        .map_err(|e| format!("Store error: {}", e))?;
    if !appended {
        return Err(format!("Account {} not found", identifier));
    }

    let record_file = patients
        .save(&record.name, &record)
        .await
        .map_err(|e| format!("Failed to save patient record: {}", e))?;

    let report = report_service::build_artifact(&record);

    Ok(PredictionResponse {
        success: true,
        risk: risk.to_string(),
        points,
        timestamp,
        record_file,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonAccountStore, JsonPatientStore};
    use uuid::Uuid;

    fn temp_stores() -> (JsonAccountStore, JsonPatientStore) {
        let tag = Uuid::new_v4();
        (
            JsonAccountStore::new(std::env::temp_dir().join(format!("cardio-sub-{}.json", tag))),
            JsonPatientStore::new(std::env::temp_dir().join(format!("cardio-sub-rec-{}", tag))),
        )
    }

    fn high_risk_request() -> PredictionRequest {
        PredictionRequest {
            name: "Jane Doe".to_string(),
            age: 52,
            gender: "Female".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            bp: 150,
            cholesterol: 250,
            blood_sugar: 130,
            heart_rate: 95,
            bmi: 32.0,
            ecg: "Normal".to_string(),
            smoking: "Regularly".to_string(),
            alcohol: "Frequently".to_string(),
            physical_activity: "Low".to_string(),
        }
    }

    #[test]
    fn test_missing_mandatory_fields() {
        let mut request = high_risk_request();
        assert!(missing_mandatory_fields(&request).is_empty());

        request.name = "  ".to_string();
        request.gender = "Select".to_string();
        request.email = String::new();
        assert_eq!(
            missing_mandatory_fields(&request),
            vec!["name", "gender", "email"]
        );
    }

    #[tokio::test]
    async fn test_submit_scores_persists_and_reports() {
        let (accounts, patients) = temp_stores();
        accounts.register("user@b.com", "hash").await.unwrap();

        let response = submit(&accounts, &patients, "user@b.com", &high_risk_request())
            .await
            .unwrap();

        assert_eq!(response.risk, "High Risk");
        assert_eq!(response.points, 7);
        assert_eq!(response.record_file, "Jane_Doe.json");
        assert_eq!(response.report.filename, "Jane_Doe_Heart_Report.txt");

        // History appended
        let history = accounts.list_predictions("user@b.com").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].risk, "High Risk");

        // Patient document saved with the same snapshot
        let stored = patients.load("Jane_Doe.json").await.unwrap();
        assert_eq!(stored, history[0]);
    }

    #[tokio::test]
    async fn test_submit_for_unknown_account_fails_without_record() {
        let (accounts, patients) = temp_stores();

        let result = submit(&accounts, &patients, "nobody@b.com", &high_risk_request()).await;
        assert!(result.is_err());
        assert!(patients.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_low_risk_sample() {
        let (accounts, patients) = temp_stores();
        accounts.register("user@b.com", "hash").await.unwrap();

        let request = PredictionRequest {
            bp: 100,
            cholesterol: 180,
            blood_sugar: 90,
            bmi: 22.0,
            smoking: "No".to_string(),
            alcohol: "No".to_string(),
            physical_activity: "High".to_string(),
            ..high_risk_request()
        };

        let response = submit(&accounts, &patients, "user@b.com", &request)
            .await
            .unwrap();
        assert_eq!(response.risk, "Low Risk");
        assert_eq!(response.points, 0);
    }
}

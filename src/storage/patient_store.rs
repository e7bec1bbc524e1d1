use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::PredictionRecord;
use crate::utils::AppError;

/// One persisted document per patient name, keyed by sanitized file
/// name. Same-name submissions overwrite the previous document.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Writes the record, creating the records directory if absent.
    /// Returns the file name the document was stored under.
    async fn save(&self, name: &str, record: &PredictionRecord) -> Result<String, AppError>;

    /// File names of all stored documents, sorted.
    async fn list(&self) -> Result<Vec<String>, AppError>;

    async fn load(&self, file_name: &str) -> Result<PredictionRecord, AppError>;
}

/// Spaces become underscores; the name is otherwise used as-is.
pub fn sanitize_file_name(name: &str) -> String {
    format!("{}.json", name.trim().replace(' ', "_"))
}

#[derive(Clone)]
pub struct JsonPatientStore {
    dir: PathBuf,
}

impl JsonPatientStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PatientRepository for JsonPatientStore {
    async fn save(&self, name: &str, record: &PredictionRecord) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = sanitize_file_name(name);
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(self.dir.join(&file_name), json).await?;
        Ok(file_name)
    }

    async fn list(&self) -> Result<Vec<String>, AppError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".json") {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn load(&self, file_name: &str) -> Result<PredictionRecord, AppError> {
        // File names come from clients; keep them inside the records dir
        if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            return Err(AppError::InvalidRequest(format!(
                "Invalid record file name: {}",
                file_name
            )));
        }

        let path = self.dir.join(file_name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("Record {} not found", file_name)))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> JsonPatientStore {
        let dir = std::env::temp_dir().join(format!("cardio-records-{}", Uuid::new_v4()));
        JsonPatientStore::new(dir)
    }

    fn sample_record(name: &str) -> PredictionRecord {
        PredictionRecord {
            name: name.to_string(),
            age: 52,
            gender: "Female".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "2 Oak Ave".to_string(),
            bp: 150,
            cholesterol: 250,
            blood_sugar: 130,
            heart_rate: 95,
            bmi: 32.0,
            ecg: "ST-T Abnormality".to_string(),
            smoking: "Regularly".to_string(),
            alcohol: "Frequently".to_string(),
            physical_activity: "Low".to_string(),
            risk: "High Risk".to_string(),
            timestamp: "2025-01-02 11:30:00".to_string(),
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Jane Mary Doe"), "Jane_Mary_Doe.json");
        assert_eq!(sanitize_file_name("John"), "John.json");
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = temp_store();
        let record = sample_record("Jane Mary Doe");

        let file_name = store.save(&record.name, &record).await.unwrap();
        assert_eq!(file_name, "Jane_Mary_Doe.json");

        // Exactly the fields written, unchanged
        let loaded = store.load(&file_name).await.unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let store = temp_store();

        let mut record = sample_record("John Doe");
        store.save(&record.name, &record).await.unwrap();

        record.bp = 110;
        record.risk = "Low Risk".to_string();
        store.save(&record.name, &record).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["John_Doe.json"]);
        let loaded = store.load("John_Doe.json").await.unwrap();
        assert_eq!(loaded.bp, 110);
        assert_eq!(loaded.risk, "Low Risk");
    }

    #[tokio::test]
    async fn test_list_empty_when_dir_absent() {
        let store = temp_store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_path_traversal() {
        let store = temp_store();
        assert!(matches!(
            store.load("../users.json").await,
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_record() {
        let store = temp_store();
        store.save("John Doe", &sample_record("John Doe")).await.unwrap();
        assert!(matches!(
            store.load("Nobody.json").await,
            Err(AppError::NotFound(_))
        ));
    }
}

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{Account, PredictionRecord};
use crate::utils::AppError;

/// Keyed account repository. The JSON-file store is the only
/// implementation today; callers depend on this trait so a
/// transactional store can replace it without touching them.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts a new account with empty history. Returns `false` if the
    /// identifier is already taken (existing account untouched).
    async fn register(&self, identifier: &str, password_hash: &str) -> Result<bool, AppError>;

    async fn find(&self, identifier: &str) -> Result<Option<Account>, AppError>;

    /// Appends one record to the account history. Returns `false` if the
    /// identifier is unknown; the store file is not touched in that case.
    async fn append_prediction(
        &self,
        identifier: &str,
        record: PredictionRecord,
    ) -> Result<bool, AppError>;

    /// Stored history for the identifier, or empty if unknown.
    async fn list_predictions(&self, identifier: &str) -> Result<Vec<PredictionRecord>, AppError>;
}

/// Flat-file account store: one JSON object mapping identifier to
/// account, rewritten in full on every mutation. A mutex serializes
/// read-modify-write cycles within the process.
#[derive(Clone)]
pub struct JsonAccountStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the whole store. A missing, empty or malformed file is
    /// treated as an empty store (logged, not surfaced).
    async fn load_all(&self) -> Result<BTreeMap<String, Account>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                log::warn!(
                    "⚠️  Users file {} is empty or malformed ({}), treating as empty store",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn save_all(&self, accounts: &BTreeMap<String, Account>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(accounts)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for JsonAccountStore {
    async fn register(&self, identifier: &str, password_hash: &str) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;

        let mut accounts = self.load_all().await?;
        if accounts.contains_key(identifier) {
            return Ok(false);
        }

        accounts.insert(identifier.to_string(), Account::new(password_hash.to_string()));
        self.save_all(&accounts).await?;
        Ok(true)
    }

    async fn find(&self, identifier: &str) -> Result<Option<Account>, AppError> {
        let _guard = self.lock.lock().await;

        let accounts = self.load_all().await?;
        Ok(accounts.get(identifier).cloned())
    }

    async fn append_prediction(
        &self,
        identifier: &str,
        record: PredictionRecord,
    ) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;

        let mut accounts = self.load_all().await?;
        match accounts.get_mut(identifier) {
            Some(account) => {
                account.predictions.push(record);
                self.save_all(&accounts).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_predictions(&self, identifier: &str) -> Result<Vec<PredictionRecord>, AppError> {
        let _guard = self.lock.lock().await;

        let accounts = self.load_all().await?;
        Ok(accounts
            .get(identifier)
            .map(|a| a.predictions.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> JsonAccountStore {
        let path = std::env::temp_dir().join(format!("cardio-users-{}.json", Uuid::new_v4()));
        JsonAccountStore::new(path)
    }

    fn sample_record(risk: &str) -> PredictionRecord {
        PredictionRecord {
            name: "John Doe".to_string(),
            age: 45,
            gender: "Male".to_string(),
            email: "john@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            bp: 120,
            cholesterol: 200,
            blood_sugar: 100,
            heart_rate: 80,
            bmi: 22.5,
            ecg: "Normal".to_string(),
            smoking: "No".to_string(),
            alcohol: "No".to_string(),
            physical_activity: "Moderate".to_string(),
            risk: risk.to_string(),
            timestamp: "2025-01-01 10:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let store = temp_store();

        assert!(store.register("a@b.com", "hash-1").await.unwrap());
        assert!(!store.register("a@b.com", "hash-2").await.unwrap());

        // First account's secret and history are unchanged
        let account = store.find("a@b.com").await.unwrap().unwrap();
        assert_eq!(account.password, "hash-1");
        assert!(account.predictions.is_empty());
    }

    #[tokio::test]
    async fn test_append_to_unknown_identifier_does_not_mutate() {
        let store = temp_store();
        store.register("a@b.com", "hash").await.unwrap();

        let before = tokio::fs::read(&store.path).await.unwrap();
        let appended = store
            .append_prediction("nobody@b.com", sample_record("Low Risk"))
            .await
            .unwrap();
        let after = tokio::fs::read(&store.path).await.unwrap();

        assert!(!appended);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_append_and_list_preserves_order() {
        let store = temp_store();
        store.register("a@b.com", "hash").await.unwrap();

        assert!(store
            .append_prediction("a@b.com", sample_record("Low Risk"))
            .await
            .unwrap());
        assert!(store
            .append_prediction("a@b.com", sample_record("High Risk"))
            .await
            .unwrap());

        let predictions = store.list_predictions("a@b.com").await.unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].risk, "Low Risk");
        assert_eq!(predictions[1].risk, "High Risk");
    }

    #[tokio::test]
    async fn test_list_for_unknown_identifier_is_empty() {
        let store = temp_store();
        assert!(store.list_predictions("nobody@b.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_treated_as_empty_store() {
        let store = temp_store();
        tokio::fs::write(&store.path, b"{not valid json").await.unwrap();

        assert!(store.list_predictions("a@b.com").await.unwrap().is_empty());
        // Registration still works, replacing the broken file
        assert!(store.register("a@b.com", "hash").await.unwrap());
        assert!(store.find("a@b.com").await.unwrap().is_some());
    }
}

use serde::{Deserialize, Serialize};

use crate::models::prediction::PredictionRecord;

/// A registered account as persisted in the users file.
/// The password is stored as a bcrypt hash, never in plaintext.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    pub password: String,
    #[serde(default)]
    pub predictions: Vec<PredictionRecord>,
}

impl Account {
    pub fn new(password_hash: String) -> Self {
        Self {
            password: password_hash,
            predictions: Vec::new(),
        }
    }
}

pub mod account_store;
pub mod patient_store;

pub use account_store::{AccountRepository, JsonAccountStore};
pub use patient_store::{sanitize_file_name, JsonPatientStore, PatientRepository};

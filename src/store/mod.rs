//! Remote document store contract
//!
//! The booking flow only needs one operation: create an appointment document
//! and get back its id. The trait keeps the flow testable with a stub; the
//! real implementation lives in [`firestore`].

mod firestore;

pub use firestore::FirestoreClient;

use crate::models::AppointmentRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed store response: {0}")]
    MalformedResponse(String),
}

impl StoreError {
    /// The message shown verbatim in the failure dialog
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Asynchronous create access to the appointments collection
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Create one appointment document, returning the new document id
    async fn create(&self, record: &AppointmentRecord) -> Result<String, StoreError>;
}

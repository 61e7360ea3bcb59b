//! Firestore REST implementation of [`AppointmentStore`]

use super::{AppointmentStore, StoreError};
use crate::config::Config;
use crate::models::AppointmentRecord;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

const PUBLIC_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Thin client for the Firestore `createDocument` call.
///
/// Talks to the public endpoint, or to the local emulator when
/// `emulator_host` is configured.
pub struct FirestoreClient {
    http: reqwest::Client,
    documents_url: String,
}

impl FirestoreClient {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let base = match &config.emulator_host {
            Some(host) => format!("http://{}/v1", host),
            None => PUBLIC_BASE_URL.to_string(),
        };
        let documents_url = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            base, config.firestore_project, config.firestore_collection
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            documents_url,
        })
    }
}

#[async_trait]
impl AppointmentStore for FirestoreClient {
    async fn create(&self, record: &AppointmentRecord) -> Result<String, StoreError> {
        tracing::debug!("creating appointment document at {}", self.documents_url);

        let response = self
            .http
            .post(&self.documents_url)
            .json(&encode_fields(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(&text, status.as_u16()),
            });
        }

        let document: Value = response.json().await?;
        document_id(&document)
    }
}

/// Encode the record as Firestore typed fields
fn encode_fields(record: &AppointmentRecord) -> Value {
    let photo_ref = match &record.photo_ref {
        Some(reference) => json!({ "stringValue": reference }),
        None => json!({ "nullValue": null }),
    };
    json!({
        "fields": {
            "serviceType": { "stringValue": record.service_type },
            "center": { "stringValue": record.center },
            "date": { "stringValue": record.date },
            "time": { "stringValue": record.time },
            "description": { "stringValue": record.description },
            "photoRef": photo_ref,
            "userId": { "stringValue": record.user_id },
        }
    })
}

/// Pull the bare document id out of the returned resource name,
/// `projects/{p}/databases/(default)/documents/appointments/{id}`
fn document_id(document: &Value) -> Result<String, StoreError> {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::MalformedResponse("missing document name".to_string()))
}

/// Surface the server's own message when it sent one
fn extract_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("request failed with status {}", status)
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AppointmentRecord {
        AppointmentRecord {
            service_type: "Oil Change".to_string(),
            center: "CarCare Center - Stockton".to_string(),
            date: "10 March 2025".to_string(),
            time: "02:30 PM".to_string(),
            description: "oil warning light".to_string(),
            photo_ref: None,
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_encode_fields_string_values() {
        let fields = encode_fields(&record());
        assert_eq!(
            fields["fields"]["serviceType"]["stringValue"],
            "Oil Change"
        );
        assert_eq!(fields["fields"]["date"]["stringValue"], "10 March 2025");
        assert_eq!(fields["fields"]["time"]["stringValue"], "02:30 PM");
        assert_eq!(fields["fields"]["userId"]["stringValue"], "user-1");
        assert!(fields["fields"]["photoRef"]["nullValue"].is_null());
    }

    #[test]
    fn test_encode_fields_photo_ref_present() {
        let mut record = record();
        record.photo_ref = Some("/tmp/carcare_1.jpg".to_string());
        let fields = encode_fields(&record);
        assert_eq!(
            fields["fields"]["photoRef"]["stringValue"],
            "/tmp/carcare_1.jpg"
        );
    }

    #[test]
    fn test_document_id_from_resource_name() {
        let document = json!({
            "name": "projects/carcare/databases/(default)/documents/appointments/apt-123"
        });
        assert_eq!(document_id(&document).unwrap(), "apt-123");
    }

    #[test]
    fn test_document_id_missing_name() {
        assert!(matches!(
            document_id(&json!({})),
            Err(StoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_error_message_prefers_server_message() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            extract_error_message(body, 403),
            "Missing or insufficient permissions."
        );
        assert_eq!(extract_error_message("", 500), "request failed with status 500");
        assert_eq!(extract_error_message("upstream unavailable", 503), "upstream unavailable");
    }
}

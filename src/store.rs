use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::profile::{Profile, ProfilePatch};
use crate::schema::{self, profile_schema, FieldIssue, Mode};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<FieldIssue>,
    },

    #[error("Malformed profile payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Server-side holder of the one profile record.
///
/// Constructed explicitly and shared through the router state; every update is
/// a single read-modify-write under the write lock.
#[derive(Debug, Default)]
pub struct ProfileStore {
    record: RwLock<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: Profile) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    /// Snapshot of the current record
    pub async fn get(&self) -> Profile {
        self.record.read().await.clone()
    }

    /// Validate `partial` against the partial schema and merge it into the record.
    pub async fn update(&self, partial: &Value) -> Result<Profile, StoreError> {
        if let Err(err) = schema::check(profile_schema(), partial, Mode::Partial) {
            tracing::warn!(error = %err, "rejected profile update");
            return Err(StoreError::Validation {
                message: err.pretty(),
                issues: err.issues(),
            });
        }

        let patch = ProfilePatch::deserialize(partial)?;

        let mut record = self.record.write().await;
        record.apply(&patch);
        tracing::info!(fields = ?changed_keys(partial), "profile updated");
        Ok(record.clone())
    }
}

fn changed_keys(partial: &Value) -> Vec<&str> {
    partial
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::complete_profile;
    use serde_json::json;

    #[tokio::test]
    async fn test_starts_with_defaults() {
        let store = ProfileStore::new();
        assert_eq!(store.get().await, Profile::default());
    }

    #[tokio::test]
    async fn test_update_merges_and_returns_record() {
        let store = ProfileStore::new();
        let bank_detail = complete_profile()["bankDetail"].clone();

        let updated = store
            .update(&json!({ "firstName": "Jane", "bankDetail": bank_detail }))
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.bank_detail.bank_name, "Test Bank");

        let updated = store
            .update(&json!({ "tax": complete_profile()["tax"].clone() }))
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.bank_detail.bank_name, "Test Bank");
        assert_eq!(updated.tax.tax_id, "12345678901");
        assert_eq!(store.get().await, updated);
    }

    #[tokio::test]
    async fn test_incomplete_section_is_rejected() {
        let store = ProfileStore::new();
        let err = store
            .update(&json!({ "bankDetail": { "iban": "DE123" } }))
            .await
            .unwrap_err();
        match err {
            StoreError::Validation { issues, .. } => {
                assert!(issues.iter().any(|issue| issue.path == "bankDetail.bankBic"));
                assert!(!issues.iter().any(|issue| issue.path == "bankDetail.iban"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.get().await.bank_detail.iban, "");
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record_untouched() {
        let store = ProfileStore::new();
        store.update(&json!({ "email": "jane@test.com" })).await.unwrap();

        let err = store
            .update(&json!({ "email": "invalid-email", "firstName": "Mallory" }))
            .await
            .unwrap_err();
        match err {
            StoreError::Validation { message, issues } => {
                assert_eq!(message, "✖ Invalid email address\n  → at email");
                assert_eq!(issues, vec![FieldIssue::new("email", "Invalid email address")]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let record = store.get().await;
        assert_eq!(record.email, "jane@test.com");
        assert_eq!(record.first_name, "");
    }

    #[tokio::test]
    async fn test_department_can_be_set_and_cleared() {
        let store = ProfileStore::new();
        let record = store.update(&json!({ "department": "IT" })).await.unwrap();
        assert_eq!(record.department.as_deref(), Some("IT"));

        let record = store.update(&json!({ "department": null })).await.unwrap();
        assert_eq!(record.department, None);
    }

    #[tokio::test]
    async fn test_non_object_payload_is_rejected() {
        let store = ProfileStore::with_record(Profile::default());
        let err = store.update(&json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }
}

pub mod http;

pub use http::HttpProfileClient;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::profile::ProfilePatch;
use crate::schema::{summarize, FieldIssue};
use crate::store::{ProfileStore, StoreError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid profile data: {}", summarize(.0))]
    Invalid(Vec<FieldIssue>),

    #[error("Profile update rejected: {message}")]
    Rejected {
        message: String,
        errors: Vec<FieldIssue>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// Field-level issues carried by the error, if any
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ClientError::Invalid(issues) => issues,
            ClientError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { message, issues } => ClientError::Rejected {
                message,
                errors: issues,
            },
            StoreError::Malformed(e) => ClientError::Malformed(e.to_string()),
        }
    }
}

/// Where the authoritative profile lives
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the current profile snapshot.
    async fn fetch(&self) -> Result<ProfilePatch, ClientError>;

    /// Send a partial profile to be validated and applied.
    async fn push(&self, payload: &ProfilePatch) -> Result<(), ClientError>;
}

#[async_trait]
impl ProfileSource for ProfileStore {
    async fn fetch(&self) -> Result<ProfilePatch, ClientError> {
        Ok(self.get().await.into())
    }

    async fn push(&self, payload: &ProfilePatch) -> Result<(), ClientError> {
        let value = serde_json::to_value(payload).map_err(|e| ClientError::Malformed(e.to_string()))?;
        self.update(&value).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    async fn fetch(&self) -> Result<ProfilePatch, ClientError> {
        (**self).fetch().await
    }

    async fn push(&self, payload: &ProfilePatch) -> Result<(), ClientError> {
        (**self).push(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BankDetailPatch;
    use crate::schema::fixtures::complete_profile;

    #[tokio::test]
    async fn test_store_as_source() {
        let store = Arc::new(ProfileStore::new());
        let bank_detail: BankDetailPatch =
            serde_json::from_value(complete_profile()["bankDetail"].clone()).unwrap();
        let payload = ProfilePatch {
            bank_detail: Some(BankDetailPatch {
                iban: Some("DE123".to_string()),
                ..bank_detail
            }),
            ..Default::default()
        };
        store.push(&payload).await.unwrap();

        let snapshot = store.fetch().await.unwrap();
        assert_eq!(snapshot.bank_detail.and_then(|b| b.iban).as_deref(), Some("DE123"));
        assert_eq!(snapshot.country.as_deref(), Some("Germany"));
    }

    #[tokio::test]
    async fn test_store_rejection_maps_to_client_error() {
        let store = ProfileStore::new();
        let payload = ProfilePatch {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        let err = store.push(&payload).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected { .. }));
        assert_eq!(err.issues()[0].path, "email");
    }
}

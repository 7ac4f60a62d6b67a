use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{ClientError, ProfileSource};
use crate::config::ClientConfig;
use crate::profile::ProfilePatch;
use crate::schema::FieldIssue;

const PROFILE_PATH: &str = "api/me";

/// Response envelope returned by the profile endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldIssue>,
}

/// Talks to `GET/PUT /api/me` on a running profile server
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpProfileClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: profile_endpoint(base_url)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ClientError::Malformed(format!("{} ({}): {}", status, e, body)))?;

        if envelope.success {
            Ok(envelope)
        } else {
            Err(ClientError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("request failed with status {}", status)),
                errors: envelope.errors,
            })
        }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileClient {
    async fn fetch(&self) -> Result<ProfilePatch, ClientError> {
        tracing::debug!(url = %self.endpoint, "fetching profile");
        let response = self.http.get(self.endpoint.clone()).send().await?;
        Self::read_envelope::<ProfilePatch>(response)
            .await?
            .data
            .ok_or_else(|| ClientError::Malformed("response carried no profile data".to_string()))
    }

    async fn push(&self, payload: &ProfilePatch) -> Result<(), ClientError> {
        tracing::debug!(url = %self.endpoint, "pushing profile update");
        let response = self
            .http
            .put(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        Self::read_envelope::<Value>(response).await?;
        Ok(())
    }
}

/// `<base>/api/me`, tolerating a base URL with or without a trailing slash
fn profile_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PROFILE_PATH)
}

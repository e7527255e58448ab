use crate::status::RecorderStatus;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Control endpoints exposed by the remote recorder service
///
/// `start` and `stop` are fire-and-forget: the service's response body is
/// ignored. Any transport problem (connect error, timeout, non-2xx,
/// unparseable body) surfaces as a plain error.
#[async_trait]
pub trait RecorderApi: Send + Sync {
    /// Fetch the current status snapshot
    async fn status(&self) -> Result<RecorderStatus>;

    /// Ask the recorder to start recording
    async fn start(&self) -> Result<()>;

    /// Ask the recorder to stop recording
    async fn stop(&self) -> Result<()>;
}

/// HTTP implementation of `RecorderApi` against a configured base URL
pub struct HttpRecorderApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecorderApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn post_command(&self, name: &str, field: &str) -> Result<()> {
        self.client
            .post(self.endpoint(name))
            .form(&[(field, field)])
            .send()
            .await
            .with_context(|| format!("{} request failed", name))?
            .error_for_status()
            .with_context(|| format!("{} request rejected", name))?;

        Ok(())
    }
}

#[async_trait]
impl RecorderApi for HttpRecorderApi {
    async fn status(&self) -> Result<RecorderStatus> {
        let status = self
            .client
            .get(self.endpoint("status"))
            .send()
            .await
            .context("status request failed")?
            .error_for_status()
            .context("status request rejected")?
            .json::<RecorderStatus>()
            .await
            .context("malformed status response")?;

        Ok(status)
    }

    async fn start(&self) -> Result<()> {
        self.post_command("start", "start").await
    }

    async fn stop(&self) -> Result<()> {
        self.post_command("stop", "stop").await
    }
}

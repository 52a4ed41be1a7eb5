//! Polls the deployment manifest and requests a reload when it changes.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Error;

/// The deployment manifest served next to the clock, e.g.
/// `{"version": "1.4.2"}`. Extra fields are ignored.
#[derive(Debug, serde::Deserialize)]
pub struct Manifest {
    pub version: String,
}

/// What one successful manifest fetch told us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First version this process has seen; it becomes the baseline.
    Baseline,
    /// Still the baseline version.
    Unchanged,
    /// A different version than the baseline.
    Changed,
}

/// The version this process considers current. The baseline is set by the
/// first successful fetch and never moves; a failed fetch leaves the state
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionState {
    Unset,
    Known(String),
}

impl VersionState {
    pub fn observe(&mut self, incoming: &str) -> Observation {
        match self {
            VersionState::Unset => {
                *self = VersionState::Known(incoming.to_string());
                Observation::Baseline
            }
            VersionState::Known(baseline) if baseline == incoming => Observation::Unchanged,
            VersionState::Known(_) => Observation::Changed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Manifest request failed")]
    Request(#[source] reqwest::Error),

    #[error("Manifest request returned an error status")]
    Status(#[source] reqwest::Error),

    #[error("Manifest response is not JSON")]
    NotJson,

    #[error("Failed to parse manifest body")]
    Body(#[source] reqwest::Error),
}

pub struct VersionChecker {
    interval: std::time::Duration,
    manifest_url: Url,
    client: reqwest::Client,
    state: VersionState,
    reload_sender: mpsc::Sender<()>,
    cancellation_token: CancellationToken,
}

impl VersionChecker {
    pub fn new(
        config: &crate::config::UpdateConfig,
        cancellation_token: CancellationToken,
        reload_sender: mpsc::Sender<()>,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.check_interval)
            .build()
            .map_err(Error::Reqwest)?;

        Ok(Self {
            interval: config.check_interval,
            manifest_url: config.manifest_url.clone(),
            client,
            state: VersionState::Unset,
            reload_sender,
            cancellation_token,
        })
    }

    /// Fetches the manifest on its own interval, independent of the render
    /// cadence. A check that fails is logged and retried on the next tick;
    /// a changed version first re-fetches the manifest with caches disabled
    /// and then asks the main loop to reload, so a dead deployment endpoint
    /// keeps the current process running.
    pub fn run(mut self) -> impl std::future::Future<Output = Result<(), Error>> {
        let mut check_interval = tokio::time::interval(self.interval);
        async move {
            loop {
                let Some(_tick) = self
                    .cancellation_token
                    .run_until_cancelled(check_interval.tick())
                    .await
                else {
                    tracing::info!("Ending version check interval");
                    break;
                };

                let version = match self.fetch_version().await {
                    Ok(version) => version,
                    Err(error) => {
                        tracing::warn!(?error, "Version check failed, will retry");
                        continue;
                    }
                };

                match self.state.observe(&version) {
                    Observation::Baseline => {
                        tracing::info!(%version, "Observed deployed version");
                    }
                    Observation::Unchanged => {
                        tracing::trace!(%version, "Version unchanged");
                    }
                    Observation::Changed => {
                        tracing::info!(%version, "Deployment changed, requesting reload");

                        if let Err(error) = self.bust_caches().await {
                            tracing::warn!(?error, "Cache-busting fetch failed, not reloading");
                            continue;
                        }

                        if self.reload_sender.send(()).await.is_err() {
                            tracing::error!("Reload receiver closed");
                        }
                        break;
                    }
                }
            }
            Ok(())
        }
    }

    async fn fetch_version(&self) -> Result<String, CheckError> {
        let response = self
            .client
            .get(self.manifest_url.clone())
            .send()
            .await
            .map_err(CheckError::Request)?
            .error_for_status()
            .map_err(CheckError::Status)?;

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if !is_json {
            return Err(CheckError::NotJson);
        }

        let manifest: Manifest = response.json().await.map_err(CheckError::Body)?;
        Ok(manifest.version)
    }

    async fn bust_caches(&self) -> Result<(), CheckError> {
        self.client
            .get(self.manifest_url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(CheckError::Request)?
            .error_for_status()
            .map_err(CheckError::Status)?;

        Ok(())
    }
}

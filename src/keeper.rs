// src/keeper.rs
use reqwest::StatusCode;
use uuid::Uuid;

use crate::config::Config;

/// Thin client for the Keeper telemetry endpoint. Transport only;
/// deciding what a response means is the poller's job.
pub struct KeeperClient {
    http: reqwest::Client,
    base_url: String,
    server_uuid: Uuid,
}

impl KeeperClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.keeper_base_url.trim_end_matches('/').to_string(),
            server_uuid: config.server_uuid,
        })
    }

    /// One snapshot GET. Returns the status and raw body so the
    /// caller can log non-success responses before giving up on the
    /// cycle.
    pub async fn fetch_snapshot(&self) -> Result<(StatusCode, String), reqwest::Error> {
        let url = format!("{}/snapshot/{}", self.base_url, self.server_uuid);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

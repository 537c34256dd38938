use crate::domain::model::OutgoingRequest;
use crate::utils::error::{Result, SearchError};
use reqwest::Client;
use std::time::Duration;

/// 執行唯一一次的網路請求。不重試；所有傳輸錯誤與非 2xx 狀態都收斂成 FetchError。
pub struct ListingsFetcher {
    client: Client,
}

impl ListingsFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| SearchError::ConfigError {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, request: &OutgoingRequest) -> Result<String> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!("Making search request to: {}", request.url);

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        tracing::debug!("Search response status: {}", status);

        if !status.is_success() {
            tracing::warn!("Search endpoint returned status: {}", status);
            return Err(SearchError::FetchError {
                cause: format!("remote returned status {}", status),
            });
        }

        let body = response.text().await.map_err(network_error)?;
        tracing::debug!("Downloaded {} bytes of HTML", body.len());

        Ok(body)
    }
}

fn network_error(error: reqwest::Error) -> SearchError {
    SearchError::FetchError {
        cause: error.to_string(),
    }
}

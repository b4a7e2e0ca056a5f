use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{HealthStatus, NewsFilters, NewsResponsePage};

const NEWS_PATH: &str = "news";
const HEALTH_PATH: &str = "health";

/// Transport seam between the controller and the backend.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn fetch_page(&self, filters: &NewsFilters) -> Result<NewsResponsePage, ApiError>;
    async fn check_health(&self) -> Result<HealthStatus, ApiError>;
}

/// reqwest-backed client for the news proxy. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpNewsClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpNewsClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let timeout = config.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("NewsHub/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, &config.base_url, timeout)
    }

    /// `timeout` should match what `client` was built with; it is only used
    /// to report timeouts.
    pub fn with_client(client: Client, base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    pub fn news_url(&self, filters: &NewsFilters) -> Result<Url, ApiError> {
        let mut url = self.endpoint(NEWS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in filters.query_pairs() {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "sending request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Network(err)
        }
    }
}

#[async_trait]
impl NewsApi for HttpNewsClient {
    async fn fetch_page(&self, filters: &NewsFilters) -> Result<NewsResponsePage, ApiError> {
        let url = self.news_url(filters)?;
        self.get_json(url).await
    }

    async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.get_json(url).await
    }
}

use std::time::Duration;

use anyhow::{Context, Result};
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::auth;
use crate::config::types::ServerConfig;
use crate::error::ApiError;

const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP client for the media server with a TTL cache for read-only lookups.
///
/// Cheap to clone: the reqwest client and the moka cache are both
/// reference-counted.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cache: Cache<String, String>,
}

impl ApiClient {
    pub fn new(server: &ServerConfig, cache_ttl_minutes: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .build()
            .context("building HTTP client")?;

        let cache = Cache::builder()
            .max_capacity(200)
            .time_to_live(Duration::from_secs(u64::from(cache_ttl_minutes) * 60))
            .build();

        Ok(Self {
            http,
            base_url: server.base_url.trim_end_matches('/').to_owned(),
            api_key: auth::resolve_api_key(server.api_key.as_deref()),
            cache,
        })
    }

    /// Return a clone of the internal cache (Arc-backed, cheap to clone).
    pub fn cache(&self) -> Cache<String, String> {
        self.cache.clone()
    }

    /// Drop a cached GET response so the next read goes to the server.
    pub async fn invalidate(&self, path: &str) {
        self.cache.invalidate(path).await;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// GET `path` and decode the JSON body, serving from cache unless `force`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, force: bool) -> Result<T, ApiError> {
        if !force && let Some(body) = self.cache.get(path).await {
            tracing::debug!("api: cache hit {path}");
            return Ok(serde_json::from_str(&body)?);
        }

        tracing::debug!("api: GET {path}");
        let response = self.with_auth(self.http.get(self.url(path))).send().await?;
        let body = read_success_body(response).await?;
        let value = serde_json::from_str(&body)?;
        self.cache.insert(path.to_owned(), body).await;
        Ok(value)
    }

    /// POST a JSON body to `path` and decode the JSON response. Never cached.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("api: POST {path}");
        let response = self
            .with_auth(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        let body = read_success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status { status, body })
    }
}

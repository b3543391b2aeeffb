use super::cache::FeedCache;
use crate::error::FeedError;
use crate::feed_log;
use chrono::{TimeDelta, Utc};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A typed GET request against an upstream data provider.
///
/// Implementors describe their endpoint path, cache identity and freshness
/// window; [`FeedClient::fetch`] handles transport, caching and decoding.
pub trait FeedRequest {
    type Response: DeserializeOwned;

    /// Endpoint path appended to the client's base URL.
    fn endpoint(&self) -> String;

    /// Cache key; must cover every request parameter.
    fn cache_key(&self) -> String { self.endpoint() }

    /// How long a cached response stays fresh.
    fn cache_ttl(&self) -> TimeDelta;
}

/// A thin wrapper around `reqwest::Client` with a preconfigured base URL
/// and request timeout. A timed-out request is reported as
/// [`FeedError::Timeout`] and treated like any other feed failure.
#[derive(Debug)]
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Constructs a client for the given provider base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::from)?;
        Ok(Self { client, base_url: String::from(base_url) })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    /// Performs a request, going through the cache first.
    ///
    /// On a cache hit the network is bypassed entirely; on a miss the
    /// response body is stored under the request's cache key before
    /// decoding.
    pub async fn fetch<R: FeedRequest>(
        &self,
        request: &R,
        cache: &mut FeedCache,
    ) -> Result<R::Response, FeedError> {
        let key = request.cache_key();
        let now = Utc::now();
        if let Some(payload) = cache.get(&key, now) {
            feed_log!("cache hit for {key}");
            return Ok(serde_json::from_value(payload)?);
        }

        let url = format!("{}{}", self.base_url, request.endpoint());
        feed_log!("GET {url}");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }
        let payload: serde_json::Value = response.json().await?;
        cache.put(key, payload.clone(), request.cache_ttl(), now);
        Ok(serde_json::from_value(payload)?)
    }
}

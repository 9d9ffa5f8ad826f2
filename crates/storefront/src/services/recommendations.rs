//! Client for the external generative recommendations service.
//!
//! The service is an opaque boundary: a request carries a product count (and,
//! for personalized recommendations, a browsing history), and the response is
//! a JSON list of product suggestions. Failures and malformed payloads are
//! surfaced as typed errors; callers degrade to a "could not load" state
//! rather than crash.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use rust_decimal::Decimal;
use walmartchain_core::ProductId;

use crate::config::RecommendationsConfig;

/// Fallback product image used when the service omits one.
const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// How long a trending response stays fresh.
const TRENDING_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the recommendations service.
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// HTTP request failed (includes malformed response bodies).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Client could not be constructed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A product suggestion returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedProduct {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub description: String,
    /// Price in USD.
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
}

#[derive(Debug, Serialize)]
struct TrendingRequest {
    count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsRequest<'a> {
    browsing_history: &'a [String],
    count: u32,
}

/// Response envelope. A missing product list is treated as empty rather than
/// an error, matching how the views must behave on a degraded service.
#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<RecommendedProduct>,
}

/// Async client for the recommendations service.
#[derive(Clone)]
pub struct RecommendationsClient {
    client: reqwest::Client,
    base_url: String,
    trending_cache: Cache<u32, Arc<Vec<RecommendedProduct>>>,
}

impl RecommendationsClient {
    /// Create a new client from service configuration.
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError::Parse` if the API key cannot be used as
    /// a header value, or `Http` if the HTTP client fails to build.
    pub fn new(config: &RecommendationsConfig) -> Result<Self, RecommendationError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| RecommendationError::Parse(format!("invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            trending_cache: Cache::builder()
                .max_capacity(16)
                .time_to_live(TRENDING_CACHE_TTL)
                .build(),
        })
    }

    /// Fetch the `count` most trending products.
    ///
    /// Responses are cached per count for a short interval.
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError` if the request fails or the service
    /// responds with an error status.
    #[instrument(skip(self))]
    pub async fn trending(&self, count: u32) -> Result<Vec<RecommendedProduct>, RecommendationError> {
        if let Some(hit) = self.trending_cache.get(&count).await {
            debug!(count, "trending cache hit");
            return Ok((*hit).clone());
        }

        let products = self
            .fetch("trending-products", &TrendingRequest { count })
            .await?;
        self.trending_cache
            .insert(count, Arc::new(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch product recommendations for a browsing history.
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError` if the request fails or the service
    /// responds with an error status.
    #[instrument(skip(self, browsing_history), fields(history_len = browsing_history.len()))]
    pub async fn recommendations(
        &self,
        browsing_history: &[String],
        count: u32,
    ) -> Result<Vec<RecommendedProduct>, RecommendationError> {
        self.fetch(
            "product-recommendations",
            &RecommendationsRequest {
                browsing_history,
                count,
            },
        )
        .await
    }

    async fn fetch<R: Serialize + ?Sized>(
        &self,
        flow: &str,
        request: &R,
    ) -> Result<Vec<RecommendedProduct>, RecommendationError> {
        let url = format!("{}/{flow}", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecommendationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ProductsResponse = response.json().await?;
        Ok(payload.products.into_iter().map(normalize).collect())
    }
}

impl std::fmt::Debug for RecommendationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Fill the image and hint fallbacks the service sometimes omits.
fn normalize(mut product: RecommendedProduct) -> RecommendedProduct {
    if product.image_url.is_empty() {
        product.image_url = PLACEHOLDER_IMAGE_URL.to_owned();
    }
    if product.data_ai_hint.is_none() {
        let hint: Vec<&str> = product.name.split_whitespace().take(2).collect();
        product.data_ai_hint = Some(hint.join(" ").to_lowercase());
    }
    product
}

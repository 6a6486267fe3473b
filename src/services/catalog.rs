//! The catalog client: fetches configurable option sets from the remote
//! backend and degrades to an injected fallback when it is unreachable.

use crate::config::AppConfig;
use crate::errors::StorefrontError;
use crate::models::catalog::{default_option_set, FrameColor, FrameOptionSet, FrameSize};
use std::time::Duration;
use tracing::{instrument, warn};

/// Client for the remote `/frame-options` catalog.
///
/// The fallback option set is supplied at construction time, not hidden
/// next to the fetch call, so callers (and tests) control exactly what the
/// configurator sees when the backend is down. One attempt per call, no
/// retry policy.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    fallback: FrameOptionSet,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        fallback: FrameOptionSet,
    ) -> Result<Self, StorefrontError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            fallback,
        })
    }

    /// Builds a client from application config with the built-in fallback.
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::new(
            config.api_base_url.clone(),
            config.request_timeout(),
            default_option_set(),
        )
    }

    /// Fetches the full option set. On transport, HTTP-status, or decode
    /// failure this returns the fallback set; catalog unavailability is
    /// never an error here.
    #[instrument(skip(self))]
    pub async fn fetch_options(&self) -> FrameOptionSet {
        match self.get_json::<FrameOptionSet>("frame-options").await {
            Ok(options) => options,
            Err(err) => {
                warn!(error = %err, "catalog fetch failed; serving fallback option set");
                self.fallback.clone()
            }
        }
    }

    /// Fetches the size axis only, with the same fallback semantics.
    #[instrument(skip(self))]
    pub async fn fetch_sizes(&self) -> Vec<FrameSize> {
        match self.get_json::<Vec<FrameSize>>("sizes").await {
            Ok(sizes) => sizes,
            Err(err) => {
                warn!(error = %err, "size fetch failed; serving fallback sizes");
                self.fallback.sizes.clone()
            }
        }
    }

    /// Fetches the color axis only, with the same fallback semantics.
    #[instrument(skip(self))]
    pub async fn fetch_colors(&self) -> Vec<FrameColor> {
        match self.get_json::<Vec<FrameColor>>("colors").await {
            Ok(colors) => colors,
            Err(err) => {
                warn!(error = %err, "color fetch failed; serving fallback colors");
                self.fallback.colors.clone()
            }
        }
    }

    pub fn fallback(&self) -> &FrameOptionSet {
        &self.fallback
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, StorefrontError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

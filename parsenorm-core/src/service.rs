//! Request handling around a shared backend
//!
//! A parser backend is a single resource: at most one request runs inference
//! at a time. The service owns the adapter behind one lock and turns fatal
//! errors into [`ErrorMessage`] payloads.

use std::sync::Mutex;

use tracing::error;

use crate::adapter::ParserAdapter;
use crate::config::NormalizerConfig;
use crate::error::{ErrorMessage, NormalizeError, Result};
use crate::model::{NormalizeRequest, NormalizeResponse};
use crate::normalizer::{NormalizeStats, Normalizer};

/// Normalizer bound to one adapter
#[derive(Debug)]
pub struct NormalizationService<A> {
    adapter: Mutex<A>,
    normalizer: Normalizer,
}

impl<A: ParserAdapter> NormalizationService<A> {
    /// Create a service
    pub fn new(adapter: A, config: NormalizerConfig) -> Result<Self> {
        Ok(Self {
            adapter: Mutex::new(adapter),
            normalizer: Normalizer::with_config(config)?,
        })
    }

    /// Normalizer configuration
    pub fn config(&self) -> &NormalizerConfig {
        self.normalizer.config()
    }

    /// Normalize a request while holding the adapter lock
    pub fn process(&self, request: &NormalizeRequest) -> Result<NormalizeResponse> {
        self.process_with_stats(request).map(|(response, _)| response)
    }

    /// Like [`process`](Self::process), also returning the counters
    pub fn process_with_stats(
        &self,
        request: &NormalizeRequest,
    ) -> Result<(NormalizeResponse, NormalizeStats)> {
        let mut adapter = self
            .adapter
            .lock()
            .map_err(|err| NormalizeError::AdapterUnavailable(err.to_string()))?;
        self.normalizer.normalize_with_stats(&mut *adapter, request)
    }

    /// Normalize a request, reporting failures as data
    pub fn handle(
        &self,
        request: &NormalizeRequest,
    ) -> std::result::Result<NormalizeResponse, ErrorMessage> {
        self.process(request).map_err(|err| {
            error!("request failed: {}", err);
            ErrorMessage::from(&err)
        })
    }

    /// Take the adapter back
    pub fn into_adapter(self) -> Result<A> {
        self.adapter
            .into_inner()
            .map_err(|err| NormalizeError::AdapterUnavailable(err.to_string()))
    }
}

//! Per-language model cache
//!
//! Adapters load one model per language and keep it for the lifetime of the
//! process. The cache is created by the host and injected into adapters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::language::LanguageMap;

/// Language code to loaded model
#[derive(Debug)]
pub struct ModelCache<M> {
    languages: LanguageMap,
    models: Mutex<HashMap<String, Arc<M>>>,
}

impl<M> Default for ModelCache<M> {
    fn default() -> Self {
        Self::new(LanguageMap::default())
    }
}

impl<M> ModelCache<M> {
    /// Create an empty cache resolving tags through `languages`
    pub fn new(languages: LanguageMap) -> Self {
        Self {
            languages,
            models: Mutex::new(HashMap::new()),
        }
    }

    /// Language aliases in use
    pub fn languages(&self) -> &LanguageMap {
        &self.languages
    }

    /// Return the model for `language`, loading it on first use.
    ///
    /// `load` receives the canonical code. A failed load is not cached.
    pub fn get_or_load<E, F>(&self, language: &str, load: F) -> Result<Arc<M>, E>
    where
        F: FnOnce(&str) -> Result<M, E>,
    {
        let code = self.languages.resolve(language);
        let mut models = self.models.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(model) = models.get(code) {
            return Ok(Arc::clone(model));
        }

        info!(language, code, "loading model");
        let model = Arc::new(load(code)?);
        models.insert(code.to_string(), Arc::clone(&model));
        Ok(model)
    }

    /// Whether a model for `language` is loaded
    pub fn is_loaded(&self, language: &str) -> bool {
        let code = self.languages.resolve(language);
        self.models
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(code)
    }

    /// Number of loaded models
    pub fn len(&self) -> usize {
        self.models
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no model is loaded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

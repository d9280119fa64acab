use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use reqwest::Client;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{http_client, GeminiClient, TextGenerator};
use crate::store::PackageStore;

/// Distinct caller keys whose clients (and discovered model) are kept warm.
const USER_CLIENT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Client built from the server-side key; `None` means every request
    /// must bring its own key.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub packages: PackageStore,
    /// Connection pool shared by every Gemini client.
    pub http: Client,
    /// Per-key clients for callers that bring their own key.
    pub user_clients: Arc<Mutex<LruCache<String, Arc<GeminiClient>>>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = http_client()
            .map_err(|e| AppError::Llm(format!("Could not create Gemini client: {e}")))?;
        let llm = config
            .google_api_key
            .as_deref()
            .map(|key| Arc::new(build_client(&config, &http, key)) as Arc<dyn TextGenerator>);
        let packages = PackageStore::new(config.package_store_capacity);

        Ok(Self {
            config,
            llm,
            packages,
            http,
            user_clients: Arc::new(Mutex::new(LruCache::new(USER_CLIENT_CACHE_SIZE))),
        })
    }

    /// The key a request is allowed to use: the server key wins, then the
    /// request body, then the `x-goog-api-key` header.
    pub fn effective_api_key<'a>(
        &'a self,
        body_key: Option<&'a str>,
        header_key: Option<&'a str>,
    ) -> Option<&'a str> {
        let non_blank = |k: &&str| !k.trim().is_empty();
        self.config
            .google_api_key
            .as_deref()
            .or_else(|| body_key.filter(non_blank))
            .or_else(|| header_key.filter(non_blank))
    }

    /// Returns the shared client, or the cached client for the caller's key.
    pub fn llm_for(&self, api_key: Option<&str>) -> Result<Arc<dyn TextGenerator>, AppError> {
        if let Some(llm) = &self.llm {
            return Ok(Arc::clone(llm));
        }
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Validation("API Key is required.".to_string()))?;

        let mut clients = self
            .user_clients
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Client cache lock poisoned")))?;
        let client = clients
            .get_or_insert(key.to_string(), || {
                Arc::new(build_client(&self.config, &self.http, key))
            })
            .clone();
        Ok(client)
    }
}

fn build_client(config: &Config, http: &Client, api_key: &str) -> GeminiClient {
    GeminiClient::new(
        http.clone(),
        api_key.trim().to_string(),
        &config.gemini_api_base,
        config.gemini_model.clone(),
    )
}

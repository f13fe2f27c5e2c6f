use crate::error::CatalogError;
use crate::error::Result;
use crate::model::EntityId;
use icu_locale_core::Locale;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Configuration for the catalog engine and its upstream client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the upstream data API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of entities per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum detail fetches in flight at once
    #[serde(default = "default_detail_batch_size")]
    pub detail_batch_size: usize,

    /// Highest id kept in the index (known catalog ceiling)
    #[serde(default = "default_max_entity_id")]
    pub max_entity_id: EntityId,

    /// Quiet period before a search keystroke burst is dispatched
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Per-request timeout for upstream calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// BCP-47 locale used to collate names
    #[serde(default = "default_collation_locale")]
    pub collation_locale: String,
}

fn default_api_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_page_size() -> usize {
    12
}

fn default_detail_batch_size() -> usize {
    20
}

fn default_max_entity_id() -> EntityId {
    809
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_collation_locale() -> String {
    "en".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            detail_batch_size: default_detail_batch_size(),
            max_entity_id: default_max_entity_id(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            collation_locale: default_collation_locale(),
        }
    }
}

impl CatalogConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(contents)?;
        config.validate().map_err(CatalogError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be > 0".to_string());
        }

        if self.detail_batch_size == 0 {
            return Err("detail_batch_size must be > 0".to_string());
        }

        if self.max_entity_id == 0 {
            return Err("max_entity_id must be > 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }

        Url::parse(&self.api_base_url)
            .map_err(|err| format!("api_base_url '{}' is invalid: {err}", self.api_base_url))?;

        self.locale()?;

        Ok(())
    }

    pub fn locale(&self) -> std::result::Result<Locale, String> {
        self.collation_locale.parse::<Locale>().map_err(|err| {
            format!(
                "collation_locale '{}' is invalid: {err}",
                self.collation_locale
            )
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Storefront configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lumen_commerce::search::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use lumen_data::TimeoutConfig;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_BASE_URL: &str = "LUMEN_API_BASE_URL";
/// Environment variable overriding `storage.dir`.
pub const ENV_STORAGE_DIR: &str = "LUMEN_STORAGE_DIR";
/// Environment variable overriding `logging.filter`.
pub const ENV_LOG: &str = "LUMEN_LOG";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Backend endpoints and time budgets.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing presentation.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart and user survive restarts.
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply `LUMEN_*` overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(dir) = get(ENV_STORAGE_DIR) {
            self.storage.dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = get(ENV_LOG) {
            self.logging.filter = filter;
        }
    }

    /// Reject values the storefront cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be at least 1");
        }
        if self.catalog.page_window == 0 {
            bail!("catalog.page_window must be at least 1");
        }
        Ok(())
    }

    /// Storage directory, defaulting to the platform data directory.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        directories::ProjectDirs::from("ru", "Lumen", "lumen-storefront")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .context("No home directory found; set storage.dir or LUMEN_STORAGE_DIR")
    }
}

/// Backend endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listing endpoint; also serves single products via `?id=`.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Login and registration endpoint.
    #[serde(default = "default_auth_path")]
    pub auth_path: String,

    #[serde(default = "default_orders_path")]
    pub orders_path: String,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.connect_timeout_ms, self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            auth_path: default_auth_path(),
            orders_path: default_orders_path(),
            connect_timeout_ms: default_connect_timeout_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://functions.poehali.dev".to_string()
}

fn default_products_path() -> String {
    "/a3fd8ed2-0343-4f13-b1e5-a2b2cc6f8a07".to_string()
}

fn default_auth_path() -> String {
    "/0d0dfc96-5a4b-443f-a055-06ec9cbe4d36".to_string()
}

fn default_orders_path() -> String {
    "/orders".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_timeout_ms() -> u64 {
    15_000
}

/// Listing presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Number of page links shown at once.
    #[serde(default = "default_page_window")]
    pub page_window: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_window() -> u32 {
    DEFAULT_PAGE_WINDOW
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_window: default_page_window(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

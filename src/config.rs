use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root URL of the recipe API (the `/api/...` paths are appended to it)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of suggestions revealed per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Number of featured recipes shown before any search
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            page_size: default_page_size(),
            featured_count: default_featured_count(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    6
}

fn default_featured_count() -> usize {
    4
}

fn default_user_agent() -> String {
    format!("flavor-graph/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FLAVOR_GRAPH__ prefix
    /// 2. flavor-graph.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FLAVOR_GRAPH__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables, see [`ClientConfig::load`]
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("flavor-graph").required(false))
        .add_source(
            Environment::with_prefix("FLAVOR_GRAPH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: ClientConfig = settings.try_deserialize()?;
    config.page_size = config.page_size.max(1);
    Ok(config)
}

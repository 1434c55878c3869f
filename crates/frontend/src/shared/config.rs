//! Runtime configuration.
//!
//! An embedded default is compiled into the bundle; at startup `/config.toml`
//! (served next to `index.html`) is fetched and replaces it when present.

use gloo_net::http::Request;
use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub baas: BaasConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub app: AppSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Header sent with every backend request so the tunnelling proxy in
    /// front of the backend skips its interstitial page
    #[serde(default = "default_bypass_header")]
    pub bypass_header: String,
    #[serde(default = "default_bypass_value")]
    pub bypass_value: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BaasConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    #[serde(default)]
    pub snap_client_key: String,
    #[serde(default = "default_snap_script_url")]
    pub snap_script_url: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            snap_client_key: String::new(),
            snap_script_url: default_snap_script_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    pub url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u32,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_bypass_header() -> String {
    "ngrok-skip-browser-warning".to_string()
}

fn default_bypass_value() -> String {
    "true".to_string()
}

fn default_snap_script_url() -> String {
    "https://app.sandbox.midtrans.com/snap/snap.js".to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_poll_interval() -> u32 {
    10_000
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:5000"

[baas]
url = "http://localhost:54321"
anon_key = ""

[app]
log_level = "debug"
poll_interval_ms = 10000
"#;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

impl AppConfig {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn embedded() -> Self {
        // Covered by test_default_config_loads
        toml::from_str(DEFAULT_CONFIG).expect("embedded config is valid")
    }

    pub fn log_level(&self) -> log::Level {
        self.app.log_level.parse().unwrap_or(log::Level::Debug)
    }
}

/// Fetch `/config.toml`, falling back to the embedded default
pub async fn load_config() -> AppConfig {
    match fetch_override().await {
        Ok(config) => {
            log::info!("Loaded config.toml from server");
            config
        }
        Err(e) => {
            log::warn!("Using embedded configuration: {}", e);
            AppConfig::embedded()
        }
    }
}

async fn fetch_override() -> anyhow::Result<AppConfig> {
    let response = Request::get("/config.toml").send().await?;
    if !response.ok() {
        anyhow::bail!("config.toml not served (HTTP {})", response.status());
    }
    let text = response.text().await?;
    AppConfig::parse(&text)
}

/// Install the configuration for the lifetime of the page. Only the first
/// call has an effect.
pub fn install(config: AppConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("Configuration already installed, ignoring reload");
    }
}

/// Active configuration
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::embedded)
}

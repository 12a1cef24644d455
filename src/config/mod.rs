use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use log::{debug, LevelFilter};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const ENV_PREFIX: &str = "HADISPLAY";

fn default_timeout_sec() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HomeAssistantConfig {
    pub url: String,
    pub access_token: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ForecastConfig {
    pub attribute: String,
    pub index: usize,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SensorOptions {
    #[serde(default)]
    pub forecast: Option<ForecastConfig>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorEntry {
    pub entity_id: String,
    pub name: String,
    #[serde(default)]
    pub config: Option<SensorOptions>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PanelConfig {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub file: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 600,
            height: 448,
            file: "panel.png".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StyleConfig {
    pub font: String,
    pub updated_at_size: f32,
    pub sensor_name_size: f32,
    pub sensor_value_size: f32,
    pub margin: [u32; 2],
    pub background: [u8; 3],
    pub updated_at_colour: [u8; 3],
    pub sensor_name_colour: [u8; 3],
    pub sensor_value_colour: [u8; 3],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
            updated_at_size: 25.0,
            sensor_name_size: 30.0,
            sensor_value_size: 80.0,
            margin: [10, 10],
            background: [255, 255, 255],
            updated_at_colour: [0, 0, 0],
            sensor_name_colour: [0, 0, 0],
            sensor_value_colour: [0, 0, 0],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub update_interval_sec: f64,
    pub homeassistant: HomeAssistantConfig,
    #[serde(default)]
    pub display: Vec<SensorEntry>,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn update_interval(&self) -> Duration {
        // Range is checked by validate().
        Duration::try_from_secs_f64(self.update_interval_sec).unwrap_or(Duration::MAX)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<()> {
        if !self.update_interval_sec.is_finite() || self.update_interval_sec <= 0.0 {
            bail!(
                "update_interval_sec must be a positive number of seconds, got {}",
                self.update_interval_sec
            );
        }
        if let Err(e) = Duration::try_from_secs_f64(self.update_interval_sec) {
            bail!(
                "update_interval_sec {} is out of range: {}",
                self.update_interval_sec,
                e
            );
        }
        if self.homeassistant.url.trim().is_empty() {
            bail!("homeassistant.url must not be empty");
        }
        if self.panel.enabled && (self.panel.width == 0 || self.panel.height == 0) {
            bail!(
                "panel resolution must be non-zero, got {}x{}",
                self.panel.width,
                self.panel.height
            );
        }
        Ok(())
    }

    /// One-line description safe for logs; the access token is left out.
    pub fn summary(&self) -> String {
        let panel = if self.panel.enabled {
            format!("{}x{} -> {}", self.panel.width, self.panel.height, self.panel.file)
        } else {
            "off".to_string()
        };
        format!(
            "{} sensor(s) from {} every {}s, panel {}",
            self.display.len(),
            self.homeassistant.url,
            self.update_interval_sec,
            panel
        )
    }
}

use crate::error::ConfigError;
use core_types::{CompanySelection, MarkerStyle};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section may be omitted; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub dashboard: DashboardSettings,
    pub map: MapSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Where the dataset lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the processed sales-order-items CSV file.
    pub path: PathBuf,
}

/// Presentation settings of the dashboard page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    /// The company preselected when no company is given.
    pub default_company: CompanySelection,
    /// How many records the terminal report prints.
    pub record_limit: usize,
    pub output_format: OutputFormat,
}

/// Marker styles of the company map.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Style of the currently selected company.
    pub highlighted: MarkerStyle,
    /// Style of every other company.
    pub default: MarkerStyle,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// How the terminal report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sales_order_items_processed.csv"),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Trek Bike Sales".to_string(),
            default_company: CompanySelection::All,
            record_limit: 50,
            output_format: OutputFormat::Table,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            highlighted: MarkerStyle::HIGHLIGHTED,
            default: MarkerStyle::DEFAULT,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks constraints that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, style) in [
            ("map.highlighted", &self.map.highlighted),
            ("map.default", &self.map.default),
        ] {
            if !(0.0..=1.0).contains(&style.opacity) {
                return Err(ConfigError::Invalid(format!(
                    "{}.opacity must be between 0 and 1, got {}",
                    name, style.opacity
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "server.port must not be 0".to_string(),
            ));
        }

        if self.dashboard.record_limit == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.record_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

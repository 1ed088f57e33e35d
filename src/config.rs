//! Layered settings: built-in defaults, then an optional TOML file, then
//! `SIRONA_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use sirona_client::DEFAULT_ENDPOINT;

use crate::data::duration::parse_duration;
use crate::route::Route;

/// Values given on the command line, each overriding every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub route: Option<String>,
    pub refresh: Option<String>,
    pub window: Option<String>,
    pub timeout: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    endpoint: String,
    timeout: String,
    refresh: String,
    window: String,
    route: String,
    counters_unit: Option<String>,
    csv_filename: String,
    export_dir: PathBuf,
    log_dir: PathBuf,
    log_level: String,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the reporting REST services.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay between two polls of a live page.
    pub refresh: Duration,
    /// Initial span of the query window.
    pub window: Duration,
    /// Page shown at startup.
    pub route: Route,
    /// Unit the server converts counters to, e.g. `ms`.
    pub counters_unit: Option<String>,
    pub csv_filename: String,
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            refresh: Duration::from_secs(4),
            window: Duration::from_secs(24 * 3600),
            route: Route::Home,
            counters_unit: None,
            csv_filename: "counters.csv".to_string(),
            export_dir: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from every layer.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("timeout", "10s")?
            .set_default("refresh", "4s")?
            .set_default("window", "24h")?
            .set_default("route", "/home")?
            .set_default("csv_filename", defaults.csv_filename)?
            .set_default("export_dir", ".")?
            .set_default("log_dir", "logs")?
            .set_default("log_level", defaults.log_level)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder
            .add_source(Environment::with_prefix("SIRONA"))
            .set_override_option("endpoint", overrides.endpoint.clone())?
            .set_override_option("route", overrides.route.clone())?
            .set_override_option("refresh", overrides.refresh.clone())?
            .set_override_option("window", overrides.window.clone())?
            .set_override_option("timeout", overrides.timeout.clone())?
            .set_override_option("counters_unit", overrides.unit.clone())?
            .build()
            .context("loading configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        Self::resolve(raw)
    }

    fn resolve(raw: RawSettings) -> Result<Self> {
        Ok(Self {
            endpoint: raw.endpoint,
            timeout: duration_setting("timeout", &raw.timeout)?,
            refresh: duration_setting("refresh", &raw.refresh)?,
            window: duration_setting("window", &raw.window)?,
            route: Route::parse(&raw.route),
            counters_unit: raw.counters_unit.filter(|u| !u.trim().is_empty()),
            csv_filename: raw.csv_filename,
            export_dir: raw.export_dir,
            log_dir: raw.log_dir,
            log_level: raw.log_level,
        })
    }

    /// Window span in milliseconds.
    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

// A bare number is taken as seconds.
fn duration_setting(name: &str, text: &str) -> Result<Duration> {
    if let Ok(seconds) = text.trim().parse::<f64>() {
        if seconds.is_finite() && seconds >= 0.0 {
            return Ok(Duration::from_secs_f64(seconds));
        }
    }
    parse_duration(text).with_context(|| format!("invalid {name} duration {text:?}"))
}

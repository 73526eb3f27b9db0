use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::style::Viewport;
use crate::timing::DEFAULT_BUFFER_SIZE;

/// Resource scanner options (`[scanner]` in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// URL schemes dropped from the inventory (e.g. `["data", "about"]`). Empty keeps everything.
    #[serde(default)]
    pub ignored_schemes: Vec<String>,
    /// Screen the page is laid out for when computing backgrounds (`"1280x720"`).
    #[serde(default)]
    pub viewport: Viewport,
}

impl ScannerConfig {
    /// True if `url`'s scheme is listed in `ignored_schemes` (case-insensitive).
    pub fn ignores(&self, url: &Url) -> bool {
        self.ignored_schemes
            .iter()
            .any(|scheme| scheme.eq_ignore_ascii_case(url.scheme()))
    }
}

/// Resource timeline options (`[timeline]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Capacity of the buffered resource-timing history seen by late collectors.
    pub buffer_size: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Network idle detection (`[idle]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleConfig {
    /// Quiet period in milliseconds: no new timing records for this long means idle.
    pub quiet_ms: u64,
    /// Upper bound in seconds on the whole wait.
    pub timeout_secs: u64,
}

impl IdleConfig {
    pub fn quiet(&self) -> Duration {
        Duration::from_millis(self.quiet_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            quiet_ms: 5_000,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/pagetrace/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagetraceConfig {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub idle: IdleConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagetrace")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PagetraceConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PagetraceConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PagetraceConfig = toml::from_str(&data)?;
    Ok(cfg)
}

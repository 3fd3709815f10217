use graxx_core::{GraxxError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `graxx.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraxxConfig {
    /// Histogram settings for `summary` and `dump`.
    pub stats: StatsConfig,
    /// Rolling window settings for `smooth`.
    pub window: WindowConfig,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GraxxConfig {
    fn default() -> Self {
        Self {
            stats: StatsConfig::default(),
            window: WindowConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl GraxxConfig {
    /// Reject settings the estimators cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.stats.capacity == 0 {
            return Err(GraxxError::Config("stats.capacity must be positive".into()));
        }
        if self.window.size == 0 {
            return Err(GraxxError::Config("window.size must be positive".into()));
        }
        if let Some(p) = self.stats.percentiles.iter().find(|p| !(1..=100).contains(*p)) {
            return Err(GraxxError::Config(format!(
                "stats.percentiles entry {p} is outside 1..=100"
            )));
        }
        Ok(())
    }
}

/// Histogram estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of buckets; values at or above `capacity - 1` share the top one.
    pub capacity: usize,
    /// Percentiles reported alongside the median.
    pub percentiles: Vec<u32>,
    /// Thresholds reported as "percentage of values at or above".
    pub thresholds: Vec<usize>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            percentiles: vec![25, 50, 75, 90],
            thresholds: vec![1, 10, 20, 50],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { size: 10 }
    }
}

//! Partitioning configuration.
//!
//! All settings have defaults matching the Hanson et al. (2009) scheme:
//! 3 swell partitions, wave-age factor 1.7, wind-sea cutoff 1/3 and 200
//! watershed levels. Configurations can be loaded from JSON; the short
//! names `ihmax`, `swells`, `agefac` and `wscut` are accepted as aliases.
//!
//! ```
//! use specpart_rs::PartitionConfig;
//!
//! let config = PartitionConfig::from_json_str(r#"{
//!     "watershed": { "ihmax": 100 },
//!     "classifier": { "swells": 2, "wscut": 0.5 }
//! }"#).unwrap();
//! assert_eq!(config.watershed.max_levels, 100);
//! assert_eq!(config.classifier.swells, 2);
//! assert_eq!(config.classifier.age_factor, 1.7);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PartitionError;

/// Watershed quantization settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatershedConfig {
    /// Number of discrete elevation levels (must be > 1).
    #[serde(alias = "ihmax")]
    pub max_levels: usize,
    /// Passes used to absorb leftover watershed bins into basins.
    pub relaxation_passes: usize,
}

impl Default for WatershedConfig {
    fn default() -> Self {
        Self {
            max_levels: 200,
            relaxation_passes: 5,
        }
    }
}

impl WatershedConfig {
    /// Set the number of quantization levels.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.max_levels <= 1 {
            return Err(PartitionError::config(format!(
                "max_levels (ihmax) must be greater than 1, got {}",
                self.max_levels
            )));
        }
        Ok(())
    }
}

/// Settings for splitting partitions at frequency-profile valleys.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Whether partitions are inspected for secondary peaks at all.
    pub enabled: bool,
    /// Width of the smoothing window in Hz.
    pub smooth_window_hz: f64,
    /// Profile samples below this frequency (Hz) are ignored.
    pub min_freq: f64,
    /// A secondary system is split off only if it has more bins than this.
    pub min_bins: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smooth_window_hz: 0.01,
            min_freq: 0.05,
            min_bins: 20,
        }
    }
}

impl SplitConfig {
    /// Check the settings.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if !self.smooth_window_hz.is_finite() || self.smooth_window_hz <= 0.0 {
            return Err(PartitionError::config(format!(
                "smooth_window_hz must be positive, got {}",
                self.smooth_window_hz
            )));
        }
        if !self.min_freq.is_finite() {
            return Err(PartitionError::config(format!(
                "min_freq must be finite, got {}",
                self.min_freq
            )));
        }
        Ok(())
    }
}

/// Wind-sea / swell classification settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of swell partitions kept in the output.
    pub swells: usize,
    /// Wave-age multiplier applied to the projected wind speed.
    #[serde(alias = "agefac")]
    pub age_factor: f64,
    /// Fraction of wind-driven energy above which a basin is wind-sea.
    #[serde(alias = "wscut")]
    pub wind_cutoff: f64,
    /// Secondary peak splitting.
    pub split: SplitConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            swells: 3,
            age_factor: 1.7,
            wind_cutoff: 0.3333,
            split: SplitConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Set the number of swell partitions.
    pub fn with_swells(mut self, swells: usize) -> Self {
        self.swells = swells;
        self
    }

    /// Set the wave-age factor.
    pub fn with_age_factor(mut self, age_factor: f64) -> Self {
        self.age_factor = age_factor;
        self
    }

    /// Set the wind-sea energy fraction cutoff.
    pub fn with_wind_cutoff(mut self, wind_cutoff: f64) -> Self {
        self.wind_cutoff = wind_cutoff;
        self
    }

    /// Enable or disable secondary peak splitting.
    pub fn with_split(mut self, enabled: bool) -> Self {
        self.split.enabled = enabled;
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if !self.age_factor.is_finite() || self.age_factor <= 0.0 {
            return Err(PartitionError::config(format!(
                "age_factor (agefac) must be positive, got {}",
                self.age_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.wind_cutoff) {
            return Err(PartitionError::config(format!(
                "wind_cutoff (wscut) must lie in [0, 1], got {}",
                self.wind_cutoff
            )));
        }
        self.split.validate()
    }
}

/// Complete configuration of the per-spectrum pipeline.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    pub watershed: WatershedConfig,
    pub classifier: ClassifierConfig,
}

impl PartitionConfig {
    /// Set the number of swell partitions.
    pub fn with_swells(mut self, swells: usize) -> Self {
        self.classifier.swells = swells;
        self
    }

    /// Set the number of watershed levels.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.watershed.max_levels = max_levels;
        self
    }

    /// Number of partitions produced per spectrum (swells + wind-sea).
    pub fn n_partitions(&self) -> usize {
        self.classifier.swells + 1
    }

    /// Check all settings.
    pub fn validate(&self) -> Result<(), PartitionError> {
        self.watershed.validate()?;
        self.classifier.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, PartitionError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PartitionError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, PartitionError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data).map_err(|e| match e {
            PartitionError::Config(msg) => {
                PartitionError::config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }
}

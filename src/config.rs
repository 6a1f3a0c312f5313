//! Shared configuration for the plot exporters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Where and how often the exporters write images.
///
/// Missing fields in a JSON document take the values of [`PlotConfig::default`].
///
/// ```
/// use argus::config::PlotConfig;
///
/// let config = PlotConfig::new("plots/run-1")
///     .with_period(5)
///     .with_threshold(0.7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Directory receiving the PNG files
    pub output_dir: PathBuf,
    /// Fire every `period` epochs (never at epoch 0)
    pub period: usize,
    /// Score above which a prediction counts as the positive class
    pub threshold: f32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Display names of class 0 and class 1
    pub class_names: [String; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            period: 1,
            threshold: 0.5,
            width: 640,
            height: 480,
            class_names: ["Negative".to_string(), "Positive".to_string()],
        }
    }
}

impl PlotConfig {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_class_names<S: Into<String>>(mut self, negative: S, positive: S) -> Self {
        self.class_names = [negative.into(), positive.into()];
        self
    }

    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Save the config as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(VizError::invalid_parameter("period", "must be at least 1"));
        }

        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(VizError::InvalidParameter {
                name: "threshold".to_string(),
                reason: format!("must lie in [0, 1], got {}", self.threshold),
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(VizError::InvalidParameter {
                name: "size".to_string(),
                reason: format!("image must be non-empty, got {}x{}", self.width, self.height),
            });
        }

        Ok(())
    }
}

use crate::error::ConfigError;
use crate::matfile::{OutputFormat, MAX_VALUE, MIN_VALUE};
use crate::region::Algorithm;
use crate::render::{OutputMode, PaintStyle};

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AnalysisConfig {
    pub algorithm: Algorithm,
    pub output: OutputMode,
    pub paint_style: PaintStyle,
    pub format: OutputFormat,
    /// Smallest color code accepted in `--matrix` strings.
    pub min_value: i32,
    /// Largest color code accepted in `--matrix` strings.
    pub max_value: i32,
    /// Write a Graphviz drawing of the union-find forest.
    pub visualize: bool,
    pub overwrite: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Both,
            output: OutputMode::Whole,
            paint_style: PaintStyle::Colors,
            format: OutputFormat::Txt,
            min_value: MIN_VALUE,
            max_value: MAX_VALUE,
            visualize: false,
            overwrite: true,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_value > self.max_value {
            return Err(ConfigError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }
}

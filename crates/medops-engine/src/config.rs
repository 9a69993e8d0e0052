//! Configuration for the analytics engine

use std::path::PathBuf;

use medops_anomaly::DetectionConfig;
use medops_baseline::DEFAULT_MODEL_DIR;
use medops_outbreak::{JitterMode, OutbreakConfig};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the persisted baseline snapshot
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Forecast and confidence perturbation
    #[serde(default)]
    pub jitter: JitterConfig,

    /// Anomaly sigma multipliers
    #[serde(default)]
    pub anomaly: DetectionConfig,

    /// Outbreak horizon and confidence bands
    #[serde(default)]
    pub outbreak: OutbreakConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            jitter: JitterConfig::default(),
            anomaly: DetectionConfig::default(),
            outbreak: OutbreakConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Jitter source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitterKind {
    #[default]
    Disabled,
    Seeded,
    Entropy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JitterConfig {
    #[serde(default)]
    pub mode: JitterKind,

    /// Seed for `seeded` mode
    #[serde(default)]
    pub seed: u64,
}

impl JitterConfig {
    pub fn to_mode(&self) -> JitterMode {
        match self.mode {
            JitterKind::Disabled => JitterMode::Disabled,
            JitterKind::Seeded => JitterMode::Seeded(self.seed),
            JitterKind::Entropy => JitterMode::Entropy,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_model_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_DIR)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Load configuration: defaults, then the optional file, then `MEDOPS_*`
    /// environment variables (`__` separates nested keys).
    pub fn load(path: Option<&str>) -> EngineResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&EngineConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MEDOPS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let a = &self.anomaly;
        if !(a.sigma_multiplier > 0.0 && a.financial_sigma_multiplier > 0.0) {
            return Err(EngineError::Config(
                "sigma multipliers must be positive".to_string(),
            ));
        }
        let c = &self.outbreak.confidence;
        for (tier, band) in [("high", c.high), ("medium", c.medium), ("low", c.low)] {
            if band.min > band.max || band.max > 100 {
                return Err(EngineError::Config(format!(
                    "invalid {tier} confidence band [{}, {}]",
                    band.min, band.max
                )));
            }
        }
        Ok(())
    }

    /// A configuration with an explicit model directory, otherwise default.
    pub fn with_model_dir(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.model_dir, PathBuf::from("./models/saved"));
        assert_eq!(config.jitter.to_mode(), JitterMode::Disabled);
        assert_eq!(config.anomaly.sigma_multiplier, 2.0);
        assert_eq!(config.anomaly.financial_sigma_multiplier, 2.5);
        assert_eq!(config.outbreak.default_horizon_days, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jitter_modes() {
        let seeded = JitterConfig {
            mode: JitterKind::Seeded,
            seed: 9,
        };
        assert_eq!(seeded.to_mode(), JitterMode::Seeded(9));
        let entropy = JitterConfig {
            mode: JitterKind::Entropy,
            seed: 0,
        };
        assert_eq!(entropy.to_mode(), JitterMode::Entropy);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("medops_config_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("medops.json");
        std::fs::write(
            &path,
            r#"{
                "model_dir": "/var/lib/medops",
                "jitter": { "mode": "seeded", "seed": 42 },
                "anomaly": { "financial_sigma_multiplier": 3.0 },
                "outbreak": { "default_horizon_days": 14 }
            }"#,
        )
        .unwrap();

        let config = EngineConfig::load(path.to_str()).unwrap();
        assert_eq!(config.model_dir, PathBuf::from("/var/lib/medops"));
        assert_eq!(config.jitter.to_mode(), JitterMode::Seeded(42));
        assert_eq!(config.anomaly.sigma_multiplier, 2.0);
        assert_eq!(config.anomaly.financial_sigma_multiplier, 3.0);
        assert_eq!(config.outbreak.default_horizon_days, 14);
        assert_eq!(config.outbreak.confidence.high.min, 75);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = EngineConfig::load(Some("/nonexistent/medops-config")).unwrap();
        assert_eq!(config.outbreak.default_horizon_days, 30);
    }

    #[test]
    fn test_invalid_band_rejected() {
        let mut config = EngineConfig::default();
        config.outbreak.confidence.low.min = 80;
        config.outbreak.confidence.low.max = 70;
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }
}

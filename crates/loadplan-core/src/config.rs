//! loadplan.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "loadplan.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub arms: ArmsConfig,
    pub balance: BalanceConfig,
    pub restrictions: RestrictionsConfig,
    pub paths: PathsConfig,
}

/// Fore/aft reference arms used when a deck's arm list has to be regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmsConfig {
    pub main_fore: f64,
    pub main_aft: f64,
    pub lower_fore: f64,
    pub lower_aft: f64,
}

impl Default for ArmsConfig {
    fn default() -> Self {
        Self {
            main_fore: 18.0,
            main_aft: 36.0,
            lower_fore: 12.0,
            lower_aft: 28.0,
        }
    }
}

/// Reference arm that candidate spans are scored against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetArm {
    /// Unweighted mean arm of every slot on both decks.
    #[default]
    SlotMean,
    /// A fixed aircraft-specific balance target.
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub target: TargetArm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionsConfig {
    /// Mark one fore and one aft slot restricted on every non-empty deck whose
    /// profile leaves the counts unspecified.
    pub auto_restrict: bool,
}

impl Default for RestrictionsConfig {
    fn default() -> Self {
        Self {
            auto_restrict: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub aircraft_db: PathBuf,
    pub catalog: PathBuf,
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            aircraft_db: PathBuf::from("aircraft_db.json"),
            catalog: PathBuf::from("ulddb.json"),
            report: PathBuf::from("loadplan.txt"),
        }
    }
}

impl PlannerConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> ConfigResult<()> {
        let arms = [
            ("arms.main_fore", self.arms.main_fore),
            ("arms.main_aft", self.arms.main_aft),
            ("arms.lower_fore", self.arms.lower_fore),
            ("arms.lower_aft", self.arms.lower_aft),
        ];
        for (name, value) in arms {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
            }
        }
        if let TargetArm::Fixed(arm) = self.balance.target {
            if !arm.is_finite() {
                return Err(ConfigError::Invalid(
                    "balance.target.fixed must be a finite number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

//! Bot configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command-line flags are applied on top by the binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CLAIM_RADIUS, MAX_SPEED, UNIT_RADIUS};

/// Speed and spacing used when moving towards a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveProfile {
    /// Requested thrust magnitude.
    pub speed: f64,
    /// Gap kept between the destination and the target's edge.
    pub standoff: f64,
    /// Whether other units count as obstacles when planning the path.
    pub avoid_units: bool,
}

impl MoveProfile {
    /// Create a new profile.
    #[must_use]
    pub const fn new(speed: f64, standoff: f64, avoid_units: bool) -> Self {
        Self {
            speed,
            standoff,
            avoid_units,
        }
    }
}

/// Parameters for the obstacle-avoiding navigator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum number of angular corrections before giving up.
    pub max_corrections: u32,
    /// Degrees to rotate the heading on each correction.
    pub angular_step: f64,
    /// Extra distance beyond a node's edge within which a claim succeeds.
    pub claim_radius: f64,
    /// Collision radius of a unit.
    pub unit_radius: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_corrections: 90,
            angular_step: 1.0,
            claim_radius: CLAIM_RADIUS,
            unit_radius: UNIT_RADIUS,
        }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Name sent to the engine during the handshake.
    pub name: String,
    /// Wall-clock budget per turn in milliseconds, counted from snapshot receipt.
    pub turn_deadline_ms: u64,
    /// Evaluate units on the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Worker threads for the rayon pool (None = rayon default).
    pub threads: Option<usize>,
    /// Approach to a resource node that is still out of claim range.
    pub economic: MoveProfile,
    /// Attack on an enemy that is claiming or has claimed a node.
    pub engaged: MoveProfile,
    /// Approach to an enemy that is still moving.
    pub closing: MoveProfile,
    /// Navigator settings.
    pub navigation: NavigationConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "settler".to_string(),
            turn_deadline_ms: 1500,
            parallel: true,
            threads: None,
            economic: MoveProfile::new(MAX_SPEED, CLAIM_RADIUS, false),
            engaged: MoveProfile::new(MAX_SPEED, 5.0, false),
            closing: MoveProfile::new(4.0, 6.0, false),
            navigation: NavigationConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The turn deadline as a duration.
    #[must_use]
    pub const fn turn_deadline(&self) -> Duration {
        Duration::from_millis(self.turn_deadline_ms)
    }

    /// Check values that would make every move infeasible.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profiles = [
            ("economic", &self.economic),
            ("engaged", &self.engaged),
            ("closing", &self.closing),
        ];
        for (field, profile) in profiles {
            if !(profile.speed > 0.0 && profile.speed <= MAX_SPEED) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("speed {} outside (0, {MAX_SPEED}]", profile.speed),
                });
            }
            if profile.standoff < 0.0 || !profile.standoff.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("standoff {} is negative", profile.standoff),
                });
            }
        }
        if self.navigation.angular_step <= 0.0 || !self.navigation.angular_step.is_finite() {
            return Err(ConfigError::Invalid {
                field: "navigation",
                reason: format!("angular_step {} must be positive", self.navigation.angular_step),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "threads",
                reason: "the worker pool needs at least one thread".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The JSON did not match the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid {field} config: {reason}")]
    Invalid {
        /// Offending section.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.turn_deadline(), Duration::from_millis(1500));
        assert!(config.parallel);
        assert!(config.engaged.standoff < config.closing.standoff);
        assert!(config.engaged.speed > config.closing.speed);
        assert!(!config.economic.avoid_units);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BotConfig::from_json(r#"{ "name": "probe", "parallel": false }"#).unwrap();
        assert_eq!(config.name, "probe");
        assert!(!config.parallel);
        assert_eq!(config.navigation, NavigationConfig::default());
        assert_eq!(config.closing, BotConfig::default().closing);
    }

    #[test]
    fn test_nested_profile_override() {
        let json = r#"{ "closing": { "speed": 3.0, "standoff": 8.0, "avoid_units": true } }"#;
        let config = BotConfig::from_json(json).unwrap();
        assert_eq!(config.closing, MoveProfile::new(3.0, 8.0, true));
    }

    #[test]
    fn test_rejects_bad_speed() {
        let json = r#"{ "engaged": { "speed": 9.0, "standoff": 5.0, "avoid_units": false } }"#;
        let err = BotConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engaged", .. }));
    }

    #[test]
    fn test_rejects_empty_pool() {
        let err = BotConfig::from_json(r#"{ "threads": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "threads", .. }));
        assert!(BotConfig::from_json(r#"{ "threads": 2 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = BotConfig::from_json("{ name: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BotConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err}").contains("failed to read config"));
    }
}

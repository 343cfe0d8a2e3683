//! Engine policy configuration.
//!
//! The engine's tunable policy today is a single knob: the maximum
//! acceptable GPS accuracy radius. Readings blurrier than this are rejected
//! outright rather than evaluated, on the grounds that a fix the device
//! itself cannot place within the threshold carries no useful evidence.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The default maximum acceptable accuracy radius in meters.
pub const DEFAULT_MAX_ACCURACY_METERS: f64 = 100.0;

/// Policy configuration for the punch validator.
///
/// # Example
///
/// ```
/// use timeclock_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_accuracy_meters, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Readings with a reported accuracy above this are a validation error.
    #[serde(default = "default_max_accuracy")]
    pub max_accuracy_meters: f64,
}

fn default_max_accuracy() -> f64 {
    DEFAULT_MAX_ACCURACY_METERS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_accuracy_meters: DEFAULT_MAX_ACCURACY_METERS,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Missing keys fall back to their defaults; a missing file or invalid
    /// YAML is an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timeclock_engine::config::EngineConfig;
    ///
    /// let config = EngineConfig::load("./config/engine.yaml")?;
    /// # Ok::<(), timeclock_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

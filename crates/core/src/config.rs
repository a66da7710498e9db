//! Per-match settings: grid size, player ids and the tunable policy constants.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::types::Pos;

/// Manhattan distance at which a hostile starts poisoning its neighbors.
pub const DEFAULT_HAZARD_TRIGGER_RADIUS: u32 = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    pub width: usize,
    pub height: usize,
    pub self_id: u32,
    pub opponent_id: u32,
    /// Defaults to `height / 2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_row: Option<usize>,
    /// Defaults to the left end of the wrap row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_target: Option<Pos>,
    #[serde(default = "default_hazard_trigger_radius")]
    pub hazard_trigger_radius: u32,
}

fn default_hazard_trigger_radius() -> u32 {
    DEFAULT_HAZARD_TRIGGER_RADIUS
}

impl MatchConfig {
    pub fn new(width: usize, height: usize, self_id: u32, opponent_id: u32) -> Self {
        Self {
            width,
            height,
            self_id,
            opponent_id,
            wrap_row: None,
            fallback_target: None,
            hazard_trigger_radius: DEFAULT_HAZARD_TRIGGER_RADIUS,
        }
    }

    pub fn wrap_row(&self) -> usize {
        self.wrap_row.unwrap_or(self.height / 2)
    }

    pub fn fallback_target(&self) -> Pos {
        self.fallback_target.unwrap_or(Pos { y: self.wrap_row() as i32, x: 0 })
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let row = self.wrap_row();
        if row >= self.height {
            return Err(ConfigurationError::WrapRowOutOfBounds { row, height: self.height });
        }
        let fallback = self.fallback_target();
        if fallback.x < 0
            || fallback.y < 0
            || fallback.x as usize >= self.width
            || fallback.y as usize >= self.height
        {
            return Err(ConfigurationError::FallbackOutOfBounds { pos: fallback });
        }
        if self.self_id == self.opponent_id {
            return Err(ConfigurationError::DuplicatePlayerIds { id: self.self_id });
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(text).map_err(ConfigLoadError::Parse)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(ConfigurationError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl Error for ConfigLoadError {}

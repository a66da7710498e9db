//! Error kinds surfaced by the engine to the match harness.
//! Configuration and snapshot errors are never recovered inside the engine.

use std::error::Error;
use std::fmt;

use crate::types::Pos;

/// The match was not (or not correctly) set up before use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `initialize` was called before the grid dimensions were configured.
    DimensionsNotSet,
    /// A snapshot arrived before the grid was allocated.
    GridNotInitialized,
    InvalidDimensions { width: usize, height: usize },
    WrapRowOutOfBounds { row: usize, height: usize },
    FallbackOutOfBounds { pos: Pos },
    DuplicatePlayerIds { id: u32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionsNotSet => {
                write!(f, "trying to initialize the field before its settings were parsed")
            }
            Self::GridNotInitialized => write!(f, "snapshot received before the grid was initialized"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::WrapRowOutOfBounds { row, height } => {
                write!(f, "wrap row {row} is outside a grid of height {height}")
            }
            Self::FallbackOutOfBounds { pos } => {
                write!(f, "fallback target {pos} is outside the grid")
            }
            Self::DuplicatePlayerIds { id } => {
                write!(f, "self and opponent share the player id {id}")
            }
        }
    }
}

/// A serialized snapshot could not be applied to the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    CellCount { expected: usize, actual: usize },
    EmptyToken { pos: Pos },
    /// A `P` token without a numeric player id.
    InvalidPlayerToken { pos: Pos, token: String },
    /// A `P<id>` token whose id is neither self nor opponent.
    UnknownPlayer { pos: Pos, id: u32 },
    DuplicateSelf { first: Pos, second: Pos },
    DuplicateOpponent { first: Pos, second: Pos },
    MissingSelf,
    /// A token was addressed to a cell outside the grid.
    OutOfBounds { pos: Pos },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCount { expected, actual } => {
                write!(f, "snapshot has {actual} cells, expected {expected}")
            }
            Self::EmptyToken { pos } => write!(f, "empty token at {pos}"),
            Self::InvalidPlayerToken { pos, token } => {
                write!(f, "invalid player token {token:?} at {pos}")
            }
            Self::UnknownPlayer { pos, id } => write!(f, "unknown player id {id} at {pos}"),
            Self::DuplicateSelf { first, second } => {
                write!(f, "self appears twice, at {first} and {second}")
            }
            Self::DuplicateOpponent { first, second } => {
                write!(f, "opponent appears twice, at {first} and {second}")
            }
            Self::MissingSelf => write!(f, "snapshot does not contain self"),
            Self::OutOfBounds { pos } => write!(f, "cell {pos} is outside the grid"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    Configuration(ConfigurationError),
    MalformedSnapshot(SnapshotError),
    /// No snapshot was successfully ingested for the current tick.
    NoSnapshot,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::MalformedSnapshot(e) => write!(f, "malformed snapshot: {e}"),
            Self::NoSnapshot => write!(f, "no valid snapshot for the current tick"),
        }
    }
}

impl Error for ConfigurationError {}

impl Error for SnapshotError {}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::MalformedSnapshot(e) => Some(e),
            Self::NoSnapshot => None,
        }
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<SnapshotError> for EngineError {
    fn from(e: SnapshotError) -> Self {
        Self::MalformedSnapshot(e)
    }
}

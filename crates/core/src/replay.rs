use std::error::Error;
use std::fmt;

use crate::{Decision, Engine, EngineError, MatchLog};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    /// The log's config was rejected before the first round.
    Setup(EngineError),
    /// A round could not be ingested or decided on.
    Round { round: u64, error: EngineError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "replay setup failed: {e}"),
            Self::Round { round, error } => write!(f, "replay failed at round {round}: {error}"),
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Setup(e) | Self::Round { error: e, .. } => Some(e),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayStep {
    pub round: u64,
    pub decision: Decision,
    pub snapshot_hash: u64,
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub steps: Vec<ReplayStep>,
    pub final_snapshot_hash: u64,
}

/// Runs every round of `log` through a fresh engine, in order.
pub fn replay_match(log: &MatchLog) -> Result<ReplayResult, ReplayError> {
    let mut engine = Engine::with_config(log.config.clone()).map_err(ReplayError::Setup)?;
    let mut steps = Vec::with_capacity(log.rounds.len());

    for record in &log.rounds {
        let round = record.round;
        engine.ingest_snapshot(&record.field).map_err(|error| ReplayError::Round { round, error })?;
        let decision = engine.decide_move().map_err(|error| ReplayError::Round { round, error })?;
        steps.push(ReplayStep { round, decision, snapshot_hash: engine.snapshot_hash() });
    }

    Ok(ReplayResult { steps, final_snapshot_hash: engine.snapshot_hash() })
}

#[cfg(test)]
mod tests;

//! Per-match decision engine.
//! This file owns match setup and per-tick state ingestion and wires the
//! hazard, pathfinding, targeting and route submodules together.
//! It does not own any transport; snapshots arrive as strings and a single
//! `Direction` leaves per tick.

use std::mem;

use tracing::debug;

use crate::config::MatchConfig;
use crate::error::{ConfigurationError, EngineError, SnapshotError};
use crate::grid::Grid;
use crate::snapshot::{CellToken, cell_position, parse_token, split_cells, split_tokens};
use crate::types::*;

mod decision;
mod diag;
mod hash;
mod hazards;
mod pathfinding;
mod route;
mod targeting;

#[cfg(test)]
mod test_support;

pub use decision::MovePlan;
pub use diag::draw_field_diag;
pub use hazards::HazardSet;
pub use pathfinding::{DistanceField, compute_distances};
pub use route::{RouteReduction, next_move_toward, reduce_route};
pub use targeting::{TargetSelection, score_collectibles, select_target};

/// Everything parsed out of the current snapshot. Rebuilt from scratch every tick.
#[derive(Clone, Debug, Default)]
pub struct TickState {
    pub self_pos: Option<Pos>,
    pub opponent_pos: Option<Pos>,
    pub hostiles: Vec<Pos>,
    /// Hostiles of the tick before; kept for diffing, never used for exclusion.
    pub prev_hostiles: Vec<Pos>,
    pub spawn_points: Vec<Pos>,
    pub collectibles: Vec<Pos>,
    pub bomb_pickups: Vec<Pos>,
    pub ticking_bombs: Vec<Pos>,
    pub hazards: HazardSet,
}

#[derive(Debug, Default)]
pub struct Engine {
    config: Option<MatchConfig>,
    grid: Option<Grid>,
    state: TickState,
    snapshot_ready: bool,
    rounds_ingested: u64,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures and initializes in one go.
    pub fn with_config(config: MatchConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new();
        engine.configure(config)?;
        engine.initialize()?;
        Ok(engine)
    }

    /// Stores match settings. The grid is allocated by [`Engine::initialize`].
    pub fn configure(&mut self, config: MatchConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.config = Some(config);
        self.grid = None;
        self.snapshot_ready = false;
        Ok(())
    }

    pub fn initialize(&mut self) -> Result<(), EngineError> {
        let Some(config) = &self.config else {
            return Err(ConfigurationError::DimensionsNotSet.into());
        };
        self.grid = Some(Grid::new(config.width, config.height, config.wrap_row()));
        self.clear();
        Ok(())
    }

    /// Empties every cell and per-tick collection. The current hostiles
    /// become the previous tick's hostiles.
    pub fn clear(&mut self) {
        if let Some(grid) = &mut self.grid {
            grid.clear();
        }
        let prev_hostiles = mem::take(&mut self.state.hostiles);
        self.state = TickState { prev_hostiles, ..TickState::default() };
        self.snapshot_ready = false;
    }

    /// Replaces the tick state with the contents of `serialized`.
    ///
    /// On error the engine stays unusable until the next successful ingest;
    /// [`Engine::decide_move`] returns [`EngineError::NoSnapshot`] meanwhile.
    pub fn ingest_snapshot(&mut self, serialized: &str) -> Result<(), EngineError> {
        let (width, height, radius) = match &self.config {
            Some(config) => (config.width, config.height, config.hazard_trigger_radius),
            None => return Err(ConfigurationError::DimensionsNotSet.into()),
        };
        if self.grid.is_none() {
            return Err(ConfigurationError::GridNotInitialized.into());
        }
        self.clear();

        let cells = split_cells(serialized, width * height)?;
        for (index, descriptor) in cells.into_iter().enumerate() {
            let pos = cell_position(index, width);
            if let Some(cell) = self.grid.as_mut().and_then(|grid| grid.cell_mut(pos)) {
                cell.raw = descriptor.to_string();
            }
            for token in split_tokens(descriptor) {
                self.apply_token(token, pos)?;
            }
        }

        let self_pos = self.state.self_pos.ok_or(SnapshotError::MissingSelf)?;
        self.refresh_hazards(radius);
        self.snapshot_ready = true;
        self.rounds_ingested += 1;

        debug!(
            round = self.rounds_ingested,
            self_pos = %self_pos,
            opponent = ?self.state.opponent_pos,
            collectibles = self.state.collectibles.len(),
            hostiles = self.state.hostiles.len(),
            unsafe_cells = self.state.hazards.unsafe_cells().count(),
            "snapshot ingested"
        );
        Ok(())
    }

    /// Applies a single token to the cell at `pos` and rebuilds the hazard
    /// zone so a hand-fed hostile is excluded from the next plan.
    pub fn ingest_cell_token(&mut self, token: &str, pos: Pos) -> Result<(), EngineError> {
        self.apply_token(token, pos)?;
        if let Some(radius) = self.config.as_ref().map(|config| config.hazard_trigger_radius) {
            self.refresh_hazards(radius);
        }
        Ok(())
    }

    fn refresh_hazards(&mut self, radius: u32) {
        if let Some(self_pos) = self.state.self_pos {
            self.state.hazards = HazardSet::recompute(&self.state.hostiles, self_pos, radius);
        }
    }

    fn apply_token(&mut self, token: &str, pos: Pos) -> Result<(), EngineError> {
        let Some(config) = &self.config else {
            return Err(ConfigurationError::DimensionsNotSet.into());
        };
        let (self_id, opponent_id) = (config.self_id, config.opponent_id);
        let Some(grid) = self.grid.as_mut() else {
            return Err(ConfigurationError::GridNotInitialized.into());
        };
        let Some(cell) = grid.cell_mut(pos) else {
            return Err(SnapshotError::OutOfBounds { pos }.into());
        };
        let state = &mut self.state;

        let occupant = match parse_token(token, pos)? {
            CellToken::Empty | CellToken::Unrecognized => None,
            CellToken::Blocked => {
                cell.blocked = true;
                None
            }
            CellToken::Player(id) if id == self_id => {
                if let Some(first) = state.self_pos {
                    return Err(SnapshotError::DuplicateSelf { first, second: pos }.into());
                }
                state.self_pos = Some(pos);
                Some(Occupant::SelfAgent)
            }
            CellToken::Player(id) if id == opponent_id => {
                if let Some(first) = state.opponent_pos {
                    return Err(SnapshotError::DuplicateOpponent { first, second: pos }.into());
                }
                state.opponent_pos = Some(pos);
                Some(Occupant::Opponent)
            }
            CellToken::Player(id) => return Err(SnapshotError::UnknownPlayer { pos, id }.into()),
            CellToken::Spawn => {
                state.spawn_points.push(pos);
                Some(Occupant::HostileSpawn)
            }
            CellToken::Hostile => {
                state.hostiles.push(pos);
                Some(Occupant::Hostile)
            }
            CellToken::BombPickup => {
                state.bomb_pickups.push(pos);
                Some(Occupant::BombPickup)
            }
            CellToken::TickingBomb { ticks } => {
                state.ticking_bombs.push(pos);
                Some(Occupant::TickingBomb { ticks })
            }
            CellToken::Collectible => {
                state.collectibles.push(pos);
                Some(Occupant::Collectible)
            }
        };
        if let Some(occupant) = occupant {
            cell.occupants.push(occupant);
        }
        Ok(())
    }

    /// Directions self can take this tick without entering a wall or a hazard.
    pub fn valid_moves(&self) -> Result<Vec<Direction>, EngineError> {
        let (_, grid, self_pos) = self.ready()?;
        Ok(grid
            .neighbors(self_pos)
            .into_iter()
            .filter(|(_, next)| grid.is_enterable(*next) && self.state.hazards.is_safe(*next, None))
            .map(|(dir, _)| dir)
            .collect())
    }

    pub fn config(&self) -> Option<&MatchConfig> {
        self.config.as_ref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn state(&self) -> &TickState {
        &self.state
    }

    pub fn is_snapshot_ready(&self) -> bool {
        self.snapshot_ready
    }

    pub fn rounds_ingested(&self) -> u64 {
        self.rounds_ingested
    }

    fn ready(&self) -> Result<(&MatchConfig, &Grid, Pos), EngineError> {
        let config = self.config.as_ref().ok_or(ConfigurationError::DimensionsNotSet)?;
        let grid = self.grid.as_ref().ok_or(ConfigurationError::GridNotInitialized)?;
        match self.state.self_pos {
            Some(self_pos) if self.snapshot_ready => Ok((config, grid, self_pos)),
            _ => Err(EngineError::NoSnapshot),
        }
    }
}

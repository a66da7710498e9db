pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod match_log;
pub mod replay;
pub mod snapshot;
pub mod types;

pub use config::{ConfigLoadError, MatchConfig};
pub use engine::{
    DistanceField, Engine, HazardSet, MovePlan, RouteReduction, TargetSelection, TickState,
    compute_distances, draw_field_diag, next_move_toward, reduce_route, score_collectibles,
    select_target,
};
pub use error::{ConfigurationError, EngineError, SnapshotError};
pub use grid::{Cell, Grid};
pub use match_log::{MatchLog, MatchLogError, MatchLogWriter, RoundRecord, load_match_log};
pub use replay::{ReplayError, ReplayResult, ReplayStep, replay_match};
pub use types::*;

//! Per-tick decision: both distance fields, contested-target arbitration and
//! the route reduction toward whatever self ends up pursuing.

use tracing::{debug, trace};

use super::*;

/// A decision together with the intermediate products that led to it.
#[derive(Clone, Debug)]
pub struct MovePlan {
    pub decision: Decision,
    /// The field the route was reduced on; recomputed with the forbidden
    /// target excluded when self yielded.
    pub self_field: DistanceField,
    pub opponent_field: Option<DistanceField>,
    pub route: RouteReduction,
}

impl Engine {
    pub fn decide_move(&self) -> Result<Decision, EngineError> {
        Ok(self.plan_move()?.decision)
    }

    /// Plans this tick's move from the last ingested snapshot.
    ///
    /// When both agents would go for the same collectible, self keeps it if
    /// it is no farther than the opponent or it is the only one on the field.
    /// Otherwise self forbids it and selects again on a fresh field.
    pub fn plan_move(&self) -> Result<MovePlan, EngineError> {
        let (config, grid, self_pos) = self.ready()?;
        let state = &self.state;
        let hazards = &state.hazards;
        let collectibles = &state.collectibles;
        let fallback = config.fallback_target();

        let mut self_field = compute_distances(grid, hazards, self_pos, None);
        let mut chosen = select_target(grid, &self_field, collectibles, None, fallback);

        let opponent_field =
            state.opponent_pos.map(|pos| compute_distances(grid, hazards, pos, None));
        let opponent_choice = opponent_field
            .as_ref()
            .map(|field| select_target(grid, field, collectibles, None, fallback));

        let contest = match (chosen, opponent_choice, &opponent_field) {
            (
                TargetSelection::Collectible(mine),
                Some(TargetSelection::Collectible(theirs)),
                Some(theirs_field),
            ) if mine == theirs => {
                if self_field.get(mine.pos) <= theirs_field.get(mine.pos) || collectibles.len() == 1
                {
                    Contest::Held
                } else {
                    self_field = compute_distances(grid, hazards, self_pos, Some(mine.pos));
                    chosen =
                        select_target(grid, &self_field, collectibles, Some(mine.pos), fallback);
                    Contest::Yielded { forbidden: mine.pos }
                }
            }
            _ => Contest::Uncontested,
        };

        let target = chosen.pos();
        let route = reduce_route(grid, &self_field, self_pos, target);
        trace!("self distance field\n{}", draw_field_diag(&self_field, &state.hostiles));
        debug!(
            round = self.rounds_ingested,
            goal = %target,
            collectible = chosen.is_collectible(),
            opponent_goal = ?opponent_choice.map(|choice| choice.pos()),
            ?contest,
            direction = %route.direction,
            checkpoint = ?route.checkpoint,
            "move planned"
        );

        Ok(MovePlan {
            decision: Decision {
                direction: route.direction,
                target,
                target_is_collectible: chosen.is_collectible(),
                contest,
            },
            self_field,
            opponent_field,
            route,
        })
    }
}

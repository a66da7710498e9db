//! Hostile-proximity exclusion zone.
//! A hostile close enough to self poisons its four orthogonal neighbors for
//! this tick; the hostile's own cell is always excluded.

use std::collections::BTreeSet;

use super::*;
use crate::grid::manhattan;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardSet {
    hostiles: BTreeSet<Pos>,
    unsafe_cells: BTreeSet<Pos>,
}

impl HazardSet {
    /// Builds the exclusion set for one tick.
    ///
    /// `trigger_radius` only gates whether a hostile contributes at all; a
    /// triggered hostile always excludes exactly its 4-neighborhood.
    pub fn recompute(hostiles: &[Pos], self_pos: Pos, trigger_radius: u32) -> Self {
        let mut unsafe_cells = BTreeSet::new();
        for &hostile in hostiles {
            if manhattan(hostile, self_pos) > trigger_radius {
                continue;
            }
            for dir in Direction::MOVES {
                let (dx, dy) = dir.delta();
                unsafe_cells.insert(Pos { y: hostile.y + dy, x: hostile.x + dx });
            }
        }
        Self { hostiles: hostiles.iter().copied().collect(), unsafe_cells }
    }

    /// `false` on a hostile, on the forbidden target, or inside the exclusion zone.
    pub fn is_safe(&self, pos: Pos, forbidden: Option<Pos>) -> bool {
        !self.hostiles.contains(&pos)
            && forbidden != Some(pos)
            && !self.unsafe_cells.contains(&pos)
    }

    pub fn unsafe_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.unsafe_cells.iter().copied()
    }
}

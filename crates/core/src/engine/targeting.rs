//! Collectible scoring and target selection.
//! Score is the field distance minus a small bonus for every other
//! collectible close by, where "close" may run through the wrap edge.

use super::*;
use crate::grid::manhattan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetSelection {
    Collectible(Collectible),
    /// No collectible qualified; head for the configured fallback cell.
    Fallback(Pos),
}

impl TargetSelection {
    pub fn pos(&self) -> Pos {
        match self {
            TargetSelection::Collectible(collectible) => collectible.pos,
            TargetSelection::Fallback(pos) => *pos,
        }
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, TargetSelection::Collectible(_))
    }
}

/// Scores every collectible against `field`, in input order.
///
/// Each collectible is compared with every collectible including itself;
/// the self-comparison has a gap of 0 and contributes nothing.
pub fn score_collectibles(
    grid: &Grid,
    field: &DistanceField,
    collectibles: &[Pos],
) -> Vec<Collectible> {
    collectibles
        .iter()
        .map(|&pos| {
            let mut score = field.get(pos) as i32;
            for &other in collectibles {
                let gap = cluster_gap(grid, pos, other);
                if gap != 0 {
                    score -= (2 / gap) as i32;
                }
            }
            Collectible { pos, score }
        })
        .collect()
}

/// Lowest-scoring reached collectible other than `forbidden`; first wins ties.
pub fn select_target(
    grid: &Grid,
    field: &DistanceField,
    collectibles: &[Pos],
    forbidden: Option<Pos>,
    fallback: Pos,
) -> TargetSelection {
    let mut best: Option<Collectible> = None;
    for candidate in score_collectibles(grid, field, collectibles) {
        if !field.is_reached(candidate.pos) || forbidden == Some(candidate.pos) {
            continue;
        }
        if best.is_none_or(|current| candidate.score < current.score) {
            best = Some(candidate);
        }
    }
    best.map_or(TargetSelection::Fallback(fallback), TargetSelection::Collectible)
}

/// Shortest of the direct gap and the two gaps that run through the wrap edge.
fn cluster_gap(grid: &Grid, a: Pos, b: Pos) -> u32 {
    let (left_end, right_end) = grid.wrap_ends();
    let left_exit = Pos { y: left_end.y, x: left_end.x - 1 };
    let right_exit = Pos { y: right_end.y, x: right_end.x + 1 };

    let direct = manhattan(a, b);
    let via_left = manhattan(a, left_exit) + manhattan(b, right_end);
    let via_right = manhattan(a, right_exit) + manhattan(b, left_end);
    direct.min(via_left).min(via_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::*;

    const FALLBACK: Pos = Pos { y: 2, x: 0 };

    fn field_from(grid: &Grid, origin: Pos) -> DistanceField {
        compute_distances(grid, &HazardSet::default(), origin, None)
    }

    #[test]
    fn empty_field_falls_back() {
        let grid = open_grid(9, 5);
        let field = field_from(&grid, Pos { y: 0, x: 0 });
        assert_eq!(
            select_target(&grid, &field, &[], None, FALLBACK),
            TargetSelection::Fallback(FALLBACK)
        );
    }

    #[test]
    fn nearest_lone_collectible_wins() {
        let grid = open_grid(9, 5);
        let field = field_from(&grid, Pos { y: 0, x: 0 });
        let near = Pos { y: 0, x: 3 };
        let far = Pos { y: 4, x: 6 };

        let chosen = select_target(&grid, &field, &[far, near], None, FALLBACK);
        assert_eq!(chosen.pos(), near);
        assert!(chosen.is_collectible());
    }

    #[test]
    fn clustered_collectible_beats_slightly_nearer_lone_one() {
        let grid = open_grid(9, 5);
        let field = field_from(&grid, Pos { y: 0, x: 0 });
        let lone = Pos { y: 0, x: 3 };
        let pair_a = Pos { y: 4, x: 0 };
        let pair_b = Pos { y: 4, x: 1 };

        let scores = score_collectibles(&grid, &field, &[lone, pair_a, pair_b]);
        let by_pos: Vec<(Pos, i32)> = scores.iter().map(|c| (c.pos, c.score)).collect();
        assert_eq!(by_pos, vec![(lone, 4), (pair_a, 3), (pair_b, 4)]);

        let chosen = select_target(&grid, &field, &[lone, pair_a, pair_b], None, FALLBACK);
        assert_eq!(chosen.pos(), pair_a);
    }

    #[test]
    fn wrap_row_ends_count_as_neighbors_for_clustering() {
        let grid = open_grid(9, 5);
        let (left, right) = grid.wrap_ends();
        assert_eq!(cluster_gap(&grid, left, right), 1);
        assert_eq!(cluster_gap(&grid, right, left), 1);
        assert_eq!(cluster_gap(&grid, left, left), 0);
    }

    #[test]
    fn forbidden_and_unreached_collectibles_are_skipped() {
        let mut grid = open_grid(9, 5);
        let walled = Pos { y: 0, x: 8 };
        grid.set_blocked(Pos { y: 0, x: 7 }, true);
        grid.set_blocked(Pos { y: 1, x: 8 }, true);
        let field = field_from(&grid, Pos { y: 0, x: 0 });

        let near = Pos { y: 0, x: 2 };
        let other = Pos { y: 4, x: 4 };
        let chosen = select_target(&grid, &field, &[walled, near, other], Some(near), FALLBACK);
        assert_eq!(chosen.pos(), other);

        let nothing = select_target(&grid, &field, &[walled, near], Some(near), FALLBACK);
        assert_eq!(nothing, TargetSelection::Fallback(FALLBACK));
    }

    #[test]
    fn ties_keep_the_first_collectible() {
        let grid = open_grid(9, 5);
        let field = field_from(&grid, Pos { y: 2, x: 4 });
        let right = Pos { y: 0, x: 8 };
        let left = Pos { y: 4, x: 0 };
        assert_eq!(field.get(right), field.get(left));

        assert_eq!(select_target(&grid, &field, &[right, left], None, FALLBACK).pos(), right);
        assert_eq!(select_target(&grid, &field, &[left, right], None, FALLBACK).pos(), left);
    }
}

//! Reduces a distance field and a target to the single move emitted this tick.
//!
//! The walk runs backward from the target, always onto a neighbor with a
//! strictly smaller recorded distance, and stops on the ring around self.
//! The move is then read off geometrically from where the walk stopped.
//! While walking, the label of the step taken out of the distance-4 cell is
//! recorded as `checkpoint`; it is reported but never decides the move.

use tracing::warn;

use super::*;

/// Field value at which the walk records its checkpoint label.
const CHECKPOINT_VALUE: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteReduction {
    pub direction: Direction,
    /// Cell the backward walk stopped on.
    pub walked_to: Pos,
    pub checkpoint: Option<Direction>,
}

pub fn next_move_toward(
    grid: &Grid,
    field: &DistanceField,
    self_pos: Pos,
    target: Pos,
) -> Direction {
    reduce_route(grid, field, self_pos, target).direction
}

pub fn reduce_route(
    grid: &Grid,
    field: &DistanceField,
    self_pos: Pos,
    target: Pos,
) -> RouteReduction {
    if target == self_pos {
        return RouteReduction { direction: Direction::Pass, walked_to: self_pos, checkpoint: None };
    }

    let mut current = target;
    let mut checkpoint = None;
    while field.get(current) > 2 {
        let value = field.get(current);
        let Some((next, label)) = descend(grid, field, current) else {
            warn!(at = %current, value, "route walk found no lower neighbor");
            break;
        };
        if value == CHECKPOINT_VALUE {
            checkpoint = Some(label);
        }
        current = next;
    }

    RouteReduction { direction: first_move(grid, self_pos, current), walked_to: current, checkpoint }
}

/// First reached neighbor with a smaller value, probing up, right, down,
/// left and then the wrap edge. Orthogonal labels are the reverse of the
/// step taken; a wrap step is labelled with the side it leaves through.
fn descend(grid: &Grid, field: &DistanceField, current: Pos) -> Option<(Pos, Direction)> {
    let value = field.get(current);
    let lower = |pos: Pos| {
        let candidate = field.get(pos);
        candidate != 0 && candidate < value
    };

    let orthogonal = [
        (Pos { y: current.y - 1, x: current.x }, Direction::Down),
        (Pos { y: current.y, x: current.x + 1 }, Direction::Left),
        (Pos { y: current.y + 1, x: current.x }, Direction::Up),
        (Pos { y: current.y, x: current.x - 1 }, Direction::Right),
    ];
    if let Some(step) = orthogonal.into_iter().find(|(pos, _)| lower(*pos)) {
        return Some(step);
    }

    let (left_end, right_end) = grid.wrap_ends();
    if current == right_end && lower(left_end) {
        return Some((left_end, Direction::Right));
    }
    if current == left_end && lower(right_end) {
        return Some((right_end, Direction::Left));
    }
    None
}

/// Direction from `self_pos` toward `step`, reading a full-width column
/// offset as a move through the wrap edge.
fn first_move(grid: &Grid, self_pos: Pos, step: Pos) -> Direction {
    let dx = step.x - self_pos.x;
    let dy = step.y - self_pos.y;

    if dx == 0 {
        if dy > 0 {
            return Direction::Down;
        }
        if dy < 0 {
            return Direction::Up;
        }
    }

    let span = grid.width() as i32 - 1;
    if span > 1 && dx == -span {
        return Direction::Right;
    }
    if span > 1 && dx == span {
        return Direction::Left;
    }
    match dx.signum() {
        1 => Direction::Right,
        -1 => Direction::Left,
        _ => Direction::Pass,
    }
}

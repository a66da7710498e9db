//! Hazard-aware breadth-first distances over the wrapping grid.
//! This module exists so both agents' fields come from one traversal rule.
//! It does not pick targets or moves.

use std::collections::VecDeque;

use super::*;

/// Per-origin hop counts, stored 1-based: the origin holds 1 and 0 means unreached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    origin: Pos,
    values: Vec<u32>,
}

impl DistanceField {
    pub fn new(width: usize, height: usize, origin: Pos) -> Self {
        Self { width, height, origin, values: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    /// Raw stored value; 0 for unreached or out-of-bounds cells.
    pub fn get(&self, pos: Pos) -> u32 {
        self.slot(pos).map_or(0, |idx| self.values[idx])
    }

    /// Hop count from the origin, `None` when unreached.
    pub fn hops(&self, pos: Pos) -> Option<u32> {
        self.get(pos).checked_sub(1)
    }

    pub fn is_reached(&self, pos: Pos) -> bool {
        self.get(pos) != 0
    }

    pub fn reached_count(&self) -> usize {
        self.values.iter().filter(|value| **value != 0).count()
    }

    fn set(&mut self, pos: Pos, value: u32) {
        if let Some(idx) = self.slot(pos) {
            self.values[idx] = value;
        }
    }

    fn slot(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        Some((pos.y as usize) * self.width + (pos.x as usize))
    }
}

/// FIFO breadth-first search from `origin`.
///
/// A step is allowed onto any enterable, safe cell; `forbidden` is treated
/// as unsafe. The origin itself is recorded even when it would not be
/// enterable.
pub fn compute_distances(
    grid: &Grid,
    hazards: &HazardSet,
    origin: Pos,
    forbidden: Option<Pos>,
) -> DistanceField {
    let mut field = DistanceField::new(grid.width(), grid.height(), origin);
    if !grid.in_bounds(origin) {
        return field;
    }

    let mut queue = VecDeque::new();
    field.set(origin, 1);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let next_value = field.get(current) + 1;
        for (_, neighbor) in grid.neighbors(current) {
            if field.is_reached(neighbor) {
                continue;
            }
            if !grid.is_enterable(neighbor) || !hazards.is_safe(neighbor, forbidden) {
                continue;
            }
            field.set(neighbor, next_value);
            queue.push_back(neighbor);
        }
    }

    field
}

//! Cell storage and the cylinder-on-one-row topology of the playing field.
//! This module answers "can a step land here" questions; hostile proximity
//! is the hazard tracker's concern, not the grid's.

use crate::types::{Direction, Occupant, Pos};

pub const BLOCKED_TOKEN: &str = "x";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Raw descriptor exactly as received, tokens joined by `;`.
    pub raw: String,
    pub blocked: bool,
    pub occupants: Vec<Occupant>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        !self.blocked && self.occupants.is_empty()
    }

    pub fn has(&self, occupant: Occupant) -> bool {
        self.occupants.contains(&occupant)
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    wrap_row: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, wrap_row: usize) -> Self {
        Self { width, height, wrap_row, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wrap_row(&self) -> usize {
        self.wrap_row
    }

    /// The two mutually adjacent cells of the wrap row, left end first.
    pub fn wrap_ends(&self) -> (Pos, Pos) {
        let y = self.wrap_row as i32;
        (Pos { y, x: 0 }, Pos { y, x: self.width as i32 - 1 })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.cells[self.index(pos)])
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&mut self.cells[idx])
    }

    pub fn set_blocked(&mut self, pos: Pos, blocked: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.blocked = blocked;
            if blocked && cell.raw.is_empty() {
                cell.raw = BLOCKED_TOKEN.to_string();
            }
        }
    }

    /// In bounds and not a wall. Hostiles and hazards are not considered here.
    pub fn is_enterable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.blocked)
    }

    /// Where a move in `dir` from `pos` lands, wrap edges included.
    ///
    /// The result may be out of bounds; callers check with [`Grid::is_enterable`].
    pub fn step(&self, pos: Pos, dir: Direction) -> Pos {
        let (left_end, right_end) = self.wrap_ends();
        match dir {
            Direction::Left if pos == left_end => right_end,
            Direction::Right if pos == right_end => left_end,
            _ => {
                let (dx, dy) = dir.delta();
                Pos { y: pos.y + dy, x: pos.x + dx }
            }
        }
    }

    /// Adjacent positions in up, down, left, right order, wrap edges applied.
    pub fn neighbors(&self, pos: Pos) -> [(Direction, Pos); 4] {
        Direction::MOVES.map(|dir| (dir, self.step(pos, dir)))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

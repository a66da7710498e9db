use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Pass,
}

impl Direction {
    /// The four movement directions, in the order the grid expands neighbors.
    pub const MOVES: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Plain `(dx, dy)` offset. Wrap transitions belong to [`crate::Grid::step`].
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Pass => (0, 0),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Pass => "pass",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single snapshot token says is standing on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    SelfAgent,
    Opponent,
    HostileSpawn,
    Hostile,
    BombPickup,
    TickingBomb { ticks: Option<u8> },
    Collectible,
}

/// A collectible and the desirability score it was given this tick.
///
/// Identity is the position alone; two collectibles with different scores on
/// the same cell compare equal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Pos,
    pub score: i32,
}

impl PartialEq for Collectible {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Collectible {}

impl Hash for Collectible {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

/// How the contested-target arbitration ended for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contest {
    /// Self and opponent picked different targets (or there is no opponent).
    Uncontested,
    /// Both picked the same collectible and self keeps it.
    Held,
    /// Both picked the same collectible, self was farther and retargeted.
    Yielded { forbidden: Pos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub direction: Direction,
    pub target: Pos,
    /// `false` when the target is the configured fallback cell.
    pub target_is_collectible: bool,
    pub contest: Contest,
}

//! Snapshot token classification.
//!
//! A snapshot is `width * height` comma-separated cell descriptors in
//! row-major order; each descriptor is a `;`-separated list of tokens:
//!
//! | token | meaning |
//! |---|---|
//! | `.` | empty |
//! | `x` | wall |
//! | `P<id>` | player |
//! | `e` | hostile spawn point |
//! | `E<type>` | hostile (type ignored) |
//! | `B` | bomb lying on the floor, collectible |
//! | `B<n>` | bomb ticking, `n` rounds left |
//! | `C` | collectible |
//!
//! Unrecognized prefixes are ignored.

use crate::error::SnapshotError;
use crate::types::Pos;

pub const CELL_SEPARATOR: char = ',';
pub const TOKEN_SEPARATOR: char = ';';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellToken {
    Empty,
    Blocked,
    Player(u32),
    Spawn,
    Hostile,
    BombPickup,
    TickingBomb { ticks: Option<u8> },
    Collectible,
    Unrecognized,
}

pub fn parse_token(token: &str, pos: Pos) -> Result<CellToken, SnapshotError> {
    let mut chars = token.chars();
    let Some(prefix) = chars.next() else {
        return Err(SnapshotError::EmptyToken { pos });
    };
    let rest = chars.as_str();
    let parsed = match prefix {
        '.' => CellToken::Empty,
        'x' => CellToken::Blocked,
        'P' => match rest.parse::<u32>() {
            Ok(id) => CellToken::Player(id),
            Err(_) => {
                return Err(SnapshotError::InvalidPlayerToken { pos, token: token.to_string() });
            }
        },
        'e' => CellToken::Spawn,
        'E' => CellToken::Hostile,
        'B' if rest.is_empty() => CellToken::BombPickup,
        'B' => CellToken::TickingBomb { ticks: rest.parse().ok() },
        'C' => CellToken::Collectible,
        _ => CellToken::Unrecognized,
    };
    Ok(parsed)
}

/// Splits a snapshot into its cell descriptors, checking the cell count first.
pub fn split_cells(serialized: &str, expected: usize) -> Result<Vec<&str>, SnapshotError> {
    let cells: Vec<&str> = serialized.trim().split(CELL_SEPARATOR).collect();
    if cells.len() != expected {
        return Err(SnapshotError::CellCount { expected, actual: cells.len() });
    }
    Ok(cells)
}

pub fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(TOKEN_SEPARATOR)
}

/// Row-major position of the `index`-th descriptor.
pub fn cell_position(index: usize, width: usize) -> Pos {
    Pos { y: (index / width) as i32, x: (index % width) as i32 }
}

//! Shared test fixtures for the `engine` submodule test suites.
//! This module exists to avoid repeating grid and snapshot setup across many tests.
//! It does not own production decision logic.

use super::*;

pub(super) const SELF_ID: u32 = 0;
pub(super) const OPPONENT_ID: u32 = 1;

/// Wall-free grid whose wrap row is the middle row.
pub(super) fn open_grid(width: usize, height: usize) -> Grid {
    Grid::new(width, height, height / 2)
}

/// Row-major snapshot text with `.` everywhere except the listed tokens.
/// Several tokens on one cell are joined with `;`.
pub(super) fn snapshot_string(width: usize, height: usize, tokens: &[(Pos, &str)]) -> String {
    let mut cells = vec![String::from("."); width * height];
    for &(pos, token) in tokens {
        let cell = &mut cells[(pos.y as usize) * width + (pos.x as usize)];
        if cell.as_str() == "." {
            *cell = token.to_string();
        } else {
            cell.push(';');
            cell.push_str(token);
        }
    }
    cells.join(",")
}

pub(super) fn configured_engine(width: usize, height: usize) -> Engine {
    Engine::with_config(MatchConfig::new(width, height, SELF_ID, OPPONENT_ID))
        .expect("fixture config is valid")
}

pub(super) fn engine_with(width: usize, height: usize, tokens: &[(Pos, &str)]) -> Engine {
    let mut engine = configured_engine(width, height);
    engine
        .ingest_snapshot(&snapshot_string(width, height, tokens))
        .expect("fixture snapshot is valid");
    engine
}

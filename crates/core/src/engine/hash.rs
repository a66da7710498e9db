//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from decision code.
//! It does not own replay execution or match-log persistence.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Engine {
    /// Hash of the parsed tick state. Equal snapshots ingested in the same
    /// round order hash equal.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.rounds_ingested);
        hasher.write_u8(u8::from(self.snapshot_ready));
        write_optional_pos(&mut hasher, self.state.self_pos);
        write_optional_pos(&mut hasher, self.state.opponent_pos);
        for positions in [
            &self.state.hostiles,
            &self.state.prev_hostiles,
            &self.state.spawn_points,
            &self.state.collectibles,
            &self.state.bomb_pickups,
            &self.state.ticking_bombs,
        ] {
            hasher.write_usize(positions.len());
            for pos in positions {
                write_pos(&mut hasher, *pos);
            }
        }
        if let Some(grid) = &self.grid {
            for pos in grid.positions().filter(|pos| !grid.is_enterable(*pos)) {
                write_pos(&mut hasher, pos);
            }
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}

fn write_optional_pos(hasher: &mut Xxh3, pos: Option<Pos>) {
    match pos {
        Some(pos) => {
            hasher.write_u8(1);
            write_pos(hasher, pos);
        }
        None => hasher.write_u8(0),
    }
}

//! Table seating
//!
//! Shuffles the session roster and deals it into 4-seat tables. The shuffle
//! is Fisher–Yates via `rand`; callers supply the RNG so seeded assignments
//! stay reproducible.

use crate::types::{Player, TABLE_SIZE};
use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One table of seated players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table number, starting at 1
    pub number: usize,

    /// Players in seat order (only the last table may hold fewer than four)
    pub seats: Vec<Player>,
}

impl Table {
    /// Open seats left at this table
    pub fn open_seats(&self) -> usize {
        TABLE_SIZE.saturating_sub(self.seats.len())
    }
}

/// Shuffle the roster and deal it into tables of four
///
/// Produces `ceil(n / 4)` tables filled in shuffled order. Fewer than four
/// players total is an error — a session needs at least one full table.
pub fn assign_tables<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Result<Vec<Table>> {
    if players.len() < TABLE_SIZE {
        return Err(Error::NotEnoughPlayers {
            have: players.len(),
            need: TABLE_SIZE,
        });
    }

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    Ok(shuffled
        .chunks(TABLE_SIZE)
        .enumerate()
        .map(|(i, chunk)| Table {
            number: i + 1,
            seats: chunk.to_vec(),
        })
        .collect())
}

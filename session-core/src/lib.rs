//! Session domain core
//!
//! Foundational types for the settlement and scoring engine: participant
//! identity, session balances, transfers, and leaderboard deltas, plus the
//! session-side helpers (scoresheet parsing and table seating) that feed
//! them.
//!
//! # Invariants
//!
//! - Amounts are whole signed integers; positive = should receive,
//!   negative = owes
//! - Nothing in this crate performs I/O or mutates caller data
//! - Every result is deterministic for identical inputs (seating takes its
//!   RNG from the caller)

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod error;
pub mod parse;
pub mod seating;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use parse::{parse_score_line, parse_scoresheet};
pub use seating::{assign_tables, Table};
pub use types::{
    BalanceEntry, ParsedLine, ParticipantId, ParticipantMeta, Player, PointsDelta,
    ReconciliationResult, ScoreTag, Transfer, ADJUSTMENT_ID, TABLE_SIZE,
};

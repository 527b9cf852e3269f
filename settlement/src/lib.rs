//! Settlement and scoring engine
//!
//! The numeric core of a score-keeping service: repairs scoresheets whose
//! balances fail to sum to zero, computes the minimum-cardinality transfer
//! list that clears them, and converts balances into leaderboard point
//! deltas.
//!
//! # Architecture
//!
//! The finalize pipeline runs three stages over one session's balances:
//!
//! 1. **Reconcile** ([`reconcile`]): proportional repair of non-zero-sum
//!    scoresheets via largest-remainder allocation
//! 2. **Net** ([`netting`]): exact zero-sum partition for up to 16
//!    participants, greedy two-pointer matching beyond that
//! 3. **Score** ([`scoring`]): rank- and tie-sensitive leaderboard deltas,
//!    always computed from the reconciled balances
//!
//! Every stage is a synchronous pure function: no I/O, no shared state,
//! fresh values out. [`SettlementEngine`] wires the stages together under a
//! validated [`Config`] and stamps an auditable report.
//!
//! # Example
//!
//! ```
//! use session_core::{BalanceEntry, ParticipantMeta};
//! use settlement::{Config, SettlementEngine};
//!
//! let engine = SettlementEngine::new(Config::default())?;
//!
//! let entries = vec![
//!     BalanceEntry::new("p1", "@alice", 12),
//!     BalanceEntry::new("p2", "@bob", -4),
//!     BalanceEntry::new("p3", "@carol", -6),
//! ];
//!
//! let report = engine.settle_session(&entries, |_| ParticipantMeta::default());
//! assert!(report.reconciliation.is_balanced());
//! assert_eq!(report.stats.transfer_count, report.transfers.len());
//! # Ok::<(), settlement::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod allocation;
pub mod config;
pub mod decay;
pub mod engine;
pub mod error;
pub mod netting;
pub mod reconcile;
pub mod scoring;

// Re-exports
pub use allocation::{allocate_proportional, Allocation, WeightedItem};
pub use config::{Config, NettingConfig};
pub use decay::{
    compute_inactivity_decay, DecayPolicy, DecayReport, DecayWarning, DecayedRow, LeaderboardRow,
};
pub use engine::{SessionSettlement, SettlementEngine, SettlementStats};
pub use error::{Error, Result};
pub use netting::{
    compute_settlement_min_transfers, compute_settlement_min_transfers_with_limit,
    MAX_OPTIMAL_PARTICIPANTS,
};
pub use reconcile::auto_balance_to_zero;
pub use scoring::compute_session_points;

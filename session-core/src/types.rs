//! Core types for session settlement
//!
//! All types are designed for:
//! - Exact arithmetic (whole signed integers for amounts)
//! - Deterministic processing (stable ordering everywhere)
//! - serde serialization at the audit/report boundary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seats at one table
pub const TABLE_SIZE: usize = 4;

/// Reserved id of the synthetic adjustment participant the settlement solver
/// injects when balances fail to sum to zero
pub const ADJUSTMENT_ID: &str = "__adj__";

/// Participant identifier (chat user id, or a reserved synthetic id)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create new participant ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the solver's synthetic adjustment participant
    pub fn is_adjustment(&self) -> bool {
        self.0 == ADJUSTMENT_ID
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directory metadata for a participant
///
/// Owned by the external player directory; the engine only reads it to label
/// leaderboard deltas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMeta {
    /// Username without the leading `@`
    pub username: Option<String>,

    /// Free-form display name
    pub display_name: Option<String>,
}

impl ParticipantMeta {
    /// Display label: `@username` if known, else the display name, else `"Unknown"`
    pub fn label(&self) -> String {
        match (&self.username, &self.display_name) {
            (Some(username), _) => format!("@{username}"),
            (None, Some(display_name)) => display_name.clone(),
            (None, None) => "Unknown".to_string(),
        }
    }
}

/// A session roster member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Participant ID
    pub id: ParticipantId,

    /// Directory metadata
    pub meta: ParticipantMeta,
}

impl Player {
    /// Create new player
    pub fn new(id: impl Into<String>, meta: ParticipantMeta) -> Self {
        Self {
            id: ParticipantId::new(id),
            meta,
        }
    }

    /// Display label for rendering
    pub fn label(&self) -> String {
        self.meta.label()
    }
}

/// A participant's signed net session result
///
/// Positive = should receive, negative = owes. Ids are unique within one
/// run; entries are constructed fresh per session and never mutated by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Participant ID (or a reserved synthetic id)
    pub id: ParticipantId,

    /// Display label (resolved `@username` or display name)
    pub name: String,

    /// Net balance for the session
    pub balance: i64,
}

impl BalanceEntry {
    /// Create new balance entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: i64) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            balance,
        }
    }

    /// True if this entry is the solver's synthetic adjustment participant
    pub fn is_adjustment(&self) -> bool {
        self.id.is_adjustment()
    }
}

/// One payment instruction clearing part of a settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Payer display name
    pub from: String,

    /// Receiver display name
    pub to: String,

    /// Amount to pay (always positive)
    pub amount: i64,
}

/// Outcome of reconciling a scoresheet back to a zero sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Adjusted entries (fresh copies, input order preserved)
    pub adjusted: Vec<BalanceEntry>,

    /// Net sum before reconciliation
    pub net_before: i64,

    /// Amount actually redistributed (0 when reconciliation was impossible)
    pub applied_net: i64,

    /// Human-readable explanation when anything notable happened
    pub note: Option<String>,
}

impl ReconciliationResult {
    /// True when the adjusted entries sum to exactly zero
    pub fn is_balanced(&self) -> bool {
        self.adjusted.iter().map(|e| e.balance).sum::<i64>() == 0
    }
}

/// Audit tag attached to a leaderboard point delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTag {
    /// Participated in the session (no points by itself)
    Played,

    /// Held the single highest balance; carries the awarded bonus
    TopWinner(i64),

    /// Held the single lowest balance; carries the deducted penalty magnitude
    TopLoser(i64),
}

impl ScoreTag {
    /// Signed point contribution carried by this tag
    pub fn points(&self) -> i64 {
        match self {
            ScoreTag::Played => 0,
            ScoreTag::TopWinner(bonus) => *bonus,
            ScoreTag::TopLoser(penalty) => -penalty,
        }
    }
}

impl fmt::Display for ScoreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTag::Played => write!(f, "played(0)"),
            ScoreTag::TopWinner(bonus) => write!(f, "topWinner(+{bonus})"),
            ScoreTag::TopLoser(penalty) => write!(f, "topLoser(-{penalty})"),
        }
    }
}

/// One participant's leaderboard update for a finalized session
///
/// Zero-delta entries are retained so every participant receives a
/// leaderboard touch; the external store applies `delta_points` additively
/// with one audit log line per non-zero delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsDelta {
    /// Participant ID
    pub id: ParticipantId,

    /// Username, if the player directory knows one
    pub username: Option<String>,

    /// Display name, if the player directory knows one
    pub display_name: Option<String>,

    /// Signed point change to apply additively
    pub delta_points: i64,

    /// Audit trail of how the delta was earned
    pub reasons: Vec<ScoreTag>,
}

impl PointsDelta {
    /// Render the audit trail, e.g. `played(0),topWinner(+2)`
    pub fn reason_trail(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One parsed scoresheet line: a username and its reported net delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Username as written, leading `@` stripped
    pub username: String,

    /// Reported signed delta
    pub delta: i64,
}

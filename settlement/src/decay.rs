//! Inactivity decay
//!
//! Periodic activity check over leaderboard rows: players inactive past the
//! decay threshold lose a point, players approaching it get a countdown
//! warning. The computation is pure; the caller applies the deltas, resets
//! inactivity timers, and delivers the warnings.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use session_core::{ParticipantId, ParticipantMeta};

/// Inactivity decay policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayPolicy {
    /// Days of inactivity after which points decay (default: 30)
    pub decay_after_days: i64,

    /// Days of inactivity after which a warning fires (default: 23,
    /// one week before decay)
    pub warn_after_days: i64,

    /// Points deducted per decay (default: 1)
    pub decay_points: i64,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            decay_after_days: 30,
            warn_after_days: 23,
            decay_points: 1,
        }
    }
}

/// One leaderboard row as stored by the external leaderboard store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Participant ID
    pub id: ParticipantId,

    /// Directory metadata
    pub meta: ParticipantMeta,

    /// Current points
    pub points: i64,

    /// Last session activity
    pub last_active: DateTime<Utc>,
}

/// One row that decayed this check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayedRow {
    /// Participant ID
    pub id: ParticipantId,

    /// Display label for the report
    pub label: String,

    /// Signed point change to apply (negative)
    pub delta_points: i64,
}

/// One row inside the warning window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayWarning {
    /// Participant ID
    pub id: ParticipantId,

    /// Display label for the report
    pub label: String,

    /// Whole days left before decay (rounded up, at least 1)
    pub days_left: i64,
}

/// Outcome of one activity check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayReport {
    /// Rows that decayed
    pub decayed: Vec<DecayedRow>,

    /// Rows in the warning window
    pub warnings: Vec<DecayWarning>,
}

impl DecayReport {
    /// True when nothing decayed and nobody is in danger
    pub fn is_empty(&self) -> bool {
        self.decayed.is_empty() && self.warnings.is_empty()
    }
}

/// Run the activity check over `rows` at time `now`
///
/// Rows inactive for at least `decay_after_days` decay by `decay_points`;
/// rows inactive for at least `warn_after_days` (but less than the decay
/// threshold) get a warning with the whole days left, rounded up. Output
/// order matches input order.
pub fn compute_inactivity_decay(
    rows: &[LeaderboardRow],
    now: DateTime<Utc>,
    policy: &DecayPolicy,
) -> DecayReport {
    const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

    let mut report = DecayReport::default();

    for row in rows {
        let inactive = now - row.last_active;

        if inactive >= Duration::days(policy.decay_after_days) {
            report.decayed.push(DecayedRow {
                id: row.id.clone(),
                label: row.meta.label(),
                delta_points: -policy.decay_points,
            });
        } else if inactive >= Duration::days(policy.warn_after_days) {
            let remaining = Duration::days(policy.decay_after_days) - inactive;
            let days_left =
                (remaining.num_seconds() + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
            report.warnings.push(DecayWarning {
                id: row.id.clone(),
                label: row.meta.label(),
                days_left,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(id: &str, username: &str, days_inactive: i64, now: DateTime<Utc>) -> LeaderboardRow {
        LeaderboardRow {
            id: ParticipantId::new(id),
            meta: ParticipantMeta {
                username: Some(username.to_string()),
                display_name: None,
            },
            points: 10,
            last_active: now - Duration::days(days_inactive),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_decays_only_past_threshold() {
        let now = now();
        let rows = vec![
            row("p0", "fresh", 2, now),
            row("p1", "stale", 30, now),
            row("p2", "staler", 45, now),
        ];

        let report = compute_inactivity_decay(&rows, now, &DecayPolicy::default());

        assert_eq!(report.decayed.len(), 2);
        assert_eq!(report.decayed[0].label, "@stale");
        assert_eq!(report.decayed[0].delta_points, -1);
        assert_eq!(report.decayed[1].label, "@staler");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_warning_window_counts_whole_days() {
        let now = now();
        let policy = DecayPolicy::default();

        // 23 days inactive: 7 whole days left.
        let report = compute_inactivity_decay(&[row("p0", "edge", 23, now)], now, &policy);
        assert_eq!(report.decayed.len(), 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].days_left, 7);

        // 29 days and change: partial day rounds up to 1.
        let mut almost = row("p1", "almost", 29, now);
        almost.last_active -= Duration::hours(12);
        let report = compute_inactivity_decay(&[almost], now, &policy);
        assert_eq!(report.warnings[0].days_left, 1);
    }

    #[test]
    fn test_active_rows_produce_empty_report() {
        let now = now();
        let rows = vec![row("p0", "a", 0, now), row("p1", "b", 22, now)];

        let report = compute_inactivity_decay(&rows, now, &DecayPolicy::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_custom_policy() {
        let now = now();
        let policy = DecayPolicy {
            decay_after_days: 10,
            warn_after_days: 7,
            decay_points: 2,
        };

        let report = compute_inactivity_decay(
            &[row("p0", "a", 11, now), row("p1", "b", 8, now)],
            now,
            &policy,
        );

        assert_eq!(report.decayed.len(), 1);
        assert_eq!(report.decayed[0].delta_points, -2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].days_left, 2);
    }
}

//! Ranked leaderboard scoring
//!
//! Converts finalized session balances into leaderboard point deltas. Every
//! participant gets a delta (zero-delta entries included, so everyone
//! receives a leaderboard touch); only the single top and single bottom
//! balance rank earn points, scaled by table count:
//!
//! ```text
//! table_count = max(1, participants / 4)
//! top winner(s):  +table_count   (ties share the full bonus, uncapped)
//! top loser(s):   -table_count
//! everyone else:   0
//! ```
//!
//! Each delta carries an audit trail of tags, rendered like
//! `played(0),topWinner(+2)`.

use session_core::{BalanceEntry, ParticipantId, ParticipantMeta, PointsDelta, ScoreTag, TABLE_SIZE};

/// Compute leaderboard point deltas from session balances
///
/// `resolve_meta` maps ids to directory metadata (username/display name);
/// the resolved fields are carried on each delta for the audit log. Callers
/// settle reconciled balances, never raw submissions. Output order matches
/// input order.
pub fn compute_session_points<F>(entries: &[BalanceEntry], resolve_meta: F) -> Vec<PointsDelta>
where
    F: Fn(&ParticipantId) -> ParticipantMeta,
{
    let table_count = (entries.len() / TABLE_SIZE).max(1) as i64;

    let mut deltas: Vec<PointsDelta> = entries
        .iter()
        .map(|entry| {
            let meta = resolve_meta(&entry.id);
            PointsDelta {
                id: entry.id.clone(),
                username: meta.username,
                display_name: meta.display_name,
                delta_points: 0,
                reasons: vec![ScoreTag::Played],
            }
        })
        .collect();

    let top = entries.iter().map(|e| e.balance).filter(|&b| b > 0).max();
    if let Some(top) = top {
        for (entry, delta) in entries.iter().zip(deltas.iter_mut()) {
            if entry.balance == top {
                delta.delta_points += table_count;
                delta.reasons.push(ScoreTag::TopWinner(table_count));
            }
        }
    }

    let bottom = entries.iter().map(|e| e.balance).filter(|&b| b < 0).min();
    if let Some(bottom) = bottom {
        for (entry, delta) in entries.iter().zip(deltas.iter_mut()) {
            if entry.balance == bottom {
                delta.delta_points -= table_count;
                delta.reasons.push(ScoreTag::TopLoser(table_count));
            }
        }
    }

    deltas
}

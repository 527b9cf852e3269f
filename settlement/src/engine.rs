//! Main settlement engine
//!
//! Orchestrates reconciliation, netting, and scoring for one finalized
//! session and assembles the auditable settlement report.

use crate::{
    config::Config,
    netting::compute_settlement_min_transfers_with_limit,
    reconcile::auto_balance_to_zero,
    scoring::compute_session_points,
    Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use session_core::{
    BalanceEntry, ParticipantId, ParticipantMeta, PointsDelta, ReconciliationResult, Transfer,
};
use uuid::Uuid;

/// Settlement engine
///
/// Holds a validated configuration; every call computes a fresh report from
/// scratch, so one engine serves any number of concurrent sessions.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Configuration
    config: Config,
}

/// Full settlement report for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettlement {
    /// Report ID
    pub report_id: Uuid,

    /// Report creation time
    pub created_at: DateTime<Utc>,

    /// Reconciliation outcome (adjusted balances, applied net, note)
    pub reconciliation: ReconciliationResult,

    /// Pairwise transfers clearing the reconciled balances
    pub transfers: Vec<Transfer>,

    /// Leaderboard point deltas, computed from the reconciled balances
    pub points: Vec<PointsDelta>,

    /// Summary statistics
    pub stats: SettlementStats,
}

/// Settlement statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStats {
    /// Participants in the session
    pub participant_count: usize,

    /// Participants with a non-zero reconciled balance
    pub active_count: usize,

    /// Transfers emitted
    pub transfer_count: usize,

    /// Total reconciled debt (sum of debtor magnitudes)
    pub total_debt: i64,

    /// Total volume moved by the transfers
    pub settled_volume: i64,

    /// Net amount redistributed by reconciliation
    pub applied_net: i64,

    /// True when the solver injected a synthetic adjustment participant
    pub adjustment_used: bool,
}

impl SettlementEngine {
    /// Create new settlement engine with a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settle one finalized session
    ///
    /// Pipeline: reconcile the submitted balances to a zero sum, compute the
    /// minimal transfer set, and score leaderboard deltas. Netting and
    /// scoring always read the reconciled balances, never the raw
    /// submissions.
    pub fn settle_session<F>(
        &self,
        entries: &[BalanceEntry],
        resolve_meta: F,
    ) -> SessionSettlement
    where
        F: Fn(&ParticipantId) -> ParticipantMeta,
    {
        tracing::info!(participants = entries.len(), "starting session settlement");

        let reconciliation = auto_balance_to_zero(entries);
        if let Some(note) = &reconciliation.note {
            tracing::info!(
                net_before = reconciliation.net_before,
                applied_net = reconciliation.applied_net,
                note = %note,
                "scoresheet reconciled"
            );
        }

        let transfers = compute_settlement_min_transfers_with_limit(
            &reconciliation.adjusted,
            self.config.netting.optimal_partition_limit,
        );

        let points = compute_session_points(&reconciliation.adjusted, resolve_meta);

        let stats = Self::build_stats(&reconciliation, &transfers);
        if stats.adjustment_used {
            tracing::warn!(
                net = reconciliation.net_before - reconciliation.applied_net,
                "settlement required a synthetic adjustment participant"
            );
        }

        tracing::info!(
            transfers = stats.transfer_count,
            settled_volume = stats.settled_volume,
            "session settlement complete"
        );

        SessionSettlement {
            report_id: Uuid::new_v4(),
            created_at: Utc::now(),
            reconciliation,
            transfers,
            points,
            stats,
        }
    }

    fn build_stats(
        reconciliation: &ReconciliationResult,
        transfers: &[Transfer],
    ) -> SettlementStats {
        let reconciled_sum: i64 = reconciliation.adjusted.iter().map(|e| e.balance).sum();

        SettlementStats {
            participant_count: reconciliation.adjusted.len(),
            active_count: reconciliation
                .adjusted
                .iter()
                .filter(|e| e.balance != 0)
                .count(),
            transfer_count: transfers.len(),
            total_debt: reconciliation
                .adjusted
                .iter()
                .filter(|e| e.balance < 0)
                .map(|e| -e.balance)
                .sum(),
            settled_volume: transfers.iter().map(|t| t.amount).sum(),
            applied_net: reconciliation.applied_net,
            adjustment_used: reconciled_sum != 0,
        }
    }
}

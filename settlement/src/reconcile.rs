//! Balance reconciliation
//!
//! A scoresheet whose deltas fail to sum to zero is a recording mistake, not
//! a reason to reject the session. Reconciliation pushes the discrepancy
//! onto the opposite-sign group, proportional to each member's stake, so the
//! corrected sheet sums to exactly zero:
//!
//! - surplus (`net > 0`): a loss was under-reported, so each loser's debt
//!   grows by their proportional share of the surplus
//! - shortfall (`net < 0`): a win was under-reported, so each winner's
//!   credit grows by their proportional share of the shortfall
//!
//! When the opposite-sign group is empty there is nobody to absorb the
//! discrepancy; the entries come back unchanged with an explanatory note and
//! the caller decides whether to proceed unbalanced.

use crate::allocation::{allocate_proportional, WeightedItem};
use session_core::{BalanceEntry, ReconciliationResult};

/// Repair a scoresheet so its balances sum to exactly zero
///
/// Returns fresh entries in input order; the input is never mutated. On
/// success `applied_net == |net_before|` and the adjusted balances sum to
/// zero; when redistribution is impossible the entries are unchanged,
/// `applied_net == 0`, and `note` explains why.
pub fn auto_balance_to_zero(entries: &[BalanceEntry]) -> ReconciliationResult {
    let net_before: i64 = entries.iter().map(|e| e.balance).sum();

    if net_before == 0 {
        return ReconciliationResult {
            adjusted: entries.to_vec(),
            net_before,
            applied_net: 0,
            note: None,
        };
    }

    let mut adjusted = entries.to_vec();

    if net_before > 0 {
        // Surplus: weight the losers by debt magnitude.
        let losers: Vec<usize> = (0..adjusted.len())
            .filter(|&i| adjusted[i].balance < 0)
            .collect();
        let weighted: Vec<WeightedItem> = losers
            .iter()
            .map(|&i| WeightedItem {
                id: adjusted[i].id.clone(),
                weight: -adjusted[i].balance,
            })
            .collect();

        if weighted.is_empty() {
            return ReconciliationResult {
                adjusted,
                net_before,
                applied_net: 0,
                note: Some(format!(
                    "Net is +{net_before} but there are no losers to absorb extra."
                )),
            };
        }

        tracing::debug!(net_before, losers = weighted.len(), "distributing surplus to losers");

        let alloc = allocate_proportional(net_before, &weighted);
        for (&i, share) in losers.iter().zip(&alloc) {
            adjusted[i].balance -= share.amount;
        }

        debug_assert_eq!(adjusted.iter().map(|e| e.balance).sum::<i64>(), 0);

        ReconciliationResult {
            adjusted,
            net_before,
            applied_net: net_before,
            note: Some(format!(
                "Auto-balanced +{net_before} extra by distributing to losers proportionally."
            )),
        }
    } else {
        // Shortfall: weight the winners by credit.
        let missing = -net_before;
        let winners: Vec<usize> = (0..adjusted.len())
            .filter(|&i| adjusted[i].balance > 0)
            .collect();
        let weighted: Vec<WeightedItem> = winners
            .iter()
            .map(|&i| WeightedItem {
                id: adjusted[i].id.clone(),
                weight: adjusted[i].balance,
            })
            .collect();

        if weighted.is_empty() {
            return ReconciliationResult {
                adjusted,
                net_before,
                applied_net: 0,
                note: Some(format!(
                    "Net is {net_before} but there are no winners to deduct from."
                )),
            };
        }

        tracing::debug!(net_before, winners = weighted.len(), "distributing shortfall to winners");

        let alloc = allocate_proportional(missing, &weighted);
        for (&i, share) in winners.iter().zip(&alloc) {
            adjusted[i].balance += share.amount;
        }

        debug_assert_eq!(adjusted.iter().map(|e| e.balance).sum::<i64>(), 0);

        ReconciliationResult {
            adjusted,
            net_before,
            applied_net: missing,
            note: Some(format!(
                "Auto-balanced {net_before} missing by crediting winners proportionally."
            )),
        }
    }
}

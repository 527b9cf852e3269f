//! Minimum-transfer settlement
//!
//! Given zero-sum session balances, emits the smallest set of pairwise
//! payments that clears everyone.
//!
//! # Algorithm
//!
//! A zero-sum group of k participants settles in exactly k−1 transfers and
//! transfers never need to cross group boundaries, so the minimum transfer
//! count is n minus the maximum number of disjoint zero-sum groups the
//! balances split into. For small sessions that maximum is found exactly by
//! a subset-sum DP over all `2^n` masks; larger sessions fall back to greedy
//! debtor/creditor matching.
//!
//! # Example
//!
//! ```text
//! balances: [+10, -10, +5, -5]
//! zero-sum groups: {+10, -10} and {+5, -5}
//! transfers: 2 (greedy matching inside one 4-person group would also
//!            find 2 here, but can need 3 on inputs like [+6, -4, -2, +5, -5])
//! ```

use session_core::{BalanceEntry, Transfer, ADJUSTMENT_ID};

/// Participant cutoff for the exact partition DP
///
/// The DP is exponential in the participant count; 16 caps it at 65536
/// subset evaluations. Above the cutoff the solver uses greedy matching.
pub const MAX_OPTIMAL_PARTICIPANTS: usize = 16;

/// Compute the minimal set of pairwise transfers clearing `entries`
///
/// Zero balances are dropped. A non-zero total (reconciliation skipped or
/// impossible) injects a synthetic adjustment participant so the solver
/// always sees an exactly zero-sum set; its transfers surface in the output
/// as a data-quality signal. Every per-payer transfer sum equals the
/// original debt and every per-payee sum equals the original credit.
pub fn compute_settlement_min_transfers(entries: &[BalanceEntry]) -> Vec<Transfer> {
    compute_settlement_min_transfers_with_limit(entries, MAX_OPTIMAL_PARTICIPANTS)
}

/// Same as [`compute_settlement_min_transfers`] with a caller-chosen
/// partition cutoff
///
/// The cutoff only moves downward: values above
/// [`MAX_OPTIMAL_PARTICIPANTS`] are clamped so the DP stays bounded.
pub fn compute_settlement_min_transfers_with_limit(
    entries: &[BalanceEntry],
    optimal_limit: usize,
) -> Vec<Transfer> {
    let mut nonzero: Vec<BalanceEntry> =
        entries.iter().filter(|e| e.balance != 0).cloned().collect();

    if nonzero.is_empty() {
        return Vec::new();
    }

    let total: i64 = nonzero.iter().map(|e| e.balance).sum();
    if total != 0 {
        // Unbalanced input: a loss (total > 0) or a win (total < 0) is
        // missing from the sheet. Stand in for it so settlement still
        // clears every supplied balance.
        let name = if total > 0 {
            "ADJUSTMENT (missing loser)"
        } else {
            "ADJUSTMENT (missing winner)"
        };
        tracing::debug!(total, "injecting synthetic adjustment participant");
        nonzero.push(BalanceEntry::new(ADJUSTMENT_ID, name, -total));
    }

    if nonzero.len() <= optimal_limit.min(MAX_OPTIMAL_PARTICIPANTS) {
        settle_optimal(&nonzero)
    } else {
        tracing::debug!(participants = nonzero.len(), "falling back to greedy settlement");
        settle_greedy(&nonzero)
    }
}

/// Greedy settlement: repeatedly pay `min(debt, credit)` between the current
/// largest debtor and largest creditor
///
/// Exact and O(n log n); optimal within a zero-sum group (k−1 transfers),
/// not guaranteed minimal across groups.
fn settle_greedy(entries: &[BalanceEntry]) -> Vec<Transfer> {
    let mut debtors: Vec<(&str, i64)> = entries
        .iter()
        .filter(|e| e.balance < 0)
        .map(|e| (e.name.as_str(), -e.balance))
        .collect();
    let mut creditors: Vec<(&str, i64)> = entries
        .iter()
        .filter(|e| e.balance > 0)
        .map(|e| (e.name.as_str(), e.balance))
        .collect();

    // Stable sorts keep input order among equal magnitudes, so output is
    // deterministic for identical inputs.
    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);
        if amount > 0 {
            transfers.push(Transfer {
                from: debtors[i].0.to_string(),
                to: creditors[j].0.to_string(),
                amount,
            });
            debtors[i].1 -= amount;
            creditors[j].1 -= amount;
        }
        if debtors[i].1 == 0 {
            i += 1;
        }
        if creditors[j].1 == 0 {
            j += 1;
        }
    }

    transfers
}

/// Optimal settlement for small groups
///
/// 1. Partition into the maximum number of disjoint zero-sum subsets (DP).
/// 2. Settle each subset greedily (k−1 transfers, optimal within a group).
fn settle_optimal(entries: &[BalanceEntry]) -> Vec<Transfer> {
    let m = entries.len();
    let balances: Vec<i64> = entries.iter().map(|e| e.balance).collect();
    let all_mask: usize = (1 << m) - 1;

    // sum[mask] built one bit at a time.
    let mut sum = vec![0i64; 1 << m];
    for mask in 1..=all_mask {
        let lsb = mask & mask.wrapping_neg();
        sum[mask] = sum[mask ^ lsb] + balances[lsb.trailing_zeros() as usize];
    }

    // dp[mask] = max disjoint zero-sum groups extractable from mask.
    // Either the lowest bit joins no group (inherit), or some zero-sum
    // submask containing it forms one; restricting submasks to those holding
    // the lowest bit avoids counting the same split twice.
    let mut dp = vec![0u32; 1 << m];
    let mut choice = vec![0usize; 1 << m];
    for mask in 1..=all_mask {
        let lsb = mask & mask.wrapping_neg();
        dp[mask] = dp[mask ^ lsb];

        let mut sub = mask;
        while sub != 0 {
            if sub & lsb != 0 && sum[sub] == 0 {
                let candidate = dp[mask ^ sub] + 1;
                if candidate > dp[mask] {
                    dp[mask] = candidate;
                    choice[mask] = sub;
                }
            }
            sub = (sub - 1) & mask;
        }
    }

    // Walk the back-pointers to recover the chosen groups.
    let mut groups: Vec<usize> = Vec::new();
    let mut current = all_mask;
    while current != 0 {
        let sub = choice[current];
        if sub != 0 {
            groups.push(sub);
            current ^= sub;
        } else {
            current ^= current & current.wrapping_neg();
        }
    }

    // Bits in no group only occur when the input wasn't zero-sum; settle
    // them together so every supplied balance still clears.
    let grouped: usize = groups.iter().fold(0, |acc, g| acc | g);
    let leftover = all_mask ^ grouped;
    if leftover != 0 {
        groups.push(leftover);
    }

    tracing::debug!(
        participants = m,
        groups = groups.len(),
        "settling within zero-sum groups"
    );

    let mut transfers = Vec::new();
    for group in &groups {
        let members: Vec<BalanceEntry> = (0..m)
            .filter(|i| group & (1 << i) != 0)
            .map(|i| entries[i].clone())
            .collect();
        transfers.extend(settle_greedy(&members));
    }

    transfers
}

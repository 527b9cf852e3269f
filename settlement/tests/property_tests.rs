//! Property-based tests for settlement invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Allocation exactness: Σ(amounts) == total, each amount floor or floor+1
//! - Reconciliation: balanced output or explicit note, never silent drift
//! - Conservation: per-payer transfer sums equal debts, per-payee equal credits
//! - Optimality bound: partition settlement never emits more transfers than greedy

use proptest::prelude::*;
use session_core::{BalanceEntry, ParticipantId, ParticipantMeta, ScoreTag};
use settlement::{
    allocate_proportional, auto_balance_to_zero, compute_session_points,
    compute_settlement_min_transfers, compute_settlement_min_transfers_with_limit, Config,
    SettlementEngine, WeightedItem,
};
use std::collections::HashMap;

/// Strategy for generating positive weights
fn weights_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..=500, 1..10)
}

/// Strategy for generating arbitrary session balances
fn balances_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..=500, 1..12)
}

/// Strategy for generating zero-sum balances (last entry negates the rest)
fn zero_sum_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..=500, 1..12).prop_map(|mut balances| {
        let total: i64 = balances.iter().sum();
        balances.push(-total);
        balances
    })
}

fn entries(balances: &[i64]) -> Vec<BalanceEntry> {
    balances
        .iter()
        .enumerate()
        .map(|(i, &b)| BalanceEntry::new(format!("p{i}"), format!("@user{i}"), b))
        .collect()
}

fn resolve(id: &ParticipantId) -> ParticipantMeta {
    ParticipantMeta {
        username: Some(id.as_str().to_string()),
        display_name: None,
    }
}

/// Replay transfers onto the balances (plus the synthetic adjustment, when
/// the input was unbalanced) and require every participant to end at zero.
fn assert_clears(input: &[BalanceEntry], transfers: &[session_core::Transfer]) {
    let total: i64 = input.iter().map(|e| e.balance).sum();

    let mut remaining: HashMap<String, i64> = input
        .iter()
        .filter(|e| e.balance != 0)
        .map(|e| (e.name.clone(), e.balance))
        .collect();
    if total > 0 {
        remaining.insert("ADJUSTMENT (missing loser)".to_string(), -total);
    } else if total < 0 {
        remaining.insert("ADJUSTMENT (missing winner)".to_string(), -total);
    }

    for t in transfers {
        assert!(t.amount > 0, "non-positive transfer amount");
        assert_ne!(t.from, t.to, "self-transfer");
        *remaining.get_mut(&t.from).expect("unknown payer") += t.amount;
        *remaining.get_mut(&t.to).expect("unknown payee") -= t.amount;
    }

    for (name, balance) in remaining {
        assert_eq!(balance, 0, "{name} not cleared");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: allocations sum to the total exactly, and every amount is
    /// the floor or floor+1 of its exact rational share
    #[test]
    fn prop_allocation_exact(total in 0i64..50_000, weights in weights_strategy()) {
        let items: Vec<WeightedItem> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedItem::new(format!("p{i}"), w))
            .collect();

        let alloc = allocate_proportional(total, &items);
        prop_assert_eq!(alloc.len(), items.len());
        prop_assert_eq!(alloc.iter().map(|a| a.amount).sum::<i64>(), total);

        let total_weight: i128 = weights.iter().map(|&w| w as i128).sum();
        for (item, share) in items.iter().zip(&alloc) {
            let floor = (total as i128 * item.weight as i128 / total_weight) as i64;
            prop_assert!(
                share.amount == floor || share.amount == floor + 1,
                "amount {} outside [{}, {}]", share.amount, floor, floor + 1
            );
        }
    }

    /// Property: allocation is deterministic
    #[test]
    fn prop_allocation_deterministic(total in 0i64..10_000, weights in weights_strategy()) {
        let items: Vec<WeightedItem> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedItem::new(format!("p{i}"), w))
            .collect();

        prop_assert_eq!(
            allocate_proportional(total, &items),
            allocate_proportional(total, &items)
        );
    }

    /// Property: reconciliation either balances the sheet exactly or leaves
    /// it untouched with an explanatory note
    #[test]
    fn prop_reconciliation_balances_or_explains(balances in balances_strategy()) {
        let input = entries(&balances);
        let result = auto_balance_to_zero(&input);

        prop_assert_eq!(result.net_before, balances.iter().sum::<i64>());
        prop_assert_eq!(result.adjusted.len(), input.len());

        if result.applied_net > 0 {
            prop_assert!(result.is_balanced());
            prop_assert_eq!(result.applied_net, result.net_before.abs());
        } else {
            prop_assert_eq!(&result.adjusted, &input);
            if result.net_before != 0 {
                prop_assert!(result.note.is_some());
            }
        }
    }

    /// Property: a zero-sum sheet passes through reconciliation unchanged
    #[test]
    fn prop_reconciliation_idempotent_on_balanced(balances in zero_sum_strategy()) {
        let input = entries(&balances);
        let result = auto_balance_to_zero(&input);

        prop_assert_eq!(&result.adjusted, &input);
        prop_assert_eq!(result.applied_net, 0);
        prop_assert!(result.note.is_none());
    }

    /// Property: transfers conserve every balance — replaying them clears
    /// each payer's debt and each payee's credit exactly
    #[test]
    fn prop_settlement_conserves_balances(balances in balances_strategy()) {
        let input = entries(&balances);
        let transfers = compute_settlement_min_transfers(&input);
        assert_clears(&input, &transfers);
    }

    /// Property: a zero-sum set of n non-zero balances settles in at most
    /// n−1 transfers
    #[test]
    fn prop_zero_sum_transfer_bound(balances in zero_sum_strategy()) {
        let input = entries(&balances);
        let nonzero = input.iter().filter(|e| e.balance != 0).count();

        let transfers = compute_settlement_min_transfers(&input);
        prop_assert!(transfers.len() <= nonzero.saturating_sub(1));
    }

    /// Property: optimal partition settlement never needs more transfers
    /// than pure greedy on the same input
    #[test]
    fn prop_optimal_at_most_greedy(balances in zero_sum_strategy()) {
        let input = entries(&balances);

        let optimal = compute_settlement_min_transfers(&input);
        // A limit of 1 forces every non-trivial input down the greedy path.
        let greedy = compute_settlement_min_transfers_with_limit(&input, 1);

        prop_assert!(optimal.len() <= greedy.len());
        assert_clears(&input, &greedy);
    }

    /// Property: every participant gets exactly one delta whose points equal
    /// the sum of its audit tags
    #[test]
    fn prop_scoring_structure(balances in balances_strategy()) {
        let input = entries(&balances);
        let deltas = compute_session_points(&input, resolve);

        prop_assert_eq!(deltas.len(), input.len());
        for (entry, delta) in input.iter().zip(&deltas) {
            prop_assert_eq!(&delta.id, &entry.id);
            prop_assert_eq!(delta.reasons[0], ScoreTag::Played);
            prop_assert_eq!(
                delta.delta_points,
                delta.reasons.iter().map(ScoreTag::points).sum::<i64>()
            );
        }
    }
}

#[test]
fn end_to_end_unbalanced_session() {
    // 8 players whose submitted deltas sum to +3. The engine reconciles the
    // surplus onto the losers, settles the reconciled balances, and scores
    // them — never the raw submissions.
    let engine = SettlementEngine::new(Config::default()).unwrap();
    let input = entries(&[12, 6, -3, -4, -7, -1, 0, 0]);

    let report = engine.settle_session(&input, resolve);

    assert_eq!(report.reconciliation.net_before, 3);
    assert_eq!(report.reconciliation.applied_net, 3);
    assert!(report.reconciliation.is_balanced());

    // Transfers clear exactly the post-reconciliation debts.
    assert_clears(&report.reconciliation.adjusted, &report.transfers);
    assert!(!report.stats.adjustment_used);
    assert_eq!(report.stats.settled_volume, report.stats.total_debt);

    // Two tables: top winner +2, top loser −2, everyone else untouched.
    let by_points: Vec<i64> = report.points.iter().map(|d| d.delta_points).collect();
    assert_eq!(by_points, vec![2, 0, 0, 0, -2, 0, 0, 0]);
    assert_eq!(report.points[0].reason_trail(), "played(0),topWinner(+2)");
    assert_eq!(report.points[4].reason_trail(), "played(0),topLoser(-2)");
}

#[test]
fn report_round_trips_through_json() {
    let engine = SettlementEngine::new(Config::default()).unwrap();
    let report = engine.settle_session(&entries(&[10, -2, -3, -5]), resolve);

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: settlement::SessionSettlement = serde_json::from_str(&json).unwrap();

    assert_eq!(back.report_id, report.report_id);
    assert_eq!(back.created_at, report.created_at);
    assert_eq!(back.reconciliation, report.reconciliation);
    assert_eq!(back.transfers, report.transfers);
    assert_eq!(back.points, report.points);
    assert_eq!(back.stats, report.stats);
}

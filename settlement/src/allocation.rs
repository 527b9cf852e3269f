//! Largest-remainder proportional allocation
//!
//! Splits an integer total across weighted recipients so the amounts sum to
//! the total exactly: each item gets the floor of its exact share, then the
//! leftover units go one-by-one to the largest fractional remainders.
//!
//! # Example
//!
//! ```text
//! total = 10, weights = [3, 1]
//! exact shares: 7.5 / 2.5
//! floors:       7   / 2    (one unit left)
//! remainder unit goes to the larger remainder → [8, 2]
//! ```
//!
//! The remainder tie-break (descending weight, then ascending id) is
//! normative: allocation of money must be auditable, so every run over the
//! same input produces the same amounts.

use serde::{Deserialize, Serialize};
use session_core::ParticipantId;

/// One weighted recipient of a proportional split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedItem {
    /// Participant ID
    pub id: ParticipantId,

    /// Positive weight (share of the total)
    pub weight: i64,
}

impl WeightedItem {
    /// Create new weighted item
    pub fn new(id: impl Into<String>, weight: i64) -> Self {
        Self {
            id: ParticipantId::new(id),
            weight,
        }
    }
}

/// One recipient's allocated amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Participant ID
    pub id: ParticipantId,

    /// Allocated amount (non-negative)
    pub amount: i64,
}

/// Split `total` across `weighted` items, summing to `total` exactly
///
/// Amounts come back in input order. `total <= 0` or a non-positive total
/// weight allocates zero to everyone; every amount is the floor or floor+1
/// of the item's exact rational share.
pub fn allocate_proportional(total: i64, weighted: &[WeightedItem]) -> Vec<Allocation> {
    let zeros = |items: &[WeightedItem]| {
        items
            .iter()
            .map(|w| Allocation {
                id: w.id.clone(),
                amount: 0,
            })
            .collect::<Vec<_>>()
    };

    if total <= 0 {
        return zeros(weighted);
    }

    let total_weight: i128 = weighted.iter().map(|w| w.weight as i128).sum();
    if total_weight <= 0 {
        return zeros(weighted);
    }

    // Exact shares in integer arithmetic: numerator = total * weight over a
    // common denominator, so remainders compare directly.
    let mut base: Vec<i64> = Vec::with_capacity(weighted.len());
    let mut remainder: Vec<i128> = Vec::with_capacity(weighted.len());
    for item in weighted {
        let numerator = total as i128 * item.weight as i128;
        base.push((numerator / total_weight) as i64);
        remainder.push(numerator % total_weight);
    }

    let mut leftover = total - base.iter().sum::<i64>();

    // Distribute leftover units by descending remainder; ties broken by
    // descending weight, then ascending id.
    let mut order: Vec<usize> = (0..weighted.len()).collect();
    order.sort_by(|&a, &b| {
        remainder[b]
            .cmp(&remainder[a])
            .then(weighted[b].weight.cmp(&weighted[a].weight))
            .then(weighted[a].id.cmp(&weighted[b].id))
    });

    for &i in &order {
        if leftover == 0 {
            break;
        }
        base[i] += 1;
        leftover -= 1;
    }

    weighted
        .iter()
        .zip(base)
        .map(|(item, amount)| Allocation {
            id: item.id.clone(),
            amount,
        })
        .collect()
}

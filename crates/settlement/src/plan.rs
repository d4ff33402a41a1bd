//! Greedy debt-netting settlement plan.

use serde::{Deserialize, Serialize};

use splitledger_core::{MemberId, Money};

/// One suggested point-to-point transfer. Transient: recomputed fresh from
/// every balance snapshot, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Computes the transfer list that zeroes every balance in the snapshot.
///
/// `balances` is one-to-one with `members`. Debtors (balance < 0) and
/// creditors (balance > 0) keep their original relative order; a two-pointer
/// merge then repeatedly transfers `min(debtor remaining, creditor
/// remaining)` and advances whichever side reaches zero. Zero-balance
/// members are skipped entirely.
///
/// Deterministic and linear; emits at most `debtors + creditors - 1`
/// transfers. Not globally transfer-count-optimal for every topology, but
/// the bound and the zeroing property always hold.
pub fn settlement_plan(members: &[MemberId], balances: &[Money]) -> Vec<Transfer> {
    debug_assert_eq!(members.len(), balances.len());

    let mut debtors: Vec<(MemberId, i64)> = Vec::new();
    let mut creditors: Vec<(MemberId, i64)> = Vec::new();
    for (&member, &balance) in members.iter().zip(balances) {
        let units = balance.units();
        if units < 0 {
            // Track the owed magnitude as a positive number.
            debtors.push((member, -units));
        } else if units > 0 {
            creditors.push((member, units));
        }
    }

    let mut transfers = Vec::new();
    let mut di = 0;
    let mut ci = 0;
    while di < debtors.len() && ci < creditors.len() {
        let amount = debtors[di].1.min(creditors[ci].1);
        if amount > 0 {
            transfers.push(Transfer {
                from: debtors[di].0,
                to: creditors[ci].0,
                amount: Money::from_units(amount),
            });
            debtors[di].1 -= amount;
            creditors[ci].1 -= amount;
        }
        if debtors[di].1 == 0 {
            di += 1;
        }
        if creditors[ci].1 == 0 {
            ci += 1;
        }
    }

    transfers
}

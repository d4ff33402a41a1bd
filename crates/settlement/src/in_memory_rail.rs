//! In-memory payment rail for tests and single-process demos.

use std::collections::HashMap;

use splitledger_core::{MemberId, Money};

use crate::rail::{PaymentRail, RailError};

/// Token-style rail double: exact integer balances plus (owner, spender)
/// allowances, consumed on transfer.
///
/// Constructed with the executor's identity: every pull-transfer spends the
/// allowance granted to that identity.
#[derive(Debug)]
pub struct InMemoryRail {
    spender: MemberId,
    balances: HashMap<MemberId, Money>,
    allowances: HashMap<(MemberId, MemberId), Money>,
}

impl InMemoryRail {
    pub fn new(spender: MemberId) -> Self {
        Self {
            spender,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Credits `holder` out of thin air. Test/demo setup only.
    pub fn mint(&mut self, holder: MemberId, amount: Money) {
        let entry = self.balances.entry(holder).or_insert(Money::ZERO);
        *entry = Money::from_units(entry.units().saturating_add(amount.units()));
    }

    /// Pre-authorizes `spender` to pull up to `amount` from `owner`.
    /// Overwrites any previous grant, like a token `approve`.
    pub fn approve(&mut self, owner: MemberId, spender: MemberId, amount: Money) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn balance_of(&self, holder: MemberId) -> Money {
        self.balances.get(&holder).copied().unwrap_or(Money::ZERO)
    }
}

impl PaymentRail for InMemoryRail {
    fn transfer(&mut self, from: MemberId, to: MemberId, amount: Money) -> Result<(), RailError> {
        let granted = self.authorized_amount(from, self.spender);
        if granted < amount {
            return Err(RailError::InsufficientAuthorization {
                from,
                granted,
                needed: amount,
            });
        }

        let held = self.balance_of(from);
        if held < amount {
            return Err(RailError::InsufficientFunds {
                from,
                held,
                needed: amount,
            });
        }

        self.allowances.insert(
            (from, self.spender),
            Money::from_units(granted.units() - amount.units()),
        );
        self.balances
            .insert(from, Money::from_units(held.units() - amount.units()));
        let to_held = self.balance_of(to);
        self.balances
            .insert(to, Money::from_units(to_held.units() + amount.units()));
        Ok(())
    }

    fn authorized_amount(&self, from: MemberId, spender: MemberId) -> Money {
        self.allowances
            .get(&(from, spender))
            .copied()
            .unwrap_or(Money::ZERO)
    }
}

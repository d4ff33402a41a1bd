use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{GroupId, MemberId, Money};

/// Expense category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoodDrink,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Travel,
    Health,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodDrink => "food_drink",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Travel => "travel",
            Category::Health => "health",
            Category::Other => "other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allocation of part of an expense's total to one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub member: MemberId,
    pub amount: Money,
}

/// Input model for a new expense.
///
/// `occurred_at` is caller-supplied so the engine stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Money,
    pub description: String,
    pub category: Category,
    pub splits: Vec<Split>,
    pub occurred_at: DateTime<Utc>,
}

/// An immutable expense record.
///
/// `index` is the 0-based sequential position within its group's expense
/// list, assigned at creation and never reused or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    group_id: GroupId,
    index: u64,
    payer: MemberId,
    amount: Money,
    description: String,
    category: Category,
    occurred_at: DateTime<Utc>,
    splits: Vec<Split>,
}

impl Expense {
    pub(crate) fn new(group_id: GroupId, index: u64, payer: MemberId, input: NewExpense) -> Self {
        Self {
            group_id,
            index,
            payer,
            amount: input.amount,
            description: input.description,
            category: input.category,
            occurred_at: input.occurred_at,
            splits: input.splits,
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn payer(&self) -> MemberId {
        self.payer
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }
}

pub mod network;

use iou::{Amount, Currency, DebtRecord, Identity, RecordId};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Party {
    Alice,
    Bob,
    Charlie,
}

impl Party {
    pub fn name(self) -> &'static str {
        match self {
            Party::Alice => "Alice",
            Party::Bob => "Bob",
            Party::Charlie => "Charlie",
        }
    }

    pub fn id(self) -> Identity { self.name().parse().unwrap() }
}

pub fn gbp_currency() -> Currency { "GBP".parse().unwrap() }

pub fn gbp(quantity: u64) -> Amount { Amount::new(quantity, gbp_currency()) }

pub fn usd(quantity: u64) -> Amount { Amount::new(quantity, "USD".parse().unwrap()) }

/// Record of `amount` owed by Bob to Alice with `paid` already settled.
pub fn debt(amount: u64, paid: u64) -> DebtRecord {
    DebtRecord::with(gbp(amount), Party::Alice.id(), Party::Bob.id(), gbp(paid), RecordId::from(42u128))
}

// IOU ledger: bilateral debt records, transition validation and construction
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! In-memory ledger: the current debt records and cash balances of a single node.
//!
//! The ledger takes the role a notary plays in a distributed deployment: transitions are
//! committed one at a time, and a transition consuming a record which is no longer current is
//! rejected as a double spend.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    validate, Amount, CashBalances, CommitError, ConstructionError, Currency, DebtRecord,
    Identity, LedgerQuery, Lifecycle, RecordId, Transition, ValidationFailure,
};

/// Entry of the commit log.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Committed {
    pub seq: u64,
    pub record_id: RecordId,
    pub lifecycle: Lifecycle,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase", default)
)]
pub struct MemLedger {
    records: IndexMap<RecordId, DebtRecord>,
    balances: BTreeMap<Identity, BTreeMap<Currency, u64>>,
    history: Vec<Committed>,
}

impl MemLedger {
    pub fn new() -> Self { MemLedger::default() }

    pub fn history(&self) -> &[Committed] { &self.history }

    /// Non-zero cash balances of `holder`.
    pub fn cash_of(&self, holder: &Identity) -> Vec<Amount> {
        self.balances
            .get(holder)
            .into_iter()
            .flatten()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(currency, quantity)| Amount::new(*quantity, currency.clone()))
            .collect()
    }

    fn supply(&self, currency: &Currency) -> Option<u64> {
        self.balances
            .values()
            .filter_map(|wallet| wallet.get(currency))
            .try_fold(0u64, |sum, quantity| sum.checked_add(*quantity))
    }

    /// Issues new cash to `holder`, returning its new balance.
    ///
    /// The total supply of each currency is kept within `u64`, so cash movements never overflow.
    pub fn self_issue_cash(
        &mut self,
        holder: &Identity,
        amount: &Amount,
    ) -> Result<Amount, ConstructionError> {
        let currency = amount.currency();
        self.supply(currency)
            .and_then(|supply| supply.checked_add(amount.quantity()))
            .ok_or(ConstructionError::Overflow)?;
        let balance = self
            .balances
            .entry(holder.clone())
            .or_default()
            .entry(currency.clone())
            .or_default();
        *balance += amount.quantity();
        #[cfg(feature = "log")]
        info!("Issued {amount} to {holder}");
        Ok(Amount::new(*balance, currency.clone()))
    }

    /// Validates the transition and, if it is valid and none of its inputs are spent, applies it
    /// atomically: consumed records are retired, produced records become current and the cash is
    /// moved from payers to payees.
    pub fn commit(&mut self, tx: &Transition) -> Result<Lifecycle, CommitError> {
        validate(tx)?;

        for input in &tx.consumed {
            match self.records.get(input.record_id()) {
                Some(current) if current == input => {}
                _ => return Err(CommitError::StaleRecord(*input.record_id())),
            }
        }
        for output in &tx.produced {
            let id = output.record_id();
            let replaces = tx.consumed.iter().any(|input| input.record_id() == id);
            if !replaces && self.records.contains_key(id) {
                return Err(CommitError::DuplicateRecord(*id));
            }
        }

        let mut debits = BTreeMap::<(&Identity, &Currency), u128>::new();
        for cash in &tx.cash {
            *debits
                .entry((cash.payer(), cash.amount().currency()))
                .or_default() += cash.amount().quantity() as u128;
        }
        for ((payer, currency), required) in debits {
            let available = self.balance(payer, currency);
            if (available.quantity() as u128) < required {
                return Err(CommitError::InsufficientCash {
                    payer: payer.clone(),
                    available,
                    required: Amount::new(
                        u64::try_from(required).unwrap_or(u64::MAX),
                        currency.clone(),
                    ),
                });
            }
        }

        let record_id = tx
            .records()
            .next()
            .map(|record| *record.record_id())
            .ok_or(ValidationFailure::NoIouState)?;

        for input in &tx.consumed {
            self.records.shift_remove(input.record_id());
        }
        for output in &tx.produced {
            self.records.insert(*output.record_id(), output.clone());
        }
        for cash in &tx.cash {
            let currency = cash.amount().currency();
            let quantity = cash.amount().quantity();
            if let Some(balance) = self
                .balances
                .get_mut(cash.payer())
                .and_then(|wallet| wallet.get_mut(currency))
            {
                *balance -= quantity;
            }
            let balance = self
                .balances
                .entry(cash.payee().clone())
                .or_default()
                .entry(currency.clone())
                .or_default();
            // Bounded by the currency supply, see `self_issue_cash`.
            *balance = balance.saturating_add(quantity);
        }

        let lifecycle = Lifecycle::of(tx);
        let seq = self.history.len() as u64 + 1;
        self.history.push(Committed {
            seq,
            record_id,
            lifecycle,
        });
        #[cfg(feature = "log")]
        info!("Committed #{seq}: IOU {record_id} {lifecycle}");
        Ok(lifecycle)
    }
}

impl LedgerQuery for MemLedger {
    fn current(&self, id: &RecordId) -> Option<DebtRecord> { self.records.get(id).cloned() }

    fn records(&self) -> Vec<DebtRecord> { self.records.values().cloned().collect() }
}

impl CashBalances for MemLedger {
    fn balance(&self, holder: &Identity, currency: &Currency) -> Amount {
        let quantity = self
            .balances
            .get(holder)
            .and_then(|wallet| wallet.get(currency))
            .copied()
            .unwrap_or_default();
        Amount::new(quantity, currency.clone())
    }
}

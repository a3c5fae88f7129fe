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

//! Construction of well-formed candidate transitions.
//!
//! The free functions take everything they need as arguments; [`TransitionBuilder`] wraps them
//! with the lookups (ledger, identities, cash) a node performs before proposing a transition.

use crate::{
    Amount, CashBalances, CashContribution, ConstructionError, DebtRecord, Identity,
    IdentityService, Intent, LedgerQuery, RecordId, Transition,
};

/// Proposes issuance of a new debt of `borrower` towards `lender`.
pub fn build_issue(amount: Amount, lender: Identity, borrower: Identity) -> Transition {
    let record = DebtRecord::new(amount, lender, borrower);
    let mut tx = Transition::new(Intent::Issue);
    tx.endorsers = record.participants();
    tx.produced.push(record);
    tx
}

/// Proposes re-assignment of `record` to `new_lender` on behalf of `caller`, who must be the
/// current lender.
pub fn build_transfer(
    caller: &Identity,
    record: &DebtRecord,
    new_lender: Identity,
) -> Result<Transition, ConstructionError> {
    if caller != record.lender() {
        return Err(ConstructionError::NotLender {
            caller: caller.clone(),
            record_id: *record.record_id(),
        });
    }
    let mut tx = Transition::new(Intent::Transfer);
    tx.endorsers = record.participants();
    tx.endorsers.insert(new_lender.clone());
    tx.produced.push(record.with_new_lender(new_lender));
    tx.consumed.push(record.clone());
    Ok(tx)
}

/// Proposes repayment of `pay_amount` from the borrower of `record` to its lender.
///
/// Paying exactly the outstanding amount retires the record; any other amount produces a
/// successor record with the payment accounted. Over-payment is not rejected here: the resulting
/// transition fails validation.
pub fn build_settle(
    record: &DebtRecord,
    pay_amount: Amount,
    available_cash: &Amount,
) -> Result<Transition, ConstructionError> {
    if !record.amount().is_same_currency(&pay_amount) {
        return Err(ConstructionError::CurrencyMismatch {
            expected: record.amount().currency().clone(),
            found: pay_amount.currency().clone(),
        });
    }
    if !available_cash.is_same_currency(&pay_amount) {
        return Err(ConstructionError::CurrencyMismatch {
            expected: pay_amount.currency().clone(),
            found: available_cash.currency().clone(),
        });
    }
    if available_cash.quantity() < pay_amount.quantity() {
        return Err(ConstructionError::InsufficientFunds {
            available: available_cash.clone(),
            required: pay_amount,
        });
    }

    let mut tx = Transition::new(Intent::Settle);
    tx.endorsers = record.participants();
    if pay_amount.quantity() != record.outstanding().quantity() {
        tx.produced.push(record.pay(&pay_amount)?);
    }
    tx.cash.push(CashContribution::new(
        pay_amount,
        record.borrower().clone(),
        record.lender().clone(),
    ));
    tx.consumed.push(record.clone());
    Ok(tx)
}

/// Builds transitions on behalf of a node identity, looking up the records, parties and cash
/// through the provided services.
pub struct TransitionBuilder<'svc, Q, I, C>
where
    Q: LedgerQuery,
    I: IdentityService,
    C: CashBalances,
{
    me: Identity,
    ledger: &'svc Q,
    identities: &'svc I,
    cash: &'svc C,
}

impl<'svc, Q, I, C> TransitionBuilder<'svc, Q, I, C>
where
    Q: LedgerQuery,
    I: IdentityService,
    C: CashBalances,
{
    pub fn new(me: Identity, ledger: &'svc Q, identities: &'svc I, cash: &'svc C) -> Self {
        Self {
            me,
            ledger,
            identities,
            cash,
        }
    }

    pub fn me(&self) -> &Identity { &self.me }

    fn party(&self, name: &str) -> Result<Identity, ConstructionError> {
        self.identities
            .resolve(name)
            .ok_or_else(|| ConstructionError::UnknownParty(name.to_owned()))
    }

    fn current(&self, id: RecordId) -> Result<DebtRecord, ConstructionError> {
        self.ledger
            .current(&id)
            .ok_or(ConstructionError::RecordNotFound(id))
    }

    /// Proposes a debt of this node towards `lender`.
    pub fn issue(&self, amount: Amount, lender: &str) -> Result<Transition, ConstructionError> {
        let lender = self.party(lender)?;
        #[cfg(feature = "log")]
        debug!("Proposing issue of {amount} owed by {} to {lender}", self.me);
        Ok(build_issue(amount, lender, self.me.clone()))
    }

    /// Proposes transfer of a debt this node is the lender of to `new_lender`.
    pub fn transfer(
        &self,
        id: RecordId,
        new_lender: &str,
    ) -> Result<Transition, ConstructionError> {
        let record = self.current(id)?;
        let new_lender = self.party(new_lender)?;
        #[cfg(feature = "log")]
        debug!("Proposing transfer of IOU {id} from {} to {new_lender}", record.lender());
        build_transfer(&self.me, &record, new_lender)
    }

    /// Proposes repayment of `amount` of a debt this node is the borrower of.
    pub fn settle(&self, id: RecordId, amount: Amount) -> Result<Transition, ConstructionError> {
        let record = self.current(id)?;
        if record.borrower() != &self.me {
            return Err(ConstructionError::NotBorrower {
                caller: self.me.clone(),
                record_id: id,
            });
        }
        let currency = record.amount().currency();
        if !record.amount().is_same_currency(&amount) {
            return Err(ConstructionError::CurrencyMismatch {
                expected: currency.clone(),
                found: amount.currency().clone(),
            });
        }
        let available = self.cash.balance(&self.me, currency);
        if available.is_zero() {
            return Err(ConstructionError::NoBalance(currency.clone()));
        }
        #[cfg(feature = "log")]
        debug!("Proposing settlement of {amount} on IOU {id}, {available} available");
        build_settle(&record, amount, &available)
    }
}

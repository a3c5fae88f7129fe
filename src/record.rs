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

//! Bilateral debt records and their lifecycle helpers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Amount, ConstructionError, Endorsers, Identity};

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum RecordIdError {
    /// '{0}' is not a valid IOU id; 32 hexadecimal digits are expected.
    Invalid(String),
}

/// Identifier shared by every version of the same logical debt, from its issuance until its final
/// settlement.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct RecordId(u128);

impl RecordId {
    /// Generates a fresh unique identifier.
    pub fn random() -> Self { RecordId(rand::random()) }
}

impl From<u128> for RecordId {
    fn from(val: u128) -> Self { RecordId(val) }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{:032x}", self.0) }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RecordIdError::Invalid(s.to_owned()));
        }
        u128::from_str_radix(s, 16)
            .map(RecordId)
            .map_err(|_| RecordIdError::Invalid(s.to_owned()))
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> { RecordId::from_str(&s) }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self { id.to_string() }
}

/// A debt of `borrower` towards `lender` at a point of its lifecycle.
///
/// Records are immutable: "changing" a record produces a new one under the same
/// [`RecordId`]. Constructors do not check the record invariants (`paid` not exceeding `amount`,
/// same currency of both, distinct parties); this is the job of the transition validator, which
/// reports the exact rule being broken.
#[derive(Getters, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct DebtRecord {
    /// Original principal.
    amount: Amount,
    /// Creditor.
    lender: Identity,
    /// Debtor.
    borrower: Identity,
    /// Cumulative amount settled so far.
    paid: Amount,
    record_id: RecordId,
}

impl DebtRecord {
    /// Creates a record for a new debt: nothing paid, fresh record id.
    pub fn new(amount: Amount, lender: Identity, borrower: Identity) -> Self {
        let paid = Amount::zero(amount.currency().clone());
        DebtRecord::with(amount, lender, borrower, paid, RecordId::random())
    }

    pub fn with(
        amount: Amount,
        lender: Identity,
        borrower: Identity,
        paid: Amount,
        record_id: RecordId,
    ) -> Self {
        DebtRecord {
            amount,
            lender,
            borrower,
            paid,
            record_id,
        }
    }

    /// Parties which must endorse any change to the record.
    pub fn participants(&self) -> Endorsers {
        bset![self.lender.clone(), self.borrower.clone()]
    }

    /// Returns a copy of the record with `contribution` added to the paid amount.
    ///
    /// The result may be over-paid; the validator rejects settlements exceeding the outstanding
    /// amount.
    pub fn pay(&self, contribution: &Amount) -> Result<Self, ConstructionError> {
        if !self.amount.is_same_currency(contribution) {
            return Err(ConstructionError::CurrencyMismatch {
                expected: self.amount.currency().clone(),
                found: contribution.currency().clone(),
            });
        }
        let paid = self.paid.checked_add(contribution)?;
        Ok(DebtRecord { paid, ..self.clone() })
    }

    /// Returns a copy of the record owed to `new_lender`.
    pub fn with_new_lender(&self, new_lender: Identity) -> Self {
        DebtRecord {
            lender: new_lender,
            ..self.clone()
        }
    }

    /// Part of the principal which is not paid yet.
    pub fn outstanding(&self) -> Amount { self.amount.saturating_sub(&self.paid) }

    pub fn is_settled(&self) -> bool { self.outstanding().is_zero() }

    pub fn is_well_formed(&self) -> bool {
        self.amount.is_same_currency(&self.paid)
            && self.paid.quantity() <= self.amount.quantity()
            && self.lender != self.borrower
    }
}

impl Display for DebtRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IOU {}: {} owes {} to {}, {} paid",
            self.record_id, self.borrower, self.amount, self.lender, self.paid
        )
    }
}

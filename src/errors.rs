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

use crate::{Amount, Currency, Identity, RecordId, ValidationFailure};

/// Request which can't be turned into a transition at all.
///
/// Unlike [`ValidationFailure`], these errors are detected before any transition is formed and
/// signal a request which should not have been made.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ConstructionError {
    /// currency mismatch: the debt is denominated in {expected}, while {found} is provided.
    CurrencyMismatch { expected: Currency, found: Currency },

    /// IOU transfer can only be initiated by the IOU lender; {caller} is not the lender of IOU
    /// {record_id}.
    NotLender { caller: Identity, record_id: RecordId },

    /// only the current borrower can initiate an IOU settlement; {caller} is not the borrower of
    /// IOU {record_id}.
    NotBorrower { caller: Identity, record_id: RecordId },

    /// borrower has only {available} but needs {required} to settle.
    InsufficientFunds { available: Amount, required: Amount },

    /// borrower does not have balance to settle in {0}.
    NoBalance(Currency),

    /// IOU {0} is not known to the ledger.
    RecordNotFound(RecordId),

    /// unknown party name '{0}'.
    UnknownParty(String),

    /// amount arithmetic overflow.
    Overflow,
}

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum EndorsementError {
    /// {0} is not expected to endorse this transition.
    UnexpectedEndorser(Identity),

    /// {0} has already endorsed this transition.
    DuplicateEndorsement(Identity),

    /// {party} declined to endorse the transition: {reason}
    Declined { party: Identity, reason: String },

    /// endorsement of {0} is still missing.
    Incomplete(Identity),

    /// the endorsement session is already closed.
    Closed,
}

#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum CommitError {
    #[from]
    #[display(inner)]
    Invalid(ValidationFailure),

    /// IOU {0} is already consumed or unknown to the ledger.
    StaleRecord(RecordId),

    /// IOU {0} is already present in the ledger.
    DuplicateRecord(RecordId),

    /// {payer} holds {available} and can't pay {required}.
    InsufficientCash {
        payer: Identity,
        available: Amount,
        required: Amount,
    },
}

/// Any error happening while a transition travels from the request to the ledger.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(inner)]
pub enum FlowError {
    #[from]
    Construction(ConstructionError),

    #[from]
    Endorsement(EndorsementError),

    #[from]
    Validation(ValidationFailure),

    #[from]
    Commit(CommitError),
}

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

//! Bilateral debt (IOU) records: the contract rules their transitions must obey, and the
//! construction of transitions for issuance, transfer and settlement.
//!
//! The validator ([`validate`]) is a pure function over a [`Transition`]. Everything a node
//! needs to know about the world (current records, party identities, cash balances) reaches
//! the builder through the traits in [`services`], so the kernel never talks to a network, a
//! vault or a notary on its own.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;
#[cfg(feature = "log")]
#[macro_use]
extern crate log;

mod amount;
mod identity;
mod record;
mod cash;
mod transition;
mod validation;
mod builder;
mod errors;
pub mod endorsement;
mod ledger;
mod flow;
pub mod services;
#[cfg(feature = "fs")]
pub mod fs;

pub use amount::{Amount, AmountParseError, Currency};
pub use builder::{build_issue, build_settle, build_transfer, TransitionBuilder};
pub use cash::CashContribution;
pub use endorsement::{EndorsementSession, SessionState};
pub use errors::{CommitError, ConstructionError, EndorsementError, FlowError};
pub use flow::run_flow;
pub use identity::{Endorsers, Identity, IdentityError};
pub use ledger::{Committed, MemLedger};
pub use record::{DebtRecord, RecordId, RecordIdError};
pub use services::{CashBalances, IdentityService, LedgerQuery, PartyDirectory};
pub use transition::{Intent, Lifecycle, Transition, UncheckedTransition};
pub use validation::{validate, ValidationFailure};

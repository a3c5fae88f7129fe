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

//! Interfaces of the services the kernel depends on: ledger queries, party identities and cash
//! balances. Implementations are supplied by the hosting node.

use std::collections::BTreeSet;

use crate::{Amount, Currency, DebtRecord, Identity, RecordId};

/// Read access to the current (unconsumed) debt records.
pub trait LedgerQuery {
    /// Returns the current version of the record, if it exists and is not consumed.
    fn current(&self, id: &RecordId) -> Option<DebtRecord>;

    /// Lists all current records.
    fn records(&self) -> Vec<DebtRecord>;
}

/// Resolution of party names into identities (the network map).
pub trait IdentityService {
    fn resolve(&self, name: &str) -> Option<Identity>;

    fn parties(&self) -> Vec<Identity>;
}

/// Cash available to parties.
pub trait CashBalances {
    /// Balance of `holder` in `currency`; zero if the party holds no such cash.
    fn balance(&self, holder: &Identity, currency: &Currency) -> Amount;
}

/// Fixed set of known parties.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PartyDirectory(BTreeSet<Identity>);

impl PartyDirectory {
    pub fn new() -> Self { PartyDirectory::default() }

    pub fn insert(&mut self, party: Identity) -> bool { self.0.insert(party) }
}

impl FromIterator<Identity> for PartyDirectory {
    fn from_iter<T: IntoIterator<Item = Identity>>(iter: T) -> Self {
        PartyDirectory(iter.into_iter().collect())
    }
}

impl IdentityService for PartyDirectory {
    fn resolve(&self, name: &str) -> Option<Identity> {
        self.0.iter().find(|party| party.as_str() == name.trim()).cloned()
    }

    fn parties(&self) -> Vec<Identity> { self.0.iter().cloned().collect() }
}

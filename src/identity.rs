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

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum IdentityError {
    /// party name must not be empty.
    Empty,
}

/// Identity of a ledger party: a lender, a borrower, a payer or a payee of cash.
///
/// Identities are already resolved and authenticated by the time they reach this crate; the
/// kernel only compares them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Identity(String);

/// Set of identities endorsing (signing) a transition.
pub type Endorsers = BTreeSet<Identity>;

impl Identity {
    pub fn new(name: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Identity(name))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Identity::new(s) }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(name: String) -> Result<Self, Self::Error> { Identity::new(name) }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self { identity.0 }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

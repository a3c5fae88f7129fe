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

use std::fmt::{self, Display, Formatter};

use crate::{Amount, Identity};

/// Money moved from `payer` to `payee` as a part of a transition.
///
/// Cash is owned by the payment subsystem; settlement validation only reads its amount and
/// payee.
#[derive(Getters, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct CashContribution {
    amount: Amount,
    payer: Identity,
    payee: Identity,
}

impl CashContribution {
    pub fn new(amount: Amount, payer: Identity, payee: Identity) -> Self {
        CashContribution {
            amount,
            payer,
            payee,
        }
    }
}

impl Display for CashContribution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} paid by {} to {}", self.amount, self.payer, self.payee)
    }
}

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

//! Transitions: proposed atomic replacements of debt records, together with the cash moved
//! along.

use core::str::FromStr;

use crate::{CashContribution, DebtRecord, Endorsers, ValidationFailure};

/// Declared purpose of a transition. Selects the set of rules the validator applies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(lowercase)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum Intent {
    /// Creation of a new debt.
    Issue,

    /// Re-assignment of a debt to a new lender.
    Transfer,

    /// Full or partial repayment of a debt.
    Settle,
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "issue" => Ok(Intent::Issue),
            "transfer" => Ok(Intent::Transfer),
            "settle" => Ok(Intent::Settle),
            s => Err(s.to_string()),
        }
    }
}

/// Unit of validation: records consumed and produced, cash moved, the declared intent and the
/// identities which endorsed it.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Transition {
    pub consumed: Vec<DebtRecord>,
    pub produced: Vec<DebtRecord>,
    pub cash: Vec<CashContribution>,
    pub intent: Intent,
    pub endorsers: Endorsers,
}

impl Transition {
    /// Constructs an empty transition with the given intent.
    pub fn new(intent: Intent) -> Self {
        Transition {
            consumed: vec![],
            produced: vec![],
            cash: vec![],
            intent,
            endorsers: Endorsers::new(),
        }
    }

    /// Iterates over all debt records of the transition, consumed ones first.
    pub fn records(&self) -> impl Iterator<Item = &DebtRecord> {
        self.consumed.iter().chain(&self.produced)
    }

    /// Checks the transition against the contract rules for its intent.
    pub fn validate(&self) -> Result<(), ValidationFailure> { crate::validate(self) }
}

/// Transition as it is received from outside, before its intent is known to be one of the
/// supported ones.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase", default)
)]
pub struct UncheckedTransition {
    pub consumed: Vec<DebtRecord>,
    pub produced: Vec<DebtRecord>,
    pub cash: Vec<CashContribution>,
    pub intent: Option<String>,
    pub endorsers: Endorsers,
}

impl TryFrom<UncheckedTransition> for Transition {
    type Error = ValidationFailure;

    fn try_from(unchecked: UncheckedTransition) -> Result<Self, Self::Error> {
        let intent = unchecked
            .intent
            .as_deref()
            .and_then(|intent| Intent::from_str(intent).ok())
            .ok_or(ValidationFailure::MissingCommand)?;
        Ok(Transition {
            consumed: unchecked.consumed,
            produced: unchecked.produced,
            cash: unchecked.cash,
            intent,
            endorsers: unchecked.endorsers,
        })
    }
}

impl From<Transition> for UncheckedTransition {
    fn from(tx: Transition) -> Self {
        UncheckedTransition {
            consumed: tx.consumed,
            produced: tx.produced,
            cash: tx.cash,
            intent: Some(tx.intent.to_string()),
            endorsers: tx.endorsers,
        }
    }
}

/// Phase of a debt record lifecycle reached by a transition.
///
/// Per record id the phases go `Issued -> Transferred* -> PartiallySettled* -> FullySettled`;
/// transfers and partial settlements change only the record content, and a fully settled debt
/// has no successor record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub enum Lifecycle {
    #[display("issued")]
    Issued,

    #[display("transferred")]
    Transferred,

    #[display("partially settled")]
    PartiallySettled,

    #[display("fully settled")]
    FullySettled,
}

impl Lifecycle {
    /// Classifies a (valid) transition.
    pub fn of(tx: &Transition) -> Self {
        match tx.intent {
            Intent::Issue => Lifecycle::Issued,
            Intent::Transfer => Lifecycle::Transferred,
            Intent::Settle if tx.produced.is_empty() => Lifecycle::FullySettled,
            Intent::Settle => Lifecycle::PartiallySettled,
        }
    }

    pub fn is_terminal(self) -> bool { self == Lifecycle::FullySettled }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_display_from_str() {
        assert_eq!(Intent::Issue.to_string(), "issue");
        assert_eq!(Intent::Transfer.to_string(), "transfer");
        assert_eq!(Intent::Settle.to_string(), "settle");
        assert_eq!(Intent::Settle, "Settle".parse().unwrap());
        assert_eq!(Intent::from_str("move"), Err(s!("move")));
    }

    #[test]
    fn unknown_intent() {
        let unchecked = UncheckedTransition {
            intent: Some(s!("exit")),
            ..Default::default()
        };
        assert_eq!(Transition::try_from(unchecked), Err(ValidationFailure::MissingCommand));
        assert_eq!(
            Transition::try_from(UncheckedTransition::default()),
            Err(ValidationFailure::MissingCommand)
        );
    }

    #[test]
    fn unchecked_roundtrip() {
        let tx = Transition::new(Intent::Transfer);
        let unchecked = UncheckedTransition::from(tx.clone());
        assert_eq!(unchecked.intent.as_deref(), Some("transfer"));
        assert_eq!(Transition::try_from(unchecked).unwrap(), tx);
    }

    #[test]
    fn lifecycle() {
        let mut tx = Transition::new(Intent::Settle);
        assert_eq!(Lifecycle::of(&tx), Lifecycle::FullySettled);
        assert!(Lifecycle::of(&tx).is_terminal());
        tx.intent = Intent::Issue;
        assert_eq!(Lifecycle::of(&tx), Lifecycle::Issued);
        assert_eq!(Lifecycle::PartiallySettled.to_string(), "partially settled");
    }
}

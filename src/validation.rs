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

//! Contract rules for debt record transitions.
//!
//! Validation is a single pass over an immutable [`Transition`]: rules of the intent are checked
//! in order and the first broken one is reported. Failure messages are part of the contract and
//! are kept verbatim, since clients match on them.

use indexmap::IndexMap;

use crate::{Amount, DebtRecord, Intent, RecordId, Transition};

/// Contract rule broken by a transition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
pub enum ValidationFailure {
    #[display("Required IOUContract.Commands command")]
    MissingCommand,

    #[display("There must be an IOU transaction.")]
    NoIouState,

    // Issue
    #[display("No inputs should be consumed when issuing an IOU.")]
    IssueConsumesInputs,

    #[display("Only one output state should be created when issuing an IOU.")]
    IssueOutputCount,

    #[display("A newly issued IOU must have a positive amount.")]
    NonPositiveAmount,

    #[display("The lender and borrower cannot have the same identity.")]
    SelfLoan,

    #[display("Both lender and borrower together only may sign IOU issue transaction.")]
    IssueEndorsers,

    // Transfer
    #[display("An IOU transfer transaction should only consume one input state.")]
    TransferInputCount,

    #[display("An IOU transfer transaction should only create one output state.")]
    TransferOutputCount,

    #[display("Only the lender property may change.")]
    TransferChangesOtherFields,

    #[display("The lender property must change in a transfer.")]
    TransferKeepsLender,

    #[display("The borrower, old lender and new lender only must sign an IOU transfer transaction")]
    TransferEndorsers,

    // Settle
    #[display("There must be only one IOU group in a settle transaction.")]
    MultipleIouGroups,

    #[display("There must be one input IOU.")]
    SettleInputCount,

    #[display("There must be output cash.")]
    NoCash,

    #[display("There must be output cash paid to the recipient.")]
    NoCashToLender,

    #[display("The amount settled cannot be more than the amount outstanding.")]
    OverSettlement,

    #[display("There must be no output IOU as it has been fully settled.")]
    OutputAfterFullSettlement,

    #[display("There must be one output IOU.")]
    SettleOutputCount,

    #[display("The amount may not change when settling.")]
    SettleChangesAmount,

    #[display("The borrower may not change when settling.")]
    SettleChangesBorrower,

    #[display("The lender may not change when settling.")]
    SettleChangesLender,

    #[display("The paid amount must increase by the amount settled.")]
    SettlePaidMismatch,

    #[display("Both lender and borrower together only must sign the IOU settle transaction.")]
    SettleEndorsers,
}

#[inline]
fn require(condition: bool, failure: ValidationFailure) -> Result<(), ValidationFailure> {
    if condition {
        Ok(())
    } else {
        Err(failure)
    }
}

/// Validates a transition against the contract rules of its intent.
///
/// The function is pure: it performs no I/O and gives the same answer for the same input, so it
/// can be called concurrently from any number of threads.
pub fn validate(tx: &Transition) -> Result<(), ValidationFailure> {
    match tx.intent {
        Intent::Issue => verify_issue(tx),
        Intent::Transfer => verify_transfer(tx),
        Intent::Settle => verify_settle(tx),
    }
}

fn verify_issue(tx: &Transition) -> Result<(), ValidationFailure> {
    require(tx.consumed.is_empty(), ValidationFailure::IssueConsumesInputs)?;
    let [iou] = tx.produced.as_slice() else {
        return Err(ValidationFailure::IssueOutputCount);
    };
    require(iou.amount().is_positive(), ValidationFailure::NonPositiveAmount)?;
    require(iou.lender() != iou.borrower(), ValidationFailure::SelfLoan)?;
    require(tx.endorsers == iou.participants(), ValidationFailure::IssueEndorsers)
}

fn verify_transfer(tx: &Transition) -> Result<(), ValidationFailure> {
    let [input] = tx.consumed.as_slice() else {
        return Err(ValidationFailure::TransferInputCount);
    };
    let [output] = tx.produced.as_slice() else {
        return Err(ValidationFailure::TransferOutputCount);
    };
    require(
        &input.with_new_lender(output.lender().clone()) == output,
        ValidationFailure::TransferChangesOtherFields,
    )?;
    require(input.lender() != output.lender(), ValidationFailure::TransferKeepsLender)?;

    let mut signers = input.participants();
    signers.extend(output.participants());
    require(tx.endorsers == signers, ValidationFailure::TransferEndorsers)
}

#[derive(Default)]
struct Group<'tx> {
    inputs: Vec<&'tx DebtRecord>,
    outputs: Vec<&'tx DebtRecord>,
}

/// Groups records of a transition by their record id, keeping the order of appearance.
fn group_records(tx: &Transition) -> IndexMap<RecordId, Group<'_>> {
    let mut groups = IndexMap::<RecordId, Group>::new();
    for input in &tx.consumed {
        groups.entry(*input.record_id()).or_default().inputs.push(input);
    }
    for output in &tx.produced {
        groups
            .entry(*output.record_id())
            .or_default()
            .outputs
            .push(output);
    }
    groups
}

fn verify_settle(tx: &Transition) -> Result<(), ValidationFailure> {
    let groups = group_records(tx);
    require(groups.len() <= 1, ValidationFailure::MultipleIouGroups)?;
    let Some((_, group)) = groups.into_iter().next() else {
        return Err(ValidationFailure::SettleInputCount);
    };
    let [input] = group.inputs.as_slice() else {
        return Err(ValidationFailure::SettleInputCount);
    };

    require(!tx.cash.is_empty(), ValidationFailure::NoCash)?;
    let lender = input.lender();
    let paid_to_lender = tx
        .cash
        .iter()
        .filter(|cash| cash.payee() == lender)
        .collect::<Vec<_>>();
    require(!paid_to_lender.is_empty(), ValidationFailure::NoCashToLender)?;

    // Cash in a currency other than the one of the debt doesn't count towards its settlement.
    let currency = input.amount().currency();
    let counted = paid_to_lender
        .into_iter()
        .filter(|cash| cash.amount().currency() == currency)
        .collect::<Vec<_>>();
    require(!counted.is_empty(), ValidationFailure::NoCashToLender)?;
    let mut settled = Amount::zero(currency.clone());
    for cash in counted {
        // A sum not fitting u64 is above any outstanding amount.
        settled = settled
            .checked_add(cash.amount())
            .map_err(|_| ValidationFailure::OverSettlement)?;
    }

    let outstanding = input.outstanding();
    require(settled.quantity() <= outstanding.quantity(), ValidationFailure::OverSettlement)?;

    if settled.quantity() == outstanding.quantity() {
        require(group.outputs.is_empty(), ValidationFailure::OutputAfterFullSettlement)?;
    } else {
        let [output] = group.outputs.as_slice() else {
            return Err(ValidationFailure::SettleOutputCount);
        };
        require(output.amount() == input.amount(), ValidationFailure::SettleChangesAmount)?;
        require(output.borrower() == input.borrower(), ValidationFailure::SettleChangesBorrower)?;
        require(output.lender() == input.lender(), ValidationFailure::SettleChangesLender)?;
        let expected = input
            .pay(&settled)
            .map_err(|_| ValidationFailure::SettlePaidMismatch)?;
        require(*output == &expected, ValidationFailure::SettlePaidMismatch)?;
    }

    require(tx.endorsers == input.participants(), ValidationFailure::SettleEndorsers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CashContribution, Endorsers, Identity};

    fn party(name: &str) -> Identity { name.parse().unwrap() }
    fn gbp(quantity: u64) -> Amount { Amount::new(quantity, "GBP".parse().unwrap()) }
    fn usd(quantity: u64) -> Amount { Amount::new(quantity, "USD".parse().unwrap()) }

    fn alice() -> Identity { party("Alice") }
    fn bob() -> Identity { party("Bob") }
    fn charlie() -> Identity { party("Charlie") }

    fn signers(parties: &[Identity]) -> Endorsers { parties.iter().cloned().collect() }

    fn iou() -> DebtRecord {
        DebtRecord::with(gbp(10), alice(), bob(), gbp(0), RecordId::from(1u128))
    }

    fn issue(record: DebtRecord) -> Transition {
        let mut tx = Transition::new(Intent::Issue);
        tx.endorsers = record.participants();
        tx.produced.push(record);
        tx
    }

    fn transfer(record: DebtRecord, new_lender: Identity) -> Transition {
        let mut tx = Transition::new(Intent::Transfer);
        tx.endorsers =
            signers(&[record.lender().clone(), record.borrower().clone(), new_lender.clone()]);
        tx.produced.push(record.with_new_lender(new_lender));
        tx.consumed.push(record);
        tx
    }

    fn settle(record: DebtRecord, amount: Amount) -> Transition {
        let mut tx = Transition::new(Intent::Settle);
        tx.endorsers = record.participants();
        tx.cash.push(CashContribution::new(
            amount.clone(),
            record.borrower().clone(),
            record.lender().clone(),
        ));
        if amount.quantity() != record.outstanding().quantity() {
            tx.produced.push(record.pay(&amount).unwrap());
        }
        tx.consumed.push(record);
        tx
    }

    #[test]
    fn issue_valid() { assert_eq!(validate(&issue(iou())), Ok(())); }

    #[test]
    fn issue_consumes_nothing() {
        let mut tx = issue(iou());
        tx.consumed.push(iou());
        assert_eq!(validate(&tx), Err(ValidationFailure::IssueConsumesInputs));
    }

    #[test]
    fn issue_single_output() {
        let mut tx = issue(iou());
        tx.produced.push(iou());
        assert_eq!(validate(&tx), Err(ValidationFailure::IssueOutputCount));
        tx.produced.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::IssueOutputCount));
    }

    #[test]
    fn issue_positive_amount() {
        let tx = issue(DebtRecord::new(gbp(0), alice(), bob()));
        assert_eq!(validate(&tx), Err(ValidationFailure::NonPositiveAmount));
    }

    #[test]
    fn issue_self_loan() {
        let tx = issue(DebtRecord::new(gbp(10), alice(), alice()));
        assert_eq!(validate(&tx), Err(ValidationFailure::SelfLoan));
    }

    #[test]
    fn issue_endorsers() {
        let mut tx = issue(iou());
        tx.endorsers = signers(&[alice()]);
        assert_eq!(validate(&tx), Err(ValidationFailure::IssueEndorsers));
        tx.endorsers = signers(&[alice(), bob(), charlie()]);
        assert_eq!(validate(&tx), Err(ValidationFailure::IssueEndorsers));
    }

    #[test]
    fn transfer_valid() { assert_eq!(validate(&transfer(iou(), charlie())), Ok(())); }

    #[test]
    fn transfer_single_input_output() {
        let mut tx = transfer(iou(), charlie());
        tx.consumed.push(iou());
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferInputCount));

        let mut tx = transfer(iou(), charlie());
        tx.produced.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferOutputCount));
    }

    #[test]
    fn transfer_only_lender_changes() {
        let mut tx = transfer(iou(), charlie());
        tx.produced[0] = DebtRecord::with(gbp(5), charlie(), bob(), gbp(0), RecordId::from(1u128));
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferChangesOtherFields));

        let mut tx = transfer(iou(), charlie());
        tx.produced[0] = iou().pay(&gbp(3)).unwrap().with_new_lender(charlie());
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferChangesOtherFields));
    }

    #[test]
    fn transfer_lender_changes() {
        let tx = transfer(iou(), alice());
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferKeepsLender));
    }

    #[test]
    fn transfer_endorsers() {
        let mut tx = transfer(iou(), charlie());
        tx.endorsers = signers(&[alice(), bob()]);
        assert_eq!(validate(&tx), Err(ValidationFailure::TransferEndorsers));
    }

    #[test]
    fn settle_partial() { assert_eq!(validate(&settle(iou(), gbp(5))), Ok(())); }

    #[test]
    fn settle_full() { assert_eq!(validate(&settle(iou(), gbp(10))), Ok(())); }

    #[test]
    fn settle_single_group() {
        let other = DebtRecord::with(gbp(5), alice(), bob(), gbp(0), RecordId::from(2u128));
        let mut tx = settle(iou(), gbp(5));
        tx.consumed.push(other);
        assert_eq!(validate(&tx), Err(ValidationFailure::MultipleIouGroups));
    }

    #[test]
    fn settle_needs_input() {
        let mut tx = settle(iou(), gbp(5));
        tx.consumed.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleInputCount));
        tx.produced.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleInputCount));

        let mut tx = settle(iou(), gbp(5));
        tx.consumed.push(iou());
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleInputCount));
    }

    #[test]
    fn settle_needs_cash() {
        let mut tx = settle(iou(), gbp(5));
        tx.cash.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::NoCash));
    }

    #[test]
    fn settle_cash_to_lender() {
        let mut tx = settle(iou(), gbp(5));
        tx.cash = vec![CashContribution::new(gbp(5), bob(), charlie())];
        assert_eq!(validate(&tx), Err(ValidationFailure::NoCashToLender));
    }

    #[test]
    fn settle_other_currency_not_counted() {
        let mut tx = settle(iou(), gbp(5));
        tx.cash = vec![CashContribution::new(usd(5), bob(), alice())];
        assert_eq!(validate(&tx), Err(ValidationFailure::NoCashToLender));

        let mut tx = settle(iou(), gbp(5));
        tx.cash.push(CashContribution::new(usd(100), bob(), alice()));
        assert_eq!(validate(&tx), Ok(()));
    }

    #[test]
    fn settle_zero_cash_in_debt_currency() {
        let mut tx = settle(iou(), gbp(5));
        tx.cash = vec![CashContribution::new(gbp(0), bob(), alice())];
        tx.produced = vec![iou()];
        assert_eq!(validate(&tx), Ok(()));

        tx.produced = vec![iou().pay(&gbp(5)).unwrap()];
        assert_eq!(validate(&tx), Err(ValidationFailure::SettlePaidMismatch));
    }

    #[test]
    fn settle_sums_cash_to_lender() {
        let mut tx = settle(iou(), gbp(7));
        tx.cash = vec![
            CashContribution::new(gbp(3), bob(), alice()),
            CashContribution::new(gbp(4), charlie(), alice()),
            CashContribution::new(gbp(9), bob(), charlie()),
        ];
        assert_eq!(validate(&tx), Ok(()));
    }

    #[test]
    fn settle_over_outstanding() {
        let tx = settle(iou(), gbp(11));
        assert_eq!(validate(&tx), Err(ValidationFailure::OverSettlement));

        let mut tx = settle(iou(), gbp(5));
        tx.cash.push(CashContribution::new(gbp(u64::MAX), bob(), alice()));
        assert_eq!(validate(&tx), Err(ValidationFailure::OverSettlement));
    }

    #[test]
    fn settle_full_no_output() {
        let mut tx = settle(iou(), gbp(10));
        tx.produced.push(iou().pay(&gbp(10)).unwrap());
        assert_eq!(validate(&tx), Err(ValidationFailure::OutputAfterFullSettlement));
    }

    #[test]
    fn settle_partial_single_output() {
        let mut tx = settle(iou(), gbp(5));
        tx.produced.clear();
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleOutputCount));
    }

    #[test]
    fn settle_partial_unchanged_fields() {
        let id = RecordId::from(1u128);

        let mut tx = settle(iou(), gbp(5));
        tx.produced[0] = DebtRecord::with(gbp(20), alice(), bob(), gbp(5), id);
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleChangesAmount));

        let mut tx = settle(iou(), gbp(5));
        tx.produced[0] = DebtRecord::with(gbp(10), alice(), charlie(), gbp(5), id);
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleChangesBorrower));

        let mut tx = settle(iou(), gbp(5));
        tx.produced[0] = DebtRecord::with(gbp(10), charlie(), bob(), gbp(5), id);
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleChangesLender));

        let mut tx = settle(iou(), gbp(5));
        tx.produced[0] = DebtRecord::with(gbp(10), alice(), bob(), gbp(4), id);
        assert_eq!(validate(&tx), Err(ValidationFailure::SettlePaidMismatch));
    }

    #[test]
    fn settle_endorsers() {
        let mut tx = settle(iou(), gbp(5));
        tx.endorsers = signers(&[bob()]);
        assert_eq!(validate(&tx), Err(ValidationFailure::SettleEndorsers));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationFailure::NonPositiveAmount.to_string(),
            "A newly issued IOU must have a positive amount."
        );
        assert_eq!(
            ValidationFailure::TransferEndorsers.to_string(),
            "The borrower, old lender and new lender only must sign an IOU transfer transaction"
        );
        assert_eq!(
            ValidationFailure::MissingCommand.to_string(),
            "Required IOUContract.Commands command"
        );
    }
}

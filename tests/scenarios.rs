#[macro_use]
extern crate amplify;

pub mod utils;

use iou::{
    build_issue, build_settle, CommitError, ConstructionError, DebtRecord, FlowError, Lifecycle,
    RecordId, ValidationFailure,
};
use rstest::rstest;
use utils::network::TestNetwork;
use utils::*;

fn record() -> DebtRecord { debt(1000, 0) }

#[test]
fn issue_endorsed_by_both() {
    let tx = build_issue(gbp(1000), Party::Alice.id(), Party::Bob.id());
    assert_eq!(tx.endorsers, bset![Party::Alice.id(), Party::Bob.id()]);
    assert_eq!(tx.validate(), Ok(()));
}

#[test]
fn issue_endorsed_by_lender_only() {
    let mut tx = build_issue(gbp(1000), Party::Alice.id(), Party::Bob.id());
    tx.endorsers = bset![Party::Alice.id()];
    let err = tx.validate().unwrap_err();
    assert_eq!(err, ValidationFailure::IssueEndorsers);
    assert_eq!(
        err.to_string(),
        "Both lender and borrower together only may sign IOU issue transaction."
    );
}

#[test]
fn partial_settlement() {
    let tx = build_settle(&record(), gbp(400), &gbp(400)).unwrap();
    assert_eq!(tx.validate(), Ok(()));
    assert_eq!(tx.cash.len(), 1);
    assert_eq!(tx.cash[0].payee(), &Party::Alice.id());
    assert_eq!(tx.cash[0].amount(), &gbp(400));

    let [produced] = tx.produced.as_slice() else {
        panic!("partial settlement must produce a single record")
    };
    assert_eq!(produced.amount(), &gbp(1000));
    assert_eq!(produced.paid(), &gbp(400));
    assert_eq!(produced.lender(), &Party::Alice.id());
    assert_eq!(produced.borrower(), &Party::Bob.id());
    assert_eq!(produced.record_id(), record().record_id());
}

#[test]
fn full_settlement() {
    let tx = build_settle(&record(), gbp(1000), &gbp(1000)).unwrap();
    assert_eq!(tx.validate(), Ok(()));
    assert!(tx.produced.is_empty());
    assert_eq!(Lifecycle::of(&tx), Lifecycle::FullySettled);
}

#[test]
fn over_settlement() {
    let tx = build_settle(&record(), gbp(1001), &gbp(1001)).unwrap();
    let err = tx.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "The amount settled cannot be more than the amount outstanding."
    );
}

#[test]
fn over_settlement_refused_by_builder() {
    let err = build_settle(&record(), gbp(1001), &gbp(1000)).unwrap_err();
    assert_eq!(err, ConstructionError::InsufficientFunds {
        available: gbp(1000),
        required: gbp(1001),
    });
}

#[test]
fn full_lifecycle() {
    let mut net = TestNetwork::new();
    net.node(Party::Bob).self_issue_cash(1000);

    let id = net.node(Party::Bob).issue(1000, Party::Alice).unwrap();
    assert_eq!(net.node(Party::Alice).outstanding(id), Some(1000));

    assert_eq!(
        net.node(Party::Alice).transfer(id, Party::Charlie).unwrap(),
        Lifecycle::Transferred
    );
    assert_eq!(net.node(Party::Bob).settle(id, 300).unwrap(), Lifecycle::PartiallySettled);
    assert_eq!(net.node(Party::Bob).outstanding(id), Some(700));
    assert_eq!(net.node(Party::Bob).settle(id, 700).unwrap(), Lifecycle::FullySettled);
    assert_eq!(net.node(Party::Bob).outstanding(id), None);

    assert_eq!(net.ledger.cash_of(&Party::Charlie.id()), vec![gbp(1000)]);
    assert!(net.ledger.cash_of(&Party::Bob.id()).is_empty());
    assert!(net.ledger.cash_of(&Party::Alice.id()).is_empty());
    assert_eq!(net.ledger.history().len(), 4);
}

#[rstest]
#[case(Party::Bob)]
#[case(Party::Charlie)]
fn transfer_by_non_lender(#[case] caller: Party) {
    let mut net = TestNetwork::new();
    let id = net.node(Party::Bob).issue(500, Party::Alice).unwrap();
    let err = net.node(caller).transfer(id, Party::Charlie).unwrap_err();
    assert_eq!(
        err,
        FlowError::Construction(ConstructionError::NotLender {
            caller: caller.id(),
            record_id: id
        })
    );
}

#[rstest]
#[case(Party::Alice)]
#[case(Party::Charlie)]
fn settle_by_non_borrower(#[case] caller: Party) {
    let mut net = TestNetwork::new();
    net.node(caller).self_issue_cash(500);
    let id = net.node(Party::Bob).issue(500, Party::Alice).unwrap();
    let err = net.node(caller).settle(id, 100).unwrap_err();
    assert!(matches!(err, FlowError::Construction(ConstructionError::NotBorrower { .. })));
}

#[test]
fn settle_without_cash() {
    let mut net = TestNetwork::new();
    let id = net.node(Party::Bob).issue(500, Party::Alice).unwrap();
    let err = net.node(Party::Bob).settle(id, 100).unwrap_err();
    assert_eq!(
        err,
        FlowError::Construction(ConstructionError::NoBalance(gbp_currency()))
    );

    net.node(Party::Bob).self_issue_cash(50);
    let err = net.node(Party::Bob).settle(id, 100).unwrap_err();
    assert_eq!(
        err,
        FlowError::Construction(ConstructionError::InsufficientFunds {
            available: gbp(50),
            required: gbp(100),
        })
    );
}

#[test]
fn issue_to_unknown_party() {
    let mut net = TestNetwork::new();
    let err = iou::TransitionBuilder::new(
        Party::Bob.id(),
        &net.ledger,
        &net.directory,
        &net.ledger,
    )
    .issue(gbp(10), "Mallory")
    .unwrap_err();
    assert_eq!(err, ConstructionError::UnknownParty(s!("Mallory")));
    assert!(net.node(Party::Bob).issue(10, Party::Alice).is_ok());
}

#[test]
fn unknown_record() {
    let mut net = TestNetwork::new();
    let id = RecordId::from(7u128);
    let err = net.node(Party::Alice).transfer(id, Party::Bob).unwrap_err();
    assert_eq!(err, FlowError::Construction(ConstructionError::RecordNotFound(id)));
}

#[test]
fn double_spend() {
    let mut net = TestNetwork::new();
    let id = net.node(Party::Bob).issue(500, Party::Alice).unwrap();
    let stale = iou::build_transfer(
        &Party::Alice.id(),
        &iou::LedgerQuery::current(&net.ledger, &id).unwrap(),
        Party::Charlie.id(),
    )
    .unwrap();
    net.node(Party::Alice).transfer(id, Party::Charlie).unwrap();

    let err = iou::run_flow(&mut net.ledger, &Party::Alice.id(), stale).unwrap_err();
    assert_eq!(err, FlowError::Commit(CommitError::StaleRecord(id)));
}

#[test]
fn settle_in_other_currency() {
    let err = build_settle(&record(), usd(400), &usd(400)).unwrap_err();
    assert_eq!(err, ConstructionError::CurrencyMismatch {
        expected: gbp_currency(),
        found: "USD".parse().unwrap(),
    });
}

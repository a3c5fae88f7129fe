use iou::{
    run_flow, Amount, FlowError, Identity, LedgerQuery, Lifecycle, MemLedger, PartyDirectory,
    RecordId, TransitionBuilder,
};

use super::{gbp, Party};

/// All parties sharing a single in-memory ledger.
pub struct TestNetwork {
    pub ledger: MemLedger,
    pub directory: PartyDirectory,
}

impl TestNetwork {
    pub fn new() -> Self {
        TestNetwork {
            ledger: MemLedger::new(),
            directory: [Party::Alice, Party::Bob, Party::Charlie]
                .into_iter()
                .map(Party::id)
                .collect(),
        }
    }

    pub fn node(&mut self, party: Party) -> TestNode<'_> { TestNode { me: party.id(), net: self } }
}

pub struct TestNode<'net> {
    me: Identity,
    net: &'net mut TestNetwork,
}

impl TestNode<'_> {
    fn builder(&self) -> TransitionBuilder<'_, MemLedger, PartyDirectory, MemLedger> {
        TransitionBuilder::new(self.me.clone(), &self.net.ledger, &self.net.directory, &self.net.ledger)
    }

    pub fn self_issue_cash(&mut self, quantity: u64) -> Amount {
        self.net.ledger.self_issue_cash(&self.me, &gbp(quantity)).unwrap()
    }

    pub fn issue(&mut self, quantity: u64, lender: Party) -> Result<RecordId, FlowError> {
        let proposal = self.builder().issue(gbp(quantity), lender.name())?;
        let (tx, _) = run_flow(&mut self.net.ledger, &self.me, proposal)?;
        Ok(*tx.produced[0].record_id())
    }

    pub fn transfer(&mut self, id: RecordId, new_lender: Party) -> Result<Lifecycle, FlowError> {
        let proposal = self.builder().transfer(id, new_lender.name())?;
        run_flow(&mut self.net.ledger, &self.me, proposal).map(|(_, lifecycle)| lifecycle)
    }

    pub fn settle(&mut self, id: RecordId, quantity: u64) -> Result<Lifecycle, FlowError> {
        let proposal = self.builder().settle(id, gbp(quantity))?;
        run_flow(&mut self.net.ledger, &self.me, proposal).map(|(_, lifecycle)| lifecycle)
    }

    pub fn outstanding(&self, id: RecordId) -> Option<u64> {
        self.net
            .ledger
            .current(&id)
            .map(|record| record.outstanding().quantity())
    }
}

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

//! Single-process flow: every party lives in the same process and endorses through
//! [`endorsement::respond`], and [`MemLedger`] stands in for the notary.

use crate::endorsement::{self, EndorsementSession};
use crate::{validate, FlowError, Identity, Lifecycle, MemLedger, Transition};

/// Verifies the proposal, collects the endorsements of all required parties and commits the
/// endorsed transition to the ledger.
pub fn run_flow(
    ledger: &mut MemLedger,
    initiator: &Identity,
    proposal: Transition,
) -> Result<(Transition, Lifecycle), FlowError> {
    validate(&proposal)?;

    let mut session = EndorsementSession::new(proposal, initiator)?;
    while let Some(request) = session.next_request() {
        #[cfg(feature = "log")]
        debug!("Requesting endorsement of {}", request.party);
        session.receive(endorsement::respond(&request))?;
    }
    let tx = session.finish()?;

    let lifecycle = ledger.commit(&tx)?;
    Ok((tx, lifecycle))
}

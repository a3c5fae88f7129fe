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

//! Collection of endorsements over a proposed transition.
//!
//! Signature collection is modelled as an explicit state machine rather than a chain of blocking
//! calls: the initiator asks for the next missing endorsement, delivers the request to the party
//! by whatever transport it has, and feeds the response back into the session. Counterparties
//! run [`respond`], which re-checks the proposal before endorsing it.

use crate::{validate, EndorsementError, Endorsers, Identity, Transition, ValidationFailure};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(lowercase)]
pub enum SessionState {
    /// Some of the required endorsements are still missing.
    Collecting,

    /// All required parties have endorsed the transition.
    Complete,

    /// One of the parties declined to endorse the transition.
    Rejected,
}

/// Request for an endorsement sent to a counterparty.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Request {
    pub party: Identity,
    pub proposal: Transition,
}

/// Counterparty answer to a [`Request`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Response {
    Endorsed(Identity),
    Declined { party: Identity, reason: String },
}

/// Endorsements collected so far for a single transition.
///
/// The set of required endorsers is the one declared by the transition; whether it matches the
/// parties the contract expects is decided by the validator.
#[derive(Getters, Clone, PartialEq, Eq, Debug)]
pub struct EndorsementSession {
    transition: Transition,
    collected: Endorsers,
    #[getter(skip)]
    state: SessionState,
    #[getter(skip)]
    rejection: Option<(Identity, String)>,
}

impl EndorsementSession {
    /// Starts a session; the initiator endorses its own proposal right away.
    pub fn new(transition: Transition, initiator: &Identity) -> Result<Self, EndorsementError> {
        if !transition.endorsers.contains(initiator) {
            return Err(EndorsementError::UnexpectedEndorser(initiator.clone()));
        }
        let mut session = EndorsementSession {
            transition,
            collected: bset![initiator.clone()],
            state: SessionState::Collecting,
            rejection: None,
        };
        session.update_state();
        Ok(session)
    }

    pub fn state(&self) -> SessionState { self.state }

    pub fn required(&self) -> &Endorsers { &self.transition.endorsers }

    /// Parties whose endorsement is still missing.
    pub fn pending(&self) -> impl Iterator<Item = &Identity> {
        self.transition.endorsers.difference(&self.collected)
    }

    /// Next request to deliver, if the session still collects endorsements.
    pub fn next_request(&self) -> Option<Request> {
        if self.state != SessionState::Collecting {
            return None;
        }
        self.pending().next().map(|party| Request {
            party: party.clone(),
            proposal: self.transition.clone(),
        })
    }

    pub fn receive(&mut self, response: Response) -> Result<SessionState, EndorsementError> {
        if self.state != SessionState::Collecting {
            return Err(EndorsementError::Closed);
        }
        match response {
            Response::Endorsed(party) => {
                if !self.transition.endorsers.contains(&party) {
                    return Err(EndorsementError::UnexpectedEndorser(party));
                }
                if !self.collected.insert(party.clone()) {
                    return Err(EndorsementError::DuplicateEndorsement(party));
                }
                #[cfg(feature = "log")]
                debug!("Received endorsement of {party}");
                self.update_state();
            }
            Response::Declined { party, reason } => {
                if !self.transition.endorsers.contains(&party) {
                    return Err(EndorsementError::UnexpectedEndorser(party));
                }
                #[cfg(feature = "log")]
                warn!("{party} declined to endorse the transition: {reason}");
                self.rejection = Some((party, reason));
                self.state = SessionState::Rejected;
            }
        }
        Ok(self.state)
    }

    fn update_state(&mut self) {
        if self.pending().next().is_none() {
            self.state = SessionState::Complete;
        }
    }

    /// Closes the session, returning the transition endorsed by all of the required parties.
    pub fn finish(mut self) -> Result<Transition, EndorsementError> {
        if let Some((party, reason)) = self.rejection.take() {
            return Err(EndorsementError::Declined { party, reason });
        }
        if let Some(party) = self.pending().next() {
            return Err(EndorsementError::Incomplete(party.clone()));
        }
        Ok(self.transition)
    }
}

/// Checks done by a counterparty before endorsing a proposal: it must be about an IOU and it
/// must be valid.
pub fn check_proposal(proposal: &Transition) -> Result<(), ValidationFailure> {
    if proposal.records().next().is_none() {
        return Err(ValidationFailure::NoIouState);
    }
    validate(proposal)
}

/// Counterparty side of the session: endorses a request only if the proposal passes
/// [`check_proposal`].
pub fn respond(request: &Request) -> Response {
    match check_proposal(&request.proposal) {
        Ok(()) => Response::Endorsed(request.party.clone()),
        Err(failure) => Response::Declined {
            party: request.party.clone(),
            reason: failure.to_string(),
        },
    }
}

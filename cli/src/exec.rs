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

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use iou::fs::{Store, StoreError};
use iou::{
    run_flow, ConstructionError, FlowError, Identity, IdentityService, LedgerQuery, Lifecycle,
    MemLedger, PartyDirectory, Transition, TransitionBuilder,
};

use crate::cmd::AmountArg;
use crate::{Args, Cmd, Config, Status};

/// Node state assembled from the data directory for a single command.
struct Node {
    me: Identity,
    config: Config,
    directory: PartyDirectory,
    ledger: MemLedger,
    ledger_path: PathBuf,
}

impl Args {
    pub fn exec(&self) -> anyhow::Result<ExitCode> {
        Ok(match self.run()? {
            Some(status) => status.report(self.json),
            None => ExitCode::SUCCESS,
        })
    }

    /// Executes the command, returning the status of the commands answering with one.
    pub fn run(&self) -> anyhow::Result<Option<Status>> {
        match &self.command {
            Cmd::Init { currency, parties } => {
                self.init(currency.clone(), parties)?;
                Ok(None)
            }
            Cmd::Verify { file } => verify(file).map(Some),
            cmd => self.node()?.exec(cmd, self.json),
        }
    }

    fn init(&self, currency: iou::Currency, parties: &[Identity]) -> anyhow::Result<()> {
        let base_dir = self.base_dir();
        let config_path = self.config_path();
        if config_path.exists() {
            anyhow::bail!("data directory '{}' is already initialized", base_dir.display());
        }

        let me = match &self.party {
            Some(name) => {
                let me: Identity = name.parse()?;
                if !parties.contains(&me) {
                    anyhow::bail!("party '{me}' is not among the parties of the network");
                }
                Some(me)
            }
            None => parties.first().cloned(),
        };
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("unable to create data directory '{}'", base_dir.display()))?;
        let config = Config {
            me,
            parties: parties.iter().cloned().collect(),
            currency,
        };
        config.store(&config_path)?;
        eprintln!("Data directory initialized at '{}'", base_dir.display());
        Ok(())
    }

    fn node(&self) -> anyhow::Result<Node> {
        let config = Config::load(&self.config_path())?;
        let directory = config.directory();

        let name = match (&self.party, &config.me) {
            (Some(name), _) => name.clone(),
            (None, Some(me)) => me.to_string(),
            (None, None) => anyhow::bail!(
                "no party to act as; use `--as` or set `me` in the node configuration"
            ),
        };
        let me = directory
            .resolve(&name)
            .with_context(|| format!("party '{name}' is not present in the network map"))?;

        let ledger_path = self.ledger_path();
        let ledger = if ledger_path.exists() {
            MemLedger::load(&ledger_path)
                .with_context(|| format!("unable to load ledger from '{}'", ledger_path.display()))?
        } else {
            debug!("No ledger at '{}', starting an empty one", ledger_path.display());
            MemLedger::new()
        };

        Ok(Node {
            me,
            config,
            directory,
            ledger,
            ledger_path,
        })
    }
}

fn verify(file: &Path) -> anyhow::Result<Status> {
    let tx = match Transition::load(file) {
        Ok(tx) => tx,
        Err(StoreError::Invalid(failure)) => return Ok(Status::BadRequest(failure.to_string())),
        Err(err) => {
            return Err(err).with_context(|| format!("unable to read '{}'", file.display()));
        }
    };
    Ok(match tx.validate() {
        Ok(()) => Status::Ok(format!("Valid transition: IOU {}", Lifecycle::of(&tx))),
        Err(failure) => Status::BadRequest(failure.to_string()),
    })
}

impl Node {
    fn builder(&self) -> TransitionBuilder<'_, MemLedger, PartyDirectory, MemLedger> {
        TransitionBuilder::new(self.me.clone(), &self.ledger, &self.directory, &self.ledger)
    }

    fn amount(&self, arg: &AmountArg) -> iou::Amount { arg.resolve(&self.config.currency) }

    /// Runs the command, returning the status for the state-changing ones.
    fn exec(&mut self, cmd: &Cmd, json: bool) -> anyhow::Result<Option<Status>> {
        match cmd {
            Cmd::Init { .. } | Cmd::Verify { .. } => {
                unreachable!("handled before the node is loaded")
            }

            Cmd::Me if json => println!("{}", serde_json::json!({ "me": self.me })),
            Cmd::Me => println!("{}", self.me),

            Cmd::Parties => {
                let peers = self
                    .directory
                    .parties()
                    .into_iter()
                    .filter(|party| party != &self.me)
                    .collect::<Vec<_>>();
                if json {
                    println!("{}", serde_json::json!({ "peers": peers }));
                } else {
                    for party in peers {
                        println!("{party}");
                    }
                }
            }

            Cmd::Ious => {
                let ious = self
                    .ledger
                    .records()
                    .into_iter()
                    .filter(|record| record.participants().contains(&self.me))
                    .collect::<Vec<_>>();
                if json {
                    println!("{}", serde_json::to_string_pretty(&ious)?);
                } else if ious.is_empty() {
                    eprintln!("No IOUs found");
                } else {
                    println!(
                        "{:<32}\t{:>16}\t{:>16}\t{:<16}\t{}",
                        "IOU id", "Amount", "Paid", "Lender", "Borrower"
                    );
                    for record in ious {
                        println!(
                            "{:<32}\t{:>16}\t{:>16}\t{:<16}\t{}",
                            record.record_id(),
                            record.amount(),
                            record.paid(),
                            record.lender(),
                            record.borrower()
                        );
                    }
                }
            }

            Cmd::Cash => {
                let cash = self.ledger.cash_of(&self.me);
                if json {
                    println!("{}", serde_json::to_string_pretty(&cash)?);
                } else if cash.is_empty() {
                    eprintln!("No cash held by {}", self.me);
                } else {
                    for amount in cash {
                        println!("{amount}");
                    }
                }
            }

            Cmd::History => {
                let history = self.ledger.history();
                if json {
                    println!("{}", serde_json::to_string_pretty(history)?);
                } else {
                    for entry in history {
                        println!("#{}\t{}\t{}", entry.seq, entry.record_id, entry.lifecycle);
                    }
                }
            }

            Cmd::Issue { amount, lender } => {
                let proposal = self.builder().issue(self.amount(amount), lender);
                return self
                    .transact(proposal, |tx| match tx.produced.as_slice() {
                        [record] => format!(
                            "IOU {} committed to ledger.\n{record}",
                            record.record_id()
                        ),
                        _ => s!("IOU committed to ledger."),
                    })
                    .map(Some);
            }

            Cmd::Transfer { id, new_lender } => {
                let proposal = self.builder().transfer(*id, new_lender);
                return self
                    .transact(proposal, |_| format!("IOU {id} transferred to {new_lender}."))
                    .map(Some);
            }

            Cmd::Settle { id, amount } => {
                let amount = self.amount(amount);
                let proposal = self.builder().settle(*id, amount.clone());
                return self
                    .transact(proposal, |_| format!("{amount} paid off on IOU id {id}."))
                    .map(Some);
            }

            Cmd::SelfIssueCash { amount } => {
                let amount = self.amount(amount);
                let result = self.ledger.self_issue_cash(&self.me, &amount);
                if result.is_ok() {
                    self.save()?;
                }
                let me = &self.me;
                return Ok(Some(Status::from_result(
                    result.map(|balance| format!("Issued {amount} to {me}; balance is {balance}.")),
                )));
            }
        }
        Ok(None)
    }

    /// Collects endorsements for the proposal and commits it, saving the ledger on success.
    fn transact(
        &mut self,
        proposal: Result<Transition, ConstructionError>,
        message: impl FnOnce(&Transition) -> String,
    ) -> anyhow::Result<Status> {
        let result = proposal
            .map_err(FlowError::from)
            .and_then(|proposal| run_flow(&mut self.ledger, &self.me, proposal));
        match result {
            Ok((tx, lifecycle)) => {
                self.save()?;
                info!("IOU {lifecycle}");
                Ok(Status::Created(message(&tx)))
            }
            Err(err) => {
                warn!("Transition refused: {err}");
                Ok(Status::BadRequest(err.to_string()))
            }
        }
    }

    fn save(&self) -> anyhow::Result<()> {
        self.ledger
            .store(&self.ledger_path)
            .with_context(|| format!("unable to save ledger to '{}'", self.ledger_path.display()))
    }
}

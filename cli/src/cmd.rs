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

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueHint;
use iou::{Amount, AmountParseError, Currency, Identity, RecordId};

/// Amount given on the command line: either `1000 GBP`, `1000GBP`, or a bare number of minor
/// units in the node's default currency.
#[derive(Clone, PartialEq, Eq, Debug, Display)]
pub enum AmountArg {
    #[display(inner)]
    Full(Amount),

    #[display(inner)]
    Bare(u64),
}

impl FromStr for AmountArg {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse()
                .map(AmountArg::Bare)
                .map_err(|_| AmountParseError::InvalidAmount(s.to_owned()));
        }
        Amount::from_str(s).map(AmountArg::Full)
    }
}

impl AmountArg {
    pub fn resolve(&self, default_currency: &Currency) -> Amount {
        match self {
            AmountArg::Full(amount) => amount.clone(),
            AmountArg::Bare(quantity) => Amount::new(*quantity, default_currency.clone()),
        }
    }
}

#[derive(Subcommand, Clone, PartialEq, Eq, Debug, Display)]
#[display(lowercase)]
pub enum Cmd {
    /// Initializes the data directory with a node configuration listing the network parties.
    #[display("init")]
    Init {
        /// Default currency for amounts given without a currency code.
        #[clap(short, long, default_value = "GBP")]
        currency: Currency,

        /// Parties of the network; the first one becomes the default node identity unless `--as`
        /// is given.
        #[clap(required = true)]
        parties: Vec<Identity>,
    },

    /// Prints the identity the node acts as.
    Me,

    /// Lists the other parties of the network.
    Parties,

    /// Lists current IOUs the node is a lender or a borrower of.
    Ious,

    /// Prints cash balances of the node.
    Cash,

    /// Prints the ledger commit log.
    History,

    /// Issues a new IOU borrowed by this node from the lender.
    #[display("issue")]
    Issue {
        /// Amount borrowed.
        amount: AmountArg,

        /// Lender of the IOU.
        lender: String,
    },

    /// Transfers an IOU lent by this node to a new lender.
    #[display("transfer")]
    Transfer {
        /// IOU to transfer.
        id: RecordId,

        /// New lender.
        #[clap(value_name = "PARTY")]
        new_lender: String,
    },

    /// Pays off an IOU borrowed by this node, fully or partially.
    #[display("settle")]
    Settle {
        /// IOU to settle.
        id: RecordId,

        /// Amount to pay, not more than the outstanding amount.
        amount: AmountArg,
    },

    /// Issues cash to this node.
    #[display("self-issue-cash")]
    SelfIssueCash {
        /// Amount of cash to issue.
        amount: AmountArg,
    },

    /// Checks a transition read from a YAML file.
    #[display("verify")]
    Verify {
        /// File with the transition.
        #[clap(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

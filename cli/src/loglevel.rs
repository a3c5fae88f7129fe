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

use std::env;

use log::LevelFilter;

/// Represents desired logging verbosity level
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum LogLevel {
    /// Report only errors to `stderr` and normal program output to stdout. Corresponds to zero
    /// verbosity flags.
    #[display("error")]
    Error = 0,

    /// Report warning messages and errors, plus standard program output. Corresponds to a single
    /// `-v` verbosity flag.
    #[display("warn")]
    Warn,

    /// Report committed transitions and cash issuance, warnings and errors. Corresponds to a
    /// double `-vv` verbosity flag.
    #[display("info")]
    Info,

    /// Report endorsement requests and transition construction, plus everything above.
    /// Corresponds to triple `-vvv` verbosity flag.
    #[display("debug")]
    Debug,

    /// Print all possible messages including tracing information. Corresponds to quadruple
    /// `-vvvv` verbosity flag.
    #[display("trace")]
    Trace,
}

impl From<u8> for LogLevel {
    fn from(val: u8) -> Self { Self::from_verbosity_flag_count(val) }
}

impl From<LogLevel> for u8 {
    fn from(log_level: LogLevel) -> Self { log_level.verbosity_flag_count() }
}

impl LogLevel {
    /// Indicates number of required verbosity flags
    pub fn verbosity_flag_count(&self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// Constructs enum value from a given number of verbosity flags
    pub fn from_verbosity_flag_count(level: u8) -> Self {
        match level {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Installs `env_logger` at this level unless `RUST_LOG` says otherwise.
    pub fn apply(&self) {
        log::set_max_level(LevelFilter::Trace);
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| self.to_string());
        env_logger::Builder::new().parse_filters(&filter).init();
    }
}

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

use clap::ValueHint;

use crate::Cmd;

pub const IOU_DATA_DIR_ENV: &str = "IOU_DATA_DIR";
pub const IOU_PARTY_ENV: &str = "IOU_PARTY";

#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd"
))]
pub const IOU_DATA_DIR: &str = "~/.iou";
#[cfg(target_os = "macos")]
pub const IOU_DATA_DIR: &str = "~/Library/Application Support/IOU Ledger";
#[cfg(target_os = "windows")]
pub const IOU_DATA_DIR: &str = "~\\AppData\\Local\\IOU Ledger";
#[cfg(target_os = "ios")]
pub const IOU_DATA_DIR: &str = "~/Documents";
#[cfg(target_os = "android")]
pub const IOU_DATA_DIR: &str = ".";

pub const CONFIG_FILE: &str = "iou.toml";
pub const LEDGER_FILE: &str = "ledger.yaml";

/// Command-line arguments
#[derive(Parser)]
#[derive(Clone, Eq, PartialEq, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Set verbosity level.
    ///
    /// Can be used multiple times to increase verbosity.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Location of the data directory
    #[clap(
        short,
        long,
        global = true,
        default_value = IOU_DATA_DIR,
        env = IOU_DATA_DIR_ENV,
        value_hint = ValueHint::DirPath
    )]
    pub data_dir: PathBuf,

    /// Party the node acts as, overriding `me` from the node configuration
    #[clap(short = 'a', long = "as", global = true, env = IOU_PARTY_ENV)]
    pub party: Option<String>,

    /// Print output as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Command to execute
    #[clap(subcommand)]
    pub command: Cmd,
}

impl Args {
    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).to_string())
    }

    pub fn config_path(&self) -> PathBuf { self.base_dir().join(CONFIG_FILE) }

    pub fn ledger_path(&self) -> PathBuf { self.base_dir().join(LEDGER_FILE) }
}

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

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use iou::{Currency, Identity, PartyDirectory};

/// Node configuration kept in `iou.toml` inside the data directory.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate", rename_all = "camelCase")]
pub struct Config {
    /// Identity the node acts as when `--as` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<Identity>,

    /// Network map: every party known to the node, including itself.
    pub parties: BTreeSet<Identity>,

    /// Currency of amounts given as a bare number.
    pub currency: Currency,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path).with_context(|| {
            format!(
                "unable to read node configuration from '{}'; run `iou init` first",
                path.display()
            )
        })?;
        toml::from_str(&data).with_context(|| format!("invalid configuration in '{}'", path.display()))
    }

    pub fn store(&self, path: &Path) -> anyhow::Result<()> {
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("unable to write configuration to '{}'", path.display()))
    }

    pub fn directory(&self) -> PartyDirectory { self.parties.iter().cloned().collect() }
}

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

//! YAML files for the ledger and for transitions submitted from outside.

use std::fs;
use std::io;
use std::path::Path;

use amplify::IoError;

use crate::{MemLedger, Transition, UncheckedTransition, ValidationFailure};

#[derive(Debug, Display, Error, From)]
#[display(inner)]
pub enum StoreError {
    #[from]
    #[from(io::Error)]
    File(IoError),

    #[from]
    Yaml(serde_yaml::Error),

    #[from]
    Invalid(ValidationFailure),
}

pub trait Store: Sized {
    fn load(path: impl AsRef<Path>) -> Result<Self, StoreError>;
    fn store(&self, path: impl AsRef<Path>) -> Result<(), StoreError>;
}

impl Store for MemLedger {
    fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file = fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    fn store(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let file = fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}

impl Store for Transition {
    /// Reads a transition which may lack an intent or carry an unknown one; such a file fails
    /// with [`ValidationFailure::MissingCommand`].
    fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file = fs::File::open(path)?;
        let unchecked: UncheckedTransition = serde_yaml::from_reader(file)?;
        Ok(Transition::try_from(unchecked)?)
    }

    fn store(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let file = fs::File::create(path)?;
        serde_yaml::to_writer(file, &UncheckedTransition::from(self.clone()))?;
        Ok(())
    }
}

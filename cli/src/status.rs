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

use std::fmt::Display;
use std::process::ExitCode;

use serde_json::json;

/// Outcome of a command, rendered the way an HTTP endpoint of the node would answer.
#[derive(Clone, PartialEq, Eq, Debug, Display)]
pub enum Status {
    #[display("200 OK")]
    Ok(String),

    #[display("201 Created")]
    Created(String),

    #[display("400 Bad Request")]
    BadRequest(String),
}

impl Status {
    pub fn from_result<E: Display>(result: Result<String, E>) -> Self {
        match result {
            Ok(body) => Status::Created(body),
            Err(err) => Status::BadRequest(err.to_string()),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Status::Ok(_) => 200,
            Status::Created(_) => 201,
            Status::BadRequest(_) => 400,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Status::Ok(body) | Status::Created(body) | Status::BadRequest(body) => body,
        }
    }

    pub fn is_success(&self) -> bool { !matches!(self, Status::BadRequest(_)) }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "status": self.code(),
            "body": self.body(),
        })
    }

    /// Prints the status and returns the matching process exit code.
    pub fn report(&self, json: bool) -> ExitCode {
        if json {
            println!("{}", self.to_json());
        } else {
            println!("{self}");
            println!("{}", self.body());
        }
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

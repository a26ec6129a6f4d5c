// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid simulation configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("No candidate identifier was admitted after {attempts} attempts")]
    AdmissionExhausted { attempts: u64 },

    #[error("Disjoint compromised groups were not found after injecting {bad_nodes} bad nodes")]
    SearchExhausted { bad_nodes: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize the simulation export: {0}")]
    Json(#[from] serde_json::Error),
}

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
    #[error("I/O error while preparing log output: {0}")]
    Io(#[from] std::io::Error),

    #[error("A global tracing subscriber has already been set: {0}")]
    TryInitError(#[from] tracing_subscriber::util::TryInitError),

    #[error("Could not reload the log filter: {0}")]
    ReloadError(#[from] tracing_subscriber::reload::Error),

    #[error("Invalid log format '{0}', expected 'default' or 'json'")]
    InvalidLogFormat(String),

    #[error("Invalid log output destination: {0}")]
    InvalidLogOutputDest(String),
}

// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Tracing setup shared by the address-space analysis crates.
//!
//! Build a [`LogBuilder`] with the application's default targets, choose where the output
//! goes, then call [`LogBuilder::initialize`] once at startup. The `ANT_LOG` environment
//! variable can raise verbosity (`std`, `verbose`) or set per-target levels
//! (`ant_address_space=debug`).

mod error;
mod layers;

use crate::layers::TracingLayers;
use std::{fmt, path::PathBuf};
use tracing_core::Level;
use tracing_subscriber::prelude::*;

pub use error::{Error, Result};
pub use layers::{ANT_LOG_ENV, LOG_FILE_NAME, ReloadHandle};
pub use tracing_appender::non_blocking::WorkerGuard;

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutputDest {
    Stdout,
    Stderr,
    /// A `.log` file, or a directory receiving [`LOG_FILE_NAME`].
    Path(PathBuf),
}

impl LogOutputDest {
    /// Accepts `stdout`, `stderr`, or any non-empty path.
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "stdout" => Ok(LogOutputDest::Stdout),
            "stderr" => Ok(LogOutputDest::Stderr),
            "" => Err(Error::InvalidLogOutputDest(
                "an empty path is not a valid destination".to_string(),
            )),
            path => Ok(LogOutputDest::Path(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for LogOutputDest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutputDest::Stdout => write!(f, "stdout"),
            LogOutputDest::Stderr => write!(f, "stderr"),
            LogOutputDest::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Default,
    Json,
}

impl LogFormat {
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            _ => Err(Error::InvalidLogFormat(val.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Default => "default",
            LogFormat::Json => "json",
        }
    }
}

/// How much of the workspace logs, independent of the application's own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Only the application's default targets.
    Minimal,
    /// INFO for every crate of the tool.
    Standard,
    /// TRACE for every crate of the tool.
    Verbose,
}

impl From<u8> for VerbosityLevel {
    fn from(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Minimal,
            1 => VerbosityLevel::Standard,
            _ => VerbosityLevel::Verbose,
        }
    }
}

pub struct LogBuilder {
    default_logging_targets: Vec<(String, Level)>,
    output_dest: LogOutputDest,
    format: LogFormat,
    print_updates_to_stdout: bool,
    verbosity: Option<VerbosityLevel>,
}

impl LogBuilder {
    /// Start from the application's default targets, logging to stderr.
    pub fn new(default_logging_targets: Vec<(String, Level)>) -> Self {
        Self {
            default_logging_targets,
            output_dest: LogOutputDest::Stderr,
            format: LogFormat::Default,
            print_updates_to_stdout: true,
            verbosity: None,
        }
    }

    pub fn output_dest(&mut self, output_dest: LogOutputDest) {
        self.output_dest = output_dest;
    }

    pub fn format(&mut self, format: LogFormat) {
        self.format = format;
    }

    /// Whether setup messages ("Logging to file ...") are printed.
    pub fn print_updates_to_stdout(&mut self, print: bool) {
        self.print_updates_to_stdout = print;
    }

    pub fn verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = Some(verbosity);
    }

    /// Install the global subscriber. Keep the returned guard alive for as long as file
    /// output should keep flushing.
    pub fn initialize(self) -> Result<(ReloadHandle, Option<WorkerGuard>)> {
        let mut layers = TracingLayers::default();
        let reload_handle = layers.fmt_layer(
            self.default_logging_targets,
            &self.output_dest,
            self.format,
            self.print_updates_to_stdout,
            self.verbosity,
        )?;

        tracing_subscriber::registry()
            .with(layers.layers)
            .try_init()?;

        Ok((reload_handle, layers.log_appender_guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_output_dest_parsing() -> color_eyre::Result<()> {
        assert_eq!(LogOutputDest::parse_from_str("stdout")?, LogOutputDest::Stdout);
        assert_eq!(LogOutputDest::parse_from_str("stderr")?, LogOutputDest::Stderr);
        assert_eq!(
            LogOutputDest::parse_from_str("/tmp/logs")?,
            LogOutputDest::Path(PathBuf::from("/tmp/logs"))
        );
        assert!(LogOutputDest::parse_from_str("").is_err());
        Ok(())
    }

    #[test]
    fn log_format_parsing() {
        assert!(matches!(LogFormat::parse_from_str("json"), Ok(LogFormat::Json)));
        assert!(matches!(LogFormat::parse_from_str("default"), Ok(LogFormat::Default)));
        assert!(matches!(
            LogFormat::parse_from_str("yaml"),
            Err(Error::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn verbosity_from_flag_count() {
        assert_eq!(VerbosityLevel::from(0), VerbosityLevel::Minimal);
        assert_eq!(VerbosityLevel::from(1), VerbosityLevel::Standard);
        assert_eq!(VerbosityLevel::from(4), VerbosityLevel::Verbose);
    }

    #[test]
    fn file_destination_creates_parent_and_log_file() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let dest = LogOutputDest::Path(dir.path().join("nested"));
        let mut layers = TracingLayers::default();
        let handle = layers.fmt_layer(vec![], &dest, LogFormat::Json, false, None)?;

        assert!(dir.path().join("nested").join(LOG_FILE_NAME).exists());
        assert!(layers.log_appender_guard.is_some());
        assert_eq!(layers.layers.len(), 1);

        // The filter can be swapped while the layer is alive.
        handle.modify_log_level("ant_address_space=debug,std")?;
        drop(layers);
        assert!(handle.modify_log_level("ant_address_space=trace").is_err());
        Ok(())
    }
}

// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{LogFormat, LogOutputDest, VerbosityLevel, error::Result};
use std::{collections::BTreeMap, path::Path};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    Layer, Registry,
    filter::Targets,
    fmt::{
        self as tracing_fmt, FmtContext, FormatEvent, FormatFields,
        format::Writer,
        time::{FormatTime, SystemTime},
    },
    layer::Filter,
    registry::LookupSpan,
    reload::{self, Handle},
};

/// Name of the file written when the output destination is a directory.
pub const LOG_FILE_NAME: &str = "address-space-tool.log";

/// Environment variable holding verbosity keywords and per-target overrides.
pub const ANT_LOG_ENV: &str = "ANT_LOG";

const VERBOSITY_VERBOSE: &str = "verbose";
const VERBOSITY_VERBOSE_SHORT: &str = "v";
const VERBOSITY_STANDARD: &str = "standard";
const VERBOSITY_STANDARD_SHORT: &str = "std";
const VERBOSITY_MINIMAL: &str = "minimal";
const VERBOSITY_MINIMAL_SHORT: &str = "min";

/// Crates whose output is raised by the `standard` and `verbose` keywords.
const KNOWN_TARGETS: [&str; 3] = ["address_space_tool", "ant_address_space", "ant_logging"];

/// Handle that implements functions to change the log level on the fly.
pub struct ReloadHandle(pub(crate) Handle<Box<dyn Filter<Registry> + Send + Sync>, Registry>);

impl ReloadHandle {
    /// Replace the active filter using the same CSV syntax as `ANT_LOG`,
    /// e.g. `ant_address_space=debug,std`.
    pub fn modify_log_level(&self, logging_value: &str) -> Result<()> {
        let targets = get_logging_targets(Some(logging_value), vec![], None, false);
        self.0.modify(|old_filter| {
            let new_filter: Box<dyn Filter<Registry> + Send + Sync> =
                Box::new(Targets::new().with_targets(targets));
            *old_filter = new_filter;
        })?;

        Ok(())
    }
}

/// Single-line event format: `[time LEVEL module line/span] message fields`.
#[derive(Default)]
pub(crate) struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let module = metadata.module_path().unwrap_or("<unknown module>");
        let line = metadata.line().unwrap_or(0);

        write!(writer, "[")?;
        SystemTime.format_time(&mut writer)?;
        write!(writer, " {} {module} {line}", metadata.level())?;
        ctx.visit_spans(|span| write!(writer, "/{}", span.name()))?;
        write!(writer, "] ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// The layers composed onto the registry, plus the guard keeping a file writer alive.
#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<Box<dyn Layer<Registry> + Send + Sync>>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

impl TracingLayers {
    pub(crate) fn fmt_layer(
        &mut self,
        application_log_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
        print_updates_to_stdout: bool,
        verbosity: Option<VerbosityLevel>,
    ) -> Result<ReloadHandle> {
        let layer = match output_dest {
            LogOutputDest::Stdout => match format {
                LogFormat::Json => tracing_fmt::layer().json().flatten_event(true).boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .boxed(),
            },
            LogOutputDest::Stderr => match format {
                LogFormat::Json => tracing_fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr)
                    .boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .with_writer(std::io::stderr)
                    .boxed(),
            },
            LogOutputDest::Path(path) => {
                let writer = self.file_writer(path, print_updates_to_stdout)?;
                match format {
                    LogFormat::Json => tracing_fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_writer(writer)
                        .boxed(),
                    LogFormat::Default => tracing_fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .event_format(LogFormatter)
                        .boxed(),
                }
            }
        };

        let ant_log = std::env::var(ANT_LOG_ENV).ok();
        let targets = get_logging_targets(
            ant_log.as_deref(),
            application_log_targets,
            verbosity,
            print_updates_to_stdout,
        );

        let target_filters: Box<dyn Filter<Registry> + Send + Sync> =
            Box::new(Targets::new().with_targets(targets));
        let (filter, reload_handle) = reload::Layer::new(target_filters);

        self.layers.push(Box::new(layer.with_filter(filter)));

        Ok(ReloadHandle(reload_handle))
    }

    /// A path ending in `.log` is used as the file itself, anything else is treated as a
    /// directory that receives [`LOG_FILE_NAME`].
    fn file_writer(&mut self, path: &Path, print_updates_to_stdout: bool) -> Result<NonBlocking> {
        let file_path = if path.extension() == Some(std::ffi::OsStr::new("log")) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path.to_path_buf()
        } else {
            std::fs::create_dir_all(path)?;
            path.join(LOG_FILE_NAME)
        };
        if print_updates_to_stdout {
            println!("Logging to file: {file_path:?}");
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        self.log_appender_guard = Some(guard);
        Ok(writer)
    }
}

/// Computes the final logging targets.
///
/// The base comes from CLI verbosity when it is `standard` or `verbose`, then from an
/// `ANT_LOG` keyword, and otherwise from the application defaults. Explicit
/// `target=level` entries in `ANT_LOG` are always applied on top.
pub(crate) fn get_logging_targets(
    ant_log_value: Option<&str>,
    application_log_targets: Vec<(String, Level)>,
    verbosity: Option<VerbosityLevel>,
    print_updates: bool,
) -> Vec<(String, Level)> {
    let (ant_log_keyword, custom_overrides) = parse_ant_log(ant_log_value);

    let effective = match verbosity {
        Some(VerbosityLevel::Standard) | Some(VerbosityLevel::Verbose) => verbosity,
        Some(VerbosityLevel::Minimal) | None => ant_log_keyword,
    };

    let mut final_targets = match effective {
        Some(VerbosityLevel::Standard) => known_targets(Level::INFO),
        Some(VerbosityLevel::Verbose) => known_targets(Level::TRACE),
        Some(VerbosityLevel::Minimal) | None => BTreeMap::from_iter(application_log_targets),
    };
    if print_updates {
        let base = match effective {
            Some(VerbosityLevel::Standard) => "standard verbosity",
            Some(VerbosityLevel::Verbose) => "verbose verbosity",
            Some(VerbosityLevel::Minimal) | None => "application default log targets",
        };
        if custom_overrides.is_empty() {
            println!("Using {base}");
        } else {
            println!("Using {base} with {ANT_LOG_ENV} overrides");
        }
    }

    final_targets.extend(custom_overrides);
    final_targets.into_iter().collect()
}

/// Splits an `ANT_LOG` value into its verbosity keyword (last one wins) and the
/// `target=level` overrides. A bare target defaults to `trace`; unknown levels are skipped.
fn parse_ant_log(ant_log_value: Option<&str>) -> (Option<VerbosityLevel>, BTreeMap<String, Level>) {
    let mut keyword_verbosity = None;
    let mut custom_overrides = BTreeMap::new();

    let Some(value) = ant_log_value else {
        return (keyword_verbosity, custom_overrides);
    };

    for part in value.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part {
            VERBOSITY_VERBOSE | VERBOSITY_VERBOSE_SHORT => {
                keyword_verbosity = Some(VerbosityLevel::Verbose)
            }
            VERBOSITY_STANDARD | VERBOSITY_STANDARD_SHORT => {
                keyword_verbosity = Some(VerbosityLevel::Standard)
            }
            VERBOSITY_MINIMAL | VERBOSITY_MINIMAL_SHORT => {
                keyword_verbosity = Some(VerbosityLevel::Minimal)
            }
            custom => {
                let mut split = custom.splitn(2, '=');
                let target = split.next().unwrap_or_default();
                if target.is_empty() {
                    continue;
                }
                if let Some(level) = parse_log_level(split.next().unwrap_or("trace")) {
                    custom_overrides.insert(target.to_string(), level);
                }
            }
        }
    }

    (keyword_verbosity, custom_overrides)
}

fn known_targets(level: Level) -> BTreeMap<String, Level> {
    KNOWN_TARGETS
        .iter()
        .map(|target| (target.to_string(), level))
        .collect()
}

fn parse_log_level(log_level: &str) -> Option<Level> {
    match log_level.to_lowercase().as_str() {
        "info" | "i" => Some(Level::INFO),
        "debug" | "d" => Some(Level::DEBUG),
        "trace" | "t" => Some(Level::TRACE),
        "warn" | "w" => Some(Level::WARN),
        "error" | "e" => Some(Level::ERROR),
        _ => None,
    }
}

// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod commands;

use crate::commands::*;
use ant_address_space::{
    ConsoleReporter, Identifier, NodeId, Simulation, SimulationConfig, SimulationExport, XorName,
};
use ant_logging::{LogBuilder, LogOutputDest, VerbosityLevel};
use clap::Parser;
use color_eyre::Result;
use std::path::Path;
use tracing::Level;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cmd::parse();

    let _log_guard = init_logging(&args)?;

    let mut config = args.simulation_config();
    if !args.no_prompt {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        config.prompt_for_overrides(&mut input, &mut output)?;
        println!();
    }

    tracing::info!(
        "Running with {}-bit identifiers: {config:?}",
        args.address_width
    );
    match args.address_width {
        AddressWidth::Bits256 => run::<XorName>(config, args.json_output.as_deref()),
        AddressWidth::Bits512 => run::<NodeId>(config, args.json_output.as_deref()),
    }
}

fn run<I: Identifier>(config: SimulationConfig, json_output: Option<&Path>) -> Result<()> {
    let mut simulation = Simulation::<I>::new(config)?;
    let mut reporter = ConsoleReporter::stdout();
    let summary = simulation.run(&mut reporter)?;

    if let Some(path) = json_output {
        SimulationExport::from_summary(&summary).write_json(path)?;
        println!("Exported results to {}", path.display());
    }
    Ok(())
}

fn init_logging(args: &Cmd) -> Result<Option<ant_logging::WorkerGuard>> {
    let logging_targets = vec![
        ("address_space_tool".to_string(), Level::WARN),
        ("ant_address_space".to_string(), Level::WARN),
    ];
    let mut log_builder = LogBuilder::new(logging_targets);
    log_builder.output_dest(args.log_output_dest.clone());
    if let Some(format) = args.log_format {
        log_builder.format(format);
    }
    log_builder.print_updates_to_stdout(matches!(args.log_output_dest, LogOutputDest::Path(_)));
    if args.verbose > 0 {
        log_builder.verbosity(VerbosityLevel::from(args.verbose));
    }
    let (_reload_handle, guard) = log_builder.initialize()?;
    Ok(guard)
}

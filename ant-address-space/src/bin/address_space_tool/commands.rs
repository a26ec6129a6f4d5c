// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use ant_address_space::{
    CommonLeadingBitsAlgorithm, SimulationConfig,
    config::{
        DEFAULT_BAD_GROUP_COUNT, DEFAULT_GOOD_COUNT, DEFAULT_GROUP_SIZE, DEFAULT_LEEWAY,
        DEFAULT_MAJORITY_SIZE, DEFAULT_TARGET_COUNT, DEFAULT_TOTAL_RANDOM_ATTEMPTS,
    },
};
use ant_logging::{LogFormat, LogOutputDest};
use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressWidth {
    Bits256,
    Bits512,
}

impl fmt::Display for AddressWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressWidth::Bits256 => write!(f, "256"),
            AddressWidth::Bits512 => write!(f, "512"),
        }
    }
}

pub fn parse_address_width(val: &str) -> Result<AddressWidth> {
    match val {
        "256" => Ok(AddressWidth::Bits256),
        "512" => Ok(AddressWidth::Bits512),
        _ => Err(eyre!("Invalid address width: {val}. Valid values are 256 or 512")),
    }
}

pub fn parse_positive(val: &str) -> Result<usize> {
    let value: usize = val
        .parse()
        .map_err(|err| eyre!("Invalid number {val:?}: {err}"))?;
    if value == 0 {
        return Err(eyre!("The value must be greater than zero"));
    }
    Ok(value)
}

/// Simulates an adversary trying to control close groups in an XOR address space whose nodes
/// must pass an admission check when joining.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cmd {
    /// Number of good nodes in the network before any bad node joins.
    #[clap(long, default_value_t = DEFAULT_GOOD_COUNT, value_parser = parse_positive)]
    pub good_count: usize,

    /// Close group size.
    #[clap(long, default_value_t = DEFAULT_GROUP_SIZE, value_parser = parse_positive)]
    pub group_size: usize,

    /// Bad members needed for a close group to be compromised.
    #[clap(long, default_value_t = DEFAULT_MAJORITY_SIZE, value_parser = parse_positive)]
    pub majority_size: usize,

    /// Disjoint compromised groups the adversary aims for, also the length of each chain of
    /// linked addresses.
    #[clap(long, default_value_t = DEFAULT_BAD_GROUP_COUNT, value_parser = parse_positive)]
    pub bad_group_count: usize,

    /// Number of linked random addresses to check.
    #[clap(long, default_value_t = DEFAULT_TOTAL_RANDOM_ATTEMPTS, value_parser = parse_positive)]
    pub random_attempts: usize,

    /// Leeway of common leading bits allowed when admitting a node.
    #[clap(long, default_value_t = DEFAULT_LEEWAY, value_parser = parse_positive)]
    pub leeway: usize,

    /// Number of evenly spread target addresses checked for compromised groups.
    #[clap(long, default_value_t = DEFAULT_TARGET_COUNT, value_parser = parse_positive)]
    pub target_count: usize,

    /// How pairwise common leading bits are summarised.
    ///
    /// Valid values are "highest", "lowest" or "mean".
    #[clap(long, default_value_t = CommonLeadingBitsAlgorithm::Highest, verbatim_doc_comment)]
    pub algorithm: CommonLeadingBitsAlgorithm,

    /// Width of node identifiers in bits: 256 or 512.
    #[clap(long, default_value_t = AddressWidth::Bits512, value_parser = parse_address_width)]
    pub address_width: AddressWidth,

    /// Seed for a reproducible run.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Run the linked address trials on all cores.
    #[clap(long)]
    pub parallel: bool,

    /// Write the results as JSON to this file.
    #[clap(long)]
    pub json_output: Option<PathBuf>,

    /// Use the command line values without prompting for overrides.
    #[clap(long)]
    pub no_prompt: bool,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stdout", "stderr" or a path. A path ending in ".log" is used as the
    /// log file, any other path is treated as a directory.
    ///
    /// `stderr` is the default value.
    #[clap(long, default_value_t = LogOutputDest::Stderr, value_parser = LogOutputDest::parse_from_str, verbatim_doc_comment)]
    pub log_output_dest: LogOutputDest,

    /// Specify the logging format: "default" or "json".
    #[clap(long, value_parser = LogFormat::parse_from_str)]
    pub log_format: Option<LogFormat>,

    /// Increase logging verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cmd {
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            good_count: self.good_count,
            group_size: self.group_size,
            majority_size: self.majority_size,
            bad_group_count: self.bad_group_count,
            total_random_attempts: self.random_attempts,
            leeway: self.leeway,
            algorithm: self.algorithm,
            target_count: self.target_count,
            seed: self.seed,
            parallel_trials: self.parallel,
            ..Default::default()
        }
    }
}

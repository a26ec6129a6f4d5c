// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Human-readable output of a simulation run.

use crate::{identifier::Identifier, node::BadGroup};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Receives progress and results as the simulation produces them. Every method defaults to
/// doing nothing.
pub trait Reporter<I: Identifier> {
    fn node_admitted(&mut self, _honest: bool, _attempts: u64, _network_size: usize) {}

    fn network_initialised(&mut self, _good_count: usize, _average_attempts: f64) {}

    fn targets_created(&mut self, _count: usize) {}

    fn bad_nodes_injecting(&mut self) {}

    /// The disjoint search finished after `bad_count` bad nodes joined.
    fn bad_groups_found(&mut self, _groups: &[BadGroup<I>], _bad_count: usize, _average_attempts: f64) {
    }

    fn chain_search_started(&mut self) {}

    /// `trial` is 1-based.
    fn chain_found(&mut self, _trial: usize, _chain: &[BadGroup<I>]) {}

    fn chain_summary(&mut self, _compromised: usize, _total: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl<I: Identifier> Reporter<I> for NullReporter {}

/// Coloured console output: cyan for progress, red for compromise, green and yellow for
/// good and bad members.
pub struct ConsoleReporter<W> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: ColoredString) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!("Failed to write report line: {err}");
        }
    }

    fn report_bad_groups<I: Identifier>(&mut self, groups: &[BadGroup<I>]) {
        for (index, group) in groups.iter().enumerate() {
            self.emit(
                format!("Bad group {index} close to target {}:", group.target.short_id()).normal(),
            );
            for node in &group.nodes {
                if node.honest {
                    self.emit(format!("{} (good node)", node.id.short_id()).green());
                } else {
                    self.emit(format!("{} (bad node)", node.id.short_id()).yellow());
                }
            }
        }
    }
}

impl<I: Identifier, W: Write> Reporter<I> for ConsoleReporter<W> {
    fn node_admitted(&mut self, honest: bool, attempts: u64, network_size: usize) {
        let kind = if honest { "good" } else { "bad" };
        self.emit(
            format!(
                "Added a {kind} node after {attempts} attempt(s) in a network of size {network_size}."
            )
            .cyan(),
        );
    }

    fn network_initialised(&mut self, good_count: usize, average_attempts: f64) {
        self.emit(
            format!("\nAdded {good_count} good nodes, averaging {average_attempts} attempt(s) each.")
                .cyan(),
        );
    }

    fn targets_created(&mut self, count: usize) {
        self.emit(format!("Created {count} evenly-distributed target addresses.").cyan());
    }

    fn bad_nodes_injecting(&mut self) {
        self.emit("Adding bad nodes and checking for compromised groups...".cyan());
    }

    fn bad_groups_found(&mut self, groups: &[BadGroup<I>], bad_count: usize, average_attempts: f64) {
        self.emit(
            format!(
                "Got {} bad groups after adding {bad_count} bad nodes, averaging {average_attempts} attempt(s) each.",
                groups.len()
            )
            .red(),
        );
        self.report_bad_groups(groups);
    }

    fn chain_search_started(&mut self) {
        self.emit("\nChecking linked random addresses...".cyan());
    }

    fn chain_found(&mut self, trial: usize, chain: &[BadGroup<I>]) {
        self.emit(
            format!(
                "\nGot bad group chain of {} after {trial} linked random ID attempts.",
                chain.len()
            )
            .red(),
        );
        self.report_bad_groups(chain);
    }

    fn chain_summary(&mut self, compromised: usize, total: usize) {
        let summary = format!(
            "\n{compromised} out of {total} linked random addresses were fully managed by compromised close groups.\n"
        );
        if compromised > 0 {
            self.emit(summary.red());
        } else {
            self.emit(summary.green());
        }
    }
}

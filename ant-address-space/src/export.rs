// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! JSON export of a completed simulation.

use crate::{
    attack::ChainSearchOutcome,
    config::SimulationConfig,
    error::Result,
    identifier::Identifier,
    node::BadGroup,
    simulation::SimulationSummary,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SimulationExport {
    pub address_bits: u32,
    pub config: SimulationConfig,
    pub good_nodes: PhaseExport,
    pub bad_nodes: PhaseExport,
    pub bad_groups: Vec<GroupExport>,
    pub linked_addresses: LinkedAddressExport,
}

#[derive(Debug, Serialize)]
pub struct PhaseExport {
    pub nodes_added: usize,
    pub admission_attempts: u64,
    pub average_attempts: f64,
}

#[derive(Debug, Serialize)]
pub struct GroupExport {
    pub target: String,
    pub members: Vec<MemberExport>,
}

#[derive(Debug, Serialize)]
pub struct MemberExport {
    pub id: String,
    pub honest: bool,
}

#[derive(Debug, Serialize)]
pub struct LinkedAddressExport {
    pub trials: usize,
    pub chain_length: usize,
    pub compromised: usize,
    pub probability: f64,
}

impl From<&ChainSearchOutcome> for LinkedAddressExport {
    fn from(outcome: &ChainSearchOutcome) -> Self {
        Self {
            trials: outcome.trials,
            chain_length: outcome.chain_length,
            compromised: outcome.compromised,
            probability: outcome.probability(),
        }
    }
}

impl<I: Identifier> From<&BadGroup<I>> for GroupExport {
    fn from(group: &BadGroup<I>) -> Self {
        Self {
            target: group.target.to_hex(),
            members: group
                .nodes
                .iter()
                .map(|node| MemberExport {
                    id: node.id.to_hex(),
                    honest: node.honest,
                })
                .collect(),
        }
    }
}

impl SimulationExport {
    pub fn from_summary<I: Identifier>(summary: &SimulationSummary<I>) -> Self {
        let good_count = summary.config.good_count;
        Self {
            address_bits: I::BITS,
            config: summary.config.clone(),
            good_nodes: PhaseExport {
                nodes_added: good_count,
                admission_attempts: summary.good_admission_attempts,
                average_attempts: summary.good_admission_attempts as f64 / good_count.max(1) as f64,
            },
            bad_nodes: PhaseExport {
                nodes_added: summary.disjoint.bad_nodes_added,
                admission_attempts: summary.disjoint.admission_attempts,
                average_attempts: summary.disjoint.average_attempts(),
            },
            bad_groups: summary.disjoint.groups.iter().map(GroupExport::from).collect(),
            linked_addresses: LinkedAddressExport::from(&summary.chains),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json_output = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json_output)?;
        info!("Exported simulation results to {}", path.display());
        Ok(())
    }
}

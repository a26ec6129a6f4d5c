// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Address space attack simulator
//!
//! Estimates how hard it is for an adversary to control the close groups of an XOR-metric
//! network whose nodes must pass an admission check on joining:
//!
//! - Admission: candidates that are too close to their would-be close group are rejected
//! - Targeting: bad nodes join until several disjoint close groups are compromised
//! - Chain search: hash-linked random addresses are probed for end-to-end compromise

#[macro_use]
extern crate tracing;

pub mod admission;
pub mod attack;
pub mod cohesion;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod identifier;
pub mod node;
pub mod population;
pub mod report;
pub mod sampling;
pub mod simulation;

pub use admission::{AdmissionPolicy, Admitted};
pub use attack::{ChainSearchOutcome, DisjointGroups, collect_disjoint_groups, follow_chain};
pub use cohesion::{CommonLeadingBitsAlgorithm, candidate_cohesion, group_cohesion};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use evaluator::CloseGroupEvaluator;
pub use export::SimulationExport;
pub use identifier::{Identifier, NodeId, XorName};
pub use node::{BadGroup, Node};
pub use population::Population;
pub use report::{ConsoleReporter, NullReporter, Reporter};
pub use sampling::uniform_targets;
pub use simulation::{Simulation, SimulationSummary};

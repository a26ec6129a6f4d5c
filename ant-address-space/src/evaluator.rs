// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{
    config::SimulationConfig,
    identifier::Identifier,
    node::BadGroup,
    population::Population,
};

/// Decides whether the close group of a target is controlled by bad nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseGroupEvaluator {
    pub group_size: usize,
    pub majority_size: usize,
}

impl CloseGroupEvaluator {
    pub fn new(group_size: usize, majority_size: usize) -> Self {
        Self {
            group_size,
            majority_size,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.group_size, config.majority_size)
    }

    /// The close group of `target` if at least `majority_size` of its members are bad,
    /// otherwise an empty membership. The population is only read.
    pub fn evaluate<I: Identifier>(&self, population: &Population<I>, target: &I) -> BadGroup<I> {
        let mut group = population.closest(target, self.group_size);
        if Population::count_bad_in(&group) < self.majority_size {
            group.clear();
        } else {
            group.sort();
        }
        BadGroup {
            target: target.clone(),
            nodes: group,
        }
    }
}

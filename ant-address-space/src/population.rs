// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{identifier::Identifier, node::Node};

/// Every node currently in the simulated network. Nodes are only ever added.
#[derive(Debug, Clone)]
pub struct Population<I> {
    nodes: Vec<Node<I>>,
}

impl<I: Identifier> Default for Population<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identifier> Population<I> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, node: Node<I>) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node<I>] {
        &self.nodes
    }

    pub fn good_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.honest).count()
    }

    pub fn bad_count(&self) -> usize {
        self.nodes.len() - self.good_count()
    }

    /// The `k` nodes closest to `target`, closest first. `k` is clamped to the population size.
    ///
    /// Only the first `k` are ranked; the rest of the population is never fully sorted.
    pub fn closest(&self, target: &I, k: usize) -> Vec<Node<I>> {
        let k = k.min(self.nodes.len());
        if k == 0 {
            return vec![];
        }

        let mut ranked: Vec<&Node<I>> = self.nodes.iter().collect();
        if k < ranked.len() {
            let _ = ranked.select_nth_unstable_by(k - 1, |lhs, rhs| {
                lhs.id.cmp_distance(&rhs.id, target)
            });
            ranked.truncate(k);
        }
        ranked.sort_by(|lhs, rhs| lhs.id.cmp_distance(&rhs.id, target));
        ranked.into_iter().cloned().collect()
    }

    pub fn count_bad_in(nodes: &[Node<I>]) -> usize {
        nodes.iter().filter(|node| node.is_bad()).count()
    }
}

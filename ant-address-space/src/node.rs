// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::identifier::Identifier;
use std::cmp::Ordering;

/// A simulated participant. Honesty is fixed when the node is created.
///
/// Nodes order by identifier first, which is the canonical order used for group membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node<I> {
    pub id: I,
    pub honest: bool,
}

impl<I: Identifier> Node<I> {
    pub fn good(id: I) -> Self {
        Self { id, honest: true }
    }

    pub fn bad(id: I) -> Self {
        Self { id, honest: false }
    }

    pub fn is_bad(&self) -> bool {
        !self.honest
    }
}

/// The outcome of evaluating one target: its close group if that group is compromised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadGroup<I> {
    pub target: I,
    /// Empty unless compromised. Sorted by identifier, not by proximity to `target`.
    pub nodes: Vec<Node<I>>,
}

impl<I: Identifier> BadGroup<I> {
    pub fn is_compromised(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn bad_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_bad()).count()
    }

    /// Whether no node is a member of both groups. Relies on both memberships being sorted.
    pub fn is_disjoint(&self, other: &BadGroup<I>) -> bool {
        let (mut lhs, mut rhs) = (self.nodes.iter().peekable(), other.nodes.iter().peekable());
        while let (Some(l), Some(r)) = (lhs.peek(), rhs.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    lhs.next();
                }
                Ordering::Greater => {
                    rhs.next();
                }
                Ordering::Equal => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{NODE_ID_LEN, NodeId};

    fn id(first: u8) -> NodeId {
        let mut bytes = [0u8; NODE_ID_LEN];
        bytes[0] = first;
        NodeId::new(bytes)
    }

    fn group(members: &[u8]) -> BadGroup<NodeId> {
        let mut nodes: Vec<_> = members.iter().map(|m| Node::bad(id(*m))).collect();
        nodes.sort();
        BadGroup {
            target: id(0),
            nodes,
        }
    }

    #[test]
    fn disjoint_groups_share_no_member() {
        assert!(group(&[1, 3, 5]).is_disjoint(&group(&[2, 4, 6])));
        assert!(!group(&[1, 3, 5]).is_disjoint(&group(&[0, 5, 9])));
        assert!(group(&[]).is_disjoint(&group(&[1])));
    }

    #[test]
    fn canonical_order_is_by_identifier() {
        let mut nodes = vec![Node::good(id(9)), Node::bad(id(2)), Node::good(id(5))];
        nodes.sort();
        let firsts: Vec<u8> = nodes.iter().map(|n| n.id.0[0]).collect();
        assert_eq!(firsts, vec![2, 5, 9]);
    }
}

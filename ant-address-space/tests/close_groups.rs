// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod common;

use ant_address_space::{
    CloseGroupEvaluator, Identifier, Node, NodeId, Population, follow_chain,
    identifier::NODE_ID_LEN,
};
use common::TestId;
use quickcheck::{QuickCheck, TestResult};
use std::cmp::Ordering;

const GOOD_COUNT: u16 = 50;
const GROUP_SIZE: usize = 4;
const MAJORITY_SIZE: usize = 3;

/// Fifty good nodes, none of them within 0x1000 of the zero address.
fn honest_population() -> Population<TestId> {
    let mut population = Population::new();
    for i in 0..GOOD_COUNT {
        population.insert(Node::good(TestId::from_u16(0x1000 + i * 0x0100)));
    }
    population
}

#[test]
fn group_is_compromised_exactly_when_the_third_bad_node_lands_close() {
    let evaluator = CloseGroupEvaluator::new(GROUP_SIZE, MAJORITY_SIZE);
    let target = TestId::from_u16(0x0000);
    let mut population = honest_population();

    // A bad node far from the target does not count towards its group.
    population.insert(Node::bad(TestId::from_u16(0xff00)));
    assert!(!evaluator.evaluate(&population, &target).is_compromised());

    population.insert(Node::bad(TestId::from_u16(0x0001)));
    assert!(!evaluator.evaluate(&population, &target).is_compromised());

    population.insert(Node::bad(TestId::from_u16(0x0002)));
    assert!(!evaluator.evaluate(&population, &target).is_compromised());

    population.insert(Node::bad(TestId::from_u16(0x0003)));
    let group = evaluator.evaluate(&population, &target);
    assert!(group.is_compromised());
    assert_eq!(group.bad_count(), 3);
    let members: Vec<u16> = group.nodes.iter().map(|node| node.id.value()).collect();
    assert_eq!(members, vec![0x0001, 0x0002, 0x0003, 0x1000]);
}

#[test]
fn close_group_has_exactly_group_size_members() {
    let population = honest_population();
    for raw in [0x0000u16, 0x1234, 0x8000, 0xffff] {
        let group = population.closest(&TestId::from_u16(raw), GROUP_SIZE);
        assert_eq!(group.len(), GROUP_SIZE);

        let farthest_in_group = group
            .iter()
            .max_by(|a, b| a.id.cmp_distance(&b.id, &TestId::from_u16(raw)))
            .map(|node| node.id);
        let Some(farthest) = farthest_in_group else {
            panic!("group is not empty");
        };
        for node in population.nodes() {
            if group.contains(node) {
                continue;
            }
            assert_ne!(
                node.id.cmp_distance(&farthest, &TestId::from_u16(raw)),
                Ordering::Less,
                "{} is closer to {raw:04x} than a group member",
                node.id
            );
        }
    }
}

#[test]
fn chains_against_a_real_population() {
    let evaluator = CloseGroupEvaluator::new(GROUP_SIZE, MAJORITY_SIZE);

    let honest = honest_population();
    let mut calls = 0;
    let chain = follow_chain(TestId::from_u16(0x4242), 3, |target| {
        calls += 1;
        evaluator.evaluate(&honest, target)
    });
    assert!(chain.is_none());
    assert_eq!(calls, 1);

    let mut hostile = Population::new();
    for i in 0..GOOD_COUNT {
        hostile.insert(Node::bad(TestId::from_u16(i * 0x0400)));
    }
    let anchor = TestId::from_u16(0x4242);
    let chain = follow_chain(anchor, 3, |target| evaluator.evaluate(&hostile, target));
    let Some(chain) = chain else {
        panic!("an all-bad population compromises every group");
    };
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0].target, anchor);
    assert_eq!(chain[2].target, anchor.hashed().hashed());
}

/// Flipping a less significant bit of the target moves less far than flipping a more
/// significant one.
fn distance_is_monotonic_in_bit_significance(raw: Vec<u8>, k1: u16, k2: u16) -> TestResult {
    let bits = NODE_ID_LEN * 8;
    let (k1, k2) = (usize::from(k1) % bits, usize::from(k2) % bits);
    if k1 == k2 {
        return TestResult::discard();
    }
    let (high, low) = (k1.min(k2), k1.max(k2));

    let mut bytes = [0u8; NODE_ID_LEN];
    for (slot, value) in bytes.iter_mut().zip(raw) {
        *slot = value;
    }
    let flip = |bit: usize| {
        let mut flipped = bytes;
        flipped[bit / 8] ^= 0x80 >> (bit % 8);
        NodeId::new(flipped)
    };
    let target = NodeId::new(bytes);
    let near = flip(low);
    let far = flip(high);

    TestResult::from_bool(
        near.closer_to_target(&far, &target)
            && near.common_leading_bits(&target) > far.common_leading_bits(&target),
    )
}

#[test]
fn distance_monotonicity() {
    QuickCheck::new()
        .tests(500)
        .quickcheck(distance_is_monotonic_in_bit_significance as fn(Vec<u8>, u16, u16) -> TestResult);
}

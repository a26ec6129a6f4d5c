// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::identifier::Identifier;

/// Targets spread evenly across the whole address space, so every region is checked
/// by the disjoint-group search.
pub fn uniform_targets<I: Identifier>(step_count: usize) -> Vec<I> {
    let steps = I::evenly_spaced(step_count);
    info!("Created {} evenly-distributed target addresses", steps.len());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{NodeId, U512};

    #[test]
    fn gaps_are_equal_and_span_the_space() {
        let step_count = 1024usize;
        let targets: Vec<NodeId> = uniform_targets(step_count);
        assert_eq!(targets.len(), step_count);

        let stride = U512::MAX / U512::from(step_count as u64);
        let magnitudes: Vec<U512> = targets.iter().map(NodeId::magnitude).collect();

        assert_eq!(magnitudes[0], U512::zero());
        for pair in magnitudes.windows(2) {
            assert_eq!(pair[1] - pair[0], stride);
        }

        // The last target sits within one stride (plus rounding) of the maximum.
        let last = magnitudes[step_count - 1];
        assert!(U512::MAX - last <= stride + U512::from(step_count as u64));
    }

    #[test]
    fn targets_are_sorted_and_distinct() {
        let targets: Vec<NodeId> = uniform_targets(64);
        assert!(targets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn zero_steps_yield_nothing() {
        assert!(uniform_targets::<NodeId>(0).is_empty());
    }
}

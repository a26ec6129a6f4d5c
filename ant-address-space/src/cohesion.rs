// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! How tightly a set of identifiers clusters, measured in common leading bits.

use crate::{identifier::Identifier, node::Node};
use serde::Serialize;
use strum::{Display, EnumString};

/// Which pairwise common-leading-bits value summarises a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommonLeadingBitsAlgorithm {
    /// The closest pair.
    #[default]
    Highest,
    /// The farthest pair.
    Lowest,
    /// The truncated mean over all pairs.
    Mean,
}

/// Running highest/lowest/sum over a set of common-leading-bits values.
///
/// Starts from `highest = 0` and `lowest = BITS`, so an empty set resolves to those values
/// (and to zero for the mean).
#[derive(Debug, Clone, Copy)]
struct Tally {
    highest: u32,
    lowest: u32,
    sum: u64,
    count: u64,
}

impl Tally {
    fn new(bits: u32) -> Self {
        Self {
            highest: 0,
            lowest: bits,
            sum: 0,
            count: 0,
        }
    }

    fn add(&mut self, common_leading_bits: u32) {
        self.highest = self.highest.max(common_leading_bits);
        self.lowest = self.lowest.min(common_leading_bits);
        self.sum += u64::from(common_leading_bits);
        self.count += 1;
    }

    fn resolve(&self, algorithm: CommonLeadingBitsAlgorithm) -> u32 {
        match algorithm {
            CommonLeadingBitsAlgorithm::Highest => self.highest,
            CommonLeadingBitsAlgorithm::Lowest => self.lowest,
            CommonLeadingBitsAlgorithm::Mean => {
                if self.count == 0 {
                    0
                } else {
                    // A mean of values bounded by `BITS` always fits.
                    u32::try_from(self.sum / self.count).unwrap_or(u32::MAX)
                }
            }
        }
    }
}

/// Internal cohesion of `group`, aggregated over every unordered pair of members.
pub fn group_cohesion<I: Identifier>(
    group: &[Node<I>],
    algorithm: CommonLeadingBitsAlgorithm,
) -> u32 {
    let mut tally = Tally::new(I::BITS);
    for (index, node) in group.iter().enumerate() {
        for other in &group[index + 1..] {
            tally.add(node.id.common_leading_bits(&other.id));
        }
    }
    tally.resolve(algorithm)
}

/// Cohesion between `candidate` and each member of `group`.
pub fn candidate_cohesion<I: Identifier>(
    candidate: &I,
    group: &[Node<I>],
    algorithm: CommonLeadingBitsAlgorithm,
) -> u32 {
    let mut tally = Tally::new(I::BITS);
    for node in group {
        tally.add(node.id.common_leading_bits(candidate));
    }
    tally.resolve(algorithm)
}

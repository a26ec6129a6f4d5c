// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The network's own 256-bit address type as an [`Identifier`].

use super::{Identifier, U256, cmp_xor_distance, words_to_be_bytes};
use rand::Rng;
use std::cmp::Ordering;
use xor_name::{XOR_NAME_LEN, XorName};

impl Identifier for XorName {
    const BITS: u32 = (XOR_NAME_LEN * 8) as u32;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; XOR_NAME_LEN];
        rng.fill(&mut bytes[..]);
        XorName(bytes)
    }

    fn cmp_distance(&self, other: &Self, target: &Self) -> Ordering {
        cmp_xor_distance(&self.0, &other.0, &target.0)
    }

    fn common_leading_bits(&self, other: &Self) -> u32 {
        super::common_leading_bits(&self.0, &other.0)
    }

    fn hashed(&self) -> Self {
        XorName::from_content(&self.0)
    }

    fn evenly_spaced(count: usize) -> Vec<Self> {
        if count == 0 {
            return vec![];
        }
        let stride = U256::MAX / U256::from(count as u64);
        let mut step = U256::zero();
        let mut steps = Vec::with_capacity(count);
        for _ in 0..count {
            let mut bytes = [0u8; XOR_NAME_LEN];
            words_to_be_bytes(&step.0, &mut bytes);
            steps.push(XorName(bytes));
            step = step.saturating_add(stride);
        }
        steps
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

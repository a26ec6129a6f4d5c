// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::{Identifier, U512, be_bytes_to_words, cmp_xor_distance, words_to_be_bytes};
use rand::Rng;
use sha2::{Digest, Sha512};
use std::{cmp::Ordering, fmt};

/// Length of a [`NodeId`] in bytes.
pub const NODE_ID_LEN: usize = 64;

/// A 512-bit identifier, hashed with SHA-512.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub [u8; NODE_ID_LEN]);

impl NodeId {
    pub fn new(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns `None` unless `bytes` is exactly [`NODE_ID_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != NODE_ID_LEN {
            return None;
        }
        let mut id = [0u8; NODE_ID_LEN];
        id.copy_from_slice(bytes);
        Some(Self(id))
    }

    /// The identifier read as an unsigned big-endian integer.
    pub fn magnitude(&self) -> U512 {
        let mut words = [0u64; 8];
        be_bytes_to_words(&self.0, &mut words);
        U512(words)
    }

    pub fn from_magnitude(value: &U512) -> Self {
        let mut bytes = [0u8; NODE_ID_LEN];
        words_to_be_bytes(&value.0, &mut bytes);
        Self(bytes)
    }
}

impl Identifier for NodeId {
    const BITS: u32 = (NODE_ID_LEN * 8) as u32;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NODE_ID_LEN];
        rng.fill(&mut bytes[..]);
        Self(bytes)
    }

    fn cmp_distance(&self, other: &Self, target: &Self) -> Ordering {
        cmp_xor_distance(&self.0, &other.0, &target.0)
    }

    fn common_leading_bits(&self, other: &Self) -> u32 {
        super::common_leading_bits(&self.0, &other.0)
    }

    fn hashed(&self) -> Self {
        let digest = Sha512::digest(self.0);
        let mut bytes = [0u8; NODE_ID_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    fn evenly_spaced(count: usize) -> Vec<Self> {
        if count == 0 {
            return vec![];
        }
        let stride = U512::MAX / U512::from(count as u64);
        let mut step = U512::zero();
        let mut steps = Vec::with_capacity(count);
        for _ in 0..count {
            steps.push(Self::from_magnitude(&step));
            step = step.saturating_add(stride);
        }
        steps
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn hashing_is_deterministic_and_moves_the_id() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = NodeId::random(&mut rng);
        assert_eq!(id.hashed(), id.hashed());
        assert_ne!(id.hashed(), id);
    }

    #[test]
    fn magnitude_round_trips() {
        let mut rng = StdRng::seed_from_u64(11);
        let id = NodeId::random(&mut rng);
        assert_eq!(NodeId::from_magnitude(&id.magnitude()), id);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(NodeId::from_slice(&[0u8; 32]).is_none());
        assert!(NodeId::from_slice(&[0u8; NODE_ID_LEN]).is_some());
    }

    #[test]
    fn short_id_shows_both_ends() {
        let mut bytes = [0u8; NODE_ID_LEN];
        bytes[0] = 0xab;
        bytes[NODE_ID_LEN - 1] = 0xcd;
        assert_eq!(NodeId::new(bytes).short_id(), "ab0000..0000cd");
    }
}

// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(dead_code)]

use ant_address_space::{BadGroup, Identifier, Reporter};
use rand::Rng;
use std::{cmp::Ordering, fmt};

/// A 16-bit address space, small enough to place nodes by hand.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestId([u8; 2]);

impl TestId {
    pub fn from_u16(value: u16) -> Self {
        Self(value.to_be_bytes())
    }

    pub fn value(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.value())
    }
}

impl fmt::Debug for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestId({:04x})", self.value())
    }
}

impl Identifier for TestId {
    const BITS: u32 = 16;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_u16(rng.gen())
    }

    fn cmp_distance(&self, other: &Self, target: &Self) -> Ordering {
        (self.value() ^ target.value()).cmp(&(other.value() ^ target.value()))
    }

    fn common_leading_bits(&self, other: &Self) -> u32 {
        (self.value() ^ other.value()).leading_zeros()
    }

    fn hashed(&self) -> Self {
        let mixed = self.value().wrapping_mul(0x9e37).rotate_left(5) ^ 0x5bd1;
        Self::from_u16(mixed.wrapping_add(0x3c6e))
    }

    fn evenly_spaced(count: usize) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        let stride = u64::from(u16::MAX) / count as u64;
        (0..count as u64)
            .map(|step| Self::from_u16((step * stride) as u16))
            .collect()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Records every chain as `(trial, targets)`, and the final tally.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub admitted: usize,
    pub chains: Vec<(usize, Vec<TestId>)>,
    pub summary: Option<(usize, usize)>,
}

impl Reporter<TestId> for RecordingReporter {
    fn node_admitted(&mut self, _honest: bool, _attempts: u64, _network_size: usize) {
        self.admitted += 1;
    }

    fn chain_found(&mut self, trial: usize, chain: &[BadGroup<TestId>]) {
        self.chains
            .push((trial, chain.iter().map(|group| group.target).collect()));
    }

    fn chain_summary(&mut self, compromised: usize, total: usize) {
        self.summary = Some((compromised, total));
    }
}

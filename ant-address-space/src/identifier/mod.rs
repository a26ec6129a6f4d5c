// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Fixed-width identifiers placed in an XOR metric address space.
//!
//! Everything in the simulation is generic over [`Identifier`], so the same algorithms run
//! over 512-bit [`NodeId`]s, 256-bit [`XorName`]s, or a tiny hand-placed space in tests.

mod node_id;
mod xor;

pub use node_id::{NODE_ID_LEN, NodeId};
pub use xor_name::XorName;

use rand::Rng;
use std::{cmp::Ordering, fmt, hash::Hash};

uint::construct_uint! {
    /// Magnitude of a 256-bit identifier.
    pub struct U256(4);
}

uint::construct_uint! {
    /// Magnitude of a 512-bit identifier.
    pub struct U512(8);
}

/// A position in the address space.
pub trait Identifier:
    Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width of the identifier in bits.
    const BITS: u32;

    /// A uniformly random identifier.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Orders `self` against `other` by closeness to `target`. `Less` means `self` is closer.
    fn cmp_distance(&self, other: &Self, target: &Self) -> Ordering;

    /// Number of most-significant bits shared with `other`, in `0..=BITS`.
    fn common_leading_bits(&self, other: &Self) -> u32;

    /// Deterministic cryptographic hash of this identifier, at the same width.
    fn hashed(&self) -> Self;

    /// `count` identifiers at successive multiples of `MAX / count`, starting from zero.
    fn evenly_spaced(count: usize) -> Vec<Self>;

    fn as_bytes(&self) -> &[u8];

    fn closer_to_target(&self, other: &Self, target: &Self) -> bool {
        self.cmp_distance(other, target) == Ordering::Less
    }

    fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Abbreviated form used in reports: first and last three bytes.
    fn short_id(&self) -> String {
        let bytes = self.as_bytes();
        if bytes.len() <= 6 {
            return hex::encode(bytes);
        }
        format!(
            "{}..{}",
            hex::encode(&bytes[..3]),
            hex::encode(&bytes[bytes.len() - 3..])
        )
    }
}

/// Compares `lhs ^ target` with `rhs ^ target` as big-endian magnitudes.
pub(crate) fn cmp_xor_distance(lhs: &[u8], rhs: &[u8], target: &[u8]) -> Ordering {
    for ((l, r), t) in lhs.iter().zip(rhs).zip(target) {
        match (l ^ t).cmp(&(r ^ t)) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

pub(crate) fn common_leading_bits(lhs: &[u8], rhs: &[u8]) -> u32 {
    let mut bits = 0;
    for (l, r) in lhs.iter().zip(rhs) {
        let diff = l ^ r;
        if diff != 0 {
            return bits + diff.leading_zeros();
        }
        bits += 8;
    }
    bits
}

/// Writes little-endian-ordered words into `out` as a big-endian byte string.
pub(crate) fn words_to_be_bytes(words: &[u64], out: &mut [u8]) {
    for (chunk, word) in out.chunks_exact_mut(8).zip(words.iter().rev()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
}

/// Inverse of [`words_to_be_bytes`].
pub(crate) fn be_bytes_to_words(bytes: &[u8], words: &mut [u64]) {
    for (word, chunk) in words.iter_mut().rev().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_be_bytes(buf);
    }
}

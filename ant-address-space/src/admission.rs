// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Rejection sampling of new identifiers.
//!
//! A candidate is kept only if it is not noticeably closer to its would-be close group than
//! that group's members are to each other. The group judged is the one closest to the
//! candidate itself, so the candidate takes part in choosing the group it is measured
//! against. That approximation is intentional and kept as is.

use crate::{
    cohesion::{CommonLeadingBitsAlgorithm, candidate_cohesion, group_cohesion},
    config::SimulationConfig,
    error::{Error, Result},
    identifier::Identifier,
    node::Node,
    population::Population,
};
use rand::Rng;

/// A node that made it into the population, with the numbers that let it in.
#[derive(Debug, Clone)]
pub struct Admitted<I> {
    pub node: Node<I>,
    /// Candidates generated, including the accepted one.
    pub attempts: u64,
    pub group_cohesion: u32,
    pub candidate_cohesion: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    pub group_size: usize,
    pub leeway: u32,
    pub algorithm: CommonLeadingBitsAlgorithm,
    pub max_attempts: Option<u64>,
    pub warning_interval: u64,
}

impl AdmissionPolicy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            group_size: config.group_size,
            leeway: u32::try_from(config.leeway).unwrap_or(u32::MAX),
            algorithm: config.algorithm,
            max_attempts: config.max_admission_attempts,
            warning_interval: config.admission_warning_interval.max(1),
        }
    }

    /// Returns `(group_cohesion, candidate_cohesion)` for `candidate` against its current
    /// close group.
    pub fn assess<I: Identifier>(&self, population: &Population<I>, candidate: &I) -> (u32, u32) {
        let group = population.closest(candidate, self.group_size);
        (
            group_cohesion(&group, self.algorithm),
            candidate_cohesion(candidate, &group, self.algorithm),
        )
    }

    pub fn accepts(&self, group_cohesion: u32, candidate_cohesion: u32) -> bool {
        candidate_cohesion < group_cohesion.saturating_add(self.leeway)
    }

    /// Generates candidates until one is accepted, then appends it to `population`.
    ///
    /// There is no bound unless `max_attempts` is set; a warning is logged every
    /// `warning_interval` attempts.
    pub fn admit<I: Identifier, R: Rng + ?Sized>(
        &self,
        population: &mut Population<I>,
        rng: &mut R,
        honest: bool,
    ) -> Result<Admitted<I>> {
        if population.is_empty() {
            let node = Node {
                id: I::random(rng),
                honest,
            };
            population.insert(node.clone());
            return Ok(Admitted {
                node,
                attempts: 1,
                group_cohesion: 0,
                candidate_cohesion: 0,
            });
        }

        let mut attempts = 0u64;
        loop {
            attempts += 1;
            let candidate = I::random(rng);
            let (group_cohesion, candidate_cohesion) = self.assess(population, &candidate);

            if self.accepts(group_cohesion, candidate_cohesion) {
                let node = Node {
                    id: candidate,
                    honest,
                };
                population.insert(node.clone());
                trace!(
                    "Admitted {} after {attempts} attempt(s): candidate cohesion {candidate_cohesion}, group cohesion {group_cohesion}",
                    node.id
                );
                return Ok(Admitted {
                    node,
                    attempts,
                    group_cohesion,
                    candidate_cohesion,
                });
            }

            if attempts % self.warning_interval == 0 {
                warn!(
                    "Still trying to admit a node after {attempts} attempts into a network of {}; leeway {} may be too small",
                    population.len(),
                    self.leeway
                );
            }
            if self.max_attempts.is_some_and(|max_attempts| attempts >= max_attempts) {
                error!("Giving up admission after {attempts} attempts");
                return Err(Error::AdmissionExhausted { attempts });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::NodeId;
    use rand::{SeedableRng, rngs::StdRng};
    use tracing_test::traced_test;

    fn policy(leeway: u32, algorithm: CommonLeadingBitsAlgorithm) -> AdmissionPolicy {
        AdmissionPolicy {
            group_size: 4,
            leeway,
            algorithm,
            max_attempts: None,
            warning_interval: 1_000_000,
        }
    }

    #[test]
    fn first_node_is_admitted_directly() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut population = Population::<NodeId>::new();
        let admitted = policy(0, CommonLeadingBitsAlgorithm::Highest).admit(
            &mut population,
            &mut rng,
            true,
        )?;
        assert_eq!(admitted.attempts, 1);
        assert_eq!(population.len(), 1);
        Ok(())
    }

    #[test]
    fn every_admission_satisfies_the_leeway_rule() -> Result<()> {
        for algorithm in [
            CommonLeadingBitsAlgorithm::Highest,
            CommonLeadingBitsAlgorithm::Lowest,
            CommonLeadingBitsAlgorithm::Mean,
        ] {
            let policy = policy(2, algorithm);
            let mut rng = StdRng::seed_from_u64(5);
            let mut population = Population::<NodeId>::new();
            for i in 0..120 {
                let before = population.clone();
                let admitted = policy.admit(&mut population, &mut rng, i % 2 == 0)?;
                if before.is_empty() {
                    continue;
                }
                let (group, candidate) = policy.assess(&before, &admitted.node.id);
                assert_eq!((group, candidate), (admitted.group_cohesion, admitted.candidate_cohesion));
                assert!(candidate < group + 2);
                assert_eq!(population.len(), before.len() + 1);
            }
        }
        Ok(())
    }

    #[test]
    #[traced_test]
    fn exhausted_admission_is_reported() {
        // With a zero leeway under `Highest`, a candidate can never share fewer bits with
        // a lone member than the empty pair set's cohesion of zero.
        let policy = AdmissionPolicy {
            max_attempts: Some(10),
            warning_interval: 5,
            ..policy(0, CommonLeadingBitsAlgorithm::Highest)
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut population = Population::<NodeId>::new();
        population.insert(Node::good(NodeId::random(&mut rng)));

        let result = policy.admit(&mut population, &mut rng, true);
        assert!(matches!(result, Err(Error::AdmissionExhausted { attempts: 10 })));
        assert_eq!(population.len(), 1);
        assert!(logs_contain("Still trying to admit a node after 5 attempts"));
    }
}

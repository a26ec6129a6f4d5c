// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The two attack phases: injecting bad nodes until enough disjoint close groups are
//! compromised, then probing chains of hash-linked addresses.

use crate::{
    error::{Error, Result},
    evaluator::CloseGroupEvaluator,
    identifier::Identifier,
    node::BadGroup,
    population::Population,
    report::Reporter,
    simulation::Simulation,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trials between progress log lines during the chain search.
const PROGRESS_INTERVAL: usize = 100_000;

/// Result of the disjoint-group phase.
#[derive(Debug, Clone)]
pub struct DisjointGroups<I> {
    /// Pairwise disjoint compromised groups, in target order.
    pub groups: Vec<BadGroup<I>>,
    pub bad_nodes_added: usize,
    pub admission_attempts: u64,
}

impl<I> DisjointGroups<I> {
    pub fn average_attempts(&self) -> f64 {
        if self.bad_nodes_added == 0 {
            return 0.0;
        }
        self.admission_attempts as f64 / self.bad_nodes_added as f64
    }
}

/// Result of the linked-address phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainSearchOutcome {
    pub trials: usize,
    pub chain_length: usize,
    pub compromised: usize,
}

impl ChainSearchOutcome {
    pub fn probability(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.compromised as f64 / self.trials as f64
    }
}

/// A greedy pass over `targets` in order. A compromised group is kept only if it shares no
/// member with any group kept before it; the pass stops once `wanted` groups are kept.
pub fn collect_disjoint_groups<I: Identifier>(
    evaluator: &CloseGroupEvaluator,
    population: &Population<I>,
    targets: &[I],
    wanted: usize,
) -> Vec<BadGroup<I>> {
    let mut accepted: Vec<BadGroup<I>> = Vec::with_capacity(wanted);
    for target in targets {
        if accepted.len() >= wanted {
            break;
        }
        let group = evaluator.evaluate(population, target);
        if !group.is_compromised() {
            continue;
        }
        if accepted.iter().all(|kept| kept.is_disjoint(&group)) {
            accepted.push(group);
        }
    }
    accepted
}

/// Follows a chain of `length` addresses starting at `anchor`, each one the hash of the
/// previous. Stops at the first group that is not compromised.
pub fn follow_chain<I, F>(anchor: I, length: usize, mut evaluate: F) -> Option<Vec<BadGroup<I>>>
where
    I: Identifier,
    F: FnMut(&I) -> BadGroup<I>,
{
    let mut chain = Vec::with_capacity(length);
    let mut target = anchor;
    for step in 0..length {
        if step > 0 {
            target = target.hashed();
        }
        let group = evaluate(&target);
        if !group.is_compromised() {
            return None;
        }
        chain.push(group);
    }
    Some(chain)
}

/// Each trial draws its anchor from its own RNG so that results do not depend on how trials
/// are scheduled.
pub fn trial_rng(phase_seed: u64, trial: usize) -> StdRng {
    StdRng::seed_from_u64(phase_seed.wrapping_add(trial as u64))
}

impl<I: Identifier> Simulation<I> {
    /// Phase two. Adds bad nodes one at a time until `bad_group_count` disjoint compromised
    /// groups exist among `targets`.
    pub fn inject_bad_groups(
        &mut self,
        targets: &[I],
        reporter: &mut dyn Reporter<I>,
    ) -> Result<DisjointGroups<I>> {
        reporter.bad_nodes_injecting();
        let wanted = self.config.bad_group_count;
        info!(
            "Adding bad nodes until {wanted} disjoint groups among {} targets are compromised",
            targets.len()
        );

        let mut bad_nodes_added = 0usize;
        let mut admission_attempts = 0u64;
        loop {
            admission_attempts += self.admit(false, reporter)?.attempts;
            bad_nodes_added += 1;

            let groups = collect_disjoint_groups(&self.evaluator, &self.population, targets, wanted);
            debug!(
                "{} of {wanted} disjoint groups compromised with {} bad nodes",
                groups.len(),
                self.bad_count()
            );

            if groups.len() >= wanted {
                let found = DisjointGroups {
                    groups,
                    bad_nodes_added,
                    admission_attempts,
                };
                info!(
                    "Compromised {wanted} disjoint groups after adding {} bad nodes",
                    self.bad_count()
                );
                reporter.bad_groups_found(&found.groups, self.bad_count(), found.average_attempts());
                return Ok(found);
            }

            if let Some(max_bad_nodes) = self.config.max_bad_nodes {
                if self.bad_count() >= max_bad_nodes {
                    error!(
                        "Stopping the disjoint group search: {} bad nodes added without success",
                        self.bad_count()
                    );
                    return Err(Error::SearchExhausted {
                        bad_nodes: self.bad_count(),
                    });
                }
            }
        }
    }

    /// One linked-address trial against the current, frozen population.
    pub fn chain_trial(&self, phase_seed: u64, trial: usize) -> Option<Vec<BadGroup<I>>> {
        let mut rng = trial_rng(phase_seed, trial);
        let anchor = I::random(&mut rng);
        follow_chain(anchor, self.config.bad_group_count, |target| {
            self.evaluate(target)
        })
    }

    /// Phase three. Runs `total_random_attempts` trials, each a chain of `bad_group_count`
    /// linked addresses, and counts the chains that are compromised end to end.
    pub fn check_linked_addresses(&mut self, reporter: &mut dyn Reporter<I>) -> ChainSearchOutcome {
        reporter.chain_search_started();
        let trials = self.config.total_random_attempts;
        let phase_seed: u64 = self.rng.gen();
        info!(
            "Checking {trials} chains of {} linked addresses (parallel: {})",
            self.config.bad_group_count, self.config.parallel_trials
        );

        let compromised = if self.config.parallel_trials {
            self.linked_trials_parallel(phase_seed, reporter)
        } else {
            self.linked_trials_sequential(phase_seed, reporter)
        };

        info!("{compromised} of {trials} linked address chains were compromised");
        reporter.chain_summary(compromised, trials);
        ChainSearchOutcome {
            trials,
            chain_length: self.config.bad_group_count,
            compromised,
        }
    }

    fn linked_trials_sequential(&self, phase_seed: u64, reporter: &mut dyn Reporter<I>) -> usize {
        let trials = self.config.total_random_attempts;
        let mut compromised = 0;
        for trial in 0..trials {
            if let Some(chain) = self.chain_trial(phase_seed, trial) {
                compromised += 1;
                reporter.chain_found(trial + 1, &chain);
            }
            if (trial + 1) % PROGRESS_INTERVAL == 0 {
                info!("Checked {}/{trials} linked addresses", trial + 1);
            }
        }
        compromised
    }

    /// Chains are reported once all trials finish, ordered by trial index.
    fn linked_trials_parallel(&self, phase_seed: u64, reporter: &mut dyn Reporter<I>) -> usize {
        let trials = self.config.total_random_attempts;
        let checked = AtomicUsize::new(0);

        let mut found: Vec<(usize, Vec<BadGroup<I>>)> = (0..trials)
            .into_par_iter()
            .filter_map(|trial| {
                let done = checked.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_INTERVAL == 0 {
                    info!("Checked {done}/{trials} linked addresses");
                }
                self.chain_trial(phase_seed, trial)
                    .map(|chain| (trial, chain))
            })
            .collect();
        found.sort_by_key(|(trial, _)| *trial);

        for (trial, chain) in &found {
            reporter.chain_found(trial + 1, chain);
        }
        found.len()
    }
}

// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The simulation context and its three phases:
//!
//! 1. honest nodes join until the configured network size is reached,
//! 2. bad nodes join one at a time until enough disjoint close groups are compromised,
//! 3. the frozen network is probed with chains of linked random addresses.

use crate::{
    admission::{AdmissionPolicy, Admitted},
    attack::{ChainSearchOutcome, DisjointGroups},
    config::SimulationConfig,
    error::Result,
    evaluator::CloseGroupEvaluator,
    identifier::Identifier,
    node::{BadGroup, Node},
    population::Population,
    report::Reporter,
    sampling::uniform_targets,
};
use rand::{SeedableRng, rngs::StdRng};

/// Owns the population and everything needed to grow and probe it.
pub struct Simulation<I> {
    pub(crate) config: SimulationConfig,
    pub(crate) population: Population<I>,
    pub(crate) rng: StdRng,
    pub(crate) admission: AdmissionPolicy,
    pub(crate) evaluator: CloseGroupEvaluator,
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct SimulationSummary<I> {
    pub config: SimulationConfig,
    pub good_admission_attempts: u64,
    pub disjoint: DisjointGroups<I>,
    pub chains: ChainSearchOutcome,
}

impl<I: Identifier> Simulation<I> {
    /// Validates `config` and seeds the RNG from `config.seed`, or from OS entropy.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            population: Population::with_capacity(config.good_count),
            admission: AdmissionPolicy::from_config(&config),
            evaluator: CloseGroupEvaluator::from_config(&config),
            rng,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn population(&self) -> &Population<I> {
        &self.population
    }

    /// Bad nodes are everything beyond the honest target count.
    pub fn bad_count(&self) -> usize {
        self.population.len().saturating_sub(self.config.good_count)
    }

    pub fn evaluate(&self, target: &I) -> BadGroup<I> {
        self.evaluator.evaluate(&self.population, target)
    }

    pub fn closest(&self, target: &I) -> Vec<Node<I>> {
        self.population.closest(target, self.config.group_size)
    }

    pub fn admit(&mut self, honest: bool, reporter: &mut dyn Reporter<I>) -> Result<Admitted<I>> {
        let admitted = self
            .admission
            .admit(&mut self.population, &mut self.rng, honest)?;
        reporter.node_admitted(honest, admitted.attempts, self.population.len());
        Ok(admitted)
    }

    /// Phase one. Returns the total admission attempts spent.
    pub fn initialise_network(&mut self, reporter: &mut dyn Reporter<I>) -> Result<u64> {
        let mut attempts = 0u64;
        while self.population.len() < self.config.good_count {
            attempts += self.admit(true, reporter)?.attempts;
        }
        let average = attempts as f64 / self.config.good_count as f64;
        info!(
            "Added {} good nodes, averaging {average} attempt(s) each",
            self.config.good_count
        );
        reporter.network_initialised(self.config.good_count, average);
        Ok(attempts)
    }

    /// Runs all three phases in order.
    pub fn run(&mut self, reporter: &mut dyn Reporter<I>) -> Result<SimulationSummary<I>> {
        info!("Starting simulation with {:?}", self.config);
        let good_admission_attempts = self.initialise_network(reporter)?;

        let targets = uniform_targets::<I>(self.config.target_count);
        reporter.targets_created(targets.len());

        let disjoint = self.inject_bad_groups(&targets, reporter)?;
        let chains = self.check_linked_addresses(reporter);

        Ok(SimulationSummary {
            config: self.config.clone(),
            good_admission_attempts,
            disjoint,
            chains,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, identifier::NodeId, report::NullReporter};

    fn small_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            good_count: 40,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SimulationConfig {
            majority_size: 9,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::<NodeId>::new(config),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn initialisation_admits_only_good_nodes() -> Result<()> {
        let mut simulation = Simulation::<NodeId>::new(small_config(21))?;
        let attempts = simulation.initialise_network(&mut NullReporter)?;

        assert_eq!(simulation.population().len(), 40);
        assert_eq!(simulation.population().good_count(), 40);
        assert_eq!(simulation.bad_count(), 0);
        assert!(attempts >= 40);
        Ok(())
    }

    #[test]
    fn the_same_seed_builds_the_same_network() -> Result<()> {
        let mut first = Simulation::<NodeId>::new(small_config(8))?;
        let mut second = Simulation::<NodeId>::new(small_config(8))?;
        first.initialise_network(&mut NullReporter)?;
        second.initialise_network(&mut NullReporter)?;
        assert_eq!(first.population().nodes(), second.population().nodes());
        Ok(())
    }
}

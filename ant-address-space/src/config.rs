// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Simulation parameters, fixed before the run starts.

use crate::{
    cohesion::CommonLeadingBitsAlgorithm,
    error::{Error, Result},
};
use serde::Serialize;
use std::io::{BufRead, Write};

pub const DEFAULT_GOOD_COUNT: usize = 1000;
pub const DEFAULT_GROUP_SIZE: usize = 4;
pub const DEFAULT_MAJORITY_SIZE: usize = 3;
pub const DEFAULT_BAD_GROUP_COUNT: usize = 2;
pub const DEFAULT_TOTAL_RANDOM_ATTEMPTS: usize = 1_000_000;
pub const DEFAULT_LEEWAY: usize = 2;
/// Number of evenly spread targets checked by the disjoint-group search.
pub const DEFAULT_TARGET_COUNT: usize = 1024;
pub const DEFAULT_ADMISSION_WARNING_INTERVAL: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    /// Honest nodes in the network before any adversary joins.
    pub good_count: usize,
    pub group_size: usize,
    /// Bad members needed for a close group to count as compromised.
    pub majority_size: usize,
    /// Disjoint compromised groups to engineer, and the length of each attack chain.
    pub bad_group_count: usize,
    /// Linked random-address trials in the chain search.
    pub total_random_attempts: usize,
    /// How many more common leading bits a candidate may share with its close group than the
    /// group shares internally.
    pub leeway: usize,
    pub algorithm: CommonLeadingBitsAlgorithm,
    pub target_count: usize,
    pub seed: Option<u64>,
    pub parallel_trials: bool,
    /// Give up admitting a node after this many candidates.
    pub max_admission_attempts: Option<u64>,
    /// Give up the disjoint search once this many bad nodes have joined.
    pub max_bad_nodes: Option<usize>,
    /// Log a diagnostic every time a single admission has used this many attempts.
    pub admission_warning_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            good_count: DEFAULT_GOOD_COUNT,
            group_size: DEFAULT_GROUP_SIZE,
            majority_size: DEFAULT_MAJORITY_SIZE,
            bad_group_count: DEFAULT_BAD_GROUP_COUNT,
            total_random_attempts: DEFAULT_TOTAL_RANDOM_ATTEMPTS,
            leeway: DEFAULT_LEEWAY,
            algorithm: CommonLeadingBitsAlgorithm::default(),
            target_count: DEFAULT_TARGET_COUNT,
            seed: None,
            parallel_trials: false,
            max_admission_attempts: None,
            max_bad_nodes: None,
            admission_warning_interval: DEFAULT_ADMISSION_WARNING_INTERVAL,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("good_count", self.good_count),
            ("group_size", self.group_size),
            ("majority_size", self.majority_size),
            ("bad_group_count", self.bad_group_count),
            ("total_random_attempts", self.total_random_attempts),
            ("target_count", self.target_count),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(Error::InvalidConfig {
                reason: format!("{name} must be greater than zero"),
            });
        }
        if self.majority_size > self.group_size {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "majority_size ({}) cannot exceed group_size ({})",
                    self.majority_size, self.group_size
                ),
            });
        }
        if self.group_size > self.good_count {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "group_size ({}) cannot exceed good_count ({})",
                    self.group_size, self.good_count
                ),
            });
        }
        if self.admission_warning_interval == 0 {
            return Err(Error::InvalidConfig {
                reason: "admission_warning_interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Offers each of the six core parameters for interactive override, in the order the
    /// simulation consumes them.
    pub fn prompt_for_overrides<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        prompt_for_value(input, output, "initial network size", &mut self.good_count)?;
        prompt_for_value(input, output, "close group size", &mut self.group_size)?;
        prompt_for_value(input, output, "majority size", &mut self.majority_size)?;
        prompt_for_value(
            input,
            output,
            "target number of compromised groups",
            &mut self.bad_group_count,
        )?;
        prompt_for_value(
            input,
            output,
            "number of random attempts",
            &mut self.total_random_attempts,
        )?;
        prompt_for_value(
            input,
            output,
            "leeway of common leading bits",
            &mut self.leeway,
        )?;
        Ok(())
    }
}

/// Asks for `label` until the answer is empty (keep `value`) or a positive integer.
/// End of input keeps `value` as well.
pub fn prompt_for_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    value: &mut usize,
) -> Result<()> {
    loop {
        write!(
            output,
            "\nEnter {label} (default {value} - hit enter to use default): "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(());
        }
        match answer.parse::<usize>() {
            Ok(choice) if choice > 0 => {
                debug!("Using {label} = {choice}");
                *value = choice;
                return Ok(());
            }
            _ => debug!("Rejected {label} input {answer:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(answers: &str, initial: usize) -> (usize, String) {
        let mut value = initial;
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        prompt_for_value(&mut input, &mut output, "close group size", &mut value)
            .expect("in-memory prompt");
        (value, String::from_utf8_lossy(&output).to_string())
    }

    #[test]
    fn empty_answer_keeps_default() {
        let (value, output) = prompt("\n", 4);
        assert_eq!(value, 4);
        assert!(output.contains("Enter close group size (default 4"));
    }

    #[test]
    fn end_of_input_keeps_default() {
        assert_eq!(prompt("", 4).0, 4);
    }

    #[test]
    fn non_positive_answers_are_rejected_until_valid() {
        let (value, output) = prompt("0\n-3\nabc\n8\n", 4);
        assert_eq!(value, 8);
        assert_eq!(output.matches("Enter close group size").count(), 4);
    }

    #[test]
    fn rejected_answers_then_end_of_input_keep_default() {
        assert_eq!(prompt("0\n", 4).0, 4);
    }

    #[test]
    fn overrides_are_applied_in_order() {
        let mut config = SimulationConfig::default();
        let mut input = Cursor::new(b"50\n\n\n3\n10\n1\n".to_vec());
        let mut output = Vec::new();
        config
            .prompt_for_overrides(&mut input, &mut output)
            .expect("in-memory prompt");

        assert_eq!(config.good_count, 50);
        assert_eq!(config.group_size, DEFAULT_GROUP_SIZE);
        assert_eq!(config.majority_size, DEFAULT_MAJORITY_SIZE);
        assert_eq!(config.bad_group_count, 3);
        assert_eq!(config.total_random_attempts, 10);
        assert_eq!(config.leeway, 1);
    }

    #[test]
    fn validation_rejects_inconsistent_sizes() {
        assert!(SimulationConfig::default().validate().is_ok());

        let config = SimulationConfig {
            majority_size: 5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));

        let config = SimulationConfig {
            good_count: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));

        let config = SimulationConfig {
            target_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn zero_leeway_is_allowed() {
        let config = SimulationConfig {
            leeway: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

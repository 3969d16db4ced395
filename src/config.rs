use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exploration::{Decay, EpsilonGreedy};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub episodes: usize,
    // Count each state once per episode instead of on every visit.
    pub first_visit: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdConfig {
    // Bootstrap horizon, in steps.
    pub k: usize,
    pub alpha: f64,
    pub episodes: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarsaConfig {
    pub k: usize,
    pub alpha: f64,
    pub episodes: usize,
    pub epsilon: Option<f64>,
    pub epsilon_decay: bool,
    pub decay_exponent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub alpha: f64,
    pub episodes: usize,
    pub epsilon: Option<f64>,
    pub epsilon_decay: bool,
    pub decay_exponent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub seed: u64,
    pub monte_carlo: MonteCarloConfig,
    pub td: TdConfig,
    pub sarsa: SarsaConfig,
    pub q_learning: QLearningConfig,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            first_visit: true,
        }
    }
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            k: 1,
            alpha: 0.1,
            episodes: 1000,
        }
    }
}

impl Default for SarsaConfig {
    fn default() -> Self {
        Self {
            k: 1,
            alpha: 0.1,
            episodes: 1000,
            epsilon: Some(0.1),
            epsilon_decay: true,
            decay_exponent: Decay::SARSA.exponent,
        }
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            episodes: 10_000,
            epsilon: Some(0.2),
            epsilon_decay: true,
            decay_exponent: Decay::Q_LEARNING.exponent,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 32,
            monte_carlo: MonteCarloConfig::default(),
            td: TdConfig::default(),
            sarsa: SarsaConfig::default(),
            q_learning: QLearningConfig::default(),
        }
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}

fn check_horizon(k: usize) -> Result<()> {
    if k == 0 {
        return Err(invalid("k must be at least 1".to_string()));
    }
    Ok(())
}

fn check_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(invalid(format!("alpha {} must be in (0, 1]", alpha)));
    }
    Ok(())
}

fn check_exploration(epsilon: Option<f64>, decay_exponent: f64) -> Result<()> {
    if let Some(epsilon) = epsilon {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(invalid(format!("epsilon {} must be in [0, 1]", epsilon)));
        }
    }
    if !decay_exponent.is_finite() || decay_exponent < 0.0 {
        return Err(invalid(format!(
            "decay exponent {} must be finite and non-negative",
            decay_exponent
        )));
    }
    Ok(())
}

fn exploration(epsilon: Option<f64>, epsilon_decay: bool, decay_exponent: f64) -> EpsilonGreedy {
    let decay = if epsilon_decay {
        Some(Decay {
            exponent: decay_exponent,
        })
    } else {
        None
    };
    EpsilonGreedy::new(epsilon, decay)
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl TdConfig {
    pub fn validate(&self) -> Result<()> {
        check_horizon(self.k)?;
        check_alpha(self.alpha)
    }
}

impl SarsaConfig {
    pub fn validate(&self) -> Result<()> {
        check_horizon(self.k)?;
        check_alpha(self.alpha)?;
        check_exploration(self.epsilon, self.decay_exponent)
    }

    pub fn exploration(&self) -> EpsilonGreedy {
        exploration(self.epsilon, self.epsilon_decay, self.decay_exponent)
    }
}

impl QLearningConfig {
    pub fn validate(&self) -> Result<()> {
        check_alpha(self.alpha)?;
        check_exploration(self.epsilon, self.decay_exponent)
    }

    pub fn exploration(&self) -> EpsilonGreedy {
        exploration(self.epsilon, self.epsilon_decay, self.decay_exponent)
    }
}

impl TrainingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrainingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.monte_carlo.validate()?;
        self.td.validate()?;
        self.sarsa.validate()?;
        self.q_learning.validate()
    }

    // The single generator shared by the environment and exploration for a run.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

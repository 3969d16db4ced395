// Tabular value estimation for a blackjack-style game of 31: Monte Carlo, k-step TD,
// k-step SARSA and Q-learning over a discretized (sum, trumps, dealer) state space.

pub mod config;
pub mod discretize;
pub mod episode;
pub mod error;
pub mod exploration;
pub mod game;
pub mod solver;
pub mod table;

#[cfg(test)]
mod testing;

pub use config::{MonteCarloConfig, QLearningConfig, SarsaConfig, TdConfig, TrainingConfig};
pub use discretize::Index;
pub use error::{Error, Result};
pub use exploration::{Decay, EpsilonGreedy};
pub use game::{Action, Category, Environment, Outcome, State};
pub use solver::monte_carlo::MonteCarloEstimate;
pub use table::{ActionValues, StateValues, VisitCounts};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::discretize::Index;
use crate::error::Result;
use crate::game::{Action, State};
use crate::table::ActionValues;

// Per-episode epsilon schedule: ε₀ / episode^p.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decay {
    pub exponent: f64,
}

// ε-greedy exploration with an optional decay schedule.
// `epsilon: None` means always exploit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpsilonGreedy {
    pub epsilon: Option<f64>,
    pub decay: Option<Decay>,
}

impl Decay {
    pub const SARSA: Decay = Decay { exponent: 0.1 };
    pub const Q_LEARNING: Decay = Decay { exponent: 0.2 };

    // `episode` counts from 1.
    pub fn apply(&self, epsilon: f64, episode: usize) -> f64 {
        epsilon / (episode as f64).powf(self.exponent)
    }
}

impl EpsilonGreedy {
    pub fn new(epsilon: Option<f64>, decay: Option<Decay>) -> Self {
        EpsilonGreedy { epsilon, decay }
    }

    pub fn greedy() -> Self {
        EpsilonGreedy::new(None, None)
    }

    // Exploration rate used throughout the given (1-based) episode.
    pub fn for_episode(&self, episode: usize) -> Option<f64> {
        match (self.epsilon, self.decay) {
            (Some(epsilon), Some(decay)) => Some(decay.apply(epsilon, episode)),
            (epsilon, _) => epsilon,
        }
    }
}

// With probability ε returns a uniformly random action, otherwise the greedy action for
// the state (ties broken towards `Hit`).
pub fn select<R: Rng + ?Sized>(
    state: &State,
    action_values: &ActionValues,
    epsilon: Option<f64>,
    rng: &mut R,
) -> Result<Action> {
    let index = Index::of(state)?;
    if let Some(epsilon) = epsilon {
        if rng.gen::<f64>() < epsilon {
            return Ok(Action::ALL[rng.gen_range(0..Action::ALL.len())]);
        }
    }
    Ok(action_values.greedy_action(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn no_decay_keeps_epsilon_test() {
        let exploration = EpsilonGreedy::new(Some(0.2), None);
        assert_eq!(exploration.for_episode(1), Some(0.2));
        assert_eq!(exploration.for_episode(1000), Some(0.2));
        assert_eq!(EpsilonGreedy::greedy().for_episode(5), None);
        assert_eq!(EpsilonGreedy::new(None, Some(Decay::SARSA)).for_episode(5), None);
    }

    #[test]
    fn decay_schedule_test() {
        let exploration = EpsilonGreedy::new(Some(0.2), Some(Decay::Q_LEARNING));
        assert_eq!(exploration.for_episode(1), Some(0.2));
        let expected = 0.2 / 32f64.powf(0.2);
        assert!((exploration.for_episode(32).unwrap() - expected).abs() < 1e-12);
        assert!((expected - 0.1).abs() < 1e-12);
    }

    #[test]
    fn greedy_selection_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = State::new(10, 2, 3);
        let mut q = ActionValues::new();
        q.blend(Index::of(&state).unwrap(), Action::Stick, 1.0, 1.0);

        for _ in 0..100 {
            assert_eq!(select(&state, &q, None, &mut rng).unwrap(), Action::Stick);
            assert_eq!(select(&state, &q, Some(0.0), &mut rng).unwrap(), Action::Stick);
        }
    }

    #[test]
    fn full_exploration_picks_both_actions_test() {
        let mut rng = StdRng::seed_from_u64(11);
        let state = State::new(-4, 0, 9);
        let q = ActionValues::new();

        let hits = (0..1000)
            .filter(|_| select(&state, &q, Some(1.0), &mut rng).unwrap() == Action::Hit)
            .count();
        assert!(hits > 400 && hits < 600, "hits = {}", hits);
    }

    #[test]
    fn out_of_range_state_test() {
        let mut rng = StdRng::seed_from_u64(0);
        let state = State::new(45, 0, 1);
        assert!(select(&state, &ActionValues::new(), None, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn decayed_epsilon_never_increases(
            epsilon in 0.0f64..=1.0,
            exponent in 0.0f64..2.0,
            episode in 1usize..10_000,
        ) {
            let decay = Decay { exponent };
            let current = decay.apply(epsilon, episode);
            let next = decay.apply(epsilon, episode + 1);
            prop_assert!(next <= current + 1e-12);
            prop_assert!(current <= epsilon + 1e-12);
        }
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Category {
    // The player may still act.
    General,
    Bust,
    Sum31,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stick,
}

// Snapshot of the game as seen by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct State {
    pub category: Category,
    // Running sum of the player's hand, in [-30, 30] while the state is actionable.
    pub sum: i32,
    // Number of distinct trump types held, 0..=3.
    pub trumps: u8,
    // Visible dealer card, 1..=10.
    pub dealer: u8,
}

// What the environment reports after settling the deal or taking an action.
// `state` is `None` exactly when `done` is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub state: Option<State>,
    pub reward: f64,
    pub done: bool,
}

// The game simulator. All randomness (dealing) is drawn from the generator passed in,
// so that a single seed reproduces a whole training run.
pub trait Environment {
    // Begins a new episode.
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> State;

    // Reports whether the episode already ended right after the deal.
    fn check_after_init<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome;

    fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Outcome;
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Hit, Action::Stick];

    // Position of the action along the last axis of an action-value table.
    pub fn index(self) -> usize {
        match self {
            Action::Hit => 0,
            Action::Stick => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }
}

impl State {
    pub fn new(sum: i32, trumps: u8, dealer: u8) -> State {
        State {
            category: Category::General,
            sum,
            trumps,
            dealer,
        }
    }

    pub fn is_actionable(&self) -> bool {
        match self.category {
            Category::General => true,
            Category::Bust | Category::Sum31 => false,
        }
    }
}

impl Outcome {
    pub fn running(state: State) -> Outcome {
        Outcome {
            state: Some(state),
            reward: 0.0,
            done: false,
        }
    }

    pub fn finished(reward: f64) -> Outcome {
        Outcome {
            state: None,
            reward,
            done: true,
        }
    }
}

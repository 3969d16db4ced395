// Environments with known dynamics for exercising the estimators.

use rand::Rng;

use crate::game::{Action, Environment, Outcome, State};

pub fn s(sum: i32) -> State {
    State::new(sum, 0, 1)
}

pub fn always(action: Action) -> impl Fn(&State) -> Action {
    move |_: &State| action
}

pub fn stick_at(threshold: i32) -> impl Fn(&State) -> Action {
    move |state: &State| {
        if state.sum < threshold {
            Action::Hit
        } else {
            Action::Stick
        }
    }
}

// One scripted episode: the dealt state, the settle outcome, then one outcome per step.
#[derive(Clone, Debug)]
pub struct Script {
    start: State,
    deal: Outcome,
    steps: Vec<Outcome>,
}

impl Script {
    pub fn new(start: State, steps: Vec<Outcome>) -> Script {
        Script {
            start,
            deal: Outcome::running(start),
            steps,
        }
    }

    pub fn dealt_terminal(reward: f64) -> Script {
        Script {
            start: s(0),
            deal: Outcome::finished(reward),
            steps: Vec::new(),
        }
    }
}

// Replays its scripts in order (cycling), ignoring the chosen actions.
pub struct ScriptedEnv {
    scripts: Vec<Script>,
    resets: usize,
    step: usize,
    pub actions: Vec<Action>,
}

impl ScriptedEnv {
    pub fn new(scripts: Vec<Script>) -> ScriptedEnv {
        assert!(!scripts.is_empty());
        ScriptedEnv {
            scripts,
            resets: 0,
            step: 0,
            actions: Vec::new(),
        }
    }

    // s0 -> s1 -> terminal with the given reward.
    pub fn two_steps(s0: State, s1: State, reward: f64) -> ScriptedEnv {
        ScriptedEnv::new(vec![Script::new(
            s0,
            vec![Outcome::running(s1), Outcome::finished(reward)],
        )])
    }

    fn current(&self) -> &Script {
        &self.scripts[(self.resets - 1) % self.scripts.len()]
    }
}

impl Environment for ScriptedEnv {
    fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> State {
        self.resets += 1;
        self.step = 0;
        self.current().start
    }

    fn check_after_init<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Outcome {
        self.current().deal
    }

    fn step<R: Rng + ?Sized>(&mut self, action: Action, _rng: &mut R) -> Outcome {
        self.actions.push(action);
        let outcome = self.current().steps[self.step];
        self.step += 1;
        outcome
    }
}

// Deterministic corridor: every Hit moves one cell forward and the last Hit wins `reward`.
// Sticking ends the episode with nothing.
pub struct ChainEnv {
    length: i32,
    position: i32,
    reward: f64,
}

impl ChainEnv {
    pub fn new(length: i32, reward: f64) -> ChainEnv {
        ChainEnv {
            length,
            position: 0,
            reward,
        }
    }
}

impl Environment for ChainEnv {
    fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> State {
        self.position = 0;
        s(self.position)
    }

    fn check_after_init<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Outcome {
        Outcome::running(s(self.position))
    }

    fn step<R: Rng + ?Sized>(&mut self, action: Action, _rng: &mut R) -> Outcome {
        match action {
            Action::Stick => Outcome::finished(0.0),
            Action::Hit => {
                self.position += 1;
                if self.position == self.length {
                    Outcome::finished(self.reward)
                } else {
                    Outcome::running(s(self.position))
                }
            }
        }
    }
}

// Small stochastic game in the spirit of 31: hitting moves the sum by a random card,
// leaving [-30, 30] busts, sticking is compared against a random dealer total.
#[derive(Default)]
pub struct RandomWalkEnv {
    state: Option<State>,
}

impl RandomWalkEnv {
    fn current(&self) -> State {
        self.state.unwrap_or_else(|| s(0))
    }
}

impl Environment for RandomWalkEnv {
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> State {
        let state = State::new(
            rng.gen_range(-5..=5),
            rng.gen_range(0..=3),
            rng.gen_range(1..=10),
        );
        self.state = Some(state);
        state
    }

    fn check_after_init<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        if rng.gen::<f64>() < 0.1 {
            self.state = None;
            return Outcome::finished(if rng.gen_bool(0.5) { 1.0 } else { -1.0 });
        }
        Outcome::running(self.current())
    }

    fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Outcome {
        let mut state = self.current();
        match action {
            Action::Hit => {
                state.sum += rng.gen_range(-10..=10);
                if state.trumps < 3 && rng.gen_bool(0.2) {
                    state.trumps += 1;
                }
                if state.sum.abs() > 30 {
                    self.state = None;
                    return Outcome::finished(-1.0);
                }
                self.state = Some(state);
                Outcome::running(state)
            }
            Action::Stick => {
                let dealer_total = state.dealer as i32 + rng.gen_range(-10..=20);
                self.state = None;
                Outcome::finished(if state.sum > dealer_total { 1.0 } else { -1.0 })
            }
        }
    }
}

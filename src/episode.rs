use rand::Rng;

use crate::error::{Error, Result};
use crate::game::{Action, Environment, Outcome, State};

// Result of a single environment transition, after the contract checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    Continue(State),
    Terminal(f64),
}

// A complete, non-degenerate episode played under a fixed policy.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    // Actionable states in visiting order; the terminal transition carries no state.
    pub states: Vec<State>,
    pub reward: f64,
}

fn transition(outcome: Outcome) -> Result<Transition> {
    match (outcome.done, outcome.state) {
        (true, None) => Ok(Transition::Terminal(outcome.reward)),
        (false, Some(state)) => {
            if outcome.reward != 0.0 {
                return Err(Error::NonZeroIntermediateReward {
                    reward: outcome.reward,
                });
            }
            if !state.is_actionable() {
                return Err(Error::NonActionableState {
                    category: state.category,
                });
            }
            Ok(Transition::Continue(state))
        }
        (done, state) => Err(Error::InconsistentOutcome {
            done,
            has_state: state.is_some(),
        }),
    }
}

// Resets the environment and settles the deal.
// Returns `None` if the episode ended before the player could act.
pub fn begin<E, R>(env: &mut E, rng: &mut R) -> Result<Option<State>>
where
    E: Environment,
    R: Rng + ?Sized,
{
    env.reset(rng);
    match transition(env.check_after_init(rng))? {
        Transition::Continue(state) => Ok(Some(state)),
        Transition::Terminal(_) => Ok(None),
    }
}

pub fn advance<E, R>(env: &mut E, action: Action, rng: &mut R) -> Result<Transition>
where
    E: Environment,
    R: Rng + ?Sized,
{
    transition(env.step(action, rng))
}

// Plays one episode to the end under `policy`, collecting every actionable state.
pub fn rollout<E, P, R>(env: &mut E, policy: &P, rng: &mut R) -> Result<Option<Episode>>
where
    E: Environment,
    P: Fn(&State) -> Action,
    R: Rng + ?Sized,
{
    let mut state = match begin(env, rng)? {
        Some(state) => state,
        None => return Ok(None),
    };

    let mut states = vec![state];
    loop {
        match advance(env, policy(&state), rng)? {
            Transition::Continue(next) => {
                states.push(next);
                state = next;
            }
            Transition::Terminal(reward) => return Ok(Some(Episode { states, reward })),
        }
    }
}

// Returns the terminal reward of one episode, 0 if it ended at the deal.
pub fn play<E, P, R>(env: &mut E, policy: &P, rng: &mut R) -> Result<f64>
where
    E: Environment,
    P: Fn(&State) -> Action,
    R: Rng + ?Sized,
{
    Ok(rollout(env, policy, rng)?.map_or(0.0, |episode| episode.reward))
}

// Average terminal reward of `policy` over the given number of episodes.
pub fn evaluate<E, P, R>(env: &mut E, policy: &P, episodes: usize, rng: &mut R) -> Result<f64>
where
    E: Environment,
    P: Fn(&State) -> Action,
    R: Rng + ?Sized,
{
    if episodes == 0 {
        return Ok(0.0);
    }

    let mut total_reward = 0.0;
    for _ in 0..episodes {
        total_reward += play(env, policy, rng)?;
    }
    Ok(total_reward / episodes as f64)
}

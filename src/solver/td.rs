use crate::config::{SarsaConfig, TdConfig};
use crate::exploration;
use crate::solver::*;

// Estimates the state-value function of a fixed policy with k-step TD.
//
// Each state waits in the window until the state k steps later is observed, then
//   V(Sₜ) ← V(Sₜ) + α∙[R + V(Sₜ₊ₖ) - V(Sₜ)],
// where R is always zero since only the terminal transition is rewarded.
// States still in the window when the episode ends have no successor to bootstrap from:
//   V(S) ← V(S) + α∙[R_terminal - V(S)].
pub fn evaluate_policy_k_step<E, P, R>(
    env: &mut E,
    policy: &P,
    config: &TdConfig,
    rng: &mut R,
) -> Result<StateValues>
where
    E: Environment,
    P: Fn(&State) -> Action,
    R: Rng + ?Sized,
{
    config.validate()?;
    log::info!(
        "{}-step td: {} episodes, alpha = {}",
        config.k,
        config.episodes,
        config.alpha
    );

    let mut state_values = StateValues::new();

    for episode_number in 1..=config.episodes {
        let mut state = match begin(env, rng)? {
            Some(state) => state,
            None => {
                log::debug!("episode {} ended at the deal, skipped", episode_number);
                continue;
            }
        };

        let mut window = Window::new(config.k);
        loop {
            window.push(state)?;
            match advance(env, policy(&state), rng)? {
                Transition::Continue(next_state) => {
                    if let Some(head) = window.pop_full() {
                        let target = state_values.get(Index::of(&next_state)?);
                        state_values.blend(Index::of(&head)?, target, config.alpha);
                    }
                    state = next_state;
                }
                Transition::Terminal(reward) => {
                    for s in window.drain() {
                        state_values.blend(Index::of(&s)?, reward, config.alpha);
                    }
                    break;
                }
            }
        }
    }

    log::info!(
        "{}-step td: {} cells updated",
        config.k,
        state_values.non_zero()
    );
    Ok(state_values)
}

// Learns action values with on-policy k-step SARSA under ε-greedy exploration.
//
// Actions are chosen from the current table as the episode unfolds. The pair (Sₜ, Aₜ)
// is updated once the pair (Sₜ₊ₖ, Aₜ₊ₖ) that will actually be taken is known:
//   Q(Sₜ, Aₜ) ← Q(Sₜ, Aₜ) + α∙[R + Q(Sₜ₊ₖ, Aₜ₊ₖ) - Q(Sₜ, Aₜ)].
// Pairs left in the window at the end of the episode move towards the terminal reward.
pub fn find_action_values_k_step_sarsa<E, R>(
    env: &mut E,
    config: &SarsaConfig,
    rng: &mut R,
) -> Result<ActionValues>
where
    E: Environment,
    R: Rng + ?Sized,
{
    config.validate()?;
    let schedule = config.exploration();
    log::info!(
        "{}-step sarsa: {} episodes, alpha = {}, {:?}",
        config.k,
        config.episodes,
        config.alpha,
        schedule
    );

    let mut action_values = ActionValues::new();

    for episode_number in 1..=config.episodes {
        let epsilon = schedule.for_episode(episode_number);

        let mut state = match begin(env, rng)? {
            Some(state) => state,
            None => {
                log::debug!("episode {} ended at the deal, skipped", episode_number);
                continue;
            }
        };
        let mut action = exploration::select(&state, &action_values, epsilon, rng)?;

        let mut window = Window::new(config.k);
        loop {
            window.push((state, action))?;
            match advance(env, action, rng)? {
                Transition::Continue(next_state) => {
                    let next_action =
                        exploration::select(&next_state, &action_values, epsilon, rng)?;
                    if let Some((head_state, head_action)) = window.pop_full() {
                        let target = action_values.get(Index::of(&next_state)?, next_action);
                        action_values.blend(
                            Index::of(&head_state)?,
                            head_action,
                            target,
                            config.alpha,
                        );
                    }
                    state = next_state;
                    action = next_action;
                }
                Transition::Terminal(reward) => {
                    for (s, a) in window.drain() {
                        action_values.blend(Index::of(&s)?, a, reward, config.alpha);
                    }
                    break;
                }
            }
        }
    }

    log::info!(
        "{}-step sarsa: {} entries updated",
        config.k,
        action_values.non_zero()
    );
    Ok(action_values)
}

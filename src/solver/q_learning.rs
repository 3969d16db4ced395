use crate::config::QLearningConfig;
use crate::exploration;
use crate::solver::*;

// Learns action values with one-step Q-learning under ε-greedy exploration.
//
// After every non-terminal step the taken pair moves towards the greedy value of the next
// state, whatever action is taken there:
//   Q(S, A) ← Q(S, A) + α∙[R + maxₐ Q(S₊₁, a) - Q(S, A)].
// The final step of an episode moves towards the terminal reward:
//   Q(S, A) ← Q(S, A) + α∙[R - Q(S, A)].
pub fn find_action_values_q_learning<E, R>(
    env: &mut E,
    config: &QLearningConfig,
    rng: &mut R,
) -> Result<ActionValues>
where
    E: Environment,
    R: Rng + ?Sized,
{
    config.validate()?;
    let schedule = config.exploration();
    log::info!(
        "q-learning: {} episodes, alpha = {}, {:?}",
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

        loop {
            let action = exploration::select(&state, &action_values, epsilon, rng)?;
            let index = Index::of(&state)?;
            match advance(env, action, rng)? {
                Transition::Continue(next_state) => {
                    let target = action_values.max(Index::of(&next_state)?);
                    action_values.blend(index, action, target, config.alpha);
                    state = next_state;
                }
                Transition::Terminal(reward) => {
                    action_values.blend(index, action, reward, config.alpha);
                    break;
                }
            }
        }
    }

    log::info!("q-learning: {} entries updated", action_values.non_zero());
    Ok(action_values)
}

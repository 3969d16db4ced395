use std::collections::HashSet;

use crate::config::MonteCarloConfig;
use crate::episode::rollout;
use crate::solver::*;
use crate::table::VisitCounts;

#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloEstimate {
    // Sum of terminal rewards per cell divided by the total number of episodes,
    // i.e. E[return | visited] scaled by the visit frequency.
    pub values: StateValues,
    // Number of updates each cell received; zero means the cell was never visited.
    pub visits: VisitCounts,
}

// Estimates the state-value function of a fixed policy from complete episodes.
//
// Every episode contributes its terminal reward to each state it visited (once per
// episode with `first_visit`, otherwise once per visit). The accumulated sums are divided
// by the total number of episodes, not by the per-cell visit count.
pub fn evaluate_policy<E, P, R>(
    env: &mut E,
    policy: &P,
    config: &MonteCarloConfig,
    rng: &mut R,
) -> Result<MonteCarloEstimate>
where
    E: Environment,
    P: Fn(&State) -> Action,
    R: Rng + ?Sized,
{
    config.validate()?;
    log::info!(
        "monte carlo: {} episodes, first visit = {}",
        config.episodes,
        config.first_visit
    );

    let mut values = StateValues::new();
    let mut visits = VisitCounts::new();

    for episode_number in 1..=config.episodes {
        let episode = match rollout(env, policy, rng)? {
            Some(episode) => episode,
            None => {
                log::debug!("episode {} ended at the deal, skipped", episode_number);
                continue;
            }
        };

        let mut states = episode.states;
        if config.first_visit {
            let mut visited = HashSet::new();
            states.retain(|state| visited.insert(*state));
        }

        for state in states.iter() {
            let index = Index::of(state)?;
            values.add(index, episode.reward);
            visits.increment(index);
        }
    }

    if config.episodes > 0 {
        values.divide(config.episodes as f64);
    }

    log::info!(
        "monte carlo: {} cells visited, {} updates",
        visits.visited_cells(),
        visits.total()
    );
    Ok(MonteCarloEstimate { values, visits })
}

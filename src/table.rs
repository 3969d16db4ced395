use nalgebra::{DMatrix, DVector};

use crate::discretize::{Index, DEALER_BUCKETS, SUM_BUCKETS, TRUMP_BUCKETS};
use crate::error::Result;
use crate::game::{Action, State};

// Number of cells in a (61, 4, 10) state-value table.
pub const STATE_COUNT: usize = SUM_BUCKETS * TRUMP_BUCKETS * DEALER_BUCKETS;
pub const ACTION_COUNT: usize = 2;

// State-value function V, shape (61, 4, 10), stored flat in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct StateValues {
    values: DVector<f64>,
}

// Number of times each state-value cell received an update.
// Tells apart cells that were never visited from cells whose estimate is exactly zero.
#[derive(Clone, Debug, PartialEq)]
pub struct VisitCounts {
    counts: DVector<u64>,
}

// Action-value function Q, shape (61, 4, 10, 2): one row per state cell, one column per action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionValues {
    values: DMatrix<f64>,
}

impl StateValues {
    pub fn new() -> Self {
        StateValues {
            values: DVector::zeros(STATE_COUNT),
        }
    }

    pub fn get(&self, index: Index) -> f64 {
        self.values[index.flat()]
    }

    pub fn add(&mut self, index: Index, amount: f64) {
        self.values[index.flat()] += amount;
    }

    // V(s) ← V(s) + α∙[target - V(s)]
    pub fn blend(&mut self, index: Index, target: f64, alpha: f64) {
        let value = &mut self.values[index.flat()];
        *value += alpha * (target - *value);
        log::trace!("V{:?} -> {:.6}", index, *value);
    }

    pub fn divide(&mut self, divisor: f64) {
        self.values /= divisor;
    }

    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Index, f64)> + '_ {
        Index::all().zip(self.values.iter().copied())
    }

    // Number of cells holding a non-zero estimate.
    pub fn non_zero(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}

impl Default for StateValues {
    fn default() -> Self {
        StateValues::new()
    }
}

impl VisitCounts {
    pub fn new() -> Self {
        VisitCounts {
            counts: DVector::zeros(STATE_COUNT),
        }
    }

    pub fn get(&self, index: Index) -> u64 {
        self.counts[index.flat()]
    }

    pub fn increment(&mut self, index: Index) {
        self.counts[index.flat()] += 1;
    }

    pub fn visited(&self, index: Index) -> bool {
        self.get(index) > 0
    }

    // Number of distinct cells visited at least once.
    pub fn visited_cells(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for VisitCounts {
    fn default() -> Self {
        VisitCounts::new()
    }
}

impl ActionValues {
    pub fn new() -> Self {
        ActionValues {
            values: DMatrix::zeros(STATE_COUNT, ACTION_COUNT),
        }
    }

    pub fn get(&self, index: Index, action: Action) -> f64 {
        self.values[(index.flat(), action.index())]
    }

    // Q(s, a) ← Q(s, a) + α∙[target - Q(s, a)]
    pub fn blend(&mut self, index: Index, action: Action, target: f64, alpha: f64) {
        let value = &mut self.values[(index.flat(), action.index())];
        *value += alpha * (target - *value);
        log::trace!("Q{:?}[{:?}] -> {:.6}", index, action, *value);
    }

    // max_a Q(s, a)
    pub fn max(&self, index: Index) -> f64 {
        Action::ALL
            .iter()
            .map(|a| self.get(index, *a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    // Action with the highest value. Ties go to the action listed first in `Action::ALL`.
    pub fn greedy_action(&self, index: Index) -> Action {
        let mut best_action = Action::ALL[0];
        let mut best_value = self.get(index, best_action);
        for action in Action::ALL.iter().skip(1) {
            let value = self.get(index, *action);
            if value > best_value {
                best_action = *action;
                best_value = value;
            }
        }
        best_action
    }

    // Greedy action for a raw state; out-of-domain states are an error.
    pub fn greedy_action_for(&self, state: &State) -> Result<Action> {
        Ok(self.greedy_action(Index::of(state)?))
    }

    // Fixed policy acting greedily with respect to the current table, in the
    // `Fn(&State) -> Action` shape the episode driver takes. Lossy: states outside the
    // table domain get the first action. Use `greedy_action_for` to have them rejected.
    pub fn greedy_policy(&self) -> impl Fn(&State) -> Action + '_ {
        move |state: &State| self.greedy_action_for(state).unwrap_or(Action::ALL[0])
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn non_zero(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}

impl Default for ActionValues {
    fn default() -> Self {
        ActionValues::new()
    }
}

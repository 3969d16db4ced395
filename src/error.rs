use thiserror::Error;

use crate::game::Category;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reward {reward} observed on a non-terminal step")]
    NonZeroIntermediateReward { reward: f64 },

    #[error("state with category {category:?} is not actionable but appeared inside a trajectory")]
    NonActionableState { category: Category },

    #[error("window holds {got} entries, expected {expected}")]
    WindowLength { expected: usize, got: usize },

    #[error("environment reported done={done} with state present={has_state}")]
    InconsistentOutcome { done: bool, has_state: bool },

    #[error("{field} value {value} is outside the table domain")]
    IndexOutOfRange { field: &'static str, value: i64 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

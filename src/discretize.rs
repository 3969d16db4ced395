use crate::error::{Error, Result};
use crate::game::State;

pub const SUM_BUCKETS: usize = 61;
pub const TRUMP_BUCKETS: usize = 4;
pub const DEALER_BUCKETS: usize = 10;

// Lowest running sum of an actionable state; it lands in bucket 0.
pub const MIN_SUM: i32 = -30;

// Position of a state in the value tables.
//
// Distinct game situations may share an index (e.g. same sum reached with different
// cards), so equal indices do not imply equal states.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Index {
    pub sum: usize,
    pub trumps: usize,
    pub dealer: usize,
}

impl Index {
    pub fn of(state: &State) -> Result<Index> {
        let sum = state.sum.checked_sub(MIN_SUM).unwrap_or(-1);
        if sum < 0 || sum as usize >= SUM_BUCKETS {
            return Err(Error::IndexOutOfRange {
                field: "sum",
                value: state.sum as i64,
            });
        }

        if state.trumps as usize >= TRUMP_BUCKETS {
            return Err(Error::IndexOutOfRange {
                field: "trumps",
                value: state.trumps as i64,
            });
        }

        if state.dealer == 0 || state.dealer as usize > DEALER_BUCKETS {
            return Err(Error::IndexOutOfRange {
                field: "dealer",
                value: state.dealer as i64,
            });
        }

        Ok(Index {
            sum: sum as usize,
            trumps: state.trumps as usize,
            dealer: state.dealer as usize - 1,
        })
    }

    // Row-major offset into a (61, 4, 10) table.
    pub fn flat(&self) -> usize {
        (self.sum * TRUMP_BUCKETS + self.trumps) * DEALER_BUCKETS + self.dealer
    }

    pub fn all() -> impl Iterator<Item = Index> {
        (0..SUM_BUCKETS).flat_map(|sum| {
            (0..TRUMP_BUCKETS).flat_map(move |trumps| {
                (0..DEALER_BUCKETS).map(move |dealer| Index {
                    sum,
                    trumps,
                    dealer,
                })
            })
        })
    }
}

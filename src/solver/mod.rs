use std::collections::VecDeque;

use rand::Rng;

use crate::discretize::Index;
use crate::episode::{advance, begin, Transition};
use crate::error::{Error, Result};
use crate::game::{Action, Environment, State};
use crate::table::{ActionValues, StateValues};

pub mod monte_carlo;
pub mod q_learning;
pub mod td;

// Fixed-capacity FIFO over the most recent steps of an episode.
// Used by the k-step methods to hold states that still wait for their bootstrap target.
#[derive(Clone, Debug)]
pub struct Window<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> Window<T> {
    pub fn new(capacity: usize) -> Self {
        Window {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(Error::WindowLength {
                expected: self.capacity,
                got: self.items.len() + 1,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    // Removes and returns the oldest entry, but only once the window is full.
    pub fn pop_full(&mut self) -> Option<T> {
        if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    // Empties the window, oldest entry first.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_slides_test() {
        let mut window = Window::new(2);
        window.push(1).unwrap();
        assert_eq!(window.pop_full(), None);
        window.push(2).unwrap();
        assert!(matches!(
            window.push(3),
            Err(Error::WindowLength {
                expected: 2,
                got: 3
            })
        ));

        assert_eq!(window.pop_full(), Some(1));
        assert_eq!(window.len(), 1);
        window.push(3).unwrap();
        assert_eq!(window.drain().collect::<Vec<_>>(), vec![2, 3]);
        assert!(window.is_empty());
    }
}

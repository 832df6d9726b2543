//! Replays a fixed list of arrivals.

use std::collections::VecDeque;

use crate::core::{Arrival, ArrivalSource};

/// Arrival source that yields a prepared script once, in order.
#[derive(Debug, Default)]
pub struct ScriptedArrivalSource {
    arrivals: VecDeque<Arrival>,
}

impl ScriptedArrivalSource {
    /// Create a source from arrivals in the order they should be dispatched.
    pub fn new(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        Self {
            arrivals: arrivals.into_iter().collect(),
        }
    }

    /// Arrivals not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.arrivals.len()
    }
}

impl ArrivalSource for ScriptedArrivalSource {
    fn next_arrival(&mut self) -> Option<Arrival> {
        self.arrivals.pop_front()
    }
}

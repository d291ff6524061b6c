// vnf-search: genetic-algorithm based VNF chain placement search
// Copyright (C) 2026  vnf-search contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Conditions that stop the search loop.

use std::time::{Duration, Instant};

/// Asks, once per generation, whether the search should stop.
///
/// `is_met` may carry state (a deadline, a generation counter) and is
/// evaluated at the top of every loop iteration, so a condition that
/// counts generations counts loop entries, not completed generations.
pub trait TerminationCondition {
    /// Whether the search should stop before running another generation.
    fn is_met(&mut self) -> bool;
}

/// Stops once a wall-clock deadline has passed.
pub struct TimeLimitTerminationCondition {
    deadline: Instant,
}

impl TimeLimitTerminationCondition {
    /// Builds a condition that is met once `limit` has elapsed from now.
    pub fn new(limit: Duration) -> Self {
        TimeLimitTerminationCondition {
            deadline: Instant::now() + limit,
        }
    }
}

impl TerminationCondition for TimeLimitTerminationCondition {
    fn is_met(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Stops once a fixed number of generations have been entered.
pub struct GenerationLimitTerminationCondition {
    remaining: usize,
}

impl GenerationLimitTerminationCondition {
    /// Builds a condition that allows `generations` more loop entries.
    pub fn new(generations: usize) -> Self {
        GenerationLimitTerminationCondition { remaining: generations }
    }
}

impl TerminationCondition for GenerationLimitTerminationCondition {
    fn is_met(&mut self) -> bool {
        if self.remaining == 0 {
            true
        } else {
            self.remaining -= 1;
            false
        }
    }
}

/// Stops as soon as any of a set of conditions is met.
pub struct AnyTerminationCondition {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl AnyTerminationCondition {
    /// Builds a condition met as soon as any of `conditions` is met.
    pub fn new(conditions: Vec<Box<dyn TerminationCondition>>) -> Self {
        AnyTerminationCondition { conditions }
    }
}

impl TerminationCondition for AnyTerminationCondition {
    fn is_met(&mut self) -> bool {
        // Every condition is polled so stateful ones (generation counters)
        // advance regardless of evaluation order.
        self.conditions.iter_mut().fold(false, |met, condition| condition.is_met() || met)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_limit_stops_after_the_given_count() {
        let mut condition = GenerationLimitTerminationCondition::new(2);
        assert!(!condition.is_met());
        assert!(!condition.is_met());
        assert!(condition.is_met());
    }

    #[test]
    fn time_limit_is_met_once_elapsed() {
        let mut condition = TimeLimitTerminationCondition::new(Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(condition.is_met());
    }
}

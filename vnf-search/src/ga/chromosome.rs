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

//! A chromosome is a placement matrix plus the fitness it was last scored
//! at. Ordering between chromosomes looks only at fitness, matching how
//! the search ranks, selects and takes the best candidate at the end of a
//! run.

use std::cmp::Ordering;

use crate::placement::Placement;
use crate::request::ProblemInstance;

/// One individual in the population: a placement matrix (one row per
/// request, `-1` cells for rejected requests) and its fitness.
///
/// A freshly built chromosome (from initialization, crossover or mutation)
/// carries a stale `fitness` of `0.0` until the driver's evaluation step
/// scores it; only compare chromosomes after evaluation.
#[derive(Debug, Clone)]
pub struct Chromosome {
    /// The encoded placement: `genes[request_index][chain_position]`.
    pub genes: Vec<Vec<i32>>,
    /// The fitness this chromosome was last scored at.
    pub fitness: f64,
}

impl Chromosome {
    /// Builds a chromosome from a placement matrix with fitness `0.0`.
    pub fn new(genes: Vec<Vec<i32>>) -> Self {
        Chromosome { genes, fitness: 0.0 }
    }

    /// Decodes this chromosome's genes into a placement snapshot against
    /// `problem`.
    pub fn decode<'a>(&self, problem: &'a ProblemInstance) -> Placement<'a> {
        Placement::from_placement_matrix(problem, &self.genes)
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}
impl Eq for Chromosome {}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Chromosome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_looks_only_at_fitness() {
        let worse = Chromosome {
            genes: vec![vec![5, 5]],
            fitness: 1.0,
        };
        let better = Chromosome {
            genes: vec![vec![0, 0]],
            fitness: 2.0,
        };
        assert!(worse < better);
        assert_eq!(worse.clone().max(better.clone()), better);
    }
}

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

//! Parent selection: three rank- and tournament-based schemes, all
//! reducing a population to `selection_size` chromosomes chosen with
//! replacement.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::Error;
use crate::ga::chromosome::Chromosome;

use super::stochastic_universal_sampling;

/// Selects `selection_size` chromosomes from `population`.
pub trait SelectionOperator {
    /// Selects `selection_size` chromosomes, with replacement.
    fn select(
        &self,
        population: &[Chromosome],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, Error>;
}

/// Assigns each individual a selection probability linear in its fitness
/// rank (worst gets `1 / sum_of_ranks`, best gets `n / sum_of_ranks`),
/// then draws with stochastic universal sampling.
pub struct LinearRankSelection;

impl SelectionOperator for LinearRankSelection {
    fn select(
        &self,
        population: &[Chromosome],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, Error> {
        let mut sorted = population.to_vec();
        sorted.sort_by(|a, b| a.fitness.total_cmp(&b.fitness)); // ascending: rank 1 is worst
        let n = sorted.len();
        let rank_sum = (n * (n + 1)) as f64 / 2.0;
        let probabilities: Vec<f64> = (1..=n).map(|rank| rank as f64 / rank_sum).collect();
        stochastic_universal_sampling(&sorted, &probabilities, selection_size, rng)
    }
}

/// Assigns each individual a selection probability that decays
/// geometrically with fitness rank (best gets the most weight), governed
/// by `pressure_parameter` (`0 < pressure_parameter < 1`; smaller values
/// favor the top ranks more strongly).
pub struct ExponentialRankSelection {
    /// Decay base for the rank-weighted probability distribution.
    pub pressure_parameter: f64,
}

impl Default for ExponentialRankSelection {
    fn default() -> Self {
        ExponentialRankSelection { pressure_parameter: 0.9 }
    }
}

impl SelectionOperator for ExponentialRankSelection {
    fn select(
        &self,
        population: &[Chromosome],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, Error> {
        if selection_size == 0 {
            return Ok(Vec::new());
        }
        let mut sorted = population.to_vec();
        sorted.sort_by(|a, b| b.fitness.total_cmp(&a.fitness)); // descending: rank 1 is best

        let denominator = self.pressure_parameter.powi(selection_size as i32) - 1.0;
        let probabilities: Vec<f64> = (0..sorted.len())
            .map(|rank| (self.pressure_parameter - 1.0) * self.pressure_parameter.powi(rank as i32) / denominator)
            .collect();
        stochastic_universal_sampling(&sorted, &probabilities, selection_size, rng)
    }
}

/// Repeatedly runs a `tournament_size`-way tournament among uniformly
/// random individuals and keeps the fittest.
pub struct TournamentSelection {
    /// Number of individuals drawn per tournament.
    pub tournament_size: usize,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        TournamentSelection { tournament_size: 2 }
    }
}

impl SelectionOperator for TournamentSelection {
    fn select(
        &self,
        population: &[Chromosome],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, Error> {
        if population.is_empty() {
            return Err(Error::Invariant("tournament selection requires a non-empty population".into()));
        }
        let mut selected = Vec::with_capacity(selection_size);
        for _ in 0..selection_size {
            let winner = (0..self.tournament_size)
                .filter_map(|_| population.choose(rng))
                .max()
                .expect("tournament_size must be at least 1");
            selected.push(winner.clone());
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn population() -> Vec<Chromosome> {
        (1..=5)
            .map(|i| Chromosome {
                genes: vec![],
                fitness: i as f64,
            })
            .collect()
    }

    #[test]
    fn linear_rank_selection_returns_the_requested_count() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let selected = LinearRankSelection.select(&population(), 3, &mut rng).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn exponential_rank_selection_probabilities_favor_the_best() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let selected = ExponentialRankSelection::default().select(&population(), 4, &mut rng).unwrap();
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn tournament_selection_never_returns_worse_than_the_population_minimum() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let selected = TournamentSelection::default().select(&population(), 10, &mut rng).unwrap();
        assert!(selected.iter().all(|c| c.fitness >= 1.0));
    }
}

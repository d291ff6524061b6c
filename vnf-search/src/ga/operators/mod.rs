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

//! The pluggable genetic operators: initialization, selection, crossover,
//! mutation and repair. Each stage is a trait so the driver can be built
//! from any combination of operators without knowing their concrete
//! types; all take `&mut dyn RngCore` rather than a generic `Rng` so they
//! stay object-safe and can be boxed into an [`crate::ga::OperatorSuite`].

pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod repair;
pub mod selection;

pub use crossover::{CrossoverOperator, MatrixRowSwapCrossover};
pub use initialization::{InitializationOperator, RandomPlacementInitialization};
pub use mutation::{MutationOperator, RandomAcceptanceMutation, RandomRejectionMutation};
pub use repair::{NoOpRepairOperator, RepairOperator};
pub use selection::{ExponentialRankSelection, LinearRankSelection, SelectionOperator, TournamentSelection};

use rand::RngCore;

/// Stochastic universal sampling: draws `selection_size` individuals from
/// `population` given a per-individual selection probability, using a
/// single evenly-spaced comb of pointers rather than independent draws so
/// that high-probability individuals are picked close to their expected
/// count rather than by chance alone.
///
/// `probabilities[i]` must correspond to `population[i]` and the
/// probabilities must sum to (approximately) `1.0`.
pub(crate) fn stochastic_universal_sampling(
    population: &[crate::ga::Chromosome],
    probabilities: &[f64],
    selection_size: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<crate::ga::Chromosome>, crate::error::Error> {
    let total: f64 = probabilities.iter().sum();
    if total.round() as i64 != 1 {
        return Err(crate::error::Error::Invariant(format!(
            "selection probabilities must sum to 1.0, got {total}"
        )));
    }
    if selection_size == 0 {
        return Ok(Vec::new());
    }

    let pointer_distance = 1.0 / selection_size as f64;
    let start = rand::Rng::gen_range(rng, 0.0..pointer_distance);

    let mut selected = Vec::with_capacity(selection_size);
    let mut cumulative = 0.0f64;
    let mut index = 0usize;
    for i in 0..selection_size {
        let pointer = start + i as f64 * pointer_distance;
        while cumulative + probabilities[index] < pointer && index + 1 < population.len() {
            cumulative += probabilities[index];
            index += 1;
        }
        selected.push(population[index].clone());
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Chromosome;
    use rand::SeedableRng;

    #[test]
    fn sus_returns_the_requested_count() {
        let population = vec![
            Chromosome { genes: vec![], fitness: 1.0 },
            Chromosome { genes: vec![], fitness: 2.0 },
            Chromosome { genes: vec![], fitness: 3.0 },
        ];
        let probabilities = vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let selected = stochastic_universal_sampling(&population, &probabilities, 5, &mut rng).unwrap();
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn sus_rejects_probabilities_that_do_not_sum_to_one() {
        let population = vec![Chromosome { genes: vec![], fitness: 1.0 }];
        let probabilities = vec![0.5];
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(stochastic_universal_sampling(&population, &probabilities, 1, &mut rng).is_err());
    }
}

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

//! Crossover: recombining two parent chromosomes into two children.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::Error;
use crate::ga::chromosome::Chromosome;
use crate::request::ProblemInstance;

/// Produces two children from two parents.
pub trait CrossoverOperator {
    /// Crosses `parent1` and `parent2` over, returning two children.
    fn crossover(
        &self,
        problem: &ProblemInstance,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<(Chromosome, Chromosome), Error>;
}

/// Swaps, between the two parents' gene matrices, every row belonging to
/// one mutually-exclusive group at a time, in random group order, and
/// keeps the first swap that leaves both resulting children valid. If no
/// group's swap produces two valid children, both children are exact
/// clones of their respective parent.
///
/// Each attempt swaps rows from the *original* parent matrices, never
/// from a previous failed attempt, so trying one group's swap can never
/// be polluted by another's.
pub struct MatrixRowSwapCrossover;

impl CrossoverOperator for MatrixRowSwapCrossover {
    fn crossover(
        &self,
        problem: &ProblemInstance,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<(Chromosome, Chromosome), Error> {
        let mut group_order: Vec<usize> = (0..problem.groups.len()).collect();
        group_order.shuffle(rng);

        for group_index in group_order {
            let group = &problem.groups[group_index];
            let any_accepted = group.iter().any(|&row| {
                parent1.genes[row].iter().any(|&gene| gene >= 0) || parent2.genes[row].iter().any(|&gene| gene >= 0)
            });
            if !any_accepted {
                continue;
            }

            let start = *group.iter().min().expect("groups are never empty");
            let end = *group.iter().max().expect("groups are never empty") + 1;

            let child1_genes = swap_rows(&parent1.genes, &parent2.genes, start, end);
            let child2_genes = swap_rows(&parent2.genes, &parent1.genes, start, end);
            let child1 = Chromosome::new(child1_genes);
            let child2 = Chromosome::new(child2_genes);

            if child1.decode(problem).is_valid() && child2.decode(problem).is_valid() {
                return Ok((child1, child2));
            }
        }

        Ok((parent1.clone(), parent2.clone()))
    }
}

fn swap_rows(base: &[Vec<i32>], donor: &[Vec<i32>], start: usize, end: usize) -> Vec<Vec<i32>> {
    let mut result = base.to_vec();
    result[start..end].clone_from_slice(&donor[start..end]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Request, RequestKind};
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkTopology};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn two_group_problem() -> ProblemInstance {
        let nodes = vec![
            NetworkNode::new("0", HashMap::new(), HashMap::new()),
            NetworkNode::new("1", HashMap::new(), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::default(), NetworkLink::new(0.0, 100.0, 0.0)],
            vec![NetworkLink::new(0.0, 100.0, 0.0), NetworkLink::default()],
        ];
        let service = Service::new(0, 1, vec![Vnf::default()], vec![0.0, 0.0], 100.0);
        ProblemInstance {
            network: NetworkTopology::new(nodes, links),
            requests: vec![
                Request { kind: RequestKind::Main, service: service.clone(), revenue: 10.0 },
                Request { kind: RequestKind::Alternative, service: service.clone(), revenue: 5.0 },
                Request { kind: RequestKind::Main, service, revenue: 10.0 },
            ],
            groups: vec![vec![0, 1], vec![2]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: 0.0,
        }
    }

    #[test]
    fn crossover_without_activity_falls_back_to_parent_clones() {
        let problem = two_group_problem();
        let parent1 = Chromosome::new(vec![vec![-1], vec![-1], vec![-1]]);
        let parent2 = Chromosome::new(vec![vec![-1], vec![-1], vec![-1]]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let (child1, child2) = MatrixRowSwapCrossover.crossover(&problem, &parent1, &parent2, &mut rng).unwrap();
        assert_eq!(child1.genes, parent1.genes);
        assert_eq!(child2.genes, parent2.genes);
    }

    #[test]
    fn crossover_produces_two_valid_children_when_a_swap_keeps_validity() {
        let problem = two_group_problem();
        let parent1 = Chromosome::new(vec![vec![0], vec![-1], vec![0]]);
        let parent2 = Chromosome::new(vec![vec![-1], vec![0], vec![1]]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let (child1, child2) = MatrixRowSwapCrossover.crossover(&problem, &parent1, &parent2, &mut rng).unwrap();
        assert!(child1.decode(&problem).is_valid());
        assert!(child2.decode(&problem).is_valid());
    }
}

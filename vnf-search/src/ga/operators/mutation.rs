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

//! Mutation: small, independent per-request perturbations of a chromosome.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::accepter::RequestAccepter;
use crate::error::Error;
use crate::ga::chromosome::Chromosome;
use crate::request::ProblemInstance;

/// Perturbs a single chromosome.
pub trait MutationOperator {
    /// Returns a (possibly) mutated copy of `chromosome`.
    fn mutate(&self, problem: &ProblemInstance, chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome, Error>;
}

/// For each currently rejected request, in random order, accepts it with
/// probability `acceptance_probability` via a greedy [`RequestAccepter`]
/// walk seeded from the chromosome's current placement.
pub struct RandomAcceptanceMutation {
    /// Per-rejected-request probability of attempting acceptance.
    pub acceptance_probability: f64,
}

impl Default for RandomAcceptanceMutation {
    fn default() -> Self {
        RandomAcceptanceMutation { acceptance_probability: 0.0 }
    }
}

impl MutationOperator for RandomAcceptanceMutation {
    fn mutate(&self, problem: &ProblemInstance, chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome, Error> {
        let placement = chromosome.decode(problem);
        let mut accepter = RequestAccepter::new(placement);

        let mut order: Vec<usize> = (0..problem.requests.len()).collect();
        order.shuffle(rng);
        for request_index in order {
            if accepter.current().rejects(request_index) && rng.gen::<f64>() < self.acceptance_probability {
                accepter.accept(request_index, rng)?;
            }
        }

        let placement = accepter.into_current();
        if !placement.is_valid() {
            return Err(Error::Invariant(
                "random acceptance mutation produced an invalid placement".into(),
            ));
        }
        Ok(Chromosome::new(placement.placement_matrix()))
    }
}

/// For each currently accepted request (a row with no `-1` cells), in
/// random order, rejects it with probability `rejection_probability` by
/// setting its whole row to `-1`. Operates directly on the gene matrix,
/// with no placement decode/encode round trip, since clearing a row can
/// never make a placement invalid.
pub struct RandomRejectionMutation {
    /// Per-accepted-request probability of forcing rejection.
    pub rejection_probability: f64,
}

impl Default for RandomRejectionMutation {
    fn default() -> Self {
        RandomRejectionMutation { rejection_probability: 0.0 }
    }
}

impl MutationOperator for RandomRejectionMutation {
    fn mutate(&self, _problem: &ProblemInstance, chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome, Error> {
        let mut genes = chromosome.genes;

        let mut order: Vec<usize> = (0..genes.len()).collect();
        order.shuffle(rng);
        for row_index in order {
            let is_accepted = genes[row_index].iter().all(|&gene| gene >= 0);
            if is_accepted && rng.gen::<f64>() < self.rejection_probability {
                let len = genes[row_index].len();
                genes[row_index] = vec![-1; len];
            }
        }

        Ok(Chromosome::new(genes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Request, RequestKind};
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkTopology};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn single_request_problem() -> ProblemInstance {
        let nodes = vec![
            NetworkNode::new("0", HashMap::new(), HashMap::new()),
            NetworkNode::new("1", HashMap::from([(crate::topology::NetworkResource::new("cpu"), 10)]), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::default(), NetworkLink::new(1.0, 100.0, 0.0)],
            vec![NetworkLink::new(1.0, 100.0, 0.0), NetworkLink::default()],
        ];
        ProblemInstance {
            network: NetworkTopology::new(nodes, links),
            requests: vec![Request {
                kind: RequestKind::Main,
                service: Service::new(
                    0,
                    1,
                    vec![Vnf::new(HashMap::from([(crate::topology::NetworkResource::new("cpu"), 5)]))],
                    vec![10.0, 10.0],
                    5.0,
                ),
                revenue: 10.0,
            }],
            groups: vec![vec![0]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: 0.0,
        }
    }

    #[test]
    fn zero_probability_acceptance_mutation_is_a_no_op() {
        let problem = single_request_problem();
        let chromosome = Chromosome::new(vec![vec![-1]]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mutation = RandomAcceptanceMutation { acceptance_probability: 0.0 };
        let mutated = mutation.mutate(&problem, chromosome, &mut rng).unwrap();
        assert!(mutated.decode(&problem).rejects(0));
    }

    #[test]
    fn certain_rejection_mutation_clears_every_accepted_row() {
        let problem = single_request_problem();
        let chromosome = Chromosome::new(vec![vec![1]]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mutation = RandomRejectionMutation { rejection_probability: 1.0 };
        let mutated = mutation.mutate(&problem, chromosome, &mut rng).unwrap();
        assert!(mutated.decode(&problem).rejects(0));
    }
}

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

//! Population seeding.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::accepter::RequestAccepter;
use crate::error::Error;
use crate::ga::chromosome::Chromosome;
use crate::placement::Placement;
use crate::request::ProblemInstance;

/// Builds an initial chromosome.
pub trait InitializationOperator {
    /// Produces one chromosome to seed the population with.
    fn initialize(&self, problem: &ProblemInstance, rng: &mut dyn RngCore) -> Result<Chromosome, Error>;
}

/// Greedily accepts requests in a random order, one [`RequestAccepter`]
/// walk per chromosome. Every request is attempted once; whichever order
/// they land in determines which mutually-exclusive alternative (if any)
/// gets the node budget first.
pub struct RandomPlacementInitialization;

impl InitializationOperator for RandomPlacementInitialization {
    fn initialize(&self, problem: &ProblemInstance, rng: &mut dyn RngCore) -> Result<Chromosome, Error> {
        let empty = Placement::new(problem, vec![None; problem.requests.len()]);
        let mut accepter = RequestAccepter::new(empty);

        let mut order: Vec<usize> = (0..problem.requests.len()).collect();
        order.shuffle(rng);
        for request_index in order {
            accepter.accept(request_index, rng)?;
        }

        Ok(Chromosome::new(accepter.into_current().placement_matrix()))
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

    #[test]
    fn initialization_accepts_a_feasible_request() {
        let nodes = vec![
            NetworkNode::new("0", HashMap::new(), HashMap::new()),
            NetworkNode::new("1", HashMap::from([(crate::topology::NetworkResource::new("cpu"), 10)]), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::default(), NetworkLink::new(1.0, 100.0, 0.0)],
            vec![NetworkLink::new(1.0, 100.0, 0.0), NetworkLink::default()],
        ];
        let problem = ProblemInstance {
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
        };
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let chromosome = RandomPlacementInitialization.initialize(&problem, &mut rng).unwrap();
        assert!(chromosome.decode(&problem).accepts(0));
    }
}

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

//! Incremental, greedy constructive acceptance of placement requests.
//!
//! [`RequestAccepter`] wraps a [`Placement`] snapshot and offers `accept`,
//! which tries to admit one more request by walking its VNF chain over a
//! shuffled node order, picking the first node at each step that has
//! enough residual resources, is compatible with the VNF, and is reached
//! by a link with enough residual bandwidth and latency budget. It is
//! generic over `rand::Rng` so callers (the initialization operator, the
//! acceptance mutation operator) can thread a single seeded generator
//! through every accepter they create.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Error;
use crate::placement::Placement;
use crate::request::RequestKind;

/// Incrementally accepts requests into a placement, one at a time.
pub struct RequestAccepter<'a> {
    current: Placement<'a>,
    remaining_resources: Vec<std::collections::HashMap<crate::topology::NetworkResource, i64>>,
    remaining_bandwidth: Vec<Vec<f64>>,
}

impl<'a> RequestAccepter<'a> {
    /// Builds an accepter starting from `initial`.
    pub fn new(initial: Placement<'a>) -> Self {
        let remaining_resources = initial.remaining_resources_per_node().to_vec();
        let remaining_bandwidth = initial.remaining_bandwidth_per_link().to_vec();
        RequestAccepter {
            current: initial,
            remaining_resources,
            remaining_bandwidth,
        }
    }

    /// The current placement snapshot.
    pub fn current(&self) -> &Placement<'a> {
        &self.current
    }

    /// Consumes the accepter, returning the final placement snapshot.
    pub fn into_current(self) -> Placement<'a> {
        self.current
    }

    /// Attempts to accept `request_index`. Returns `Ok(true)` if the
    /// request was accepted, `Ok(false)` if no suitable placement could be
    /// found or it would violate the mutual-exclusivity or main-request-
    /// ratio constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if `request_index` is out of range or the
    /// request is already accepted — both are programmer errors, not
    /// ordinary search outcomes.
    pub fn accept<R: Rng + ?Sized>(&mut self, request_index: usize, rng: &mut R) -> Result<bool, Error> {
        let problem = self.current.problem();
        if request_index >= problem.requests.len() {
            return Err(Error::Usage(format!(
                "request index {request_index} is not present in this placement"
            )));
        }
        if self.current.accepts(request_index) {
            return Err(Error::Usage(format!(
                "request {request_index} is already accepted"
            )));
        }

        if !self.is_compatible_with_currently_accepted(request_index) {
            return Ok(false);
        }

        match self.find_suitable_nodes(request_index, rng) {
            Some(nodes) => {
                let mut designated = self.current.all_designated_nodes().to_vec();
                designated[request_index] = Some(nodes);
                self.current = Placement::new(problem, designated);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_compatible_with_currently_accepted(&self, request_index: usize) -> bool {
        self.mutually_exclusive_siblings_are_rejected(request_index)
            && self.would_meet_minimum_main_request_ratio(request_index)
    }

    fn mutually_exclusive_siblings_are_rejected(&self, request_index: usize) -> bool {
        match self.current.problem().group_containing(request_index) {
            None => true,
            Some(group) => group
                .iter()
                .filter(|&&other| other != request_index)
                .all(|&other| self.current.rejects(other)),
        }
    }

    fn would_meet_minimum_main_request_ratio(&self, request_index: usize) -> bool {
        let problem = self.current.problem();
        if problem.requests[request_index].kind == RequestKind::Main {
            return true;
        }
        let accepted = self.current.accepted_requests().len();
        let accepted_main = self.current.accepted_main_requests().len();
        let ratio = accepted_main as f64 / (accepted as f64 + 1.0);
        ratio >= problem.minimum_ratio_of_main_requests
    }

    fn find_suitable_nodes<R: Rng + ?Sized>(&mut self, request_index: usize, rng: &mut R) -> Option<Vec<usize>> {
        let problem = self.current.problem();
        let service = &problem.requests[request_index].service;
        let num_nodes = problem.network.sorted_nodes().len();

        let mut nodes = vec![service.ingress()];
        let mut remaining_latency = service.max_latency();

        for (position, vnf) in service.vnf_chain().iter().enumerate() {
            let tail = *nodes.last().unwrap();
            let hop_bandwidth = service.hop_bandwidth(position);

            let mut order: Vec<usize> = (0..num_nodes).collect();
            order.shuffle(rng);

            let chosen = order.into_iter().find(|&node| {
                self.node_has_sufficient_resources(node, vnf)
                    && problem.is_compatible(request_index, position, node)
                    && self.link_is_suitable(tail, node, hop_bandwidth, remaining_latency)
            });

            match chosen {
                Some(node) => {
                    for resource in vnf.resources() {
                        *self.remaining_resources[node].entry(resource.clone()).or_insert(0) -=
                            vnf.resource_demand(resource);
                    }
                    remaining_latency -= problem.network.link(tail, node).latency;
                    self.remaining_bandwidth[tail][node] -= hop_bandwidth;
                    nodes.push(node);
                }
                None => {
                    self.restore_remaining_state();
                    return None;
                }
            }
        }

        let tail = *nodes.last().unwrap();
        let egress = service.egress();
        let last_hop_bandwidth = service.hop_bandwidth(service.vnf_chain().len());
        if !self.link_is_suitable(tail, egress, last_hop_bandwidth, remaining_latency) {
            self.restore_remaining_state();
            return None;
        }
        nodes.push(egress);
        Some(nodes)
    }

    fn node_has_sufficient_resources(&self, node: usize, vnf: &crate::service::Vnf) -> bool {
        vnf.resources().all(|resource| {
            let remaining = self.remaining_resources[node].get(resource).copied().unwrap_or(0);
            remaining - vnf.resource_demand(resource) >= 0
        })
    }

    fn link_is_suitable(&self, tail: usize, head: usize, required_bandwidth: f64, remaining_latency_tolerance: f64) -> bool {
        let link = self.current.problem().network.link(tail, head);
        required_bandwidth <= self.remaining_bandwidth[tail][head] && link.latency <= remaining_latency_tolerance
    }

    fn restore_remaining_state(&mut self) {
        self.remaining_resources = self.current.remaining_resources_per_node().to_vec();
        self.remaining_bandwidth = self.current.remaining_bandwidth_per_link().to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ProblemInstance, Request};
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkResource, NetworkTopology};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn single_feasible_node_problem() -> ProblemInstance {
        let cpu = NetworkResource::new("cpu");
        let nodes = vec![
            NetworkNode::new("0", HashMap::from([(cpu.clone(), 0)]), HashMap::new()),
            NetworkNode::new("1", HashMap::from([(cpu.clone(), 10)]), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::default(), NetworkLink::new(1.0, 100.0, 0.0)],
            vec![NetworkLink::new(1.0, 100.0, 0.0), NetworkLink::default()],
        ];
        let network = NetworkTopology::new(nodes, links);
        let service = Service::new(0, 1, vec![Vnf::new(HashMap::from([(cpu, 5)]))], vec![10.0, 10.0], 5.0);
        ProblemInstance {
            network,
            requests: vec![Request {
                kind: RequestKind::Main,
                service,
                revenue: 10.0,
            }],
            groups: vec![vec![0]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: 0.0,
        }
    }

    #[test]
    fn accepts_the_only_feasible_request() {
        let problem = single_feasible_node_problem();
        let empty = Placement::new(&problem, vec![None]);
        let mut accepter = RequestAccepter::new(empty);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let accepted = accepter.accept(0, &mut rng).unwrap();
        assert!(accepted);
        assert!(accepter.current().is_valid());
        assert_eq!(accepter.current().placement_matrix(), vec![vec![1]]);
    }

    #[test]
    fn rejects_when_no_node_has_capacity() {
        let mut problem = single_feasible_node_problem();
        // Node 1 no longer has enough CPU either.
        let cpu = NetworkResource::new("cpu");
        problem.network = NetworkTopology::new(
            vec![
                NetworkNode::new("0", HashMap::from([(cpu.clone(), 0)]), HashMap::new()),
                NetworkNode::new("1", HashMap::from([(cpu, 1)]), HashMap::new()),
            ],
            vec![
                vec![NetworkLink::default(), NetworkLink::new(1.0, 100.0, 0.0)],
                vec![NetworkLink::new(1.0, 100.0, 0.0), NetworkLink::default()],
            ],
        );
        let empty = Placement::new(&problem, vec![None]);
        let mut accepter = RequestAccepter::new(empty);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let accepted = accepter.accept(0, &mut rng).unwrap();
        assert!(!accepted);
        assert!(accepter.current().rejects(0));
    }

    #[test]
    fn accepting_an_already_accepted_request_is_a_usage_error() {
        let problem = single_feasible_node_problem();
        let empty = Placement::new(&problem, vec![None]);
        let mut accepter = RequestAccepter::new(empty);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        accepter.accept(0, &mut rng).unwrap();
        let result = accepter.accept(0, &mut rng);
        assert!(matches!(result, Err(Error::Usage(_))));
    }

    #[test]
    fn mutual_exclusivity_blocks_a_second_acceptance_in_the_same_group() {
        let mut problem = single_feasible_node_problem();
        problem.requests.push(Request {
            kind: RequestKind::Alternative,
            service: problem.requests[0].service.clone(),
            revenue: 5.0,
        });
        problem.groups = vec![vec![0, 1]];
        let empty = Placement::new(&problem, vec![None, None]);
        let mut accepter = RequestAccepter::new(empty);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(accepter.accept(0, &mut rng).unwrap());
        assert!(!accepter.accept(1, &mut rng).unwrap());
    }
}

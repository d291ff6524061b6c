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

//! An immutable snapshot of which requests are accepted and where their
//! VNFs land, together with every quantity derived from that assignment.
//!
//! [`Placement`] never mutates after construction, so every derived
//! quantity (residual resources, shortages, profit, validity) is computed
//! once in [`Placement::from_placement_matrix`] rather than behind a
//! lazily-filled cache: the two are observationally identical here, and
//! eager computation avoids threading interior mutability through a type
//! that the genetic algorithm treats as a plain value.

use std::collections::HashMap;

use crate::request::{ProblemInstance, RequestKind};
use crate::topology::NetworkResource;

const VALIDITY_DECIMALS: i32 = 6;

fn rounded(value: f64) -> f64 {
    let scale = 10f64.powi(VALIDITY_DECIMALS);
    (value * scale).round() / scale
}

/// A snapshot of accepted/rejected requests and their node assignments,
/// with every derived quantity precomputed.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    problem: &'a ProblemInstance,
    /// `designated_nodes[i]` is `None` if request `i` is rejected,
    /// otherwise `Some([ingress, ..vnf nodes.., egress])`.
    designated_nodes: Vec<Option<Vec<usize>>>,

    allocated_resources_per_node: Vec<HashMap<NetworkResource, i64>>,
    remaining_resources_per_node: Vec<HashMap<NetworkResource, i64>>,
    allocated_bandwidth_per_link: Vec<Vec<f64>>,
    remaining_bandwidth_per_link: Vec<Vec<f64>>,

    cumulative_resource_shortage: i64,
    cumulative_bandwidth_shortage: f64,
    cumulative_excess_latency: f64,
    incompatible_placements_count: usize,
    mutual_exclusivity_violations_count: usize,

    total_revenue: f64,
    total_node_costs: f64,
    total_bandwidth_cost: f64,
}

impl<'a> Placement<'a> {
    /// Builds a placement snapshot from a placement matrix: one row per
    /// request, one column per VNF chain position, each cell holding a
    /// sorted-node index or `-1`. A row containing only `-1`s means the
    /// corresponding request is rejected.
    pub fn from_placement_matrix(problem: &'a ProblemInstance, matrix: &[Vec<i32>]) -> Self {
        let designated_nodes = matrix
            .iter()
            .enumerate()
            .map(|(request_index, row)| {
                if row.iter().all(|&node| node >= 0) {
                    let service = &problem.requests[request_index].service;
                    let mut nodes = Vec::with_capacity(row.len() + 2);
                    nodes.push(service.ingress());
                    nodes.extend(row.iter().map(|&n| n as usize));
                    nodes.push(service.egress());
                    Some(nodes)
                } else {
                    None
                }
            })
            .collect();
        Self::new(problem, designated_nodes)
    }

    /// Builds a placement snapshot directly from a designated-nodes
    /// assignment (`None` per rejected request, `Some([ingress, ..,
    /// egress])` per accepted one).
    pub fn new(problem: &'a ProblemInstance, designated_nodes: Vec<Option<Vec<usize>>>) -> Self {
        let num_nodes = problem.network.sorted_nodes().len();

        let mut allocated_resources_per_node: Vec<HashMap<NetworkResource, i64>> =
            vec![HashMap::new(); num_nodes];
        let mut allocated_bandwidth_per_link = vec![vec![0.0f64; num_nodes]; num_nodes];

        for (request_index, nodes) in designated_nodes.iter().enumerate() {
            let Some(nodes) = nodes else { continue };
            let service = &problem.requests[request_index].service;
            for (position, vnf) in service.vnf_chain().iter().enumerate() {
                let node_index = nodes[position + 1];
                for resource in vnf.resources() {
                    *allocated_resources_per_node[node_index]
                        .entry(resource.clone())
                        .or_insert(0) += vnf.resource_demand(resource);
                }
            }
            for (hop_index, pair) in nodes.windows(2).enumerate() {
                allocated_bandwidth_per_link[pair[0]][pair[1]] += service.hop_bandwidth(hop_index);
            }
        }

        let remaining_resources_per_node: Vec<HashMap<NetworkResource, i64>> = problem
            .network
            .sorted_nodes()
            .iter()
            .enumerate()
            .map(|(node_index, node)| {
                node.resources()
                    .map(|resource| {
                        let allocated = allocated_resources_per_node[node_index]
                            .get(resource)
                            .copied()
                            .unwrap_or(0);
                        (resource.clone(), node.capacity(resource) - allocated)
                    })
                    .collect()
            })
            .collect();

        let cumulative_resource_shortage: i64 = remaining_resources_per_node
            .iter()
            .flat_map(|remaining| remaining.values())
            .map(|&remaining| (-remaining).max(0))
            .sum();

        let mut remaining_bandwidth_per_link = vec![vec![0.0f64; num_nodes]; num_nodes];
        let mut cumulative_bandwidth_shortage = 0.0f64;
        for tail in 0..num_nodes {
            for head in 0..num_nodes {
                let total = problem.network.link(tail, head).bandwidth;
                let remaining = total - allocated_bandwidth_per_link[tail][head];
                remaining_bandwidth_per_link[tail][head] = remaining;
                if -remaining > 0.0 {
                    cumulative_bandwidth_shortage += -remaining;
                }
            }
        }

        let mut cumulative_excess_latency = 0.0f64;
        let mut incompatible_placements_count = 0usize;
        let mut total_revenue = 0.0f64;
        for (request_index, nodes) in designated_nodes.iter().enumerate() {
            let Some(nodes) = nodes else { continue };
            let request = &problem.requests[request_index];
            total_revenue += request.revenue;

            let effective_latency = problem.network.path_latency(nodes);
            let excess = effective_latency - request.service.max_latency();
            if excess > 0.0 {
                cumulative_excess_latency += excess;
            }

            for position in 0..request.service.vnf_chain().len() {
                let node_index = nodes[position + 1];
                if !problem.is_compatible(request_index, position, node_index) {
                    incompatible_placements_count += 1;
                }
            }
        }

        let mutual_exclusivity_violations_count: usize = problem
            .groups
            .iter()
            .map(|group| {
                let accepted_in_group = group
                    .iter()
                    .filter(|&&request_index| designated_nodes[request_index].is_some())
                    .count();
                accepted_in_group.saturating_sub(1)
            })
            .sum();

        let total_node_costs: f64 = (0..num_nodes)
            .map(|node_index| {
                let node = &problem.network.sorted_nodes()[node_index];
                allocated_resources_per_node[node_index]
                    .iter()
                    .map(|(resource, &amount)| amount as f64 * node.unit_cost(resource))
                    .sum::<f64>()
            })
            .sum();

        let total_bandwidth_cost: f64 = (0..num_nodes)
            .flat_map(|tail| (0..num_nodes).map(move |head| (tail, head)))
            .map(|(tail, head)| {
                allocated_bandwidth_per_link[tail][head] * problem.network.link(tail, head).bandwidth_unit_cost
            })
            .sum();

        Placement {
            problem,
            designated_nodes,
            allocated_resources_per_node,
            remaining_resources_per_node,
            allocated_bandwidth_per_link,
            remaining_bandwidth_per_link,
            cumulative_resource_shortage,
            cumulative_bandwidth_shortage,
            cumulative_excess_latency,
            incompatible_placements_count,
            mutual_exclusivity_violations_count,
            total_revenue,
            total_node_costs,
            total_bandwidth_cost,
        }
    }

    /// The problem instance this snapshot was built against.
    pub fn problem(&self) -> &'a ProblemInstance {
        self.problem
    }

    /// Whether `request_index` is currently accepted.
    pub fn accepts(&self, request_index: usize) -> bool {
        self.designated_nodes[request_index].is_some()
    }

    /// Whether `request_index` is currently rejected.
    pub fn rejects(&self, request_index: usize) -> bool {
        !self.accepts(request_index)
    }

    /// The designated node sequence (`[ingress, .., egress]`) for an
    /// accepted request, or `None` if it is rejected.
    pub fn designated_nodes(&self, request_index: usize) -> Option<&[usize]> {
        self.designated_nodes[request_index].as_deref()
    }

    /// The full designated-nodes assignment, one entry per request. Used
    /// by [`crate::accepter::RequestAccepter`] to derive the next
    /// snapshot without re-deriving it from a placement matrix.
    pub(crate) fn all_designated_nodes(&self) -> &[Option<Vec<usize>>] {
        &self.designated_nodes
    }

    /// Indices of every currently accepted request.
    pub fn accepted_requests(&self) -> Vec<usize> {
        (0..self.designated_nodes.len()).filter(|&i| self.accepts(i)).collect()
    }

    /// Indices of every currently rejected request.
    pub fn rejected_requests(&self) -> Vec<usize> {
        (0..self.designated_nodes.len()).filter(|&i| self.rejects(i)).collect()
    }

    /// Indices of accepted requests that are main requests.
    pub fn accepted_main_requests(&self) -> Vec<usize> {
        self.accepted_requests()
            .into_iter()
            .filter(|&i| self.problem.requests[i].kind == RequestKind::Main)
            .collect()
    }

    /// The residual resources per sorted-node index.
    pub fn remaining_resources_per_node(&self) -> &[HashMap<NetworkResource, i64>] {
        &self.remaining_resources_per_node
    }

    /// The residual bandwidth per `(tail, head)` link.
    pub fn remaining_bandwidth_per_link(&self) -> &[Vec<f64>] {
        &self.remaining_bandwidth_per_link
    }

    /// Fraction of accepted requests that are main requests; `0.0` if
    /// nothing is accepted.
    pub fn ratio_of_accepted_main_requests(&self) -> f64 {
        let accepted = self.accepted_requests().len();
        if accepted == 0 {
            0.0
        } else {
            self.accepted_main_requests().len() as f64 / accepted as f64
        }
    }

    /// Total node-resource shortage across the whole network (`0` if no
    /// node is over-allocated).
    pub fn cumulative_resource_shortage(&self) -> i64 {
        self.cumulative_resource_shortage
    }

    /// Total bandwidth shortage across the whole network.
    pub fn cumulative_bandwidth_shortage(&self) -> f64 {
        self.cumulative_bandwidth_shortage
    }

    /// Total latency overrun summed across every accepted request whose
    /// effective path latency exceeds its budget.
    pub fn cumulative_excess_latency(&self) -> f64 {
        self.cumulative_excess_latency
    }

    /// Number of `(VNF, node)` placements that violate a node
    /// incompatibility constraint.
    pub fn incompatible_placements_count(&self) -> usize {
        self.incompatible_placements_count
    }

    /// Total revenue earned from accepted requests, before costs.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Revenue minus node and bandwidth costs.
    pub fn profit(&self) -> f64 {
        self.total_revenue - self.total_node_costs - self.total_bandwidth_cost
    }

    /// Whether this snapshot satisfies every resource, bandwidth, latency,
    /// compatibility, mutual-exclusivity and main-request-ratio
    /// constraint.
    pub fn is_valid(&self) -> bool {
        self.cumulative_resource_shortage == 0
            && rounded(self.cumulative_excess_latency) == 0.0
            && rounded(self.cumulative_bandwidth_shortage) == 0.0
            && self.incompatible_placements_count == 0
            && self.mutual_exclusivity_violations_count == 0
            && self.ratio_of_accepted_main_requests() >= self.problem.minimum_ratio_of_main_requests
    }

    /// The placement matrix this snapshot encodes: one row per request,
    /// `-1` cells for rejected requests, sorted-node indices otherwise.
    pub fn placement_matrix(&self) -> Vec<Vec<i32>> {
        self.problem
            .requests
            .iter()
            .enumerate()
            .map(|(request_index, request)| match &self.designated_nodes[request_index] {
                None => vec![-1; request.service.vnf_chain().len()],
                Some(nodes) => nodes[1..nodes.len() - 1].iter().map(|&n| n as i32).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkTopology};
    use std::collections::HashSet;

    fn small_problem(min_ratio: f64) -> ProblemInstance {
        let cpu = NetworkResource::new("cpu");
        let mut capacity = HashMap::new();
        capacity.insert(cpu.clone(), 10);
        let nodes = vec![
            NetworkNode::new("0", capacity.clone(), HashMap::new()),
            NetworkNode::new("1", capacity, HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::new(0.0, 0.0, 0.0), NetworkLink::new(1.0, 100.0, 0.5)],
            vec![NetworkLink::new(1.0, 100.0, 0.5), NetworkLink::new(0.0, 0.0, 0.0)],
        ];
        let network = NetworkTopology::new(nodes, links);

        let mut demand = HashMap::new();
        demand.insert(cpu, 5);
        let service = Service::new(0, 1, vec![Vnf::new(demand)], vec![10.0, 10.0], 5.0);
        ProblemInstance {
            network,
            requests: vec![Request {
                kind: RequestKind::Main,
                service,
                revenue: 100.0,
            }],
            groups: vec![vec![0]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: min_ratio,
        }
    }

    #[test]
    fn rejected_request_has_all_negative_one_row() {
        let problem = small_problem(0.0);
        let placement = Placement::from_placement_matrix(&problem, &[vec![-1]]);
        assert!(placement.rejects(0));
        assert_eq!(placement.placement_matrix(), vec![vec![-1]]);
        assert_eq!(placement.profit(), 0.0);
    }

    #[test]
    fn accepted_request_round_trips_through_the_matrix() {
        let problem = small_problem(0.0);
        let placement = Placement::from_placement_matrix(&problem, &[vec![1]]);
        assert!(placement.accepts(0));
        assert_eq!(placement.placement_matrix(), vec![vec![1]]);
        assert!(placement.is_valid());
    }

    #[test]
    fn resource_overallocation_is_invalid() {
        let mut problem = small_problem(0.0);
        // Drop node 1's capacity to less than the VNF's demand.
        let cpu = NetworkResource::new("cpu");
        let nodes = vec![
            NetworkNode::new("0", HashMap::from([(cpu.clone(), 10)]), HashMap::new()),
            NetworkNode::new("1", HashMap::from([(cpu.clone(), 1)]), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::new(0.0, 0.0, 0.0), NetworkLink::new(1.0, 100.0, 0.5)],
            vec![NetworkLink::new(1.0, 100.0, 0.5), NetworkLink::new(0.0, 0.0, 0.0)],
        ];
        problem.network = NetworkTopology::new(nodes, links);

        let placement = Placement::from_placement_matrix(&problem, &[vec![1]]);
        assert!(!placement.is_valid());
        assert!(placement.cumulative_resource_shortage() > 0);
    }

    #[test]
    fn latency_budget_violation_is_invalid() {
        let mut problem = small_problem(0.0);
        let cpu = NetworkResource::new("cpu");
        let mut demand = HashMap::new();
        demand.insert(cpu, 1);
        problem.requests[0].service = Service::new(0, 1, vec![Vnf::new(demand)], vec![1.0, 1.0], 0.5);
        let placement = Placement::from_placement_matrix(&problem, &[vec![1]]);
        assert!(!placement.is_valid());
        assert!(placement.cumulative_excess_latency() > 0.0);
    }

    #[test]
    fn mutual_exclusivity_group_cannot_double_accept() {
        let mut problem = small_problem(0.0);
        problem.requests.push(Request {
            kind: RequestKind::Alternative,
            service: problem.requests[0].service.clone(),
            revenue: 50.0,
        });
        problem.groups = vec![vec![0, 1]];
        let placement = Placement::from_placement_matrix(&problem, &[vec![1], vec![1]]);
        assert!(!placement.is_valid());
    }

    #[test]
    fn main_request_ratio_floor_is_enforced() {
        let mut problem = small_problem(1.0);
        problem.requests.push(Request {
            kind: RequestKind::Alternative,
            service: problem.requests[0].service.clone(),
            revenue: 50.0,
        });
        problem.groups = vec![vec![0, 1]];
        // Accept only the alternative: ratio of main requests among
        // accepted is 0.0, below the 1.0 floor.
        let placement = Placement::from_placement_matrix(&problem, &[vec![-1], vec![1]]);
        assert!(!placement.is_valid());
        assert_eq!(placement.ratio_of_accepted_main_requests(), 0.0);
    }

    #[test]
    fn incompatible_node_placement_is_invalid() {
        let mut problem = small_problem(0.0);
        problem
            .incompatible_nodes
            .insert((0, 0), HashSet::from([1]));
        let placement = Placement::from_placement_matrix(&problem, &[vec![1]]);
        assert!(!placement.is_valid());
        assert_eq!(placement.incompatible_placements_count(), 1);
    }
}

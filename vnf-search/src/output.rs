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

//! Serializes a [`Placement`] to the result JSON format: summary counts,
//! the objective value, and one entry per request with its accepted/
//! rejected status and, if accepted, where each of its VNFs landed.
//!
//! When there is no placement to report (the search never found a
//! feasible one), [`write`] leaves the output file empty rather than
//! writing `null`, matching the original's "nothing to serialize" path.

use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::placement::Placement;
use crate::request::RequestKind;

#[derive(Serialize)]
struct PlacementSummary {
    num_ric: usize,
    num_ric_main: usize,
    num_ric_sec: usize,
    num_ric_serv: usize,
    num_ric_serv_main: usize,
    num_ric_serv_sec: usize,
    obj_val: f64,
    requests: Vec<RequestSummary>,
}

#[derive(Serialize)]
struct RequestSummary {
    id_richiesta: usize,
    req_type: u8,
    status: u8,
    value_y: f64,
    vnfs: Vec<VnfSummary>,
}

#[derive(Serialize)]
struct VnfSummary {
    id_vnf: usize,
    position: i64,
    resources: Vec<i64>,
    value_y: f64,
}

fn summarize(placement: &Placement) -> PlacementSummary {
    let problem = placement.problem();
    let accepted_main = placement.accepted_main_requests().len();
    let accepted = placement.accepted_requests().len();

    let requests = problem
        .requests
        .iter()
        .enumerate()
        .map(|(request_index, request)| {
            let designated_nodes = placement.designated_nodes(request_index);
            let vnfs = match designated_nodes {
                None => Vec::new(),
                Some(nodes) => request
                    .service
                    .vnf_chain()
                    .iter()
                    .enumerate()
                    .map(|(vnf_index, vnf)| {
                        let node_index = nodes[vnf_index + 1];
                        let label = problem.network.sorted_nodes()[node_index].label();
                        let mut resource_tags: Vec<&crate::topology::NetworkResource> = vnf.resources().collect();
                        resource_tags.sort();
                        VnfSummary {
                            id_vnf: vnf_index,
                            position: label.parse().unwrap_or(node_index as i64),
                            resources: resource_tags.iter().map(|resource| vnf.resource_demand(resource)).collect(),
                            value_y: 1.0,
                        }
                    })
                    .collect(),
            };
            RequestSummary {
                id_richiesta: request_index,
                req_type: (request.kind == RequestKind::Alternative) as u8,
                status: designated_nodes.is_none() as u8,
                value_y: designated_nodes.is_some() as u8 as f64,
                vnfs,
            }
        })
        .collect();

    PlacementSummary {
        num_ric: problem.requests.len(),
        num_ric_main: problem.requests.iter().filter(|r| r.kind == RequestKind::Main).count(),
        num_ric_sec: problem.requests.iter().filter(|r| r.kind == RequestKind::Alternative).count(),
        num_ric_serv: accepted,
        num_ric_serv_main: accepted_main,
        num_ric_serv_sec: accepted - accepted_main,
        obj_val: placement.profit(),
        requests,
    }
}

/// Writes `placement` to `output_file_path` as indented JSON. If
/// `placement` is `None`, the output file is created empty.
pub fn write(output_file_path: &Path, placement: Option<&Placement>) -> Result<(), Error> {
    match placement {
        None => {
            std::fs::File::create(output_file_path)?;
        }
        Some(placement) => {
            let summary = summarize(placement);
            let file = std::fs::File::create(output_file_path)?;
            serde_json::to_writer_pretty(file, &summary)
                .map_err(|e| Error::Invariant(format!("failed to serialize placement: {e}")))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ProblemInstance, Request};
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkResource, NetworkTopology};
    use std::collections::HashMap;

    fn problem() -> ProblemInstance {
        let cpu = NetworkResource::new("cpu");
        let nodes = vec![
            NetworkNode::new("0", HashMap::new(), HashMap::new()),
            NetworkNode::new("1", HashMap::from([(cpu.clone(), 10)]), HashMap::new()),
        ];
        let links = vec![
            vec![NetworkLink::default(), NetworkLink::new(1.0, 100.0, 0.0)],
            vec![NetworkLink::new(1.0, 100.0, 0.0), NetworkLink::default()],
        ];
        ProblemInstance {
            network: NetworkTopology::new(nodes, links),
            requests: vec![Request {
                kind: RequestKind::Main,
                service: Service::new(0, 1, vec![Vnf::new(HashMap::from([(cpu, 5)]))], vec![10.0, 10.0], 5.0),
                revenue: 10.0,
            }],
            groups: vec![vec![0]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: 0.0,
        }
    }

    #[test]
    fn accepted_request_serializes_with_its_vnf_placement() {
        let problem = problem();
        let placement = Placement::from_placement_matrix(&problem, &[vec![1]]);
        let summary = summarize(&placement);
        assert_eq!(summary.num_ric_serv, 1);
        assert_eq!(summary.requests[0].status, 0);
        assert_eq!(summary.requests[0].vnfs[0].position, 1);
    }

    #[test]
    fn rejected_request_serializes_with_no_vnfs() {
        let problem = problem();
        let placement = Placement::from_placement_matrix(&problem, &[vec![-1]]);
        let summary = summarize(&placement);
        assert_eq!(summary.requests[0].status, 1);
        assert!(summary.requests[0].vnfs.is_empty());
    }
}

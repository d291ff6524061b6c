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

//! Parses the custom input file format into a [`ProblemInstance`].
//!
//! After comments (from `#` or `;` to end of line) are stripped and blank
//! lines dropped, the file is thirteen ordered row-groups of
//! whitespace-separated tokens:
//!
//! 1. header: `num_nodes _ _ num_resources _ num_vnfs_per_request`
//! 2. `minimum_ratio_of_main_requests`
//! 3. three rows: alt-count per main request, main request ids, flattened
//!    alternative request ids (chunked by the previous row's counts)
//! 4. vnf type tags (unused downstream, kept only for round-tripping)
//! 5. `num_nodes` rows: link latency matrix
//! 6. `num_nodes` rows: link bandwidth matrix
//! 7. `num_nodes` rows: per-node per-resource unit cost
//! 8. `num_nodes` rows: link bandwidth unit-cost matrix
//! 9. `num_requests * num_vnfs_per_request` rows: node incompatibilities
//!    (`request_id vnf_index node_label...`, 1-indexed node labels)
//! 10. `num_requests` rows: `id ingress egress latency _ revenue`
//! 11. `num_requests` rows: `id chain_len vnf_type... hop_bandwidth...`
//! 12. `num_requests` rows: `vnf_count resource_demand...` (positional,
//!     not keyed by request id — this mirrors the original parser, which
//!     keys this one row-group by file position rather than the `id`
//!     field every other row-group uses)
//! 13. `num_nodes` rows: per-node per-resource capacity

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{Error, InputError};
use crate::request::{ProblemInstance, Request, RequestKind};
use crate::service::{Service, Vnf};
use crate::topology::{NetworkLink, NetworkNode, NetworkResource, NetworkTopology};

struct Row {
    line: usize,
    tokens: Vec<String>,
}

struct RowCursor {
    rows: std::collections::VecDeque<Row>,
}

impl RowCursor {
    fn new(content: &str) -> Self {
        let mut rows = std::collections::VecDeque::new();
        for (line_index, raw_line) in content.lines().enumerate() {
            let without_comment = match raw_line.find(['#', ';']) {
                Some(at) => &raw_line[..at],
                None => raw_line,
            };
            let trimmed = without_comment.trim();
            if trimmed.is_empty() {
                continue;
            }
            rows.push_back(Row {
                line: line_index + 1,
                tokens: trimmed.split_whitespace().map(String::from).collect(),
            });
        }
        RowCursor { rows }
    }

    fn pop(&mut self) -> Result<Row, Error> {
        self.rows
            .pop_front()
            .ok_or(InputError::UnexpectedEof { line: 0 }.into())
    }

    fn pop_exact(&mut self, expected: usize) -> Result<Row, Error> {
        if expected == 0 {
            // A row-group expecting zero tokens never appears in the
            // token stream at all: comment/whitespace normalization
            // already drops every blank line, so there is nothing to
            // pop for it.
            return Ok(Row { line: 0, tokens: Vec::new() });
        }
        let row = self.pop()?;
        if row.tokens.len() != expected {
            return Err(InputError::WrongTokenCount {
                line: row.line,
                expected,
                found: row.tokens.len(),
            }
            .into());
        }
        Ok(row)
    }
}

fn parse_f64(token: &str, line: usize) -> Result<f64, Error> {
    token.parse().map_err(|_| {
        InputError::MalformedNumber {
            line,
            token: token.to_string(),
        }
        .into()
    })
}

fn parse_i64(token: &str, line: usize) -> Result<i64, Error> {
    token.parse().map_err(|_| {
        InputError::MalformedNumber {
            line,
            token: token.to_string(),
        }
        .into()
    })
}

/// Parses a token as the original parser does for id fields: as a float,
/// then truncated to an integer (ids are sometimes written `0.0`).
fn parse_id(token: &str, line: usize) -> Result<usize, Error> {
    Ok(parse_f64(token, line)? as usize)
}

fn row_floats(row: &Row) -> Result<Vec<f64>, Error> {
    row.tokens.iter().map(|t| parse_f64(t, row.line)).collect()
}

fn row_ints(row: &Row) -> Result<Vec<i64>, Error> {
    row.tokens.iter().map(|t| parse_i64(t, row.line)).collect()
}

/// Splits `items` into consecutive chunks of the given `sizes`, in order.
fn chunk_by_sizes<T: Clone>(items: &[T], sizes: &[usize]) -> Vec<Vec<T>> {
    let mut chunks = Vec::with_capacity(sizes.len());
    let mut offset = 0;
    for &size in sizes {
        chunks.push(items[offset..offset + size].to_vec());
        offset += size;
    }
    chunks
}

/// Parses `path` into a problem instance.
pub fn parse(path: &Path) -> Result<ProblemInstance, Error> {
    let content = std::fs::read_to_string(path)?;
    let mut rows = RowCursor::new(&content);

    // 1. header
    let header = rows.pop_exact(6)?;
    let header_ints = row_ints(&header)?;
    let num_nodes = header_ints[0] as usize;
    let num_resources = header_ints[3] as usize;
    let num_vnfs_per_request = header_ints[5] as usize;

    // 2. minimum ratio of main requests
    let ratio_row = rows.pop_exact(1)?;
    let minimum_ratio_of_main_requests = parse_f64(&ratio_row.tokens[0], ratio_row.line)?;

    // 3. request indexes: alt-count-per-main, main ids, flattened alt ids
    let alt_counts_row = rows.pop()?;
    let main_ids_row = rows.pop_exact(alt_counts_row.tokens.len())?;
    let alt_counts: Vec<usize> = row_ints(&alt_counts_row)?.into_iter().map(|n| n as usize).collect();
    let main_ids: Vec<usize> = main_ids_row
        .tokens
        .iter()
        .map(|t| parse_id(t, main_ids_row.line))
        .collect::<Result<_, _>>()?;
    let total_alts: usize = alt_counts.iter().sum();
    let alt_ids_row = rows.pop_exact(total_alts)?;
    let alt_ids_flat: Vec<usize> = alt_ids_row
        .tokens
        .iter()
        .map(|t| parse_id(t, alt_ids_row.line))
        .collect::<Result<_, _>>()?;
    let alt_ids_by_main = chunk_by_sizes(&alt_ids_flat, &alt_counts);

    // 4. vnf type tags; kept only for symmetry with the original, unused
    // downstream.
    let _vnf_types = rows.pop()?;

    // 5-8. num_nodes x num_nodes / num_nodes x num_resources matrices
    let link_latency = parse_matrix(&mut rows, num_nodes, num_nodes)?;
    let link_bandwidth = parse_matrix(&mut rows, num_nodes, num_nodes)?;
    let node_unit_costs = parse_matrix(&mut rows, num_nodes, num_resources)?;
    let link_bandwidth_unit_cost = parse_matrix(&mut rows, num_nodes, num_nodes)?;

    // 9. incompatibility matrix: one row per (request id, vnf index), in
    // main-then-alternatives, id-then-vnf-position order.
    let request_ids_in_group_order: Vec<usize> = main_ids
        .iter()
        .zip(alt_ids_by_main.iter())
        .flat_map(|(&main_id, alts)| std::iter::once(main_id).chain(alts.iter().copied()))
        .collect();
    let mut incompatible_nodes_per_request: HashMap<usize, HashMap<usize, HashSet<usize>>> = HashMap::new();
    for &request_id in &request_ids_in_group_order {
        let mut per_vnf = HashMap::new();
        for vnf_index in 0..num_vnfs_per_request {
            let row = rows.pop()?;
            let blocked: HashSet<usize> = row
                .tokens
                .iter()
                .skip(2)
                .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
                .map(|t| parse_id(t, row.line).map(|n| n.saturating_sub(1)))
                .collect::<Result<_, _>>()?;
            per_vnf.insert(vnf_index, blocked);
        }
        incompatible_nodes_per_request.insert(request_id, per_vnf);
    }

    // 10. request information: id ingress egress latency _ revenue
    let mut endpoints_per_request = HashMap::new();
    let mut latency_per_request = HashMap::new();
    let mut revenue_per_request = HashMap::new();
    for _ in &request_ids_in_group_order {
        let row = rows.pop_exact(6)?;
        let id = parse_id(&row.tokens[0], row.line)?;
        let ingress = parse_id(&row.tokens[1], row.line)?;
        let egress = parse_id(&row.tokens[2], row.line)?;
        let latency = parse_f64(&row.tokens[3], row.line)?;
        let revenue = parse_f64(&row.tokens[5], row.line)?;
        endpoints_per_request.insert(id, (ingress, egress));
        latency_per_request.insert(id, latency);
        revenue_per_request.insert(id, revenue);
    }

    // 11. vnf chain information: id chain_len vnf_type... hop_bandwidth...
    let mut vnf_counts_per_request = HashMap::new();
    let mut hop_bandwidths_per_request = HashMap::new();
    for _ in &request_ids_in_group_order {
        let row = rows.pop()?;
        let id = parse_id(&row.tokens[0], row.line)?;
        let chain_len = parse_id(&row.tokens[1], row.line)?;
        let remainder = &row.tokens[2..];
        if remainder.len() < chain_len {
            return Err(InputError::WrongTokenCount {
                line: row.line,
                expected: 2 + chain_len,
                found: row.tokens.len(),
            }
            .into());
        }
        let hop_bandwidths: Vec<f64> = remainder[chain_len..]
            .iter()
            .map(|t| parse_f64(t, row.line))
            .collect::<Result<_, _>>()?;
        vnf_counts_per_request.insert(id, chain_len);
        hop_bandwidths_per_request.insert(id, hop_bandwidths);
    }

    // 12. vnf resource requirements: vnf_count resource_demand...,
    // keyed by file position (0-indexed), not by the `id` field — this
    // row-group has no id column at all.
    let mut resources_needed_by_position: HashMap<usize, Vec<Vec<i64>>> = HashMap::new();
    for position in 0..request_ids_in_group_order.len() {
        let row = rows.pop()?;
        let vnf_count = parse_id(&row.tokens[0], row.line)?;
        let demands = row_ints(&Row {
            line: row.line,
            tokens: row.tokens[1..].to_vec(),
        })?;
        if vnf_count == 0 || demands.len() % vnf_count != 0 {
            return Err(InputError::WrongTokenCount {
                line: row.line,
                expected: vnf_count,
                found: demands.len(),
            }
            .into());
        }
        let per_resource_type = demands.len() / vnf_count;
        let mut by_vnf = vec![Vec::with_capacity(per_resource_type); vnf_count];
        for (index, demand) in demands.into_iter().enumerate() {
            by_vnf[index / per_resource_type].push(demand);
        }
        resources_needed_by_position.insert(position, by_vnf);
    }

    // 13. node capacity matrix
    let node_capacities = parse_int_matrix(&mut rows, num_nodes, num_resources)?;

    build_problem_instance(BuildInput {
        num_nodes,
        num_resources,
        minimum_ratio_of_main_requests,
        main_ids,
        alt_ids_by_main,
        request_ids_in_group_order,
        link_latency,
        link_bandwidth,
        node_unit_costs,
        link_bandwidth_unit_cost,
        incompatible_nodes_per_request,
        endpoints_per_request,
        latency_per_request,
        revenue_per_request,
        vnf_counts_per_request,
        hop_bandwidths_per_request,
        resources_needed_by_position,
        node_capacities,
    })
}

fn parse_matrix(rows: &mut RowCursor, row_count: usize, col_count: usize) -> Result<Vec<Vec<f64>>, Error> {
    (0..row_count)
        .map(|_| {
            let row = rows.pop_exact(col_count)?;
            row_floats(&row)
        })
        .collect()
}

fn parse_int_matrix(rows: &mut RowCursor, row_count: usize, col_count: usize) -> Result<Vec<Vec<i64>>, Error> {
    (0..row_count)
        .map(|_| {
            let row = rows.pop_exact(col_count)?;
            row_ints(&row)
        })
        .collect()
}

struct BuildInput {
    num_nodes: usize,
    num_resources: usize,
    minimum_ratio_of_main_requests: f64,
    main_ids: Vec<usize>,
    alt_ids_by_main: Vec<Vec<usize>>,
    request_ids_in_group_order: Vec<usize>,
    link_latency: Vec<Vec<f64>>,
    link_bandwidth: Vec<Vec<f64>>,
    node_unit_costs: Vec<Vec<f64>>,
    link_bandwidth_unit_cost: Vec<Vec<f64>>,
    incompatible_nodes_per_request: HashMap<usize, HashMap<usize, HashSet<usize>>>,
    endpoints_per_request: HashMap<usize, (usize, usize)>,
    latency_per_request: HashMap<usize, f64>,
    revenue_per_request: HashMap<usize, f64>,
    vnf_counts_per_request: HashMap<usize, usize>,
    hop_bandwidths_per_request: HashMap<usize, Vec<f64>>,
    resources_needed_by_position: HashMap<usize, Vec<Vec<i64>>>,
    node_capacities: Vec<Vec<i64>>,
}

fn build_problem_instance(input: BuildInput) -> Result<ProblemInstance, Error> {
    let resources: Vec<NetworkResource> = (0..input.num_resources).map(|i| NetworkResource::new(i.to_string())).collect();

    let nodes: Vec<NetworkNode> = (0..input.num_nodes)
        .map(|node_index| {
            let capacity = resources
                .iter()
                .zip(input.node_capacities[node_index].iter())
                .map(|(resource, &amount)| (resource.clone(), amount))
                .collect();
            let unit_cost = resources
                .iter()
                .zip(input.node_unit_costs[node_index].iter())
                .map(|(resource, &cost)| (resource.clone(), cost))
                .collect();
            NetworkNode::new(node_index.to_string(), capacity, unit_cost)
        })
        .collect();

    let links: Vec<Vec<NetworkLink>> = (0..input.num_nodes)
        .map(|tail| {
            (0..input.num_nodes)
                .map(|head| {
                    NetworkLink::new(
                        input.link_latency[tail][head],
                        input.link_bandwidth[tail][head],
                        input.link_bandwidth_unit_cost[tail][head],
                    )
                })
                .collect()
        })
        .collect();

    let network = NetworkTopology::new(nodes, links);

    let mut requests = Vec::with_capacity(input.request_ids_in_group_order.len());
    let mut groups = Vec::with_capacity(input.main_ids.len());
    let mut flat_index_by_id = HashMap::new();
    for (request_id, kind) in input
        .main_ids
        .iter()
        .zip(input.alt_ids_by_main.iter())
        .flat_map(|(&main_id, alts)| {
            std::iter::once((main_id, RequestKind::Main)).chain(alts.iter().map(|&id| (id, RequestKind::Alternative)))
        })
    {
        flat_index_by_id.insert(request_id, requests.len());
        requests.push(build_request(&input, &resources, &network, request_id, kind, flat_index_by_id[&request_id])?);
    }
    for (main_id, alts) in input.main_ids.iter().zip(input.alt_ids_by_main.iter()) {
        let mut group = vec![flat_index_by_id[main_id]];
        group.extend(alts.iter().map(|id| flat_index_by_id[id]));
        groups.push(group);
    }

    let mut incompatible_nodes = HashMap::new();
    for (&request_id, per_vnf) in &input.incompatible_nodes_per_request {
        let Some(&flat_index) = flat_index_by_id.get(&request_id) else { continue };
        for (&vnf_index, blocked) in per_vnf {
            if !blocked.is_empty() {
                incompatible_nodes.insert((flat_index, vnf_index), blocked.clone());
            }
        }
    }

    Ok(ProblemInstance {
        network,
        requests,
        groups,
        incompatible_nodes,
        minimum_ratio_of_main_requests: input.minimum_ratio_of_main_requests,
    })
}

fn build_request(
    input: &BuildInput,
    resources: &[NetworkResource],
    network: &NetworkTopology,
    request_id: usize,
    kind: RequestKind,
    position: usize,
) -> Result<Request, Error> {
    let missing = |field: &str| Error::Invariant(format!("request {request_id} is missing its {field}"));

    let &(ingress, egress) = input.endpoints_per_request.get(&request_id).ok_or_else(|| missing("endpoints"))?;
    let max_latency = *input.latency_per_request.get(&request_id).ok_or_else(|| missing("latency"))?;
    let revenue = *input.revenue_per_request.get(&request_id).ok_or_else(|| missing("revenue"))?;
    let hop_bandwidth = input
        .hop_bandwidths_per_request
        .get(&request_id)
        .ok_or_else(|| missing("hop bandwidth"))?
        .clone();
    let resources_needed = input
        .resources_needed_by_position
        .get(&position)
        .ok_or_else(|| missing("resource requirements"))?;

    if let Some(&declared_chain_len) = input.vnf_counts_per_request.get(&request_id) {
        if declared_chain_len != resources_needed.len() {
            return Err(Error::Invariant(format!(
                "request {request_id} declares a chain of {declared_chain_len} VNFs but its resource requirements list {} VNFs",
                resources_needed.len()
            )));
        }
    }

    let vnf_chain: Vec<Vnf> = resources_needed
        .iter()
        .map(|per_resource| {
            let demand = resources
                .iter()
                .zip(per_resource.iter())
                .map(|(resource, &amount)| (resource.clone(), amount))
                .collect();
            Vnf::new(demand)
        })
        .collect();

    let ingress_index = network.node_index(&ingress.to_string()).ok_or_else(|| missing("ingress node"))?;
    let egress_index = network.node_index(&egress.to_string()).ok_or_else(|| missing("egress node"))?;

    let service = Service::new(ingress_index, egress_index, vnf_chain, hop_bandwidth, max_latency);
    Ok(Request { kind, service, revenue })
}

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

//! Placement requests and the problem instance they're evaluated against.
//!
//! A request is either a *main* request or one of its *alternatives*; at
//! most one request in a mutually-exclusive group may be accepted at a
//! time. Rather than nesting alternatives inside their main request (which
//! would need shared ownership to also address them by flat index, as the
//! placement matrix does), requests are stored flattened in
//! [`ProblemInstance::requests`] in main-then-alternatives order, with
//! [`ProblemInstance::groups`] recording which flat indices form each
//! mutually-exclusive group.

use std::collections::{HashMap, HashSet};

use crate::service::Service;
use crate::topology::NetworkTopology;

/// Whether a request is a main request or one of its alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A main request. Every mutually-exclusive group has exactly one.
    Main,
    /// An alternative to some main request.
    Alternative,
}

/// A single placement request: a service chain to place, and the revenue
/// earned if it is accepted.
#[derive(Debug, Clone)]
pub struct Request {
    /// Whether this is a main request or an alternative.
    pub kind: RequestKind,
    /// The service chain this request asks to place.
    pub service: Service,
    /// Revenue earned if this request is accepted.
    pub revenue: f64,
}

/// A fixed problem instance: the substrate network, the flattened request
/// list, their mutually-exclusive groupings, per-VNF node
/// incompatibilities, and the minimum acceptable ratio of accepted main
/// requests among all accepted requests.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    /// The substrate network.
    pub network: NetworkTopology,
    /// All requests, main requests followed by their alternatives, in
    /// registration order.
    pub requests: Vec<Request>,
    /// One entry per main request: the flat indices into `requests` that
    /// form its mutually-exclusive group (the main request's own index
    /// first, then its alternatives').
    pub groups: Vec<Vec<usize>>,
    /// Node indices a given VNF (identified by `(request_index,
    /// chain_position)`) may not be placed on.
    pub incompatible_nodes: HashMap<(usize, usize), HashSet<usize>>,
    /// The minimum fraction of accepted requests that must be main
    /// requests for a placement to be considered valid.
    pub minimum_ratio_of_main_requests: f64,
}

impl ProblemInstance {
    /// Whether the VNF at `(request_index, chain_position)` may be placed
    /// on `node_index`.
    pub fn is_compatible(&self, request_index: usize, chain_position: usize, node_index: usize) -> bool {
        self.incompatible_nodes
            .get(&(request_index, chain_position))
            .map_or(true, |blocked| !blocked.contains(&node_index))
    }

    /// The mutually-exclusive group containing `request_index`, if any.
    pub fn group_containing(&self, request_index: usize) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|group| group.contains(&request_index))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{Service, Vnf};

    fn trivial_network() -> NetworkTopology {
        NetworkTopology::new(vec![], vec![])
    }

    #[test]
    fn group_containing_finds_the_owning_group() {
        let instance = ProblemInstance {
            network: trivial_network(),
            requests: vec![
                Request {
                    kind: RequestKind::Main,
                    service: Service::new(0, 0, vec![Vnf::default()], vec![0.0, 0.0], 0.0),
                    revenue: 1.0,
                },
                Request {
                    kind: RequestKind::Alternative,
                    service: Service::new(0, 0, vec![Vnf::default()], vec![0.0, 0.0], 0.0),
                    revenue: 1.0,
                },
            ],
            groups: vec![vec![0, 1]],
            incompatible_nodes: HashMap::new(),
            minimum_ratio_of_main_requests: 0.0,
        };
        assert_eq!(instance.group_containing(1), Some(&[0, 1][..]));
        assert_eq!(instance.group_containing(2), None);
    }
}

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

//! Genetic-algorithm based search for VNF chain placements over a fixed
//! substrate network.
//!
//! A [`request::ProblemInstance`] describes the substrate network, the
//! service chains requesting placement and their mutual-exclusivity
//! groups. [`ga::GeneticAlgorithm`] searches the space of placement
//! matrices, evaluating each candidate through [`placement::Placement`]
//! and driving acceptance decisions through [`accepter::RequestAccepter`].
//!
//! [`config::Config`] and [`input::parse`] load a run's settings and
//! problem instance from the on-disk configuration/input file formats;
//! [`output::write`] serializes the winning placement back out.

pub mod accepter;
pub mod config;
pub mod error;
pub mod ga;
pub mod input;
pub mod output;
pub mod placement;
pub mod request;
pub mod service;
pub mod topology;

pub use error::Error;

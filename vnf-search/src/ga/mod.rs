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

//! The genetic-algorithm search: chromosomes, fitness, termination, the
//! pluggable operator traits, and the driver loop that ties them together.

pub mod chromosome;
pub mod driver;
pub mod fitness;
pub mod operators;
pub mod settings;
pub mod termination;

pub use chromosome::Chromosome;
pub use driver::{GeneticAlgorithm, OperatorSuite};
pub use fitness::{FitnessFunction, ProfitFitnessFunction};
pub use settings::Settings;
pub use termination::{GenerationLimitTerminationCondition, TerminationCondition, TimeLimitTerminationCondition};

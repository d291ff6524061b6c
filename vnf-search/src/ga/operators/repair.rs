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

//! Repair: an optional pass run before every fitness evaluation that may
//! patch up a chromosome left invalid by crossover or mutation.
//!
//! No concrete repair strategy ships here — the operator this is grounded
//! on has an empty registry of real repair operators, only the interface
//! and a default that leaves its input untouched. [`NoOpRepairOperator`]
//! is what every driver uses until a real one is written.

use crate::error::Error;
use crate::ga::chromosome::Chromosome;
use crate::request::ProblemInstance;

/// Patches up a chromosome, typically to restore validity.
pub trait RepairOperator {
    /// Returns a (possibly) repaired copy of `chromosome`.
    fn repair(&self, problem: &ProblemInstance, chromosome: Chromosome) -> Result<Chromosome, Error>;
}

/// Leaves the chromosome exactly as it was.
pub struct NoOpRepairOperator;

impl RepairOperator for NoOpRepairOperator {
    fn repair(&self, _problem: &ProblemInstance, chromosome: Chromosome) -> Result<Chromosome, Error> {
        Ok(chromosome)
    }
}

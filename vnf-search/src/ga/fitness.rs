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

//! Fitness scoring. There is exactly one fitness function shipped here:
//! profit scaled by a configurable weight. It applies no validity floor —
//! an invalid chromosome is scored exactly like a valid one of the same
//! profit. Validity is enforced upstream, by construction during
//! initialization and mutation and by the (currently no-op) repair stage,
//! not by penalizing fitness after the fact.

use crate::ga::chromosome::Chromosome;
use crate::request::ProblemInstance;

/// Scores a chromosome against a problem instance.
pub trait FitnessFunction {
    /// Computes the fitness of `chromosome` decoded against `problem`.
    fn evaluate(&self, problem: &ProblemInstance, chromosome: &Chromosome) -> f64;
}

/// Fitness is the decoded placement's profit, scaled by `profit_weight`.
#[derive(Debug, Clone, Copy)]
pub struct ProfitFitnessFunction {
    /// Scale applied to profit to produce the fitness value.
    pub profit_weight: f64,
}

impl FitnessFunction for ProfitFitnessFunction {
    fn evaluate(&self, problem: &ProblemInstance, chromosome: &Chromosome) -> f64 {
        let placement = chromosome.decode(problem);
        self.profit_weight * placement.profit()
    }
}

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

//! The search driver: wires the pluggable operators together into one
//! generational loop.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::Error;
use crate::ga::chromosome::Chromosome;
use crate::ga::fitness::FitnessFunction;
use crate::ga::operators::{CrossoverOperator, InitializationOperator, MutationOperator, RepairOperator, SelectionOperator};
use crate::ga::settings::Settings;
use crate::ga::termination::TerminationCondition;
use crate::request::ProblemInstance;

/// The full set of operators a [`GeneticAlgorithm`] runs with.
pub struct OperatorSuite {
    /// Seeds each chromosome of the initial population.
    pub initialization: Box<dyn InitializationOperator>,
    /// Reduces the current population to a parent pool for crossover.
    pub selection: Box<dyn SelectionOperator>,
    /// Recombines two selected parents into two children.
    pub crossover: Box<dyn CrossoverOperator>,
    /// Runs, in order, over every chromosome selected for the next
    /// generation. Each mutation operator gets its own independent
    /// probability roll per chromosome, governed by
    /// [`Settings::chromosome_mutation_probability`].
    pub mutations: Vec<Box<dyn MutationOperator>>,
    /// Runs, in order, over the whole population before every evaluation.
    pub repairs: Vec<Box<dyn RepairOperator>>,
}

/// A genetic-algorithm search over placements of a fixed problem
/// instance.
pub struct GeneticAlgorithm<'a> {
    problem: &'a ProblemInstance,
    fitness_function: Box<dyn FitnessFunction>,
    operators: OperatorSuite,
    settings: Settings,
}

impl<'a> GeneticAlgorithm<'a> {
    /// Builds a search over `problem` with the given fitness function,
    /// operator suite and population settings.
    pub fn new(
        problem: &'a ProblemInstance,
        fitness_function: Box<dyn FitnessFunction>,
        operators: OperatorSuite,
        settings: Settings,
    ) -> Self {
        GeneticAlgorithm {
            problem,
            fitness_function,
            operators,
            settings,
        }
    }

    /// Runs the search until `termination` is met, then one final
    /// repair-and-evaluate pass, returning the fittest chromosome found.
    ///
    /// `initial_population` seeds the first generation, when given (used to
    /// resume a run from a saved population); it is truncated to
    /// `settings.population_size` if longer, and topped up with the
    /// initialization operator's output if shorter. A `None` or empty
    /// population is filled entirely by the initialization operator.
    ///
    /// `on_generation(generation_index, best_fitness)` is called once per
    /// completed generation, after evaluation, for progress tracking.
    pub fn run(
        &self,
        mut termination: Box<dyn TerminationCondition>,
        initial_population: Option<Vec<Chromosome>>,
        rng: &mut dyn RngCore,
        mut on_generation: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<Chromosome, Error> {
        let mut population = initial_population.unwrap_or_default();
        population.truncate(self.settings.population_size);
        while population.len() < self.settings.population_size {
            population.push(self.operators.initialization.initialize(self.problem, rng)?);
        }

        let mut generation_index = 0usize;
        while !termination.is_met() {
            population = self.repair_population(population)?;
            self.evaluate_population(&mut population);

            let mut ranked = population.clone();
            ranked.sort();

            let elites: Vec<Chromosome> = ranked
                .iter()
                .rev()
                .take(self.settings.num_elites)
                .cloned()
                .collect();

            let parents = self
                .operators
                .selection
                .select(&population, self.settings.selection_size(), rng)?;
            let children = self.perform_crossovers(&parents, rng)?;
            let mutated = self.perform_mutations(children, rng)?;

            population = elites.into_iter().chain(mutated).collect();

            log::debug!(
                "generation {generation_index}: population size {}",
                population.len()
            );
            if let Some(callback) = on_generation.as_deref_mut() {
                let best = ranked.last().map(|c| c.fitness).unwrap_or(0.0);
                callback(generation_index, best);
            }
            generation_index += 1;
        }

        population = self.repair_population(population)?;
        self.evaluate_population(&mut population);

        population
            .into_iter()
            .max()
            .ok_or_else(|| Error::Invariant("the population became empty during search".into()))
    }

    fn repair_population(&self, population: Vec<Chromosome>) -> Result<Vec<Chromosome>, Error> {
        population
            .into_iter()
            .map(|chromosome| {
                self.operators
                    .repairs
                    .iter()
                    .try_fold(chromosome, |chromosome, repair| repair.repair(self.problem, chromosome))
            })
            .collect()
    }

    fn evaluate_population(&self, population: &mut [Chromosome]) {
        for chromosome in population.iter_mut() {
            chromosome.fitness = self.fitness_function.evaluate(self.problem, chromosome);
        }
    }

    fn perform_crossovers(&self, parents: &[Chromosome], rng: &mut dyn RngCore) -> Result<Vec<Chromosome>, Error> {
        let mut shuffled = parents.to_vec();
        shuffled.shuffle(rng);

        let mut children = Vec::with_capacity(shuffled.len());
        let mut pairs = shuffled.chunks_exact(2);
        for pair in &mut pairs {
            if rand::Rng::gen::<f64>(rng) < self.settings.crossover_probability {
                let (child1, child2) = self.operators.crossover.crossover(self.problem, &pair[0], &pair[1], rng)?;
                children.push(child1);
                children.push(child2);
            } else {
                children.push(pair[0].clone());
                children.push(pair[1].clone());
            }
        }
        // An odd parent out is crossed with the first (post-shuffle) parent
        // as a fallback partner, duplicating it the way the first pair of
        // any round would, rather than passed through untouched.
        if let [leftover] = pairs.remainder() {
            let first_parent = &shuffled[0];
            let (child, _) = if rand::Rng::gen::<f64>(rng) < self.settings.crossover_probability {
                self.operators.crossover.crossover(self.problem, leftover, first_parent, rng)?
            } else {
                (leftover.clone(), first_parent.clone())
            };
            children.push(child);
        }
        children.truncate(shuffled.len());
        Ok(children)
    }

    fn perform_mutations(&self, children: Vec<Chromosome>, rng: &mut dyn RngCore) -> Result<Vec<Chromosome>, Error> {
        children
            .into_iter()
            .map(|chromosome| {
                if rand::Rng::gen::<f64>(rng) >= self.settings.chromosome_mutation_probability {
                    return Ok(chromosome);
                }
                self.operators
                    .mutations
                    .iter()
                    .try_fold(chromosome, |chromosome, mutation| mutation.mutate(self.problem, chromosome, rng))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fitness::ProfitFitnessFunction;
    use crate::ga::operators::{
        LinearRankSelection, MatrixRowSwapCrossover, NoOpRepairOperator, RandomAcceptanceMutation, RandomPlacementInitialization,
    };
    use crate::ga::termination::GenerationLimitTerminationCondition;
    use crate::request::{Request, RequestKind};
    use crate::service::{Service, Vnf};
    use crate::topology::{NetworkLink, NetworkNode, NetworkResource, NetworkTopology};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn tiny_problem() -> ProblemInstance {
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
    fn a_short_run_returns_a_valid_chromosome() {
        let problem = tiny_problem();
        let operators = OperatorSuite {
            initialization: Box::new(RandomPlacementInitialization),
            selection: Box::new(LinearRankSelection),
            crossover: Box::new(MatrixRowSwapCrossover),
            mutations: vec![Box::new(RandomAcceptanceMutation { acceptance_probability: 0.1 })],
            repairs: vec![Box::new(NoOpRepairOperator)],
        };
        let settings = Settings {
            population_size: 6,
            num_elites: 1,
            crossover_probability: 0.8,
            chromosome_mutation_probability: 0.2,
        };
        let ga = GeneticAlgorithm::new(&problem, Box::new(ProfitFitnessFunction { profit_weight: 1.0 }), operators, settings);

        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let termination = Box::new(GenerationLimitTerminationCondition::new(3));
        let best = ga.run(termination, None, &mut rng, None).unwrap();
        assert!(best.decode(&problem).is_valid());
    }

    #[test]
    fn an_empty_initial_population_is_topped_up_to_population_size() {
        let problem = tiny_problem();
        let operators = OperatorSuite {
            initialization: Box::new(RandomPlacementInitialization),
            selection: Box::new(LinearRankSelection),
            crossover: Box::new(MatrixRowSwapCrossover),
            mutations: vec![Box::new(RandomAcceptanceMutation { acceptance_probability: 0.1 })],
            repairs: vec![Box::new(NoOpRepairOperator)],
        };
        let settings = Settings {
            population_size: 4,
            num_elites: 1,
            crossover_probability: 0.8,
            chromosome_mutation_probability: 0.2,
        };
        let ga = GeneticAlgorithm::new(&problem, Box::new(ProfitFitnessFunction { profit_weight: 1.0 }), operators, settings);

        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let termination = Box::new(GenerationLimitTerminationCondition::new(1));
        let best = ga.run(termination, Some(vec![]), &mut rng, None).unwrap();
        assert!(best.decode(&problem).is_valid());
    }

    #[test]
    fn an_oversized_initial_population_does_not_error() {
        let problem = tiny_problem();
        let operators = OperatorSuite {
            initialization: Box::new(RandomPlacementInitialization),
            selection: Box::new(LinearRankSelection),
            crossover: Box::new(MatrixRowSwapCrossover),
            mutations: vec![Box::new(RandomAcceptanceMutation { acceptance_probability: 0.0 })],
            repairs: vec![Box::new(NoOpRepairOperator)],
        };
        let settings = Settings {
            population_size: 2,
            num_elites: 0,
            crossover_probability: 0.0,
            chromosome_mutation_probability: 0.0,
        };
        let ga = GeneticAlgorithm::new(&problem, Box::new(ProfitFitnessFunction { profit_weight: 1.0 }), operators, settings);

        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let oversized = vec![
            Chromosome::new(vec![vec![1]]),
            Chromosome::new(vec![vec![1]]),
            Chromosome::new(vec![vec![1]]),
            Chromosome::new(vec![vec![1]]),
        ];
        let termination = Box::new(GenerationLimitTerminationCondition::new(0));
        ga.run(termination, Some(oversized), &mut rng, None).unwrap();
    }

    #[test]
    fn an_odd_parent_count_crosses_the_leftover_with_the_first_parent() {
        let problem = tiny_problem();
        let operators = OperatorSuite {
            initialization: Box::new(RandomPlacementInitialization),
            selection: Box::new(LinearRankSelection),
            crossover: Box::new(MatrixRowSwapCrossover),
            mutations: Vec::new(),
            repairs: Vec::new(),
        };
        let settings = Settings {
            population_size: 3,
            num_elites: 0,
            crossover_probability: 1.0,
            chromosome_mutation_probability: 0.0,
        };
        let ga = GeneticAlgorithm::new(&problem, Box::new(ProfitFitnessFunction { profit_weight: 1.0 }), operators, settings);

        let parents = vec![
            Chromosome::new(vec![vec![1]]),
            Chromosome::new(vec![vec![-1]]),
            Chromosome::new(vec![vec![1]]),
        ];
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let children = ga.perform_crossovers(&parents, &mut rng).unwrap();
        assert_eq!(children.len(), parents.len());
    }
}

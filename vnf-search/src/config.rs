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

//! Loads the INI configuration file and wires it into a runnable
//! [`crate::ga::GeneticAlgorithm`]: which operators to use, at what rates,
//! for how long to search.
//!
//! The file has three sections:
//!
//! - `[Fitness_Function_Settings]`: `profit_weight`.
//! - `[Operator_Settings]`: `initialization_operator`, `selection_operator`,
//!   `crossover_operator` (each a single operator spec), and
//!   `mutation_operators`, `repair_operators` (comma-separated lists).
//! - `[General_Settings]`: `population_size`, `time_limit`,
//!   `crossover_probability`, `chromosome_mutation_probability`,
//!   `num_elite`, and the optional `initial_population_file_path`.
//!
//! An operator spec is either empty (no operator), a bare name, or
//! `Name(argument)` with a single numeric argument.

use std::path::Path;
use std::time::Duration;

use ini::Ini;

use crate::error::{ConfigError, Error};
use crate::ga::operators::{
    ExponentialRankSelection, LinearRankSelection, MatrixRowSwapCrossover, NoOpRepairOperator,
    RandomAcceptanceMutation, RandomPlacementInitialization, RandomRejectionMutation, TournamentSelection,
};
use crate::ga::termination::TimeLimitTerminationCondition;
use crate::ga::{FitnessFunction, OperatorSuite, ProfitFitnessFunction, Settings, TerminationCondition};

const FITNESS_FUNCTION_SECTION: &str = "Fitness_Function_Settings";
const OPERATOR_SECTION: &str = "Operator_Settings";
const GENERAL_SECTION: &str = "General_Settings";

/// A parsed `Name` or `Name(argument)` operator specification.
#[derive(Debug, Clone)]
pub struct OperatorSpec {
    /// The operator's name, as written in the config file.
    pub name: String,
    /// The operator's numeric argument, if one was given.
    pub argument: Option<f64>,
}

/// The fully parsed configuration file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scale applied to profit to produce fitness.
    pub profit_weight: f64,
    /// How the initial population is seeded.
    pub initialization_operator: OperatorSpec,
    /// How parents are selected for crossover.
    pub selection_operator: OperatorSpec,
    /// How two parents are recombined.
    pub crossover_operator: OperatorSpec,
    /// Mutation operators run, in order, on every selected chromosome.
    pub mutation_operators: Vec<OperatorSpec>,
    /// Repair operators run, in order, before every evaluation.
    pub repair_operators: Vec<OperatorSpec>,
    /// Number of chromosomes per generation.
    pub population_size: usize,
    /// Wall-clock search budget, in seconds.
    pub time_limit: f64,
    /// Probability that selected parents actually cross over.
    pub crossover_probability: f64,
    /// Probability that a selected chromosome is mutated at all.
    pub chromosome_mutation_probability: f64,
    /// Number of top chromosomes carried over unchanged each generation.
    pub num_elite: usize,
    /// Path to a placement matrix file to seed the initial population
    /// from, instead of the initialization operator.
    pub initial_population_file_path: Option<String>,
}

impl Config {
    /// Loads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Malformed(e.to_string()))?;

        Ok(Config {
            profit_weight: get_float(&ini, FITNESS_FUNCTION_SECTION, "profit_weight")?,
            initialization_operator: get_operator(&ini, OPERATOR_SECTION, "initialization_operator")?
                .ok_or_else(|| ConfigError::MissingKey {
                    section: OPERATOR_SECTION,
                    key: "initialization_operator",
                })?,
            selection_operator: get_operator(&ini, OPERATOR_SECTION, "selection_operator")?
                .ok_or_else(|| ConfigError::MissingKey {
                    section: OPERATOR_SECTION,
                    key: "selection_operator",
                })?,
            crossover_operator: get_operator(&ini, OPERATOR_SECTION, "crossover_operator")?
                .ok_or_else(|| ConfigError::MissingKey {
                    section: OPERATOR_SECTION,
                    key: "crossover_operator",
                })?,
            mutation_operators: get_operator_list(&ini, OPERATOR_SECTION, "mutation_operators")?,
            repair_operators: get_operator_list(&ini, OPERATOR_SECTION, "repair_operators")?,
            population_size: get_int(&ini, GENERAL_SECTION, "population_size")? as usize,
            time_limit: get_float(&ini, GENERAL_SECTION, "time_limit")?,
            crossover_probability: get_float(&ini, GENERAL_SECTION, "crossover_probability")?,
            chromosome_mutation_probability: get_float(&ini, GENERAL_SECTION, "chromosome_mutation_probability")?,
            num_elite: get_int(&ini, GENERAL_SECTION, "num_elite")? as usize,
            initial_population_file_path: ini
                .section(Some(GENERAL_SECTION))
                .and_then(|section| section.get("initial_population_file_path"))
                .map(str::to_string),
        })
    }

    /// Population-level knobs for a [`crate::ga::GeneticAlgorithm`].
    pub fn settings(&self) -> Settings {
        Settings {
            population_size: self.population_size,
            num_elites: self.num_elite,
            crossover_probability: self.crossover_probability,
            chromosome_mutation_probability: self.chromosome_mutation_probability,
        }
    }

    /// The fitness function this configuration selects. There is
    /// currently only one.
    pub fn fitness_function(&self) -> Box<dyn FitnessFunction> {
        Box::new(ProfitFitnessFunction {
            profit_weight: self.profit_weight,
        })
    }

    /// A termination condition stopping the search after `time_limit`
    /// seconds.
    pub fn termination_condition(&self) -> Box<dyn TerminationCondition> {
        Box::new(TimeLimitTerminationCondition::new(Duration::from_secs_f64(self.time_limit.max(0.0))))
    }

    /// Builds the operator suite this configuration names, resolving
    /// every operator spec against the fixed set of operators this crate
    /// ships.
    pub fn build_operator_suite(&self) -> Result<OperatorSuite, Error> {
        Ok(OperatorSuite {
            initialization: build_initialization(&self.initialization_operator)?,
            selection: build_selection(&self.selection_operator)?,
            crossover: build_crossover(&self.crossover_operator)?,
            mutations: self
                .mutation_operators
                .iter()
                .map(build_mutation)
                .collect::<Result<Vec<_>, _>>()?,
            repairs: self
                .repair_operators
                .iter()
                .map(build_repair)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

fn build_initialization(spec: &OperatorSpec) -> Result<Box<dyn crate::ga::operators::InitializationOperator>, Error> {
    match spec.name.as_str() {
        "RandomInitialization" => Ok(Box::new(RandomPlacementInitialization)),
        _ => Err(ConfigError::InvalidOperator(spec.name.clone()).into()),
    }
}

fn build_selection(spec: &OperatorSpec) -> Result<Box<dyn crate::ga::operators::SelectionOperator>, Error> {
    match spec.name.as_str() {
        "LinearRankSelection" => Ok(Box::new(LinearRankSelection)),
        "ExponentialRankSelection" => Ok(Box::new(ExponentialRankSelection {
            pressure_parameter: spec.argument.unwrap_or(0.9),
        })),
        "TournamentSelection" => Ok(Box::new(TournamentSelection {
            tournament_size: spec.argument.unwrap_or(2.0) as usize,
        })),
        _ => Err(ConfigError::InvalidOperator(spec.name.clone()).into()),
    }
}

fn build_crossover(spec: &OperatorSpec) -> Result<Box<dyn crate::ga::operators::CrossoverOperator>, Error> {
    match spec.name.as_str() {
        "RowSwapCrossover" => Ok(Box::new(MatrixRowSwapCrossover)),
        _ => Err(ConfigError::InvalidOperator(spec.name.clone()).into()),
    }
}

fn build_mutation(spec: &OperatorSpec) -> Result<Box<dyn crate::ga::operators::MutationOperator>, Error> {
    match spec.name.as_str() {
        "RandomAcceptanceMutation" => Ok(Box::new(RandomAcceptanceMutation {
            acceptance_probability: spec.argument.unwrap_or(0.0),
        })),
        "RandomRejectionMutation" => Ok(Box::new(RandomRejectionMutation {
            rejection_probability: spec.argument.unwrap_or(0.0),
        })),
        _ => Err(ConfigError::InvalidOperator(spec.name.clone()).into()),
    }
}

fn build_repair(spec: &OperatorSpec) -> Result<Box<dyn crate::ga::operators::RepairOperator>, Error> {
    // No concrete repair operator is supported; any name reaching here is
    // invalid, matching the empty repair-operator registry this is
    // grounded on.
    let _ = spec;
    Ok(Box::new(NoOpRepairOperator))
}

fn get_float(ini: &Ini, section: &'static str, key: &'static str) -> Result<f64, Error> {
    let raw = get_raw(ini, section, key)?;
    raw.parse().map_err(|_| {
        ConfigError::InvalidValue {
            section,
            key,
            value: raw.to_string(),
        }
        .into()
    })
}

fn get_int(ini: &Ini, section: &'static str, key: &'static str) -> Result<i64, Error> {
    let raw = get_raw(ini, section, key)?;
    raw.parse().map_err(|_| {
        ConfigError::InvalidValue {
            section,
            key,
            value: raw.to_string(),
        }
        .into()
    })
}

fn get_raw<'a>(ini: &'a Ini, section: &'static str, key: &'static str) -> Result<&'a str, Error> {
    ini.section(Some(section))
        .and_then(|s| s.get(key))
        .ok_or(ConfigError::MissingKey { section, key })
        .map_err(Error::from)
}

fn get_operator(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<OperatorSpec>, Error> {
    let raw = get_raw(ini, section, key)?;
    parse_operator_spec(raw)
}

fn get_operator_list(ini: &Ini, section: &'static str, key: &'static str) -> Result<Vec<OperatorSpec>, Error> {
    let raw = get_raw(ini, section, key)?;
    raw.split(',')
        .map(parse_operator_spec)
        .collect::<Result<Vec<_>, _>>()
        .map(|specs| specs.into_iter().flatten().collect())
}

fn parse_operator_spec(raw: &str) -> Result<Option<OperatorSpec>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || Error::from(ConfigError::InvalidOperator(raw.to_string()));

    let (name, argument) = match trimmed.find('(') {
        None => (trimmed, None),
        Some(open) => {
            if !trimmed.ends_with(')') {
                return Err(invalid());
            }
            let argument_text = &trimmed[open + 1..trimmed.len() - 1];
            let argument: f64 = argument_text.parse().map_err(|_| invalid())?;
            (&trimmed[..open], Some(argument))
        }
    };

    let is_valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !is_valid_name {
        return Err(invalid());
    }

    Ok(Some(OperatorSpec {
        name: name.to_string(),
        argument,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_operator_spec_parses_to_none() {
        assert!(parse_operator_spec("").unwrap().is_none());
        assert!(parse_operator_spec("   ").unwrap().is_none());
    }

    #[test]
    fn bare_name_parses_with_no_argument() {
        let spec = parse_operator_spec("LinearRankSelection").unwrap().unwrap();
        assert_eq!(spec.name, "LinearRankSelection");
        assert!(spec.argument.is_none());
    }

    #[test]
    fn name_with_argument_parses_both() {
        let spec = parse_operator_spec("ExponentialRankSelection(0.9)").unwrap().unwrap();
        assert_eq!(spec.name, "ExponentialRankSelection");
        assert_eq!(spec.argument, Some(0.9));
    }

    #[test]
    fn malformed_operator_spec_is_rejected() {
        assert!(parse_operator_spec("Bad(Name)").is_err());
        assert!(parse_operator_spec("1BadStart").is_err());
        assert!(parse_operator_spec("Unclosed(1.0").is_err());
    }

    #[test]
    fn operator_list_skips_empty_entries() {
        let raw = "RandomAcceptanceMutation(0.1), , RandomRejectionMutation(0.2)";
        let specs: Vec<OperatorSpec> = raw
            .split(',')
            .map(parse_operator_spec)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(specs.len(), 2);
    }
}

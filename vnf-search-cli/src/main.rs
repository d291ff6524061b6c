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

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vnf_search::config::Config;
use vnf_search::ga::{Chromosome, GeneticAlgorithm, TerminationCondition};
use vnf_search::{input, output};

/// Search for efficient placements of Virtual Network Functions within a
/// network using a Genetic Algorithm.
#[derive(Parser, Debug)]
#[command(name = "vnf-search", author, version, about)]
struct CommandLineArguments {
    /// Path to the input file to be processed.
    #[arg(value_name = "INPUT_FILE")]
    input_file_path: PathBuf,

    /// Path to the configuration file.
    #[arg(short, long = "config", value_name = "CONFIG_FILE")]
    config_file_path: PathBuf,

    /// Path to the output file where results will be saved.
    #[arg(short, long = "output", value_name = "OUTPUT_FILE")]
    output_file_path: PathBuf,

    /// Path to write a log file to, in addition to stderr.
    #[arg(short, long = "log", value_name = "LOG_FILE")]
    log_file_path: Option<PathBuf>,

    /// Path to a CSV file recording the best fitness of every generation.
    #[arg(long, value_name = "CSV_FILE")]
    track_fitness: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CommandLineArguments::parse();
    setup_logging(args.log_file_path.as_deref())?;

    let stop_requested = register_signal_handlers()?;

    let config = Config::from_file(&args.config_file_path)?;
    let problem = input::parse(&args.input_file_path)?;

    let fitness_function = config.fitness_function();
    let operators = config.build_operator_suite()?;
    let settings = config.settings();
    let genetic_algorithm = GeneticAlgorithm::new(&problem, fitness_function, operators, settings);

    let initial_population = match &config.initial_population_file_path {
        Some(path) => Some(parse_initial_population(path)?),
        None => None,
    };

    let mut fitness_log = args
        .track_fitness
        .as_deref()
        .map(csv::Writer::from_path)
        .transpose()?;
    let mut on_generation = |generation: usize, best_fitness: f64| {
        info!("generation {generation}: best fitness {best_fitness}");
        if let Some(writer) = fitness_log.as_mut() {
            let _ = writer.write_record(&[generation.to_string(), best_fitness.to_string()]);
            let _ = writer.flush();
        }
    };

    let termination = StoppableTermination::new(config.termination_condition(), stop_requested);
    let mut rng = StdRng::from_entropy();
    let best = genetic_algorithm.run(Box::new(termination), initial_population, &mut rng, Some(&mut on_generation))?;

    let placement = best.decode(&problem);
    let result = if placement.is_valid() { Some(placement) } else { None };
    output::write(&args.output_file_path, result.as_ref())?;

    Ok(())
}

fn setup_logging(log_file_path: Option<&std::path::Path>) -> Result<(), Box<dyn Error>> {
    match log_file_path {
        None => pretty_env_logger::init(),
        Some(path) => {
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
                })
                .level(log::LevelFilter::Info)
                .chain(std::io::stderr())
                .chain(fern::log_file(path)?)
                .apply()?;
        }
    }
    Ok(())
}

/// Registers SIGINT/SIGTERM handlers that set a shared flag rather than
/// terminating the process immediately, so the search can stop cleanly
/// after finishing its current generation.
fn register_signal_handlers() -> Result<Arc<AtomicBool>, Box<dyn Error>> {
    let stop_requested = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop_requested);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
    Ok(stop_requested)
}

fn parse_initial_population(path: &str) -> Result<Vec<Chromosome>, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut population = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let genes: Vec<Vec<i32>> = serde_json::from_str(&line)?;
        population.push(Chromosome::new(genes));
    }
    Ok(population)
}

/// Wraps a configured termination condition so that a signal handler can
/// also stop the search early, after the generation in progress finishes.
struct StoppableTermination {
    inner: Box<dyn TerminationCondition>,
    stop_requested: Arc<AtomicBool>,
}

impl StoppableTermination {
    fn new(inner: Box<dyn TerminationCondition>, stop_requested: Arc<AtomicBool>) -> Self {
        StoppableTermination { inner, stop_requested }
    }
}

impl TerminationCondition for StoppableTermination {
    fn is_met(&mut self) -> bool {
        self.stop_requested.load(Ordering::SeqCst) || self.inner.is_met()
    }
}

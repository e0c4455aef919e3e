// src/main.rs

use drone_delivery::io::input;
use drone_delivery::io::instance::{generate_instance, InstanceConfig};
use drone_delivery::io::reporting::{self, RunSummary};
use drone_delivery::simulation::config::{AcoConfig, AnnealingConfig, GeneticConfig};
use drone_delivery::simulation::engine::ActionRecord;
use drone_delivery::simulation::Simulation;
use drone_delivery::strategy::schedule::DroneSchedule;
use drone_delivery::strategy::{
    AntColonyOptimizer, GeneticAlgorithm, Optimizer, OptimizerOutcome, SimulatedAnnealing,
};
use std::env;
use std::error::Error;
use std::ops::ControlFlow;
use std::process;

const USAGE: &str = "usage: drone-delivery <input-file | --random> [aco|sa|ga] [seed]";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("=== Drone Delivery Optimizer ===");

    // 1. READ ARGUMENTS
    let args: Vec<String> = env::args().skip(1).collect();
    let source = args.first().ok_or(USAGE)?;
    let algorithm = args.get(1).map(String::as_str).unwrap_or("aco");
    let seed = match args.get(2) {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| format!("invalid seed '{}'", raw))?),
        None => None,
    };

    // 2. LOAD OR GENERATE THE INSTANCE
    let parsed = if source == "--random" {
        println!("Generating a random instance (seed {:?})...", seed);
        generate_instance(&InstanceConfig::default(), seed)?
    } else {
        println!("Reading '{}'...", source);
        input::parse_file(source)?
    };
    let simulation = Simulation::from_input(&parsed)?;
    println!(
        "Instance: {} drones, {} warehouses, {} orders, {} products, deadline {}",
        simulation.drones().len(),
        simulation.warehouses().len(),
        simulation.orders().len(),
        simulation.products.len(),
        simulation.deadline
    );

    // 3. RUN THE CHOSEN OPTIMIZER
    let report = match algorithm {
        "aco" => {
            let mut aco = AntColonyOptimizer::new(AcoConfig {
                seed,
                ..AcoConfig::default()
            });
            let outcome = optimize(&mut aco, &simulation)?;
            let schedule =
                DroneSchedule::from_order_plans(&outcome.solution.plans, simulation.drones().len());
            let completions = schedule.replay(&simulation).completions;
            Report::new(aco.name(), &outcome, schedule.records(&simulation), &completions)
        }
        "sa" => {
            let mut sa = SimulatedAnnealing::new(AnnealingConfig {
                seed,
                ..AnnealingConfig::default()
            });
            let outcome = optimize(&mut sa, &simulation)?;
            let completions = outcome.solution.replay(&simulation).completions;
            Report::new(
                sa.name(),
                &outcome,
                outcome.solution.records(&simulation),
                &completions,
            )
        }
        "ga" => {
            let mut ga = GeneticAlgorithm::new(GeneticConfig {
                seed,
                ..GeneticConfig::default()
            });
            let outcome = optimize(&mut ga, &simulation)?;
            let completions = outcome.solution.completions(&simulation);
            Report::new(
                ga.name(),
                &outcome,
                outcome.solution.records(&simulation),
                &completions,
            )
        }
        other => return Err(format!("unknown algorithm '{}'\n{}", other, USAGE).into()),
    };

    // 4. PRINT RESULT
    println!("\n=== Result ===");
    println!("Algorithm:        {}", report.summary.algorithm);
    println!("Score:            {:.2}", report.summary.score);
    println!(
        "Completed orders: {}/{}",
        report.summary.completed_orders, report.summary.total_orders
    );
    println!("Last action ends: turn {}", report.summary.turns);

    // 5. EXPORT RESULTS
    let actions_file = format!("results/{}_actions.csv", report.summary.algorithm);
    let summary_file = format!("results/{}_summary.csv", report.summary.algorithm);
    match reporting::write_simulation_log(&actions_file, &report.records)
        .and_then(|_| reporting::write_run_summary(&summary_file, &[report.summary]))
    {
        Ok(_) => println!("Success! Data written to ./{} and ./{}", actions_file, summary_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    println!("\nOptimization Complete.");
    Ok(())
}

/// Runs an optimizer, printing every improvement it reports.
fn optimize<O: Optimizer>(
    optimizer: &mut O,
    simulation: &Simulation,
) -> Result<OptimizerOutcome<O::Solution>, Box<dyn Error>> {
    println!("Running {}...", optimizer.name());
    let mut on_progress = |iteration: usize, best: f64| {
        println!("  [{:>4}] best score {:.2}", iteration, best);
        ControlFlow::Continue(())
    };
    Ok(optimizer.run(simulation, Some(&mut on_progress))?)
}

struct Report {
    summary: RunSummary,
    records: Vec<ActionRecord>,
}

impl Report {
    fn new<S>(
        algorithm: &'static str,
        outcome: &OptimizerOutcome<S>,
        records: Vec<ActionRecord>,
        completions: &[Option<u32>],
    ) -> Self {
        let summary = RunSummary {
            algorithm,
            score: outcome.score,
            completed_orders: completions.iter().flatten().count(),
            total_orders: completions.len(),
            turns: records.iter().map(|r| r.finish).max().unwrap_or(0),
            iterations: outcome.iterations,
        };
        Self { summary, records }
    }
}

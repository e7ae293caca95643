//! Benchmark for model building and solving on the demo rosters.
//!
//! Run with: cargo run --release --bin bench -- [SMALL|LARGE]

use shift_roster::builder::build;
use shift_roster::objective::compose;
use shift_roster::pipeline::SchedulingConfig;
use shift_roster::projection::{project, streaks};
use shift_roster::solver::solve;
use shift_roster::{console, demo_data};
use std::time::Instant;

fn main() {
    let demo = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<demo_data::DemoData>() {
            Ok(demo) => demo,
            Err(()) => {
                eprintln!(
                    "unknown demo data {arg:?}, expected one of {:?}",
                    demo_data::list_demo_data()
                );
                std::process::exit(2);
            }
        },
        None => demo_data::DemoData::Small,
    };

    console::print_banner();

    let problem = demo_data::generate(demo);
    let roster = &problem.employees;
    let requirements = &problem.requirements;
    let config = SchedulingConfig::default();

    console::print_problem(
        roster.len(),
        requirements.shifts().count(),
        requirements.horizon(),
    );

    let build_start = Instant::now();
    let (mut model, vars) = match build(roster, requirements, config.max_consecutive_days) {
        Ok(built) => built,
        Err(err) => {
            console::print_solving_failed(&err.to_string());
            std::process::exit(1);
        }
    };
    compose(&mut model, &vars, roster, &config.weights);
    console::print_model(&model.stats(), build_start.elapsed());

    let solve_start = Instant::now();
    match solve(&model, &config.solver) {
        Ok(assignment) => {
            console::print_solving_ended(
                solve_start.elapsed(),
                assignment.objective,
                assignment.status,
            );
            console::print_roster(&project(&assignment, &vars, roster, requirements));

            let report = streaks(&assignment, &vars, roster);
            let five: usize = report.employees.iter().map(|s| s.five_day_streak_starts.len()).sum();
            let one: usize = report.employees.iter().map(|s| s.one_day_streaks.len()).sum();
            println!();
            println!("Streaks:");
            println!("  Five-day: {}", five);
            println!("  One-day: {}", one);
        }
        Err(err) => {
            console::print_solving_failed(&err.to_string());
            std::process::exit(1);
        }
    }
}

//! Headless scenario runner.
//!
//! Loads a JSON scenario, runs the simulation driver to completion, and
//! prints each committed assignment plus a per-provider summary. Useful
//! for replaying a seeded scenario outside the presentation layer.

use slot_allocator_core_rs::{RunState, Scheduler, SchedulerConfig};
use std::env;
use std::fs;
use std::process::ExitCode;

/// Upper bound on ticks before the run is declared stuck
const MAX_TICKS: usize = 100_000;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: slot-allocator <scenario.json>");
            return ExitCode::from(2);
        }
    };

    let json = match fs::read_to_string(&path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("error: cannot read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match SchedulerConfig::from_json(&json) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut scheduler = match Scheduler::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} slots, {} providers",
        scheduler.grid().len(),
        scheduler.providers().len()
    );

    scheduler.start();
    while scheduler.run_state() != RunState::Idle {
        if scheduler.clock() >= MAX_TICKS {
            eprintln!("error: no termination after {MAX_TICKS} ticks");
            return ExitCode::FAILURE;
        }
        let result = scheduler.tick();
        for assignment in &result.committed {
            println!(
                "tick {:>4}  commit  {}  -> provider {}",
                result.tick, assignment.slot, assignment.provider
            );
        }
    }

    println!();
    for provider in scheduler.providers() {
        println!(
            "provider {} ({}): {} slots",
            provider.id(),
            provider.display_name(),
            scheduler.store().count(provider.id())
        );
    }
    println!(
        "done at tick {} with {} commitments",
        scheduler.clock(),
        scheduler.store().len()
    );

    ExitCode::SUCCESS
}

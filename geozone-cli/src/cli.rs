#[cfg(test)]
#[path = "../tests/unit/cli_test.rs"]
mod cli_test;

use crate::commands::check::{get_check_app, run_check};
use crate::commands::geocode::{get_geocode_app, run_geocode};
use crate::commands::plan::{get_plan_app, run_plan};
use clap::{ArgMatches, Command};
use std::process;

/// Creates command line application.
pub fn get_app() -> Command {
    Command::new("Delivery Geozone Planner")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ilya Builuk <ilya.builuk@gmail.com>")
        .about("A command line interface to geocode delivery stops and split them between trucks")
        .subcommand(get_check_app())
        .subcommand(get_geocode_app())
        .subcommand(get_plan_app())
}

/// Runs subcommand.
pub fn run_subcommand(arg_matches: ArgMatches) {
    match arg_matches.subcommand() {
        Some(("check", check_matches)) => run_check(check_matches),
        Some(("geocode", geocode_matches)) => run_geocode(geocode_matches),
        Some(("plan", plan_matches)) => run_plan(plan_matches),
        _ => {
            eprintln!("No subcommand was used. Use -h to print help information.");
            process::exit(1);
        }
    }
}

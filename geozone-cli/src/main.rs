//! A command line interface to geocode delivery stops and split them between trucks.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
mod helpers;

mod cli;
mod commands;

use crate::cli::{get_app, run_subcommand};

fn main() {
    run_subcommand(get_app().get_matches());
}

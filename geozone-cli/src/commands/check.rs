#[cfg(test)]
#[path = "../../tests/unit/commands/check_test.rs"]
mod check_test;

use super::*;
use clap::Command;
use geozone_cli::extensions::pipeline::check_table;

pub fn get_check_app() -> Command {
    Command::new("check")
        .about("Validates delivery table without geocoding it")
        .arg(get_table_arg())
        .arg(get_config_arg())
}

pub fn run_check(matches: &ArgMatches) {
    let table = get_table_reader(matches);
    let config = get_config(matches);

    match check_table(table, &config) {
        Ok(summary) => {
            println!("table is valid: {} rows, total weight {:.1} kg", summary.rows, summary.total_weight_kg)
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/commands/geocode_test.rs"]
mod geocode_test;

use super::*;
use clap::Command;
use geozone_cli::extensions::config::create_provider;
use geozone_cli::extensions::pipeline::run_geocoding;
use geozone_core::format::write_resolution_report;
use geozone_core::geocoding::GeocodeProvider;

const OUT_RESULT_ARG_NAME: &str = "out-result";

pub fn get_geocode_app() -> Command {
    Command::new("geocode")
        .about("Runs a single geocoding pass and writes resolution report")
        .arg(get_table_arg())
        .arg(get_config_arg())
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for resolution report output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME),
        )
        .arg(get_log_arg())
}

pub fn run_geocode(matches: &ArgMatches) {
    let config = get_config(matches);

    if let Err(err) = create_provider(&config).and_then(|provider| geocode_table(matches, &config, provider)) {
        eprintln!("cannot geocode delivery table: {err}");
        process::exit(1);
    }
}

fn geocode_table(matches: &ArgMatches, config: &Config, provider: Arc<dyn GeocodeProvider>) -> GenericResult<()> {
    let session = run_geocoding(get_table_reader(matches), config, provider, get_logger(matches))?;
    let out_result =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    write_resolution_report(create_write_buffer(out_result), &session)
}

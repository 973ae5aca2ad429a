#[cfg(test)]
#[path = "../../tests/unit/commands/plan_test.rs"]
mod plan_test;

use super::*;
use clap::Command;
use geozone_cli::extensions::config::create_provider;
use geozone_cli::extensions::interactive::Prompt;
use geozone_cli::extensions::pipeline::{PlanningResult, run_planning};
use geozone_core::format::{serialize_plan_as_geojson, write_plan_table};
use geozone_core::geocoding::GeocodeProvider;
use geozone_core::planning::PlanRequest;
use geozone_core::utils::GenericResult;
use std::io::{stderr, stdin};

const TRUCKS_ARG_NAME: &str = "trucks";
const DISPATCH_ARG_NAME: &str = "dispatch";
const DRIVER_ARG_NAME: &str = "driver";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const GEO_JSON_ARG_NAME: &str = "geo-json";
const NON_INTERACTIVE_ARG_NAME: &str = "non-interactive";

pub fn get_plan_app() -> Command {
    Command::new("plan")
        .about("Geocodes delivery table, asks for address corrections and splits stops between trucks")
        .arg(get_table_arg())
        .arg(
            Arg::new(TRUCKS_ARG_NAME)
                .help("Specifies amount of trucks")
                .short('t')
                .long(TRUCKS_ARG_NAME)
                .required(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new(DISPATCH_ARG_NAME)
                .help("Specifies dispatch point address shared by all trucks")
                .short('d')
                .long(DISPATCH_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(DRIVER_ARG_NAME)
                .help("Specifies driver name, one per truck in truck order")
                .long(DRIVER_ARG_NAME)
                .action(ArgAction::Append),
        )
        .arg(get_config_arg())
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for planned stops output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME),
        )
        .arg(
            Arg::new(GEO_JSON_ARG_NAME)
                .help("Specifies path to file for planned stops output in geojson format")
                .short('g')
                .long(GEO_JSON_ARG_NAME),
        )
        .arg(
            Arg::new(NON_INTERACTIVE_ARG_NAME)
                .help("Skips manual correction of addresses which cannot be located")
                .long(NON_INTERACTIVE_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(get_log_arg())
}

pub fn run_plan(matches: &ArgMatches) {
    let config = get_config(matches);

    if let Err(err) = create_provider(&config).and_then(|provider| plan_deliveries(matches, &config, provider)) {
        eprintln!("cannot plan deliveries: {err}");
        process::exit(1);
    }
}

fn plan_deliveries(matches: &ArgMatches, config: &Config, provider: Arc<dyn GeocodeProvider>) -> GenericResult<()> {
    let table = get_table_reader(matches);
    let logger = get_logger(matches);
    let request = get_plan_request(matches);

    let result = if matches.get_flag(NON_INTERACTIVE_ARG_NAME) {
        run_planning(table, config, provider, &request, None, logger)?
    } else {
        let mut input = stdin().lock();
        let mut output = stderr();
        let mut prompt = Prompt::new(&mut input, &mut output);

        run_planning(table, config, provider, &request, Some(&mut prompt), logger)?
    };

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));
    let out_geojson = matches.get_one::<String>(GEO_JSON_ARG_NAME).map(|path| create_file(path, "geojson"));

    write_planning_result(&result, out_result.transpose()?, out_geojson.transpose()?)
}

fn get_plan_request(matches: &ArgMatches) -> PlanRequest {
    PlanRequest {
        trucks: matches.get_one::<usize>(TRUCKS_ARG_NAME).copied().unwrap_or_default(),
        drivers: matches.get_many::<String>(DRIVER_ARG_NAME).map(|drivers| drivers.cloned().collect()),
        dispatch_address: matches.get_one::<String>(DISPATCH_ARG_NAME).cloned().unwrap_or_default(),
    }
}

fn write_planning_result(
    result: &PlanningResult,
    out_result: Option<File>,
    out_geojson: Option<File>,
) -> GenericResult<()> {
    write_plan_table(create_write_buffer(out_result), &result.session, &result.plan)?;

    if let Some(out_geojson) = out_geojson {
        serialize_plan_as_geojson(BufWriter::new(out_geojson), &result.session, &result.plan)?;
    }

    result.plan.summaries.iter().for_each(|summary| {
        eprintln!(
            "truck {} ({}): {} stop(s), {:.1} kg",
            summary.truck + 1,
            summary.driver,
            summary.stops,
            summary.total_weight_kg
        )
    });

    Ok(())
}

use clap::{Arg, ArgAction, ArgMatches};

pub mod check;
pub mod geocode;
pub mod plan;

use geozone_cli::extensions::config::{Config, read_config};
use geozone_core::utils::{GenericResult, InfoLogger, silent_logger};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write, stdout};
use std::process;
use std::sync::Arc;

const TABLE_ARG_NAME: &str = "TABLE";
const CONFIG_ARG_NAME: &str = "config";
const LOG_ARG_NAME: &str = "log";

pub(crate) fn create_write_buffer(out_file: Option<File>) -> BufWriter<Box<dyn Write>> {
    if let Some(out_file) = out_file {
        BufWriter::new(Box::new(out_file))
    } else {
        BufWriter::new(Box::new(stdout()))
    }
}

fn open_file(path: &str, description: &str) -> File {
    File::open(path).unwrap_or_else(|err| {
        eprintln!("cannot open {description} file '{path}': '{err}'");
        process::exit(1);
    })
}

fn create_file(path: &str, description: &str) -> GenericResult<File> {
    File::create(path).map_err(|err| format!("cannot create {description} file '{path}': '{err}'").into())
}

fn get_table_arg() -> Arg {
    Arg::new(TABLE_ARG_NAME).help("Sets delivery table file in csv format").required(true).index(1)
}

fn get_config_arg() -> Arg {
    Arg::new(CONFIG_ARG_NAME).help("Specifies path to pipeline configuration file").short('c').long(CONFIG_ARG_NAME)
}

fn get_log_arg() -> Arg {
    Arg::new(LOG_ARG_NAME)
        .help("Specifies whether progress is logged to stderr")
        .long(LOG_ARG_NAME)
        .action(ArgAction::SetTrue)
}

fn get_table_reader(matches: &ArgMatches) -> BufReader<File> {
    let path = matches.get_one::<String>(TABLE_ARG_NAME).map(String::as_str).unwrap_or_default();

    BufReader::new(open_file(path, "delivery table"))
}

fn get_config(matches: &ArgMatches) -> Config {
    matches
        .get_one::<String>(CONFIG_ARG_NAME)
        .map(|path| {
            read_config(BufReader::new(open_file(path, "config"))).unwrap_or_else(|err| {
                eprintln!("{err}");
                process::exit(1);
            })
        })
        .unwrap_or_default()
}

fn get_logger(matches: &ArgMatches) -> InfoLogger {
    if matches.get_flag(LOG_ARG_NAME) { Arc::new(|msg: &str| eprintln!("{msg}")) } else { silent_logger() }
}

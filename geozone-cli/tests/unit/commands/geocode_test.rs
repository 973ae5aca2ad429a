use super::*;
use crate::helpers::{DELIVERIES_PATH, create_stub_provider};
use tempfile::TempDir;

#[test]
fn can_parse_geocode_args() {
    let args = vec!["geocode", DELIVERIES_PATH, "-o", "report.csv", "--log"];

    let matches = get_geocode_app().try_get_matches_from(args).unwrap();

    assert_eq!(matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(String::as_str), Some("report.csv"));
    assert!(matches.get_flag(LOG_ARG_NAME));
}

#[test]
fn can_disable_logging_by_default() {
    let matches = get_geocode_app().try_get_matches_from(vec!["geocode", DELIVERIES_PATH]).unwrap();

    assert!(!matches.get_flag(LOG_ARG_NAME));
    assert!(matches.get_one::<String>(CONFIG_ARG_NAME).is_none());
}

#[test]
fn can_skip_report_file_when_table_has_invalid_schema() {
    let tmpdir = TempDir::new().expect("cannot create temp directory");
    let table_path = tmpdir.path().join("deliveries.csv");
    let out_path = tmpdir.path().join("report.csv");
    std::fs::write(&table_path, "Client,Address\nAcme,Mango Ave\n").unwrap();
    let args = ["geocode", table_path.to_str().unwrap(), "-o", out_path.to_str().unwrap()];
    let matches = get_geocode_app().try_get_matches_from(args).unwrap();

    let result = geocode_table(&matches, &Config::default(), create_stub_provider());

    assert!(result.is_err());
    assert!(!out_path.exists());
}

use super::*;
use crate::extensions::config::*;
use crate::helpers::*;
use geozone_core::utils::silent_logger;
use std::fs::File;
use std::io::BufReader;

fn create_geocoded_session() -> (Session, GeocodeResolver) {
    let config = Config::default();
    let environment = create_environment(&config, silent_logger());
    let resolver = create_resolver(&config, create_stub_provider(), &environment);
    let table = BufReader::new(File::open(DELIVERIES_PATH).expect("cannot open deliveries"));
    let mut session = Session::upload(table, &create_normalizer(&config)).unwrap();

    resolver.resolve_session(&mut session);

    (session, resolver)
}

fn run_rounds(answers: &str) -> (Session, usize, String) {
    let (mut session, resolver) = create_geocoded_session();
    let mut input = BufReader::new(answers.as_bytes());
    let mut output = Vec::new();

    let resolved = {
        let mut prompt = Prompt::new(&mut input, &mut output);
        run_correction_rounds(&mut session, &CorrectionLedger::default(), &resolver, &mut prompt).unwrap()
    };

    (session, resolved, String::from_utf8(output).unwrap())
}

#[test]
fn can_resolve_choice_and_free_text() {
    let (session, resolved, output) = run_rounds("2\nNorth Reclamation Area\n");

    assert_eq!(resolved, 2);
    assert_eq!(session.eligible_count(), 6);
    assert!(output.contains("  [1] Tabunok\n  [2] Tabunok, Talisay City"));
    assert!(output.contains("enter corrected address"));
    assert!(output.contains("resolved: 2, still failed: 0"));
}

#[test]
fn can_stop_when_input_is_exhausted() {
    let (session, resolved, output) = run_rounds("");

    assert_eq!(resolved, 0);
    assert_eq!(session.eligible_count(), 4);
    assert!(output.starts_with("2 address(es) cannot be located"));
}

#[test]
fn can_skip_unknown_option() {
    let (session, resolved, output) = run_rounds("5\nNorth Reclamation Area\n\n");

    assert_eq!(resolved, 1);
    assert_eq!(session.eligible_count(), 5);
    assert!(output.contains("unknown option '5', skipped"));
}

#[test]
fn can_run_several_rounds() {
    let (session, resolved, _) = run_rounds("\nSomewhere else\n2\n\n");

    assert_eq!(resolved, 1);
    assert_eq!(session.eligible_count(), 5);
    assert!(session.record(5).is_some_and(|record| !record.is_eligible()));
}

use super::*;
use crate::helpers::geocoding::*;
use crate::helpers::models::*;
use crate::partitioning::KMeansPartitioner;
use crate::utils::{DefaultRandom, silent_logger};
use std::sync::{Arc, Mutex};

const DISPATCH: &str = "Pier 1";

fn create_dispatch_provider() -> Arc<FakeGeocoder> {
    Arc::new(FakeGeocoder::default().with_place(normalized(DISPATCH).as_str(), 10.29, 123.90, "Pier 1, Cebu City"))
}

fn create_partitioner() -> KMeansPartitioner {
    KMeansPartitioner::new(Arc::new(DefaultRandom::new_repeatable()), Default::default())
}

fn create_request(trucks: usize, drivers: Option<&[&str]>) -> PlanRequest {
    PlanRequest {
        trucks,
        drivers: drivers.map(|drivers| drivers.iter().map(|name| name.to_string()).collect()),
        dispatch_address: DISPATCH.to_string(),
    }
}

fn create_two_district_session() -> Session {
    create_resolved_session(&[
        (10.3157, 123.8854),
        (10.2450, 123.8490),
        (10.3170, 123.8870),
        (10.2460, 123.8500),
        (10.3140, 123.8830),
    ])
}

struct FixedPartitioner(Vec<usize>);

impl Partitioner for FixedPartitioner {
    fn partition(&self, _: &[Coordinate], _: usize) -> Vec<usize> {
        self.0.clone()
    }
}

#[test]
fn can_assign_trucks_and_drivers() {
    let resolver = create_resolver(create_dispatch_provider());
    let partitioner = create_partitioner();
    let planner = RoutePlanner::new(&resolver, &partitioner, PlanSettings::default(), silent_logger());
    let mut session = create_two_district_session();

    let plan = planner.plan(&mut session, &create_request(2, Some(&["Ana", "Ben"]))).unwrap();

    assert_eq!(plan.dispatch.formatted_address, "Pier 1, Cebu City");
    assert_eq!(plan.stops.len(), 5);
    assert_eq!(plan.stops.iter().map(|stop| stop.record_index).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    let north = session.records()[0].assigned_truck.unwrap();
    let south = session.records()[1].assigned_truck.unwrap();
    assert_ne!(north, south);
    assert_eq!(session.records()[2].assigned_truck, Some(north));
    assert_eq!(session.records()[4].assigned_truck, Some(north));
    assert_eq!(session.records()[3].assigned_truck, Some(south));
    assert_eq!(session.records()[0].driver.as_deref(), Some(["Ana", "Ben"][north]));
    assert_eq!(plan.summaries.iter().map(|summary| summary.stops).sum::<usize>(), 5);
    assert_eq!(plan.summaries[north].stops, 3);
    assert_float_eq!(plan.summaries[south].total_weight_kg, 20.);
}

#[test]
fn can_skip_records_without_coordinates() {
    let resolver = create_resolver(create_dispatch_provider());
    let partitioner = create_partitioner();
    let planner = RoutePlanner::new(&resolver, &partitioner, PlanSettings::default(), silent_logger());
    let mut session = Session::new(vec![
        create_resolved_record("a", "A", 1., 10.31, 123.88),
        create_record("b", "B", "2kg"),
        create_resolved_record("c", "C", 3., 10.24, 123.84),
    ]);

    let plan = planner.plan(&mut session, &create_request(2, None)).unwrap();

    assert_eq!(plan.stops.iter().map(|stop| stop.record_index).collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(session.records()[1].assigned_truck, None);
    assert!(plan.stops.iter().all(|stop| stop.driver.starts_with("Truck ")));
}

parameterized_test! {can_validate_truck_count, (trucks, max_trucks, expected), {
    can_validate_truck_count_impl(trucks, max_trucks, expected);
}}

can_validate_truck_count! {
    case01_zero: (0, 20, Some(PipelineError::TruckCountOutOfRange { trucks: 0, max: 20 })),
    case02_above_max: (4, 3, Some(PipelineError::TruckCountOutOfRange { trucks: 4, max: 3 })),
    case03_at_max: (3, 3, None),
    case04_insufficient: (6, 20, Some(PipelineError::InsufficientEligibleRecords { eligible: 5, trucks: 6 })),
    case05_equal_to_eligible: (5, 20, None),
}

fn can_validate_truck_count_impl(trucks: usize, max_trucks: usize, expected: Option<PipelineError>) {
    let resolver = create_resolver(create_dispatch_provider());
    let partitioner = create_partitioner();
    let settings = PlanSettings { max_trucks, ..PlanSettings::default() };
    let planner = RoutePlanner::new(&resolver, &partitioner, settings, silent_logger());
    let mut session = create_two_district_session();

    let result = planner.plan(&mut session, &create_request(trucks, None));

    assert_eq!(result.err(), expected);
}

#[test]
fn can_check_eligible_records_before_dispatch_point() {
    let provider = Arc::new(FakeGeocoder::default());
    let resolver = create_resolver(provider.clone());
    let partitioner = create_partitioner();
    let planner = RoutePlanner::new(&resolver, &partitioner, PlanSettings::default(), silent_logger());
    let mut session = create_resolved_session(&[(10.3, 123.9), (10.2, 123.8), (10.1, 123.7)]);

    let result = planner.plan(&mut session, &create_request(5, None));

    assert_eq!(result.err(), Some(PipelineError::InsufficientEligibleRecords { eligible: 3, trucks: 5 }));
    assert!(provider.calls().is_empty());
}

#[test]
fn can_fail_on_roster_mismatch() {
    let resolver = create_resolver(create_dispatch_provider());
    let partitioner = create_partitioner();
    let planner = RoutePlanner::new(&resolver, &partitioner, PlanSettings::default(), silent_logger());
    let mut session = create_two_district_session();

    let result = planner.plan(&mut session, &create_request(2, Some(&["Ana"])));

    assert_eq!(result.err(), Some(PipelineError::DriverRosterMismatch { drivers: 1, trucks: 2 }));
}

#[test]
fn can_fail_on_unresolved_dispatch_and_keep_session_usable() {
    let provider = Arc::new(FakeGeocoder::default().with_place("Unknown Pier", 10.1, 123.1, "Pier Road, Talisay"));
    let resolver = create_resolver(provider);
    let partitioner = create_partitioner();
    let planner = RoutePlanner::new(&resolver, &partitioner, PlanSettings::default(), silent_logger());
    let mut session = create_two_district_session();
    let request = PlanRequest { dispatch_address: "Unknown Pier".to_string(), ..create_request(2, None) };

    let result = planner.plan(&mut session, &request);

    assert_eq!(
        result.err(),
        Some(PipelineError::DispatchPointUnresolved {
            address: "Unknown Pier".to_string(),
            suggestion: Some("Pier Road, Talisay".to_string())
        })
    );
    assert!(session.records().iter().all(|record| record.assigned_truck.is_none()));
    assert!(planner.plan(&mut session, &create_request(2, None)).is_ok());
}

#[test]
fn can_clear_previous_assignment_on_replan() {
    let resolver = create_resolver(create_dispatch_provider());
    let first = FixedPartitioner(vec![0, 1, 2, 0, 1]);
    let second = FixedPartitioner(vec![1, 0, 1, 0, 1]);
    let mut session = create_two_district_session();

    RoutePlanner::new(&resolver, &first, PlanSettings::default(), silent_logger())
        .plan(&mut session, &create_request(3, None))
        .unwrap();
    RoutePlanner::new(&resolver, &second, PlanSettings::default(), silent_logger())
        .plan(&mut session, &create_request(2, Some(&["Ana", "Ben"])))
        .unwrap();

    let assigned = session
        .records()
        .iter()
        .map(|record| (record.assigned_truck.unwrap(), record.driver.clone().unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(assigned[0], (1, "Ben".to_string()));
    assert_eq!(assigned[1], (0, "Ana".to_string()));
}

#[test]
fn can_log_overloaded_trucks() {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = messages.clone();
    let resolver = create_resolver(create_dispatch_provider());
    let partitioner = FixedPartitioner(vec![0, 0, 0, 1, 1]);
    let settings = PlanSettings { truck_capacity_kg: Some(25.), ..PlanSettings::default() };
    let logger: InfoLogger = Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string()));
    let planner = RoutePlanner::new(&resolver, &partitioner, settings, logger);
    let mut session = create_two_district_session();

    let plan = planner.plan(&mut session, &create_request(2, None)).unwrap();

    assert_float_eq!(plan.summaries[0].total_weight_kg, 30.);
    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|msg| msg.starts_with("truck 1 (Truck 1) is overloaded")));
    assert!(!messages.iter().any(|msg| msg.starts_with("truck 2")));
}

struct PanickingPartitioner;

impl Partitioner for PanickingPartitioner {
    fn partition(&self, _: &[Coordinate], _: usize) -> Vec<usize> {
        unreachable!("partitioner must not be invoked")
    }
}

#[test]
fn can_refuse_partitioning_without_invoking_partitioner() {
    let resolver = create_resolver(create_dispatch_provider());
    let planner = RoutePlanner::new(&resolver, &PanickingPartitioner, PlanSettings::default(), silent_logger());
    let mut session = create_resolved_session(&[(10.3, 123.9), (10.2, 123.8), (10.1, 123.7)]);

    let result = planner.plan(&mut session, &create_request(5, None));

    assert!(matches!(result, Err(PipelineError::InsufficientEligibleRecords { eligible: 3, trucks: 5 })));
}

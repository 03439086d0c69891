mod common;

use std::sync::Arc;
use std::thread;

use delivery_routes_lib::{
    build_graph_from_provider, load_network, load_windows, plan_distances,
    plan_distances_on_graph, Criterion, CriterionParsing, DistanceSummary, Error,
    GraphBuildOptions, InMemoryNetwork, Location, RawEdge, RenderMode, RouteRequest,
    RouteWarning, WindowMode,
};

fn fixture_network() -> InMemoryNetwork {
    let dir = common::fixtures_dir();
    load_network(&dir.join("locations.csv"), &dir.join("paths.csv")).expect("fixture loads")
}

#[test]
fn plain_plan_over_fixture() {
    let network = fixture_network();
    let plan = plan_distances(&network, &RouteRequest::new(1)).expect("plan succeeds");

    assert_eq!(plan.criterion, Criterion::Plain);
    assert!(!plan.windowed);
    assert_eq!(
        plan.distances.reachable(),
        vec![(1, 0.0), (2, 10.0), (3, 15.0), (4, 23.0)]
    );
    assert_eq!(plan.distances.unreachable(), vec![5]);
}

#[test]
fn traffic_plan_over_fixture() {
    let network = fixture_network();
    let plan = plan_distances(&network, &RouteRequest::new(1).with_traffic(true)).unwrap();
    assert_eq!(
        plan.distances.reachable(),
        vec![(1, 0.0), (2, 20.0), (3, 18.0), (4, 30.0)]
    );
}

#[test]
fn cost_plan_over_fixture() {
    let network = fixture_network();
    let plan = plan_distances(&network, &RouteRequest::new(1).with_criterion("cost")).unwrap();
    assert_eq!(plan.criterion, Criterion::Cost);
    assert_eq!(plan.distances.get(4), Some(57.5));
}

#[test]
fn windowed_plan_over_fixture() {
    let network = fixture_network();
    let windows = load_windows(&common::fixtures_dir().join("windows.csv")).unwrap();
    let request = RouteRequest::new(1).with_windows(windows, WindowMode::Literal);

    let plan = plan_distances(&network, &request).unwrap();
    assert!(plan.windowed);
    assert_eq!(plan.distances.get(2), None);
    assert_eq!(plan.distances.get(3), Some(18.0));
    assert_eq!(plan.distances.get(4), Some(26.0));
    assert!(matches!(
        plan.warnings.as_slice(),
        [RouteWarning::InvalidWindow { location: 4, .. }]
    ));
}

#[test]
fn unknown_criterion_is_lenient_by_default() {
    let network = fixture_network();
    let plan = plan_distances(&network, &RouteRequest::new(1).with_criterion("greenest")).unwrap();
    assert_eq!(plan.criterion, Criterion::Plain);
    assert_eq!(plan.distances.get(4), Some(23.0));
}

#[test]
fn unknown_criterion_fails_when_strict() {
    let network = fixture_network();
    let request = RouteRequest::new(1)
        .with_criterion("greenest")
        .with_criterion_parsing(CriterionParsing::Strict);
    let err = plan_distances(&network, &request).expect_err("strict criterion");
    assert!(matches!(err, Error::UnknownCriterion { .. }));
}

#[test]
fn invalid_edge_fails_before_traversal() {
    let network = InMemoryNetwork::new(
        vec![Location::new(1, "A"), Location::new(2, "B")],
        vec![RawEdge::new(1, 2, -4.0, 1.0)],
    )
    .unwrap();
    let err = plan_distances(&network, &RouteRequest::new(1)).expect_err("negative weight");
    assert!(format!("{err}").contains("invalid weight"));
}

#[test]
fn shared_graph_serves_concurrent_queries() {
    let network = fixture_network();
    let graph = Arc::new(build_graph_from_provider(&network, GraphBuildOptions::default()).unwrap());

    let criteria = ["plain", "cost", "time"];
    let sequential: Vec<_> = criteria
        .iter()
        .map(|name| {
            plan_distances_on_graph(&graph, &RouteRequest::new(1).with_criterion(*name))
                .unwrap()
                .distances
        })
        .collect();

    let handles: Vec<_> = criteria
        .iter()
        .map(|name| {
            let graph = Arc::clone(&graph);
            let request = RouteRequest::new(1).with_criterion(*name);
            thread::spawn(move || plan_distances_on_graph(&graph, &request).unwrap().distances)
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(sequential) {
        assert_eq!(handle.join().expect("thread completes"), expected);
    }
}

#[test]
fn summary_renders_names_and_unreachable() {
    let network = fixture_network();
    let plan = plan_distances(&network, &RouteRequest::new(1)).unwrap();
    let summary = DistanceSummary::from_plan(&plan, &network);

    assert_eq!(summary.start_name.as_deref(), Some("Central Depot"));
    assert_eq!(summary.entries.len(), 5);
    assert_eq!(summary.reachable_count(), 4);

    let text = summary.render(RenderMode::PlainText);
    assert!(text.starts_with("Distances from Central Depot (1) [criterion: plain]"));
    assert!(text.contains("Hillside Clinic (3): 15.00 units"));
    assert!(text.contains("Old Town Bakery (5): unreachable"));

    let rich = summary.render(RenderMode::RichText);
    assert!(rich.contains("* **Airport Cargo** (`4`): 23.00 units"));
}

#[test]
fn summary_json_marks_unreachable_as_null() {
    let network = fixture_network();
    let windows = load_windows(&common::fixtures_dir().join("windows.csv")).unwrap();
    let plan = plan_distances(
        &network,
        &RouteRequest::new(1).with_windows(windows, WindowMode::Corrected),
    )
    .unwrap();
    let summary = DistanceSummary::from_plan(&plan, &network);

    let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(value["criterion"], "plain");
    assert_eq!(value["windowed"], true);
    let market = &value["entries"][1];
    assert_eq!(market["id"], 2);
    assert_eq!(market["reachable"], false);
    assert!(market["distance"].is_null());
    assert_eq!(value["warnings"].as_array().map(Vec::len), Some(1));
}

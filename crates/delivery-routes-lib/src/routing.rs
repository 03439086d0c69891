use crate::engine::{shortest_distances, DistanceQuery, DistanceTable, RouteWarning};
use crate::error::Result;
use crate::graph::{build_graph_from_provider, Graph, GraphBuildOptions};
use crate::network::{LocationId, NetworkProvider};
use crate::policy::{Criterion, CriterionParsing};
use crate::window::{DeliveryWindows, WindowMode};

/// High-level distance planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: LocationId,
    /// Criterion name as supplied by the caller; resolved with `criterion_parsing`.
    pub criterion: String,
    pub criterion_parsing: CriterionParsing,
    pub apply_traffic: bool,
    pub windows: Option<DeliveryWindows>,
    pub window_mode: WindowMode,
}

impl RouteRequest {
    /// Plain-criterion request without traffic or windows.
    pub fn new(start: LocationId) -> Self {
        Self {
            start,
            criterion: Criterion::Plain.to_string(),
            criterion_parsing: CriterionParsing::default(),
            apply_traffic: false,
            windows: None,
            window_mode: WindowMode::default(),
        }
    }

    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = criterion.into();
        self
    }

    pub fn with_criterion_parsing(mut self, parsing: CriterionParsing) -> Self {
        self.criterion_parsing = parsing;
        self
    }

    pub fn with_traffic(mut self, apply_traffic: bool) -> Self {
        self.apply_traffic = apply_traffic;
        self
    }

    pub fn with_windows(mut self, windows: DeliveryWindows, mode: WindowMode) -> Self {
        self.windows = Some(windows);
        self.window_mode = mode;
        self
    }

    fn graph_options(&self) -> GraphBuildOptions {
        GraphBuildOptions::with_traffic(self.apply_traffic)
    }
}

/// Distances computed for a request.
#[derive(Debug, Clone)]
pub struct DistancePlan {
    pub start: LocationId,
    pub criterion: Criterion,
    pub windowed: bool,
    pub distances: DistanceTable,
    pub warnings: Vec<RouteWarning>,
}

/// Build the graph from `provider` and compute distances for the request.
///
/// Criterion resolution and graph construction errors are returned before
/// any traversal runs.
pub fn plan_distances<P: NetworkProvider + ?Sized>(
    provider: &P,
    request: &RouteRequest,
) -> Result<DistancePlan> {
    let criterion = Criterion::resolve(&request.criterion, request.criterion_parsing)?;
    let graph = build_graph_from_provider(provider, request.graph_options())?;
    Ok(run(&graph, criterion, request))
}

/// Compute distances on a graph that was built ahead of time.
///
/// The request's traffic flag is ignored here; the graph keeps whatever
/// options it was built with.
pub fn plan_distances_on_graph(graph: &Graph, request: &RouteRequest) -> Result<DistancePlan> {
    let criterion = Criterion::resolve(&request.criterion, request.criterion_parsing)?;
    Ok(run(graph, criterion, request))
}

fn run(graph: &Graph, criterion: Criterion, request: &RouteRequest) -> DistancePlan {
    let mut query = DistanceQuery::new(request.start, criterion);
    if let Some(windows) = request.windows.as_ref() {
        query = query.with_windows(windows, request.window_mode);
    }

    let outcome = shortest_distances(graph, &query);
    DistancePlan {
        start: request.start,
        criterion,
        windowed: request.windows.is_some(),
        distances: outcome.distances,
        warnings: outcome.warnings,
    }
}

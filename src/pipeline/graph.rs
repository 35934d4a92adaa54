//! Step dependency graph and execution ordering
//!
//! The declared `depends_on` edges form a small DAG. Topological order
//! decides execution; reachability decides which later steps get reported
//! as skipped when an earlier one fails.

use super::steps::StepId;
use crate::core::error::{DistError, DistResult};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

fn build_graph() -> (DiGraph<StepId, ()>, HashMap<StepId, NodeIndex>) {
  let mut graph = DiGraph::new();
  let mut indices = HashMap::new();

  for step in StepId::ALL {
    indices.insert(step, graph.add_node(step));
  }

  for step in StepId::ALL {
    for dep in step.depends_on() {
      graph.add_edge(indices[dep], indices[&step], ());
    }
  }

  (graph, indices)
}

/// Topologically order the requested steps according to the declared edges
pub fn execution_order(requested: &[StepId]) -> DistResult<Vec<StepId>> {
  let (graph, _) = build_graph();

  let sorted = algo::toposort(&graph, None)
    .map_err(|_| DistError::message("Step dependency graph contains a cycle"))?;

  Ok(
    sorted
      .into_iter()
      .map(|idx| graph[idx])
      .filter(|step| requested.contains(step))
      .collect(),
  )
}

/// Whether `step` transitively depends on `on`
pub fn depends_transitively(step: StepId, on: StepId) -> bool {
  let (graph, indices) = build_graph();
  step != on && algo::has_path_connecting(&graph, indices[&on], indices[&step], None)
}

use std::collections::{BTreeMap, HashMap};

use eframe::egui::Vec2;

use crate::braid::{
    BraidGraph, CohortAnalysis, WorkPathAnalysis, analyze_cohort_transitions, analyze_work_path,
};
use crate::layout::layout_coordinates;

/// Everything derived from one loaded braid, computed up front and consumed
/// read-only by the panels and the graph view. Rebuilt whole whenever a
/// different braid is loaded; the reveal controller is the only mutable
/// state alongside it.
pub struct BraidSnapshot {
    pub graph: BraidGraph,
    pub coordinates: HashMap<String, Vec2>,
    pub work_analysis: Option<WorkPathAnalysis>,
    pub cohort_analysis: Option<CohortAnalysis>,
    pub non_critical_by_cohort: BTreeMap<usize, Vec<String>>,
}

impl BraidSnapshot {
    pub fn build(graph: BraidGraph) -> Self {
        let coordinates = layout_coordinates(&graph);
        let work_analysis = analyze_work_path(&graph);
        let cohort_analysis = analyze_cohort_transitions(&graph);
        let non_critical_by_cohort = graph.non_critical_by_cohort();

        Self {
            graph,
            coordinates,
            work_analysis,
            cohort_analysis,
            non_critical_by_cohort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_covers_every_bead() {
        let graph = BraidGraph::from_json(
            r#"{
                "parents": {"0": [], "1": ["0"], "2": ["0"]},
                "cohorts": [["0"], ["1", "2"]],
                "work": {"0": 2, "1": 1, "2": 1},
                "highest_work_path": ["0", "1"]
            }"#,
        )
        .unwrap();

        let snapshot = BraidSnapshot::build(graph);
        assert_eq!(snapshot.coordinates.len(), snapshot.graph.node_count());
        assert!(snapshot.work_analysis.is_some());
        assert!(snapshot.cohort_analysis.is_some());
        assert_eq!(
            snapshot.non_critical_by_cohort.get(&1).map(Vec::as_slice),
            Some(&["2".to_string()][..])
        );
    }
}

use super::graph::BraidGraph;

/// How the work value moved between two consecutive path beads. Work is
/// expected to strictly decrease from genesis towards the tip's ancestors,
/// so anything else is an anomaly worth flagging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyKind {
    Increase,
    Plateau,
}

impl AnomalyKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Plateau => "plateau",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkAnomaly {
    /// Path position of the later bead in the offending pair.
    pub index: usize,
    pub kind: AnomalyKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkPathAnalysis {
    pub is_strictly_decreasing: bool,
    pub anomalies: Vec<WorkAnomaly>,
}

/// Classifies every adjacent work transition along the highest-work path.
/// This is a diagnostic report, never a validation gate: malformed braids
/// still render, with the anomalies called out in the details panel.
pub fn analyze_work_path(graph: &BraidGraph) -> Option<WorkPathAnalysis> {
    let path = &graph.highest_work_path;
    if path.is_empty() {
        return None;
    }

    let mut anomalies = Vec::new();
    for index in 1..path.len() {
        let previous = graph.work_of(&path[index - 1]);
        let current = graph.work_of(&path[index]);

        if current > previous {
            anomalies.push(WorkAnomaly {
                index,
                kind: AnomalyKind::Increase,
            });
        } else if current == previous {
            anomalies.push(WorkAnomaly {
                index,
                kind: AnomalyKind::Plateau,
            });
        }
    }

    Some(WorkPathAnalysis {
        is_strictly_decreasing: anomalies.is_empty(),
        anomalies,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Same,
    Next,
    Backward,
    Leap,
}

impl TransitionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Next => "next",
            Self::Backward => "backward",
            Self::Leap => "leap",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CohortTransition {
    pub from_node: String,
    /// Cohort index, or -1 when the bead appears in no cohort.
    pub from_cohort: i64,
    pub to_node: String,
    pub to_cohort: i64,
    pub is_valid: bool,
    pub kind: TransitionKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CohortAnalysis {
    pub transitions: Vec<CohortTransition>,
}

/// Classifies every cohort transition along the highest-work path. A legal
/// path only ever stays in a cohort or advances to the next one; `backward`
/// and `leap` transitions are marked invalid. Paths of length <= 1 have no
/// transitions to analyze.
pub fn analyze_cohort_transitions(graph: &BraidGraph) -> Option<CohortAnalysis> {
    let path = &graph.highest_work_path;
    if path.len() <= 1 {
        return None;
    }

    let cohort_or_sentinel =
        |id: &str| graph.cohort_of(id).map(|index| index as i64).unwrap_or(-1);

    let mut transitions = Vec::with_capacity(path.len() - 1);
    for pair in path.windows(2) {
        let [from_node, to_node] = pair else {
            continue;
        };
        let from_cohort = cohort_or_sentinel(from_node);
        let to_cohort = cohort_or_sentinel(to_node);

        let kind = if to_cohort == from_cohort {
            TransitionKind::Same
        } else if to_cohort == from_cohort + 1 {
            TransitionKind::Next
        } else if to_cohort < from_cohort {
            TransitionKind::Backward
        } else {
            TransitionKind::Leap
        };
        let is_valid = matches!(kind, TransitionKind::Same | TransitionKind::Next);

        transitions.push(CohortTransition {
            from_node: from_node.clone(),
            from_cohort,
            to_node: to_node.clone(),
            to_cohort,
            is_valid,
            kind,
        });
    }

    Some(CohortAnalysis { transitions })
}

#[cfg(test)]
mod tests {
    use super::super::parse::parse_braid_json;
    use super::*;

    fn braid(json: &str) -> BraidGraph {
        BraidGraph::build(parse_braid_json(json).unwrap())
    }

    #[test]
    fn plateau_is_reported_at_the_later_index() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "B": ["A"], "C": ["B"]},
                "cohorts": [["A"], ["B"], ["C"]],
                "work": {"A": 10, "B": 7, "C": 7},
                "highest_work_path": ["A", "B", "C"]
            }"#,
        );

        let analysis = analyze_work_path(&graph).unwrap();
        assert!(!analysis.is_strictly_decreasing);
        assert_eq!(
            analysis.anomalies,
            vec![WorkAnomaly {
                index: 2,
                kind: AnomalyKind::Plateau
            }]
        );
    }

    #[test]
    fn strictly_decreasing_work_has_no_anomalies() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "B": ["A"]},
                "cohorts": [["A"], ["B"]],
                "work": {"A": 5, "B": 3},
                "highest_work_path": ["A", "B"]
            }"#,
        );

        let analysis = analyze_work_path(&graph).unwrap();
        assert!(analysis.is_strictly_decreasing);
        assert!(analysis.anomalies.is_empty());
    }

    #[test]
    fn increases_and_missing_work_default_to_zero() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "B": ["A"], "C": ["B"]},
                "cohorts": [["A"], ["B"], ["C"]],
                "work": {"A": 1, "C": 2},
                "highest_work_path": ["A", "B", "C"]
            }"#,
        );

        // B has no work entry, so the sequence is 1, 0, 2.
        let analysis = analyze_work_path(&graph).unwrap();
        assert_eq!(
            analysis
                .anomalies
                .iter()
                .map(|anomaly| (anomaly.index, anomaly.kind))
                .collect::<Vec<_>>(),
            vec![(2, AnomalyKind::Increase)]
        );
    }

    #[test]
    fn empty_path_yields_no_work_analysis() {
        let graph = braid(r#"{"parents": {"A": []}, "cohorts": [["A"]]}"#);
        assert!(analyze_work_path(&graph).is_none());
    }

    #[test]
    fn leap_transition_is_invalid() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "B": ["A"], "C": ["B"]},
                "cohorts": [["A"], ["B"], ["C"]],
                "highest_work_path": ["A", "C"]
            }"#,
        );

        let analysis = analyze_cohort_transitions(&graph).unwrap();
        assert_eq!(analysis.transitions.len(), 1);
        let transition = &analysis.transitions[0];
        assert_eq!(transition.from_cohort, 0);
        assert_eq!(transition.to_cohort, 2);
        assert_eq!(transition.kind, TransitionKind::Leap);
        assert!(!transition.is_valid);
    }

    #[test]
    fn same_next_and_backward_are_classified() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "B": ["A"], "C": ["A"], "D": ["B", "C"]},
                "cohorts": [["A"], ["B", "C"], ["D"]],
                "highest_work_path": ["A", "B", "C", "D", "A"]
            }"#,
        );

        let kinds = analyze_cohort_transitions(&graph)
            .unwrap()
            .transitions
            .iter()
            .map(|transition| (transition.kind, transition.is_valid))
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                (TransitionKind::Next, true),
                (TransitionKind::Same, true),
                (TransitionKind::Next, true),
                (TransitionKind::Backward, false),
            ]
        );
    }

    #[test]
    fn short_paths_yield_no_transition_analysis() {
        let graph = braid(
            r#"{
                "parents": {"A": []},
                "cohorts": [["A"]],
                "highest_work_path": ["A"]
            }"#,
        );
        assert!(analyze_cohort_transitions(&graph).is_none());
    }

    #[test]
    fn uncohorted_path_beads_surface_as_minus_one() {
        let graph = braid(
            r#"{
                "parents": {"A": [], "X": ["A"]},
                "cohorts": [["A"]],
                "highest_work_path": ["A", "X"]
            }"#,
        );

        let analysis = analyze_cohort_transitions(&graph).unwrap();
        let transition = &analysis.transitions[0];
        assert_eq!(transition.to_cohort, -1);
        assert_eq!(transition.kind, TransitionKind::Backward);
        assert!(!transition.is_valid);
    }
}

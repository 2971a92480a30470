mod analysis;
mod catalog;
mod graph;
mod parse;

pub use analysis::{
    AnomalyKind, CohortAnalysis, CohortTransition, TransitionKind, WorkAnomaly, WorkPathAnalysis,
    analyze_cohort_transitions, analyze_work_path,
};
pub use catalog::{BraidEntry, list_braids, load_braid};
pub use graph::{BraidGraph, ConnectionMap, HUB_CONNECTION_THRESHOLD};
pub use parse::WorkSource;

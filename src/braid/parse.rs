use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Raw braid file contents, exactly as stored on disk. Fields the braid
/// generator sometimes omits carry serde defaults so older fixtures still
/// load; unknown extra fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawBraid {
    #[serde(default)]
    pub(super) description: String,
    pub(super) parents: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub(super) cohorts: Vec<Vec<String>>,
    #[serde(default)]
    pub(super) work: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub(super) bead_work: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub(super) highest_work_path: Vec<String>,
}

/// Which field supplied the per-bead work values. Kept around so the UI can
/// say when work silently defaulted to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkSource {
    Work,
    BeadWork,
    Missing,
}

impl WorkSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::BeadWork => "bead_work",
            Self::Missing => "none (all zero)",
        }
    }
}

pub(super) fn parse_braid_json(raw: &str) -> Result<RawBraid> {
    let braid: RawBraid = serde_json::from_str(raw).context("invalid braid JSON")?;

    if braid.parents.is_empty() && braid.cohorts.iter().all(|cohort| cohort.is_empty()) {
        return Err(anyhow!("braid file contains no beads"));
    }

    Ok(braid)
}

impl RawBraid {
    /// Resolves the work map, preferring `work` over the legacy `bead_work`.
    pub(super) fn resolved_work(&self) -> (HashMap<String, f64>, WorkSource) {
        if let Some(work) = &self.work {
            (work.clone(), WorkSource::Work)
        } else if let Some(bead_work) = &self.bead_work {
            (bead_work.clone(), WorkSource::BeadWork)
        } else {
            (HashMap::new(), WorkSource::Missing)
        }
    }
}

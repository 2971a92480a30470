use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;

use super::parse::{RawBraid, WorkSource, parse_braid_json};

/// Total degree (parents + children) at which a bead gets hub treatment in
/// the layout.
pub const HUB_CONNECTION_THRESHOLD: usize = 3;

/// A braid plus every lookup structure derived from it. Built once per
/// loaded file and never mutated afterwards; all other components consume
/// it read-only.
#[derive(Clone, Debug)]
pub struct BraidGraph {
    pub description: String,
    /// Child id -> ordered parent ids. Every bead referenced anywhere in the
    /// file has an entry here, defaulting to zero parents when the file
    /// never declared it.
    pub parents: HashMap<String, Vec<String>>,
    /// Parent id -> ordered child ids (inverse of `parents`).
    pub children: HashMap<String, Vec<String>>,
    pub cohorts: Vec<Vec<String>>,
    cohort_index: HashMap<String, usize>,
    work: HashMap<String, f64>,
    pub work_source: WorkSource,
    pub highest_work_path: Vec<String>,
    /// Fixed processing and reveal order: cohorts flattened in cohort order,
    /// then any beads that appear in no cohort, sorted by id.
    pub node_order: Vec<String>,
    /// Every (parent, child) edge implied by `parents`, ordered by the
    /// child's position in `node_order`.
    pub edges: Vec<(String, String)>,
}

/// Relations of one bead, deduplicated, in encounter order.
#[derive(Clone, Debug, Default)]
pub struct ConnectionMap {
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub siblings: Vec<String>,
    pub grandparents: Vec<String>,
    pub grandchildren: Vec<String>,
}

impl BraidGraph {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::build(parse_braid_json(raw)?))
    }

    pub(super) fn build(raw: RawBraid) -> Self {
        let (work, work_source) = raw.resolved_work();

        let mut parents = raw.parents;

        // Beads named only in a cohort, the path, or someone's parent list
        // are kept as zero-parent entries so a partial braid still renders.
        let mut referenced: Vec<String> = Vec::new();
        for cohort in &raw.cohorts {
            referenced.extend(cohort.iter().cloned());
        }
        referenced.extend(raw.highest_work_path.iter().cloned());
        for parent_ids in parents.values() {
            referenced.extend(parent_ids.iter().cloned());
        }
        for id in referenced {
            parents.entry(id).or_default();
        }

        let mut cohort_index = HashMap::new();
        for (index, cohort) in raw.cohorts.iter().enumerate() {
            for id in cohort {
                cohort_index.entry(id.clone()).or_insert(index);
            }
        }

        let mut node_order = Vec::with_capacity(parents.len());
        let mut seen = HashSet::new();
        for cohort in &raw.cohorts {
            for id in cohort {
                if seen.insert(id.clone()) {
                    node_order.push(id.clone());
                }
            }
        }
        let mut stray = parents
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect::<Vec<_>>();
        stray.sort();
        node_order.extend(stray);

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut edges = Vec::new();
        for child in &node_order {
            let Some(parent_ids) = parents.get(child) else {
                continue;
            };
            for parent in parent_ids {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(child.clone());
                edges.push((parent.clone(), child.clone()));
            }
        }

        Self {
            description: raw.description,
            parents,
            children,
            cohorts: raw.cohorts,
            cohort_index,
            work,
            work_source,
            highest_work_path: raw.highest_work_path,
            node_order,
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn parents_of(&self, id: &str) -> &[String] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parents followed by children. Duplicates are kept on purpose: the
    /// hub check below counts total degree, and a bead that is both parent
    /// and child of this one contributes two connections.
    pub fn connections_of(&self, id: &str) -> Vec<String> {
        let mut connections = self.parents_of(id).to_vec();
        connections.extend(self.children_of(id).iter().cloned());
        connections
    }

    /// Cohort index of a bead, or `None` when the bead appears in no
    /// cohort. A miss is a data-integrity signal the analyzers surface as
    /// cohort -1, not a silent default.
    pub fn cohort_of(&self, id: &str) -> Option<usize> {
        self.cohort_index.get(id).copied()
    }

    pub fn work_of(&self, id: &str) -> f64 {
        self.work.get(id).copied().unwrap_or(0.0)
    }

    pub fn is_hub(&self, id: &str) -> bool {
        self.connections_of(id).len() >= HUB_CONNECTION_THRESHOLD
    }

    pub fn genesis(&self) -> Option<&str> {
        self.highest_work_path.first().map(String::as_str)
    }

    pub fn tip(&self) -> Option<&str> {
        self.highest_work_path.last().map(String::as_str)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.highest_work_path.iter().any(|path_id| path_id == id)
    }

    /// Beads off the highest-work path, grouped by cohort index. Cohorts
    /// whose beads are all critical are omitted.
    pub fn non_critical_by_cohort(&self) -> BTreeMap<usize, Vec<String>> {
        let critical: HashSet<&str> = self
            .highest_work_path
            .iter()
            .map(String::as_str)
            .collect();

        let mut by_cohort = BTreeMap::new();
        for (index, cohort) in self.cohorts.iter().enumerate() {
            let non_critical = cohort
                .iter()
                .filter(|id| !critical.contains(id.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !non_critical.is_empty() {
                by_cohort.insert(index, non_critical);
            }
        }
        by_cohort
    }

    pub fn connection_map(&self, id: &str) -> ConnectionMap {
        let parents = self.parents_of(id).to_vec();
        let children = self.children_of(id).to_vec();

        let mut siblings = Vec::new();
        let mut seen_siblings = HashSet::new();
        for parent in &parents {
            for sibling in self.children_of(parent) {
                if sibling != id && seen_siblings.insert(sibling.clone()) {
                    siblings.push(sibling.clone());
                }
            }
        }

        let mut grandparents = Vec::new();
        let mut seen_grandparents = HashSet::new();
        for parent in &parents {
            for grandparent in self.parents_of(parent) {
                if seen_grandparents.insert(grandparent.clone()) {
                    grandparents.push(grandparent.clone());
                }
            }
        }

        let mut grandchildren = Vec::new();
        let mut seen_grandchildren = HashSet::new();
        for child in &children {
            for grandchild in self.children_of(child) {
                if seen_grandchildren.insert(grandchild.clone()) {
                    grandchildren.push(grandchild.clone());
                }
            }
        }

        ConnectionMap {
            parents,
            children,
            siblings,
            grandparents,
            grandchildren,
        }
    }
}

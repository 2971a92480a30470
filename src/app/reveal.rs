use std::collections::{HashMap, HashSet};

use crate::braid::BraidGraph;

pub const DEFAULT_INTERVAL_SECS: f32 = 1.0;
pub const MIN_INTERVAL_SECS: f32 = 0.1;
pub const MAX_INTERVAL_SECS: f32 = 2.0;
/// How long a freshly revealed edge keeps its dashed "animating" look.
const EDGE_ANIMATION_SECS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Running,
    Stopped,
    Completed,
}

impl RevealPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }
}

/// What the notification panel shows about the most recent reveal.
#[derive(Clone, Debug)]
pub struct RevealEvent {
    pub node: String,
    pub cohort: Option<usize>,
    pub work: f64,
    pub parents: Vec<String>,
    pub at: f64,
}

#[derive(Clone, Debug)]
struct NodeFacts {
    cohort: Option<usize>,
    work: f64,
    parents: Vec<String>,
}

/// The one pending deadline. Carries the generation it was scheduled under;
/// a tick whose generation no longer matches the controller's is stale
/// (scheduled before a stop/reset) and must never commit.
#[derive(Clone, Copy, Debug)]
struct ScheduledTick {
    due: f64,
    generation: u64,
}

/// Replays the braid's construction one bead at a time on a fixed cadence.
///
/// Cooperative, single-timeline state machine: the frame loop calls
/// `tick(now)` and the controller owns at most one `ScheduledTick`. All
/// clock values are seconds from egui's frame clock. The braid-derived
/// inputs (node order, edge set, parent counts) are copied in at
/// construction and never change; only the reveal sets mutate.
pub struct RevealController {
    node_order: Vec<String>,
    facts: HashMap<String, NodeFacts>,
    all_edges: Vec<(String, String)>,
    visible_nodes: HashSet<String>,
    revealed_edges: Vec<(String, String)>,
    pending_edges: Vec<(String, String)>,
    cursor: usize,
    phase: RevealPhase,
    interval_secs: f32,
    next_tick: Option<ScheduledTick>,
    generation: u64,
    animating_edges: Vec<((String, String), f64)>,
    last_revealed: Option<RevealEvent>,
}

impl RevealController {
    pub fn new(graph: &BraidGraph) -> Self {
        let facts = graph
            .node_order
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    NodeFacts {
                        cohort: graph.cohort_of(id),
                        work: graph.work_of(id),
                        parents: graph.parents_of(id).to_vec(),
                    },
                )
            })
            .collect();

        Self {
            node_order: graph.node_order.clone(),
            facts,
            all_edges: graph.edges.clone(),
            visible_nodes: HashSet::new(),
            revealed_edges: Vec::new(),
            pending_edges: graph.edges.clone(),
            cursor: 0,
            phase: RevealPhase::Idle,
            interval_secs: DEFAULT_INTERVAL_SECS,
            next_tick: None,
            generation: 0,
            animating_edges: Vec::new(),
            last_revealed: None,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn interval_secs(&self) -> f32 {
        self.interval_secs
    }

    pub fn visible_count(&self) -> usize {
        self.visible_nodes.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_edges.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_edges.len()
    }

    pub fn last_revealed(&self) -> Option<&RevealEvent> {
        self.last_revealed.as_ref()
    }

    pub fn is_node_visible(&self, id: &str) -> bool {
        self.visible_nodes.contains(id)
    }

    pub fn is_edge_revealed(&self, parent: &str, child: &str) -> bool {
        self.revealed_edges
            .iter()
            .any(|(p, c)| p == parent && c == child)
    }

    pub fn is_edge_animating(&self, parent: &str, child: &str, now: f64) -> bool {
        self.animating_edges.iter().any(|((p, c), started)| {
            p == parent && c == child && now - started < EDGE_ANIMATION_SECS
        })
    }

    pub fn has_animating_edges(&self) -> bool {
        !self.animating_edges.is_empty()
    }

    /// Begins a run. From `Running` this is a no-op; from any finished
    /// state it resets first so a run always starts from a clean slate.
    /// The first bead reveals immediately; the rest follow on the cadence.
    pub fn start(&mut self, now: f64) {
        if self.phase == RevealPhase::Running {
            return;
        }
        if self.phase != RevealPhase::Idle {
            self.reset();
        }

        self.reveal_next(now);
        if self.cursor >= self.node_order.len() {
            self.phase = RevealPhase::Completed;
            self.next_tick = None;
        } else {
            self.phase = RevealPhase::Running;
            self.next_tick = Some(ScheduledTick {
                due: now + self.interval_secs as f64,
                generation: self.generation,
            });
        }
    }

    /// Cancels the pending tick and freezes the partial reveal in place.
    pub fn stop(&mut self) {
        if self.phase != RevealPhase::Running {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.next_tick = None;
        self.phase = RevealPhase::Stopped;
    }

    /// Returns to `Idle` with nothing revealed and every edge pending.
    /// Bumping the generation first guarantees a tick scheduled before the
    /// reset can never commit against the cleared state.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.next_tick = None;
        self.visible_nodes.clear();
        self.revealed_edges.clear();
        self.pending_edges = self.all_edges.clone();
        self.cursor = 0;
        self.animating_edges.clear();
        self.last_revealed = None;
        self.phase = RevealPhase::Idle;
    }

    /// Changes the cadence. Mid-run, the pending tick is replaced with one
    /// at the new interval; the cursor is untouched, so the remaining
    /// sequence continues from where it left off.
    pub fn set_interval(&mut self, secs: f32, now: f64) {
        self.interval_secs = secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS);
        if self.phase == RevealPhase::Running && self.next_tick.is_some() {
            self.next_tick = Some(ScheduledTick {
                due: now + self.interval_secs as f64,
                generation: self.generation,
            });
        }
    }

    /// Advances the clock. Returns true when the visible state changed (a
    /// bead was revealed or an edge finished its animation), so the caller
    /// knows to repaint.
    pub fn tick(&mut self, now: f64) -> bool {
        let before = self.animating_edges.len();
        self.animating_edges
            .retain(|(_, started)| now - started < EDGE_ANIMATION_SECS);
        let mut changed = self.animating_edges.len() != before;

        if self.phase != RevealPhase::Running {
            return changed;
        }
        let Some(tick) = self.next_tick else {
            return changed;
        };
        if tick.generation != self.generation {
            // Stale deadline from before a stop/reset. Discard.
            self.next_tick = None;
            return changed;
        }
        if now < tick.due {
            return changed;
        }

        self.reveal_next(now);
        changed = true;

        if self.cursor >= self.node_order.len() {
            self.phase = RevealPhase::Completed;
            self.next_tick = None;
        } else {
            self.next_tick = Some(ScheduledTick {
                due: now + self.interval_secs as f64,
                generation: self.generation,
            });
        }
        changed
    }

    /// When the next scheduled reveal is due, if any. The view uses this to
    /// ask egui for a wakeup instead of repainting every frame.
    pub fn next_due(&self) -> Option<f64> {
        self.next_tick.map(|tick| tick.due)
    }

    /// Reveals the bead at the cursor plus up to `parents.len()` of its
    /// pending incoming edges. Fewer matching edges than the declared
    /// parent count is tolerated: reveal what is there and move on.
    fn reveal_next(&mut self, now: f64) {
        let Some(node) = self.node_order.get(self.cursor).cloned() else {
            return;
        };
        self.visible_nodes.insert(node.clone());

        let (declared, cohort, work, parents) = match self.facts.get(&node) {
            Some(facts) => (
                facts.parents.len(),
                facts.cohort,
                facts.work,
                facts.parents.clone(),
            ),
            None => (0, None, 0.0, Vec::new()),
        };

        let mut taken = Vec::new();
        self.pending_edges.retain(|edge| {
            if taken.len() < declared && edge.1 == node {
                taken.push(edge.clone());
                false
            } else {
                true
            }
        });
        for edge in taken {
            self.animating_edges.push((edge.clone(), now));
            self.revealed_edges.push(edge);
        }

        self.last_revealed = Some(RevealEvent {
            node,
            cohort,
            work,
            parents,
            at: now,
        });
        self.cursor += 1;
    }
}

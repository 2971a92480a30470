use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use eframe::egui::{Vec2, vec2};

use crate::braid::BraidGraph;

/// Horizontal distance between cohort columns.
pub const SPACING_X: f32 = 200.0;
/// Vertical distance between stacked beads in a column.
pub const ROW_HEIGHT: f32 = 100.0;
/// Radius of the semicircular arc used for a hub's same-cohort connections.
pub const ARC_RADIUS: f32 = 200.0;
/// Downward nudge applied per attempt when two beads round to the same cell.
pub const COLLISION_STEP: f32 = 60.0;

/// Assigns a deterministic world position to every bead.
///
/// Critical-path beads stack top-down in their cohort column; the rest of a
/// cohort alternates above and below that band in descending work order; a
/// hub's same-cohort connections are re-placed on an arc around it; a final
/// pass nudges any beads that still share a rounded cell. Pure function of
/// the graph: the same braid always yields the same coordinates.
pub fn layout_coordinates(graph: &BraidGraph) -> HashMap<String, Vec2> {
    let mut coordinates = HashMap::with_capacity(graph.node_count());

    // Critical band. Beads with no cohort fall back to column zero so a
    // malformed braid still renders.
    let mut band_bottom: HashMap<usize, f32> = HashMap::new();
    for id in &graph.highest_work_path {
        let cohort = graph.cohort_of(id).unwrap_or(0);
        let offset = band_bottom.entry(cohort).or_insert(0.0);
        coordinates.insert(id.clone(), vec2(cohort as f32 * SPACING_X, *offset));
        *offset += ROW_HEIGHT;
    }

    // Non-critical beads alternate above (even rank) and below (odd rank)
    // the critical band, highest work first. The sort is stable, so equal
    // work keeps cohort encounter order.
    for (cohort, mut ids) in graph.non_critical_by_cohort() {
        let x = cohort as f32 * SPACING_X;
        ids.sort_by(|a, b| graph.work_of(b).total_cmp(&graph.work_of(a)));

        let mut above = -ROW_HEIGHT;
        let mut below = band_bottom.get(&cohort).copied().unwrap_or(ROW_HEIGHT);
        for (rank, id) in ids.iter().enumerate() {
            let y = if rank % 2 == 0 {
                let y = above;
                above -= ROW_HEIGHT;
                y
            } else {
                let y = below;
                below += ROW_HEIGHT;
                y
            };
            coordinates.insert(id.clone(), vec2(x, y));
        }
    }

    // Beads in no cohort at all stack below column zero.
    let strays = graph
        .node_order
        .iter()
        .filter(|id| !coordinates.contains_key(*id))
        .cloned()
        .collect::<Vec<_>>();
    if !strays.is_empty() {
        let column_bottom = coordinates
            .values()
            .filter(|position| position.x == 0.0)
            .map(|position| position.y)
            .fold(f32::NEG_INFINITY, f32::max);
        let mut y = if column_bottom.is_finite() {
            column_bottom + ROW_HEIGHT
        } else {
            0.0
        };
        for id in strays {
            coordinates.insert(id, vec2(0.0, y));
            y += ROW_HEIGHT;
        }
    }

    place_hub_arcs(graph, &mut coordinates);
    resolve_collisions(graph, &mut coordinates);

    coordinates
}

/// Same-cohort connections share a hub's x column, which renders as an
/// unreadable vertical pile of straight lines. Re-placing them on a
/// semicircular arc around the hub gives them angular separation.
fn place_hub_arcs(graph: &BraidGraph, coordinates: &mut HashMap<String, Vec2>) {
    for hub in &graph.node_order {
        if !graph.is_hub(hub) {
            continue;
        }
        let Some(cohort) = graph.cohort_of(hub) else {
            continue;
        };

        let mut arc_ids = Vec::new();
        for connection in graph.connections_of(hub) {
            if graph.cohort_of(&connection) == Some(cohort)
                && !graph.is_critical(&connection)
                && !arc_ids.contains(&connection)
            {
                arc_ids.push(connection);
            }
        }
        if arc_ids.len() < 2 {
            continue;
        }
        let Some(center) = coordinates.get(hub).copied() else {
            continue;
        };

        arc_ids.sort_by(|a, b| {
            let a_y = coordinates.get(a).map(|p| p.y).unwrap_or(0.0);
            let b_y = coordinates.get(b).map(|p| p.y).unwrap_or(0.0);
            a_y.total_cmp(&b_y)
        });

        let total = arc_ids.len();
        for (index, id) in arc_ids.iter().enumerate() {
            let angle = if total == 1 {
                FRAC_PI_2
            } else {
                let fraction = index as f32 / (total - 1) as f32;
                if center.y > 0.0 {
                    // Top half: -60deg .. 60deg.
                    -FRAC_PI_3 + (2.0 * FRAC_PI_3) * fraction
                } else {
                    // Bottom half: 120deg .. 240deg.
                    2.0 * FRAC_PI_3 + (2.0 * FRAC_PI_3) * fraction
                }
            };

            coordinates.insert(
                id.clone(),
                vec2(
                    cohort as f32 * SPACING_X + angle.cos() * ARC_RADIUS,
                    center.y + angle.sin() * ARC_RADIUS,
                ),
            );
        }
    }
}

/// Last-resort backstop: any bead whose rounded cell is already taken moves
/// down in fixed steps until it finds a free cell. Adjusted positions claim
/// their cell too, so a cascade cannot re-collide.
fn resolve_collisions(graph: &BraidGraph, coordinates: &mut HashMap<String, Vec2>) {
    let mut occupied: HashMap<(i64, i64), ()> = HashMap::with_capacity(coordinates.len());
    for id in &graph.node_order {
        let Some(position) = coordinates.get(id).copied() else {
            continue;
        };
        let column = position.x.round() as i64;
        let mut y = position.y;
        while occupied.contains_key(&(column, y.round() as i64)) {
            y += COLLISION_STEP;
        }
        occupied.insert((column, y.round() as i64), ());
        if y != position.y {
            coordinates.insert(id.clone(), vec2(position.x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::braid::BraidGraph;

    fn braid(json: &str) -> BraidGraph {
        BraidGraph::from_json(json).unwrap()
    }

    fn fan_braid() -> BraidGraph {
        braid(
            r#"{
                "parents": {"0": [], "1": ["0"], "2": ["0"], "3": ["0"], "4": ["1", "2", "3"]},
                "cohorts": [["0"], ["1", "2", "3"], ["4"]],
                "work": {"0": 9, "1": 5, "2": 3, "3": 1, "4": 1},
                "highest_work_path": ["0", "1", "4"]
            }"#,
        )
    }

    /// Hub `h` sits on the critical path at y = 0; its bottom-half arc puts
    /// the middle of three connections at 180 degrees, which lands exactly
    /// on genesis at (0, 0) and exercises the collision backstop.
    fn colliding_braid() -> BraidGraph {
        braid(
            r#"{
                "parents": {
                    "a": [],
                    "h": ["a", "p", "q", "r"],
                    "p": ["a"], "q": ["a"], "r": ["a"],
                    "z": ["h"]
                },
                "cohorts": [["a"], ["h", "p", "q", "r"], ["z"]],
                "work": {"a": 9, "h": 8, "p": 3, "q": 2, "r": 1, "z": 1},
                "highest_work_path": ["a", "h", "z"]
            }"#,
        )
    }

    fn rounded_cells(coordinates: &HashMap<String, Vec2>) -> HashSet<(i64, i64)> {
        let mut cells = HashSet::new();
        for position in coordinates.values() {
            let cell = (position.x.round() as i64, position.y.round() as i64);
            assert!(cells.insert(cell), "two beads share cell {cell:?}");
        }
        cells
    }

    #[test]
    fn layout_is_deterministic() {
        for graph in [fan_braid(), colliding_braid()] {
            let first = layout_coordinates(&graph);
            let second = layout_coordinates(&graph);
            assert_eq!(first.len(), second.len());
            for (id, position) in &first {
                assert_eq!(second.get(id), Some(position), "bead {id} moved");
            }
        }
    }

    #[test]
    fn every_bead_gets_a_unique_rounded_cell() {
        for graph in [fan_braid(), colliding_braid()] {
            let coordinates = layout_coordinates(&graph);
            assert_eq!(coordinates.len(), graph.node_count());
            rounded_cells(&coordinates);
        }
    }

    #[test]
    fn x_is_cohort_index_times_spacing() {
        let graph = fan_braid();
        let coordinates = layout_coordinates(&graph);
        // No hub in this braid has two same-cohort connections, so no bead
        // is pulled off its column by the arc refinement.
        for id in &graph.node_order {
            let cohort = graph.cohort_of(id).unwrap();
            assert_eq!(coordinates[id].x, cohort as f32 * SPACING_X, "bead {id}");
        }
    }

    #[test]
    fn critical_beads_stack_in_path_order() {
        let graph = braid(
            r#"{
                "parents": {"a": [], "b": ["a"], "c": ["b"], "d": ["c"]},
                "cohorts": [["a"], ["b", "c"], ["d"]],
                "work": {"a": 4, "b": 3, "c": 2, "d": 1},
                "highest_work_path": ["a", "b", "c", "d"]
            }"#,
        );
        let coordinates = layout_coordinates(&graph);

        assert_eq!(coordinates["a"], vec2(0.0, 0.0));
        assert_eq!(coordinates["b"], vec2(SPACING_X, 0.0));
        assert_eq!(coordinates["c"], vec2(SPACING_X, ROW_HEIGHT));
        assert_eq!(coordinates["d"], vec2(2.0 * SPACING_X, 0.0));
    }

    #[test]
    fn non_critical_beads_alternate_above_and_below_by_work() {
        let graph = fan_braid();
        let coordinates = layout_coordinates(&graph);

        // Cohort 1 holds critical bead 1 (y = 0) plus non-critical 2 and 3,
        // sorted by descending work: 2 goes above, 3 below the band.
        assert_eq!(coordinates["1"], vec2(SPACING_X, 0.0));
        assert_eq!(coordinates["2"], vec2(SPACING_X, -ROW_HEIGHT));
        assert_eq!(coordinates["3"], vec2(SPACING_X, ROW_HEIGHT));
    }

    #[test]
    fn hub_connections_land_on_the_arc() {
        let graph = colliding_braid();
        let coordinates = layout_coordinates(&graph);
        let center = coordinates["h"];
        assert_eq!(center, vec2(SPACING_X, 0.0));

        // r (sorted first by pre-arc y) takes 120 degrees; q takes 240.
        let r = coordinates["r"];
        assert!((r.x - 100.0).abs() < 0.5, "r.x = {}", r.x);
        assert!((r.y - 173.2).abs() < 0.5, "r.y = {}", r.y);
        assert!(((r - center).length() - ARC_RADIUS).abs() < 0.5);

        let q = coordinates["q"];
        assert!(((q - center).length() - ARC_RADIUS).abs() < 0.5);
        assert!(q.y < 0.0);
    }

    #[test]
    fn colliding_arc_bead_is_nudged_downward() {
        let graph = colliding_braid();
        let coordinates = layout_coordinates(&graph);

        // p's arc slot is 180 degrees: exactly genesis's cell (0, 0). The
        // collision pass moves it down one step.
        assert_eq!(coordinates["a"], vec2(0.0, 0.0));
        assert_eq!(coordinates["p"], vec2(0.0, COLLISION_STEP));
        rounded_cells(&coordinates);
    }

    #[test]
    fn uncohorted_beads_stack_below_column_zero() {
        let graph = braid(
            r#"{
                "parents": {"0": [], "1": ["0"], "s1": [], "s2": []},
                "cohorts": [["0"], ["1"]],
                "highest_work_path": ["0", "1"]
            }"#,
        );
        let coordinates = layout_coordinates(&graph);

        assert_eq!(coordinates.len(), 4);
        assert_eq!(coordinates["s1"], vec2(0.0, ROW_HEIGHT));
        assert_eq!(coordinates["s2"], vec2(0.0, 2.0 * ROW_HEIGHT));
    }
}

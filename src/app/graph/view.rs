use std::collections::HashSet;
use std::time::Duration;

use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::{format_work, stable_unit};

use super::super::ViewModel;
use super::super::reveal::RevealPhase;
use super::super::render_utils::{
    CRITICAL_COLOR, FROM_CRITICAL_EDGE_COLOR, GENESIS_COLOR, TIP_COLOR, circle_visible,
    cohort_edge_color, draw_background, work_color, world_to_screen,
};

impl ViewModel {
    fn search_matches(&self) -> Option<HashSet<String>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.snapshot
                .graph
                .node_order
                .iter()
                .filter(|id| matcher.fuzzy_match(id, query).is_some())
                .cloned()
                .collect(),
        )
    }

    fn node_color(&self, id: &str, min_work: f64, max_work: f64) -> Color32 {
        let graph = &self.snapshot.graph;
        if graph.is_critical(id) {
            if graph.genesis() == Some(id) {
                GENESIS_COLOR
            } else if graph.tip() == Some(id) {
                TIP_COLOR
            } else {
                CRITICAL_COLOR
            }
        } else {
            work_color(graph.work_of(id), min_work, max_work)
        }
    }

    /// True when `parent -> child` is one hop of the highest-work path.
    fn is_critical_link(&self, parent: &str, child: &str) -> bool {
        let path = &self.snapshot.graph.highest_work_path;
        path.windows(2)
            .any(|pair| pair[0] == parent && pair[1] == child)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let now = ui.ctx().input(|input| input.time);
        if self.reveal.tick(now) {
            ui.ctx().request_repaint();
        }
        if let Some(due) = self.reveal.next_due() {
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64((due - now).max(0.0)));
        } else if self.reveal.has_animating_edges() {
            ui.ctx().request_repaint_after(Duration::from_millis(50));
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let matches = self.search_matches();
        let pan = self.pan;
        let zoom = self.zoom;

        // Idle means no replay filter: the whole braid is shown. Once a run
        // starts (or is stopped/completed), only revealed beads and edges
        // draw.
        let replay_active = self.reveal.phase() != RevealPhase::Idle;

        let graph = &self.snapshot.graph;
        let coordinates = &self.snapshot.coordinates;
        let ids = &graph.node_order;

        let mut min_work = f64::INFINITY;
        let mut max_work = f64::NEG_INFINITY;
        for id in ids {
            let work = graph.work_of(id);
            min_work = min_work.min(work);
            max_work = max_work.max(work);
        }
        if !min_work.is_finite() {
            min_work = 0.0;
            max_work = 0.0;
        }

        let screen_positions = ids
            .iter()
            .map(|id| {
                let world = coordinates.get(id).copied().unwrap_or_default();
                world_to_screen(rect, pan, zoom, world)
            })
            .collect::<Vec<_>>();
        let node_radius = (12.0 * zoom.powf(0.4)).clamp(3.5, 30.0);

        for (parent, child) in &graph.edges {
            if replay_active && !self.reveal.is_edge_revealed(parent, child) {
                continue;
            }
            let (Some(start_world), Some(end_world)) =
                (coordinates.get(parent), coordinates.get(child))
            else {
                continue;
            };
            let start = world_to_screen(rect, pan, zoom, *start_world);
            let end = world_to_screen(rect, pan, zoom, *end_world);

            let animating = replay_active && self.reveal.is_edge_animating(parent, child, now);
            let (mut width, mut color) = if self.is_critical_link(parent, child) {
                (2.0, CRITICAL_COLOR)
            } else if graph.is_critical(parent) {
                (1.0, FROM_CRITICAL_EDGE_COLOR)
            } else {
                (1.0, cohort_edge_color(graph.cohort_of(parent)))
            };
            if animating {
                width += 0.8;
                color = Color32::from_rgb(226, 232, 240);
            }
            let stroke = Stroke::new(width, color);

            if (start_world.x - end_world.x).abs() <= f32::EPSILON {
                // Same cohort column: a straight line would vanish into the
                // stack, so bow to the right. The offset is a stable hash of
                // the edge key, giving each edge its own fixed curve.
                let offset = stable_unit(&format!("{parent}->{child}")) * 100.0 + 100.0;
                let control_x = start_world.x + offset;
                let control_one =
                    world_to_screen(rect, pan, zoom, egui::vec2(control_x, start_world.y));
                let control_two =
                    world_to_screen(rect, pan, zoom, egui::vec2(control_x, end_world.y));
                painter.add(CubicBezierShape::from_points_stroke(
                    [start, control_one, control_two, end],
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ));
            } else if animating {
                painter.add(Shape::dashed_line(&[start, end], stroke, 6.0, 5.0));
            } else {
                painter.line_segment([start, end], stroke);
            }
        }

        let hovered = Self::hovered_index(ui, &screen_positions, node_radius);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered.and_then(|index| ids.get(index).cloned()))
        } else {
            None
        };

        for (index, id) in ids.iter().enumerate() {
            if replay_active && !self.reveal.is_node_visible(id) {
                continue;
            }
            let position = screen_positions[index];
            if !circle_visible(rect, position, node_radius + 4.0) {
                continue;
            }

            let mut color = self.node_color(id, min_work, max_work);
            if let Some(matches) = &matches
                && !matches.contains(id)
            {
                color = color.linear_multiply(0.25);
            }

            let is_selected = self.selected_node.as_deref() == Some(id.as_str());
            let is_hovered = hovered == Some(index);

            painter.circle_filled(position, node_radius, color);
            painter.circle_stroke(
                position,
                node_radius,
                Stroke::new(
                    if is_selected { 2.4 } else { 1.0 },
                    if is_selected {
                        Color32::from_rgb(245, 206, 93)
                    } else {
                        Color32::from_rgba_unmultiplied(15, 15, 15, 190)
                    },
                ),
            );
            if graph.is_hub(id) {
                painter.circle_stroke(
                    position,
                    node_radius + 3.5,
                    Stroke::new(1.2, Color32::from_rgba_unmultiplied(226, 232, 240, 150)),
                );
            }

            if is_selected || is_hovered || self.zoom > 0.8 {
                painter.text(
                    position + egui::vec2(node_radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    id,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(index) = hovered {
            let id = &ids[index];
            let cohort = graph
                .cohort_of(id)
                .map(|cohort| cohort.to_string())
                .unwrap_or_else(|| "?".to_owned());
            let panel_text = format!(
                "{id}  |  cohort {cohort}  |  work {}  |  {} connections",
                format_work(graph.work_of(id)),
                graph.connections_of(id).len()
            );
            painter.text(
                rect.left_top() + egui::vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some(selected) = pending_selection {
            self.selected_node = selected;
        }
    }
}

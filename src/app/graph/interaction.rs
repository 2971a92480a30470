use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Index into `ids` of the closest bead under the pointer, if any.
    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        screen_positions: &[Pos2],
        radius: f32,
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        (0..screen_positions.len())
            .filter_map(|index| {
                let distance = screen_positions[index].distance(pointer);
                if distance <= radius {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _distance)| index)
    }
}

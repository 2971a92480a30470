use eframe::egui::{self, Align, Color32, Context, Layout, Vec2};

use super::super::reveal::RevealController;
use super::super::{LoadedBraid, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(loaded: LoadedBraid) -> Self {
        let reveal = RevealController::new(&loaded.snapshot.graph);

        Self {
            catalog: loaded.catalog,
            selected: loaded.selected,
            snapshot: loaded.snapshot,
            reveal,
            search: String::new(),
            selected_node: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            load_error: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        braid_request: &mut Option<String>,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("braidview");
                    ui.separator();
                    ui.label(format!("braid: {}", self.selected));
                    if !self.snapshot.graph.description.is_empty() {
                        ui.label(self.snapshot.graph.description.as_str());
                    }
                    ui.label(format!("beads: {}", self.snapshot.graph.node_count()));
                    ui.label(format!("edges: {}", self.snapshot.graph.edge_count()));
                    ui.label(format!("cohorts: {}", self.snapshot.graph.cohorts.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload braid"));
                    if reload_button.clicked() {
                        *braid_request = Some(self.selected.clone());
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(error) = &self.load_error {
                            ui.colored_label(
                                Color32::from_rgb(239, 68, 68),
                                format!("reload failed: {error}"),
                            );
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui, braid_request, is_loading));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading braid...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}

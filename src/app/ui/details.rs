use eframe::egui::{self, Color32, RichText, Ui};

use crate::util::format_work;

use super::super::ViewModel;

const INVALID_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
const OK_COLOR: Color32 = Color32::from_rgb(34, 197, 94);

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Braid Details");
        ui.add_space(6.0);

        let graph = &self.snapshot.graph;
        ui.label(format!("Work source: {}", graph.work_source.label()));
        ui.label(format!(
            "Highest-work path: {} beads",
            graph.highest_work_path.len()
        ));

        ui.separator();
        ui.label(RichText::new("Work along the path").strong());
        match &self.snapshot.work_analysis {
            None => {
                ui.label("No highest-work path in this braid.");
            }
            Some(analysis) if analysis.is_strictly_decreasing => {
                ui.colored_label(OK_COLOR, "strictly decreasing");
            }
            Some(analysis) => {
                ui.colored_label(
                    INVALID_COLOR,
                    format!("{} anomalies", analysis.anomalies.len()),
                );
                for anomaly in &analysis.anomalies {
                    let from = &graph.highest_work_path[anomaly.index - 1];
                    let to = &graph.highest_work_path[anomaly.index];
                    ui.label(format!(
                        "  {} at #{}: {} ({}) -> {} ({})",
                        anomaly.kind.label(),
                        anomaly.index,
                        from,
                        format_work(graph.work_of(from)),
                        to,
                        format_work(graph.work_of(to)),
                    ));
                }
            }
        }

        ui.separator();
        ui.label(RichText::new("Cohort transitions").strong());
        match &self.snapshot.cohort_analysis {
            None => {
                ui.label("Path too short for transitions.");
            }
            Some(analysis) => {
                let invalid_count = analysis
                    .transitions
                    .iter()
                    .filter(|transition| !transition.is_valid)
                    .count();
                if invalid_count == 0 {
                    ui.colored_label(OK_COLOR, "all transitions valid");
                } else {
                    ui.colored_label(INVALID_COLOR, format!("{invalid_count} invalid"));
                }

                egui::ScrollArea::vertical()
                    .id_salt("cohort_transitions_scroll")
                    .max_height(180.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for transition in &analysis.transitions {
                            let text = format!(
                                "{} ({}) -> {} ({})  {}",
                                transition.from_node,
                                transition.from_cohort,
                                transition.to_node,
                                transition.to_cohort,
                                transition.kind.label(),
                            );
                            if transition.is_valid {
                                ui.label(text);
                            } else {
                                ui.colored_label(INVALID_COLOR, text);
                            }
                        }
                    });
            }
        }

        ui.separator();
        ui.label(RichText::new("Selected bead").strong());
        let Some(selected_id) = self.selected_node.clone() else {
            ui.label("Click a bead in the graph to inspect it.");
            return;
        };

        let graph = &self.snapshot.graph;
        let cohort = graph
            .cohort_of(&selected_id)
            .map(|index| index.to_string())
            .unwrap_or_else(|| "none".to_owned());

        ui.label(RichText::new(selected_id.as_str()).strong());
        ui.label(format!("Cohort: {cohort}"));
        ui.label(format!("Work: {}", format_work(graph.work_of(&selected_id))));
        if graph.is_critical(&selected_id) {
            ui.label("On the highest-work path");
        }
        if graph.is_hub(&selected_id) {
            ui.label(format!(
                "Hub ({} connections)",
                graph.connections_of(&selected_id).len()
            ));
        }

        let connections = graph.connection_map(&selected_id);
        let mut next_selection = None;

        egui::ScrollArea::vertical()
            .id_salt("connection_map_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (title, ids) in [
                    ("Parents", &connections.parents),
                    ("Children", &connections.children),
                    ("Siblings", &connections.siblings),
                    ("Grandparents", &connections.grandparents),
                    ("Grandchildren", &connections.grandchildren),
                ] {
                    if ids.is_empty() {
                        continue;
                    }
                    ui.add_space(4.0);
                    ui.label(format!("{title} ({})", ids.len()));
                    for id in ids {
                        if ui.link(id.as_str()).clicked() {
                            next_selection = Some(id.clone());
                        }
                    }
                }
            });

        if let Some(id) = next_selection {
            self.selected_node = Some(id);
        }
    }
}

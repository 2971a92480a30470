use eframe::egui::{self, ProgressBar, Ui, Vec2};

use crate::util::format_work;

use super::super::ViewModel;
use super::super::reveal::{MAX_INTERVAL_SECS, MIN_INTERVAL_SECS, RevealPhase};

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        braid_request: &mut Option<String>,
        is_loading: bool,
    ) {
        let now = ui.input(|input| input.time);

        ui.heading("Braid");
        ui.separator();
        ui.add_space(4.0);

        ui.add_enabled_ui(!is_loading, |ui| {
            egui::ComboBox::from_label("Dataset")
                .selected_text(self.selected.as_str())
                .show_ui(ui, |ui| {
                    for entry in &self.catalog {
                        let is_current = entry.filename == self.selected;
                        if ui
                            .selectable_label(is_current, entry.name.as_str())
                            .on_hover_text(entry.filename.as_str())
                            .clicked()
                            && !is_current
                        {
                            *braid_request = Some(entry.filename.clone());
                        }
                    }
                });
        });

        ui.add_space(6.0);
        ui.label("Search (bead id)")
            .on_hover_text("Fuzzy-highlight matching beads without changing the layout.");
        ui.text_edit_singleline(&mut self.search);

        ui.add_space(6.0);
        if ui.button("Reset view").clicked() {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
        }

        ui.separator();
        ui.heading("Incremental Reveal");
        ui.add_space(4.0);

        let phase = self.reveal.phase();
        ui.label(format!("Phase: {}", phase.label()));

        ui.horizontal(|ui| {
            let start_button =
                ui.add_enabled(phase != RevealPhase::Running, egui::Button::new("Start"));
            if start_button
                .on_hover_text("Replay the braid one bead at a time in reveal order.")
                .clicked()
            {
                self.reveal.start(now);
            }

            let stop_button =
                ui.add_enabled(phase == RevealPhase::Running, egui::Button::new("Stop"));
            if stop_button.clicked() {
                self.reveal.stop();
            }

            let reset_button =
                ui.add_enabled(phase != RevealPhase::Idle, egui::Button::new("Reset"));
            if reset_button
                .on_hover_text("Clear all revealed beads and return to the full braid.")
                .clicked()
            {
                self.reveal.reset();
            }
        });

        ui.add_space(4.0);
        let mut interval = self.reveal.interval_secs();
        let interval_slider = ui
            .add(
                egui::Slider::new(&mut interval, MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS)
                    .step_by(0.1)
                    .text("Interval (s)")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Seconds between reveals. Takes effect immediately while running.");
        if interval_slider.changed() {
            self.reveal.set_interval(interval, now);
        }

        ui.add_space(4.0);
        let total = self.reveal.node_count().max(1);
        let fraction = self.reveal.cursor() as f32 / total as f32;
        ui.add(ProgressBar::new(fraction).show_percentage());
        ui.label(format!(
            "Beads: {} / {}   Edges: {} revealed, {} pending",
            self.reveal.cursor(),
            self.reveal.node_count(),
            self.reveal.revealed_count(),
            self.reveal.pending_count(),
        ));

        if let Some(event) = self.reveal.last_revealed() {
            ui.add_space(4.0);
            ui.separator();
            ui.label("Last revealed");
            let cohort = event
                .cohort
                .map(|index| index.to_string())
                .unwrap_or_else(|| "none".to_owned());
            ui.monospace(format!(
                "{}\ncohort {cohort}, work {}, {} parent(s)",
                event.node,
                format_work(event.work),
                event.parents.len(),
            ));
        }
    }
}

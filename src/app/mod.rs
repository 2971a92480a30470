use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::braid::{BraidEntry, list_braids, load_braid};

mod graph;
mod render_utils;
mod reveal;
mod snapshot;
mod ui;

use self::reveal::RevealController;
use self::snapshot::BraidSnapshot;

pub struct BraidViewApp {
    braids_dir: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<LoadedBraid, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedBraid, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct LoadedBraid {
    catalog: Vec<BraidEntry>,
    selected: String,
    snapshot: BraidSnapshot,
}

struct ViewModel {
    catalog: Vec<BraidEntry>,
    selected: String,
    snapshot: BraidSnapshot,
    reveal: RevealController,
    search: String,
    selected_node: Option<String>,
    pan: Vec2,
    zoom: f32,
    /// Error from the most recent reload attempt. The previous valid braid
    /// stays on screen; only the initial load drops to the error state.
    load_error: Option<String>,
}

impl BraidViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, braids_dir: String) -> Self {
        let braids_dir = PathBuf::from(braids_dir);
        let state = AppState::Loading {
            rx: Self::spawn_load(braids_dir.clone(), None),
        };
        Self {
            braids_dir,
            state,
            reload_rx: None,
        }
    }

    /// Lists the catalog and loads one braid off the UI thread. With no
    /// explicit selection the first catalog entry is chosen.
    fn spawn_load(
        braids_dir: PathBuf,
        selected: Option<String>,
    ) -> Receiver<Result<LoadedBraid, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = (|| {
                let catalog = list_braids(&braids_dir)?;
                let entry = selected
                    .as_deref()
                    .and_then(|filename| {
                        catalog.iter().find(|entry| entry.filename == filename)
                    })
                    .or_else(|| catalog.first())
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("braid catalog is empty"))?;

                let graph = load_braid(&entry.path)?;
                Ok::<_, anyhow::Error>(LoadedBraid {
                    catalog,
                    selected: entry.filename,
                    snapshot: BraidSnapshot::build(graph),
                })
            })()
            .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for BraidViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(loaded))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading braid catalog...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load braids");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading {
                            rx: Self::spawn_load(self.braids_dir.clone(), None),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let mut braid_request = None;
                let is_loading = self.reload_rx.is_some();
                model.show(ctx, &mut braid_request, is_loading);

                if let Some(filename) = braid_request
                    && self.reload_rx.is_none()
                {
                    self.reload_rx =
                        Some(Self::spawn_load(self.braids_dir.clone(), Some(filename)));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(loaded)) => {
                            **model = ViewModel::new(loaded);
                        }
                        Ok(Err(error)) => {
                            model.load_error = Some(error);
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.load_error =
                                Some("Background load worker disconnected".to_owned());
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

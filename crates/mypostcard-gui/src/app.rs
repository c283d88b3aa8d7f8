use std::sync::mpsc;
use std::sync::Arc;

use mypostcard_core::export::{RasterizeOptions, Rasterizer};
use mypostcard_core::raster::SoftwareRasterizer;
use mypostcard_core::state::PostcardState;
use mypostcard_core::template;
use tracing::warn;

use crate::convert::bitmap_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::UIState;
use crate::worker;

pub struct PostcardApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub store: PostcardState,
    pub ui_state: UIState,
    /// Shared with the worker; `None` when no usable fonts were found, which
    /// disables export and falls back to a fontless preview.
    pub rasterizer: Option<Arc<SoftwareRasterizer>>,
    pub preview: Option<egui::TextureHandle>,
    pub preview_dirty: bool,
    pub show_about: bool,
}

impl PostcardApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let rasterizer = match SoftwareRasterizer::from_system_fonts() {
            Ok(r) => Some(Arc::new(r)),
            Err(e) => {
                warn!("font discovery failed, export disabled: {e}");
                None
            }
        };

        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone(), rasterizer.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            store: PostcardState::default(),
            ui_state: UIState::default(),
            rasterizer,
            preview: None,
            preview_dirty: true,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { source, path } => {
                    self.ui_state.add_log(format!(
                        "Uploaded: {} ({}x{})",
                        path.display(),
                        source.width(),
                        source.height()
                    ));
                    self.store.install_image(source);
                    self.ui_state.photo_path = Some(path);
                    self.preview_dirty = true;
                }
                WorkerResult::ExportFinished { path, elapsed } => {
                    self.ui_state.exporting = false;
                    self.ui_state.add_log(format!(
                        "Exported {} in {}",
                        path.display(),
                        format_duration(elapsed)
                    ));
                }
                WorkerResult::ExportCancelled => {
                    self.ui_state.exporting = false;
                    self.ui_state.add_log("Export cancelled".into());
                }
                WorkerResult::Error { message } => {
                    self.ui_state.exporting = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.error_message = Some(message);
                }
            }
        }
    }

    /// Re-rasterize the preview at canvas resolution when state changed.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.preview_dirty {
            return;
        }
        self.preview_dirty = false;

        let Some(rasterizer) = &self.rasterizer else {
            return;
        };
        let scene = template::compose(&self.store);
        match rasterizer.capture(&scene, &RasterizeOptions::preview()) {
            Ok(bitmap) => {
                let image = bitmap_to_color_image(&bitmap);
                self.preview =
                    Some(ctx.load_texture("preview", image, egui::TextureOptions::LINEAR));
            }
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: preview failed: {e}"));
            }
        }
    }

}

impl eframe::App for PostcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.refresh_preview(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About My Postcard Maker")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("My Postcard Maker");
                        ui.label("Design and export postcards");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }

        // Error modal
        if let Some(message) = self.ui_state.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("Close").clicked() {
                            self.ui_state.error_message = None;
                        }
                    });
                });
        }

        // A dirtied preview should repaint promptly even without input.
        if self.preview_dirty {
            ctx.request_repaint();
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}

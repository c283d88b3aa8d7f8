mod canvas;
mod file;
mod photo;
mod save;
mod template;

use mypostcard_core::export::timestamped_filename;
use mypostcard_core::state::Side;
use mypostcard_core::template::compose;

use crate::app::PostcardApp;
use crate::messages::{WorkerCommand, WorkerResult};

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut PostcardApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                canvas::canvas_section(ui, app);
                ui.separator();
                match app.store.side() {
                    Side::Front => {
                        file::file_section(ui, app);
                        ui.separator();
                        photo::photo_section(ui, app);
                    }
                    Side::Back => {
                        template::template_section(ui, app);
                    }
                }
                ui.separator();
                save::save_section(ui, app);
            });
        });
}

/// Pick a photo file on a background thread and hand it to the worker.
pub(crate) fn upload_photo(app: &PostcardApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

/// Snapshot the composed scene, then ask for a destination and export.
///
/// The scene is captured before the dialog opens, so whatever the preview
/// showed at click time is what gets written, no matter how long the user
/// browses.
pub(crate) fn start_export(app: &mut PostcardApp) {
    app.ui_state.exporting = true;
    let scene = compose(&app.store);
    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        match rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(timestamped_filename())
            .save_file()
        {
            Some(path) => {
                let _ = cmd_tx.send(WorkerCommand::Export { scene, path });
            }
            None => {
                let _ = result_tx.send(WorkerResult::ExportCancelled);
            }
        }
    });
}

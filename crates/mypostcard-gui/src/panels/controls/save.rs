use crate::app::PostcardApp;

pub(super) fn save_section(ui: &mut egui::Ui, app: &mut PostcardApp) {
    super::super::section_header(ui, "Export", None);
    ui.add_space(4.0);

    let can_export = !app.ui_state.exporting && app.rasterizer.is_some();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_export, egui::Button::new("Export PNG..."))
            .clicked()
        {
            super::start_export(app);
        }
        if app.ui_state.exporting {
            ui.spinner();
        }
    });

    if app.rasterizer.is_none() {
        ui.small("Export unavailable: no usable fonts were found.");
    } else {
        ui.small("Writes a 4x PNG of the current side.");
    }
}

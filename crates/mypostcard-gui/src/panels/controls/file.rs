use crate::app::PostcardApp;

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut PostcardApp) {
    super::super::section_header(ui, "Photo", None);
    ui.add_space(4.0);

    if ui.button("Upload Photo...").clicked() {
        super::upload_photo(app);
    }

    if let Some(ref path) = app.ui_state.photo_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }
    if let Some(source) = app.store.source_image() {
        ui.small(format!("{}x{}", source.width(), source.height()));
        ui.small("A new upload recenters the crop; the filter stays.");
    }
}

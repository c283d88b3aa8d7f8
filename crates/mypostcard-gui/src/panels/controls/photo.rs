use mypostcard_core::consts::{MAX_ZOOM, MIN_ZOOM};
use mypostcard_core::filter::{FilterKind, FILTER_KINDS};

use crate::app::PostcardApp;

pub(super) fn photo_section(ui: &mut egui::Ui, app: &mut PostcardApp) {
    super::super::section_header(ui, "Crop & Filter", None);
    ui.add_space(4.0);

    let has_photo = app.store.source_image().is_some();
    ui.add_enabled_ui(has_photo, |ui| {
        let mut zoom = app.store.zoom();
        let response = ui.add(
            egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM)
                .step_by(0.1)
                .text("Zoom"),
        );
        if response.changed() {
            app.store.set_zoom(zoom);
            app.preview_dirty = true;
        }
    });
    if !has_photo {
        ui.small("Upload a photo to crop and filter it.");
    }

    ui.add_space(4.0);
    let mut kind = app.store.filter_kind();
    egui::ComboBox::from_label("Filter")
        .selected_text(kind.label())
        .show_ui(ui, |ui| {
            for choice in FILTER_KINDS {
                if ui
                    .selectable_value(&mut kind, choice, choice.label())
                    .changed()
                {
                    app.store.set_filter_kind(kind);
                    app.preview_dirty = true;
                }
            }
        });

    if app.store.filter_kind() != FilterKind::None {
        let mut intensity = app.store.filter_intensity();
        let response = ui.add(egui::Slider::new(&mut intensity, 0..=100).text("Intensity"));
        if response.changed() {
            app.store.set_filter_intensity(intensity);
            app.preview_dirty = true;
        }
    }
}

use mypostcard_core::geometry::Orientation;
use mypostcard_core::state::Side;

use crate::app::PostcardApp;

pub(super) fn canvas_section(ui: &mut egui::Ui, app: &mut PostcardApp) {
    super::super::section_header(ui, "Canvas", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let mut orientation = app.store.orientation();
        let mut changed = false;
        changed |= ui
            .selectable_value(&mut orientation, Orientation::Landscape, "Landscape")
            .changed();
        changed |= ui
            .selectable_value(&mut orientation, Orientation::Portrait, "Portrait")
            .changed();
        if changed {
            app.store.set_orientation(orientation);
            app.preview_dirty = true;
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let mut side = app.store.side();
        let mut changed = false;
        changed |= ui
            .selectable_value(&mut side, Side::Front, "Front (Photo)")
            .changed();
        changed |= ui
            .selectable_value(&mut side, Side::Back, "Back (Text)")
            .changed();
        if changed {
            app.store.set_side(side);
            app.preview_dirty = true;
        }
    });
}

use mypostcard_core::scene::Color;
use mypostcard_core::state::{FontStyle, Template, ACCENT_PALETTE, TEMPLATES};

use crate::app::PostcardApp;

pub(super) fn template_section(ui: &mut egui::Ui, app: &mut PostcardApp) {
    super::super::section_header(ui, "Back Template", None);
    ui.add_space(4.0);

    let mut template = app.store.template();
    let mut changed = false;
    for choice in TEMPLATES {
        changed |= ui
            .selectable_value(&mut template, choice, choice.label())
            .changed();
    }
    if changed {
        app.store.set_template(template);
        app.preview_dirty = true;
    }

    // Blank keeps the back empty; no typography to edit.
    if app.store.template() == Template::Blank {
        return;
    }

    ui.separator();
    super::super::section_header(ui, "Typography", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let mut style = app.store.font_style();
        let mut changed = false;
        for choice in [FontStyle::Sans, FontStyle::Serif] {
            changed |= ui
                .selectable_value(&mut style, choice, choice.label())
                .changed();
        }
        if changed {
            app.store.set_font_style(style);
            app.preview_dirty = true;
        }
    });

    ui.add_space(4.0);
    ui.label("Accent");
    ui.horizontal(|ui| {
        for color in ACCENT_PALETTE {
            if color_swatch(ui, color, app.store.accent_color() == color) {
                app.store.set_accent_color(color);
                app.preview_dirty = true;
            }
        }
    });

    ui.add_space(4.0);
    ui.label("Title");
    if ui.text_edit_singleline(app.store.title_mut()).changed() {
        app.preview_dirty = true;
    }
    ui.label("Subtitle");
    if ui.text_edit_singleline(app.store.subtitle_mut()).changed() {
        app.preview_dirty = true;
    }
    ui.label("Message");
    if ui.text_edit_multiline(app.store.message_mut()).changed() {
        app.preview_dirty = true;
    }
}

fn color_swatch(ui: &mut egui::Ui, color: Color, selected: bool) -> bool {
    let size = egui::vec2(22.0, 22.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let fill = egui::Color32::from_rgb(color.r, color.g, color.b);
    ui.painter().rect_filled(rect, 4.0, fill);
    if selected {
        ui.painter().rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
            egui::epaint::StrokeKind::Outside,
        );
    }
    response.clicked()
}

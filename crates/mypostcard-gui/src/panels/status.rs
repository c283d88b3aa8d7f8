use mypostcard_core::geometry;

use crate::app::PostcardApp;

pub fn show(ctx: &egui::Context, app: &mut PostcardApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let canvas = app.store.canvas();
            ui.label(format!("{}x{}", canvas.width, canvas.height));
            ui.separator();
            let avail = ctx.available_rect();
            let scale = geometry::measure(avail.width(), avail.height(), &canvas);
            ui.label(format!("Preview: {:.0}%", scale * 100.0));
            if app.ui_state.exporting {
                ui.separator();
                ui.label("Exporting...");
                ui.spinner();
            }
        });

        ui.add_space(2.0);
    });
}

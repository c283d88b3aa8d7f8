use mypostcard_core::geometry;
use mypostcard_core::state::Side;

use crate::app::PostcardApp;

pub fn show(ctx: &egui::Context, app: &mut PostcardApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let canvas = app.store.canvas();
        let scale = geometry::measure(rect.width(), rect.height(), &canvas);
        if scale <= 0.0 {
            return;
        }

        let card_size = egui::vec2(canvas.width as f32 * scale, canvas.height as f32 * scale);
        let card_rect = egui::Rect::from_center_size(rect.center(), card_size);

        paint_shadow(ui, card_rect);
        match &app.preview {
            Some(texture) => draw_card(ui, texture.id(), card_rect),
            None => {
                ui.painter()
                    .rect_filled(card_rect, 0.0, egui::Color32::WHITE);
                ui.painter().text(
                    card_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Preview unavailable",
                    egui::FontId::proportional(14.0),
                    egui::Color32::from_gray(150),
                );
            }
        }

        let cropping = app.store.side() == Side::Front && app.store.source_image().is_some();
        if cropping {
            handle_crop_drag(ui, app, card_rect, scale);
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(225));
}

fn paint_shadow(ui: &egui::Ui, card_rect: egui::Rect) {
    ui.painter().rect_filled(
        card_rect.translate(egui::vec2(0.0, 6.0)).expand(4.0),
        6.0,
        egui::Color32::from_black_alpha(40),
    );
}

fn draw_card(ui: &egui::Ui, texture_id: egui::TextureId, card_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        card_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

/// Drag repositions the photo; scroll adjusts zoom. Both are expressed in
/// canvas units, so the interaction feels identical at any preview scale.
fn handle_crop_drag(ui: &mut egui::Ui, app: &mut PostcardApp, card_rect: egui::Rect, scale: f32) {
    let response = ui.allocate_rect(card_rect, egui::Sense::drag());

    if response.dragged() {
        let delta = response.drag_delta() / scale;
        let (x, y) = app.store.crop_offset();
        app.store.set_crop_offset((x + delta.x, y + delta.y));
        app.preview_dirty = true;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            app.store.set_zoom(app.store.zoom() + scroll * 0.002);
            app.preview_dirty = true;
        }

        draw_crop_hint(ui, card_rect);
        ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::Grab);
    }
}

fn draw_crop_hint(ui: &egui::Ui, card_rect: egui::Rect) {
    let pos = card_rect.right_top() + egui::vec2(-8.0, 8.0);
    let galley = ui.painter().layout_no_wrap(
        "Drag to crop".into(),
        egui::FontId::proportional(11.0),
        egui::Color32::WHITE,
    );
    let bg = egui::Rect::from_min_size(
        pos - egui::vec2(galley.size().x + 8.0, 0.0),
        galley.size() + egui::vec2(8.0, 4.0),
    );
    ui.painter()
        .rect_filled(bg, 3.0, egui::Color32::from_black_alpha(128));
    ui.painter()
        .galley(bg.min + egui::vec2(4.0, 2.0), galley, egui::Color32::WHITE);
}

//! Reusable UI components
//!
//! Painter helpers for the preview canvas and the labelled path rows.

use crate::theme;
use eframe::egui;

/// Fill `rect` with a checkerboard so transparent pixels are visible
pub fn paint_checkerboard(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, theme::CHECKER_LIGHT);
    let cell = theme::CHECKER_CELL;
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let min = rect.min + egui::vec2(col as f32 * cell, row as f32 * cell);
            let tile = egui::Rect::from_min_size(min, egui::vec2(cell, cell)).intersect(rect);
            painter.rect_filled(tile, 0.0, theme::CHECKER_DARK);
        }
    }
}

/// "No image loaded" text in the middle of an empty canvas
pub fn paint_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "No image loaded",
        egui::FontId::proportional(16.0),
        theme::TEXT_ON_CANVAS,
    );
}

/// Highlighted drop target shown while a file hovers over the window
pub fn paint_drop_zone(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::DROP_ZONE);
    let target = egui::Rect::from_center_size(
        rect.center(),
        egui::vec2(rect.width().min(300.0), rect.height().min(200.0)),
    );
    painter.rect_stroke(
        target,
        theme::RADIUS_DEFAULT,
        egui::Stroke::new(2.0, theme::DROP_ZONE_INK),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.center() - egui::vec2(0.0, 20.0),
        egui::Align2::CENTER_CENTER,
        format!("{}  Drop Image Here", egui_phosphor::regular::UPLOAD_SIMPLE),
        egui::FontId::proportional(20.0),
        theme::DROP_ZONE_INK,
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 20.0),
        egui::Align2::CENTER_CENTER,
        "Drag and drop an image file from your computer",
        egui::FontId::proportional(12.0),
        theme::DROP_ZONE_INK,
    );
}

/// Label, single-line path field and a browse button. Returns true if browse was clicked.
pub fn path_row(ui: &mut egui::Ui, label: &str, value: &mut String, enabled: bool) -> bool {
    ui.horizontal(|ui| {
        ui.add_sized([80.0, 24.0], egui::Label::new(label));
        let button_width = 110.0;
        let field_width = (ui.available_width() - button_width - theme::SPACING_MD).max(120.0);
        ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(value).desired_width(field_width),
        );
        ui.add_enabled(
            enabled,
            theme::button(format!("{}  Browse...", egui_phosphor::regular::FOLDER_OPEN)),
        )
        .clicked()
    })
    .inner
}

//! Centralized theme constants for Background Remover
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0f, 0x11, 0x17); // slate-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1b, 0x1e, 0x27);
pub const BG_INPUT: Color32 = Color32::from_rgb(0x15, 0x18, 0x20);
pub const BG_CANVAS: Color32 = Color32::from_rgb(0xd4, 0xd4, 0xd8); // light canvas, like the old grey

// =============================================================================
// COLORS - Accent (Violet)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xa7, 0x8b, 0xfa); // violet-400
pub const ACCENT_DARK: Color32 = Color32::from_rgb(0x2e, 0x10, 0x65); // violet-950
pub const DROP_ZONE: Color32 = Color32::from_rgb(0xe0, 0xf7, 0xfa);
pub const DROP_ZONE_INK: Color32 = Color32::from_rgb(0x02, 0x77, 0xbd);

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8); // slate-400
pub const TEXT_ON_CANVAS: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);

// =============================================================================
// COLORS - Borders & status
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x2a, 0x2f, 0x3b);
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80); // green-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// Checkerboard behind transparent previews
pub const CHECKER_LIGHT: Color32 = Color32::from_rgb(0xf4, 0xf4, 0xf5);
pub const CHECKER_DARK: Color32 = Color32::from_rgb(0xd4, 0xd4, 0xd8);
pub const CHECKER_CELL: f32 = 10.0;

// =============================================================================
// SIZES
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = Color32::from_rgb(0x4c, 0x1d, 0x95);
    visuals.window_stroke = egui::Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_corner_radius = egui::CornerRadius::same(RADIUS_LARGE as u8);
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = RADIUS_DEFAULT.into();
    }
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(0x2a, 0x2f, 0x3b);
    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(0x37, 0x3d, 0x4c);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================

/// Titled group box around the input/output rows
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

// =============================================================================
// HELPER - Buttons
// =============================================================================

pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into()).corner_radius(RADIUS_DEFAULT)
}

/// Primary action (Remove Background, OK)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_DARK))
        .fill(ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

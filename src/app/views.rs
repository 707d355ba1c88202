//! Main window layout: path sections, preview canvas, action bar

use super::App;
use crate::constants::APP_NAME;
use crate::theme;
use crate::types::{Outcome, Phase};
use crate::ui::components::{paint_checkerboard, paint_drop_zone, paint_placeholder, path_row};
use eframe::egui;
use tracing::warn;

impl App {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::symmetric(20, 10)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(logo) = &self.logo_texture {
                        ui.add(egui::Image::new((logo.id(), egui::vec2(28.0, 28.0))));
                    }
                    ui.label(egui::RichText::new(APP_NAME).size(18.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let gear = ui.add(theme::button(egui_phosphor::regular::GEAR));
                        if gear.on_hover_text("Settings").clicked() {
                            self.show_settings = true;
                        }
                    });
                });
            });
    }

    pub(crate) fn render_action_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("actions")
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::symmetric(20, 12)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let running = self.session.is_running();
                    if running {
                        ui.spinner();
                        let name = self
                            .session
                            .current_job()
                            .and_then(|job| job.input.file_name())
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        ui.label(
                            egui::RichText::new(format!("Removing background from {}...", name))
                                .color(theme::TEXT_MUTED),
                        );
                    } else if let Some(outcome) = self.session.last_outcome().cloned() {
                        self.render_last_outcome(ui, &outcome);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let enabled = self.session.phase() == Phase::Idle;
                        let button = theme::button_accent(format!(
                            "{}  Remove Background",
                            egui_phosphor::regular::MAGIC_WAND
                        ));
                        if ui.add_enabled(enabled, button).clicked() {
                            self.session.trigger();
                        }
                    });
                });
            });
    }

    fn render_last_outcome(&mut self, ui: &mut egui::Ui, outcome: &Outcome) {
        match outcome {
            Outcome::Success { output, elapsed } => {
                ui.label(
                    egui::RichText::new(format!(
                        "{}  Done in {:.1}s",
                        egui_phosphor::regular::CHECK_CIRCLE,
                        elapsed.as_secs_f32()
                    ))
                    .color(theme::STATUS_SUCCESS),
                );
                let open_btn = ui.add(theme::button(format!(
                    "{}  Open Folder",
                    egui_phosphor::regular::FOLDER_SIMPLE
                )));
                if open_btn.clicked() {
                    if let Some(dir) = output.parent() {
                        if let Err(e) = open::that(dir) {
                            warn!(error = %e, dir = %dir.display(), "Failed to open folder");
                        }
                    }
                }
            }
            Outcome::Failed { message } => {
                ui.label(
                    egui::RichText::new(format!("{}  Last run failed", egui_phosphor::regular::WARNING))
                        .color(theme::STATUS_ERROR),
                )
                .on_hover_text(message);
            }
        }
    }

    pub(crate) fn render_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::symmetric(20, 8)))
            .show(ctx, |ui| {
                let editable = !self.session.is_running();

                ui.label(egui::RichText::new("Input Image").strong());
                let browse_input = theme::section_frame()
                    .show(ui, |ui| {
                        path_row(ui, "Select Image:", &mut self.session.input_path, editable)
                    })
                    .inner;
                if browse_input {
                    self.browse_input();
                }

                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new("Output Image").strong());
                let browse_output = theme::section_frame()
                    .show(ui, |ui| {
                        path_row(ui, "Save To:", &mut self.session.output_path, editable)
                    })
                    .inner;
                if browse_output {
                    self.browse_output();
                }

                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new("Preview").strong());
                self.render_preview_canvas(ui);
            });
    }

    fn render_preview_canvas(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size().max(egui::vec2(1.0, 1.0));
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);

        if self.files_hovering {
            paint_drop_zone(&painter, rect);
            return;
        }

        painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_CANVAS);
        match &self.preview_texture {
            Some(texture) => {
                if let Some(preview) = self.session.preview() {
                    let name = preview
                        .source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let (w, h) = preview.original_size;
                    painter.text(
                        rect.left_bottom() + egui::vec2(theme::SPACING_MD, -theme::SPACING_MD),
                        egui::Align2::LEFT_BOTTOM,
                        format!("{} ({} × {})", name, w, h),
                        egui::FontId::proportional(12.0),
                        theme::TEXT_ON_CANVAS,
                    );
                }
                // Shrink further if the window is smaller than the preview
                let tex_size = texture.size_vec2();
                let scale = (rect.width() / tex_size.x)
                    .min(rect.height() / tex_size.y)
                    .min(1.0);
                let image_rect = egui::Rect::from_center_size(rect.center(), tex_size * scale);
                paint_checkerboard(&painter, image_rect);
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => paint_placeholder(&painter, rect),
        }
    }
}

//! Modal dialogs (notices, overwrite confirmation, settings)

use super::App;
use crate::theme;
use crate::types::{NoticeKind, RemovalEngine};
use eframe::egui;

impl App {
    /// Show the oldest pending notice; OK or Escape dismisses it
    pub(crate) fn render_notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.session.current_notice().cloned() else {
            return;
        };

        let (icon, color) = match notice.kind {
            NoticeKind::Info => (egui_phosphor::regular::CHECK_CIRCLE, theme::STATUS_SUCCESS),
            NoticeKind::Error => (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR),
        };

        let mut dismiss = false;
        let modal = egui::Modal::new(egui::Id::new("notice_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.set_max_width(420.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(icon).size(32.0).color(color));
                ui.add_space(theme::SPACING_SM);
                ui.label(egui::RichText::new(&notice.title).size(16.0).strong());
                ui.add_space(theme::SPACING_SM);
                for line in notice.message.lines() {
                    ui.add(egui::Label::new(egui::RichText::new(line).color(theme::TEXT_MUTED)).wrap());
                }
                ui.add_space(theme::SPACING_XL);
                if ui.add(theme::button_accent("OK")).clicked() {
                    dismiss = true;
                }
            });
        });

        if dismiss || response.should_close() {
            self.session.dismiss_notice();
        }
    }

    pub(crate) fn render_overwrite_modal(&mut self, ctx: &egui::Context) {
        let Some(job) = self.session.pending_overwrite().cloned() else {
            return;
        };
        // Notices stack on top; wait until they are gone
        if self.session.current_notice().is_some() {
            return;
        }

        let mut decision: Option<bool> = None;
        let modal = egui::Modal::new(egui::Id::new("overwrite_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.set_max_width(420.0);
            ui.label(egui::RichText::new("Replace existing file?").size(16.0).strong());
            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!("{} already exists.", job.output.display()))
                        .color(theme::TEXT_MUTED),
                )
                .wrap(),
            );
            ui.add_space(theme::SPACING_XL);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button_accent("Replace")).clicked() {
                    decision = Some(true);
                }
                ui.add_space(theme::SPACING_MD);
                if ui.add(theme::button("Cancel")).clicked() {
                    decision = Some(false);
                }
            });
        });

        match decision {
            Some(true) => self.session.confirm_pending_overwrite(),
            Some(false) => self.session.cancel_pending_overwrite(),
            None if response.should_close() => self.session.cancel_pending_overwrite(),
            None => {}
        }
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let before = self.settings.clone();
        let mut close = false;
        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.label(egui::RichText::new("Settings").size(16.0).strong());
            ui.add_space(theme::SPACING_MD);

            ui.checkbox(
                &mut self.settings.confirm_overwrite,
                "Ask before overwriting an existing output file",
            );
            ui.add_space(theme::SPACING_MD);

            ui.label(egui::RichText::new("Removal engine").color(theme::TEXT_MUTED));
            for engine in [RemovalEngine::Segmentation, RemovalEngine::EdgeFlood] {
                ui.radio_value(&mut self.settings.engine, engine, engine.label());
            }
            if self.settings.engine == RemovalEngine::Segmentation && self.segmenter.is_none() {
                ui.label(
                    egui::RichText::new("Segmentation engine failed to start, using flood fill")
                        .color(theme::STATUS_ERROR),
                );
            }
            ui.add_space(theme::SPACING_MD);

            let flood = self.settings.engine == RemovalEngine::EdgeFlood || self.segmenter.is_none();
            ui.add_enabled(
                flood,
                egui::Slider::new(&mut self.settings.tolerance, 0..=255).text("Tolerance"),
            );
            ui.add_enabled(
                flood,
                egui::Slider::new(&mut self.settings.edge_softness, 0..=255).text("Edge softness"),
            );

            ui.add_space(theme::SPACING_XL);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button_accent("Close")).clicked() {
                    close = true;
                }
            });
        });

        if self.settings != before {
            self.apply_settings();
        }
        if close || response.should_close() {
            self.show_settings = false;
            self.save_settings();
        }
    }
}

//! App module - egui shell around the session state

mod modals;
mod selection;
mod views;

use crate::dispatcher::{Dispatcher, Waker};
use crate::remover::{BackgroundRemover, EdgeFloodRemover, SegmentationRemover};
use crate::session::Session;
use crate::settings::Settings;
use crate::theme;
use crate::types::RemovalEngine;
use crate::utils::rasterize_icon;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: Session,
    pub(crate) settings: Settings,
    /// Built once; holds the runtime used for model downloads
    segmenter: Option<Arc<SegmentationRemover>>,
    pub(crate) data_dir: PathBuf,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Preview texture and the session revision it was built from
    pub(crate) preview_texture: Option<egui::TextureHandle>,
    pub(crate) texture_revision: u64,
    pub(crate) files_hovering: bool,
    pub(crate) show_settings: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let logo_texture = rasterize_icon(56).map(|(rgba, w, h)| {
            cc.egui_ctx.load_texture(
                "logo",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba),
                egui::TextureOptions::LINEAR,
            )
        });

        // Worker wakes the event loop after posting its result
        let ctx = cc.egui_ctx.clone();
        let waker: Waker = Arc::new(move || ctx.request_repaint());
        let segmenter = match SegmentationRemover::new() {
            Ok(remover) => Some(Arc::new(remover)),
            Err(e) => {
                warn!(error = %e, "Segmentation engine unavailable, using edge flood fill");
                None
            }
        };
        let remover = Self::build_remover(&settings, segmenter.as_ref());
        let dispatcher = Dispatcher::new(remover, Some(waker));
        let mut session = Session::new(dispatcher);
        session.confirm_overwrite = settings.confirm_overwrite;

        Self {
            session,
            settings,
            segmenter,
            data_dir,
            logo_texture,
            preview_texture: None,
            texture_revision: 0,
            files_hovering: false,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    fn build_remover(
        settings: &Settings,
        segmenter: Option<&Arc<SegmentationRemover>>,
    ) -> Arc<dyn BackgroundRemover> {
        let remover: Arc<dyn BackgroundRemover> = match (settings.engine, segmenter) {
            (RemovalEngine::Segmentation, Some(segmenter)) => segmenter.clone(),
            _ => Arc::new(EdgeFloodRemover::new(
                settings.tolerance,
                settings.edge_softness,
            )),
        };
        remover
    }

    /// Push edited settings into the session and remover
    pub fn apply_settings(&mut self) {
        self.session.confirm_overwrite = self.settings.confirm_overwrite;
        let remover = Self::build_remover(&self.settings, self.segmenter.as_ref());
        debug!(
            engine = remover.name(),
            tolerance = self.settings.tolerance,
            edge_softness = self.settings.edge_softness,
            "Remover reconfigured"
        );
        self.session.dispatcher_mut().set_remover(remover);
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    /// Re-upload the preview texture when the session's preview changed
    pub fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        if self.session.preview_revision() == self.texture_revision {
            return;
        }
        self.texture_revision = self.session.preview_revision();
        self.preview_texture = self.session.preview().map(|preview| {
            let size = [
                preview.image.width() as usize,
                preview.image.height() as usize,
            ];
            ctx.load_texture(
                "preview",
                egui::ColorImage::from_rgba_unmultiplied(size, preview.image.as_raw()),
                egui::TextureOptions::LINEAR,
            )
        });
    }
}

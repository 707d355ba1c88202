//! Native dialogs and drag-and-drop delivery

use super::App;
use crate::constants::{IMAGE_EXTENSIONS, OUTPUT_EXTENSION};
use crate::paths::with_default_extension;
use crate::types::Phase;
use eframe::egui;
use std::path::Path;
use tracing::debug;

impl App {
    pub fn browse_input(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Image files", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = self.settings.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }

        match dialog.pick_file() {
            Some(path) => {
                self.settings.remember_directory_of(&path);
                self.session.select_input(&path);
            }
            None => debug!("Input dialog cancelled"),
        }
    }

    pub fn browse_output(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save processed image")
            .add_filter("PNG files", &[OUTPUT_EXTENSION])
            .add_filter("All files", &["*"]);

        let current = Path::new(&self.session.output_path);
        if let Some(name) = current.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        match current.parent().filter(|p| p.is_dir()) {
            Some(dir) => dialog = dialog.set_directory(dir),
            None => {
                if let Some(dir) = self.settings.dialog_directory() {
                    dialog = dialog.set_directory(dir);
                }
            }
        }

        match dialog.save_file() {
            Some(path) => {
                let path = with_default_extension(path);
                self.settings.remember_directory_of(&path);
                self.session.select_output(&path);
            }
            None => debug!("Output dialog cancelled"),
        }
    }

    /// Track hovering files and hand the first dropped file to the session
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });
        self.files_hovering = hovering;

        let Some(file) = dropped else {
            return;
        };
        // Ignore drops while a job runs or an overwrite is pending, like the disabled controls
        if self.session.phase() != Phase::Idle {
            debug!("Drop ignored while busy");
            return;
        }

        let payload = match &file.path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => file.name.clone(),
        };
        debug!(payload = %payload, "File dropped");
        if let Some(path) = self.session.handle_drop(&payload) {
            self.settings.remember_directory_of(&path);
        }
    }
}

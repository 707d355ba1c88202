//! UI state and the handlers that mutate it
//!
//! Everything here runs on the UI thread. The egui layer reads fields and calls
//! handlers; it never touches the dispatcher or the file system directly.

use crate::constants::*;
use crate::dispatcher::{Dispatcher, Job, WorkerMessage};
use crate::error::{AppError, ErrorKind};
use crate::paths::{derive_output_path, has_image_extension, unwrap_drop_payload};
use crate::preview::{load_preview, Preview};
use crate::types::{Notice, Outcome, Phase};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Session {
    pub input_path: String,
    pub output_path: String,
    /// Ask before replacing an existing output file
    pub confirm_overwrite: bool,
    preview: Option<Preview>,
    /// Bumped whenever `preview` changes so the UI knows to re-upload
    preview_revision: u64,
    notices: VecDeque<Notice>,
    last_outcome: Option<Outcome>,
    pending_overwrite: Option<Job>,
    dispatcher: Dispatcher,
}

impl Session {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            confirm_overwrite: true,
            preview: None,
            preview_revision: 0,
            notices: VecDeque::new(),
            last_outcome: None,
            pending_overwrite: None,
            dispatcher,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn pending_overwrite(&self) -> Option<&Job> {
        self.pending_overwrite.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.dispatcher.is_running() {
            Phase::Running
        } else if self.pending_overwrite.is_some() {
            Phase::AwaitingOverwrite
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.dispatcher.is_running()
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.dispatcher.current_job()
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    // ------------------------------------------------------------------------
    // File selection
    // ------------------------------------------------------------------------

    /// Accept an input file: set the field, show it, derive the output path.
    ///
    /// A preview failure is reported but the paths are still taken.
    pub fn select_input(&mut self, path: &Path) {
        info!(path = %path.display(), "Input selected");
        self.input_path = path.to_string_lossy().into_owned();
        self.refresh_preview(path);
        self.output_path = derive_output_path(path).to_string_lossy().into_owned();
    }

    pub fn select_output(&mut self, path: &Path) {
        debug!(path = %path.display(), "Output selected");
        self.output_path = path.to_string_lossy().into_owned();
    }

    /// Handle a dropped path payload. Returns the accepted path.
    ///
    /// Ignored unless idle, so a parked overwrite keeps matching the fields.
    pub fn handle_drop(&mut self, raw: &str) -> Option<PathBuf> {
        if self.phase() != Phase::Idle {
            debug!(payload = raw, phase = ?self.phase(), "Drop ignored");
            return None;
        }
        let path = PathBuf::from(unwrap_drop_payload(raw));
        if !has_image_extension(&path) {
            let err = AppError::UnsupportedFile(path.to_string_lossy().into_owned());
            warn!(payload = raw, "Rejected dropped file");
            self.report(INVALID_FILE_TITLE, &err);
            return None;
        }
        self.select_input(&path);
        Some(path)
    }

    // ------------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------------

    /// Replace the preview with `path`. On failure the old preview stays.
    pub fn refresh_preview(&mut self, path: &Path) -> bool {
        match load_preview(path) {
            Ok(preview) => {
                self.preview = Some(preview);
                self.preview_revision += 1;
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Preview failed");
                self.notices.push_back(Notice::error(
                    ERROR_TITLE,
                    format!("Failed to load image: {}", e),
                ));
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Processing
    // ------------------------------------------------------------------------

    /// The "Remove Background" action
    pub fn trigger(&mut self) {
        if self.dispatcher.is_running() {
            debug!("Trigger ignored, removal already running");
            return;
        }

        let input = self.input_path.trim().to_owned();
        let output = self.output_path.trim().to_owned();
        if input.is_empty() || output.is_empty() {
            self.report(ERROR_TITLE, &AppError::MissingPaths);
            return;
        }

        let job = Job {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        };

        if self.confirm_overwrite && job.output.exists() {
            debug!(output = %job.output.display(), "Output exists, asking before overwrite");
            self.pending_overwrite = Some(job);
            return;
        }
        self.start(job);
    }

    pub fn confirm_pending_overwrite(&mut self) {
        if let Some(job) = self.pending_overwrite.take() {
            info!(output = %job.output.display(), "Overwrite confirmed");
            self.start(job);
        }
    }

    pub fn cancel_pending_overwrite(&mut self) {
        if self.pending_overwrite.take().is_some() {
            debug!("Overwrite cancelled");
        }
    }

    fn start(&mut self, job: Job) {
        match self.dispatcher.start(job) {
            Ok(()) => {}
            Err(AppError::Busy) => debug!("Trigger ignored, removal already running"),
            Err(e) => self.report(ERROR_TITLE, &e),
        }
    }

    /// Drain a finished job, if any. Call once per frame. Returns true on change.
    pub fn poll(&mut self) -> bool {
        let Some(message) = self.dispatcher.poll() else {
            return false;
        };

        match message {
            WorkerMessage::Finished { output, elapsed } => {
                info!(
                    output = %output.display(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Background removed"
                );
                self.refresh_preview(&output);
                self.notices.push_back(Notice::info(
                    SUCCESS_TITLE,
                    format!(
                        "Background removed successfully!\nSaved to: {}",
                        output.display()
                    ),
                ));
                self.last_outcome = Some(Outcome::Success { output, elapsed });
            }
            WorkerMessage::Failed { message } => {
                self.notices.push_back(Notice::error(
                    ERROR_TITLE,
                    format!("Failed to process image: {}", message),
                ));
                self.last_outcome = Some(Outcome::Failed { message });
            }
        }
        true
    }

    fn report(&mut self, title: &str, err: &AppError) {
        if err.kind() != ErrorKind::Validation {
            warn!(error = %err, kind = ?err.kind(), "Operation failed");
        }
        self.notices.push_back(Notice::error(title, err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::remover::{BackgroundRemover, EdgeFloodRemover};
    use crate::types::NoticeKind;
    use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    struct GatedRemover {
        calls: AtomicUsize,
        gate: Mutex<Receiver<()>>,
    }

    impl BackgroundRemover for GatedRemover {
        fn name(&self) -> &str {
            "gated"
        }

        fn remove_background(&self, image: DynamicImage) -> Result<RgbaImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.lock().unwrap().recv().ok();
            Ok(image.to_rgba8())
        }
    }

    fn session() -> Session {
        Session::new(Dispatcher::new(Arc::new(EdgeFloodRemover::default()), None))
    }

    fn write_photo(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_fn(w, h, |x, y| {
            if x > w / 3 && x < 2 * w / 3 && y > h / 3 && y < 2 * h / 3 {
                Rgb([30, 60, 200])
            } else {
                Rgb([250, 250, 250])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    fn wait_idle(session: &mut Session) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !session.poll() {
            assert!(Instant::now() < deadline, "worker did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn drop_accepts_wrapped_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "cat.JPEG", 40, 20);
        let mut s = session();

        let accepted = s.handle_drop(&format!("{{\"{}\"}}", photo.display()));
        assert_eq!(accepted.as_deref(), Some(photo.as_path()));
        assert_eq!(s.input_path, photo.to_string_lossy());
        assert_eq!(
            PathBuf::from(&s.output_path),
            dir.path().join("cat_no_bg.png")
        );
        assert!(s.preview().is_some());
        assert!(s.current_notice().is_none());
    }

    #[test]
    fn drop_rejects_text_files_without_touching_fields() {
        let mut s = session();
        s.input_path = "keep/in.png".into();
        s.output_path = "keep/out.png".into();

        for payload in ["notes.txt", "{notes.TXT}", "\"C:/docs/readme.Txt\""] {
            assert!(s.handle_drop(payload).is_none());
            assert_eq!(s.input_path, "keep/in.png");
            assert_eq!(s.output_path, "keep/out.png");
            let notice = s.current_notice().unwrap().clone();
            assert_eq!(notice.kind, NoticeKind::Error);
            assert_eq!(notice.title, INVALID_FILE_TITLE);
            s.dismiss_notice();
        }
        assert_eq!(s.preview_revision(), 0);
    }

    #[test]
    fn missing_paths_reports_and_stays_idle() {
        let mut s = session();
        s.input_path = "  ".into();
        s.trigger();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(
            s.current_notice().unwrap().message,
            "Please select both input and output files"
        );
    }

    #[test]
    fn end_to_end_success() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.jpg", 300, 200);
        let mut s = session();

        s.select_input(&photo);
        assert_eq!(
            PathBuf::from(&s.output_path),
            dir.path().join("photo_no_bg.png")
        );
        let input_revision = s.preview_revision();

        s.trigger();
        assert_eq!(s.phase(), Phase::Running);
        wait_idle(&mut s);

        let output = dir.path().join("photo_no_bg.png");
        assert!(output.exists());
        assert!(matches!(
            s.last_outcome(),
            Some(Outcome::Success { output: o, .. }) if *o == output
        ));
        let preview = s.preview().unwrap();
        assert_eq!(preview.source, output);
        assert_eq!(preview.image.dimensions(), (400, 266));
        assert!(s.preview_revision() > input_revision);

        let notice = s.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.message.contains("photo_no_bg.png"));
    }

    #[test]
    fn end_to_end_failure_keeps_preview() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.png", 30, 30);
        let fake = dir.path().join("fake.jpg");
        std::fs::write(&fake, "definitely not a jpeg").unwrap();
        let mut s = session();

        s.select_input(&photo);
        let revision = s.preview_revision();

        s.input_path = fake.to_string_lossy().into_owned();
        s.output_path = dir.path().join("fake_no_bg.png").to_string_lossy().into_owned();
        s.trigger();
        wait_idle(&mut s);

        assert!(matches!(s.last_outcome(), Some(Outcome::Failed { .. })));
        assert_eq!(s.preview_revision(), revision);
        assert_eq!(s.preview().unwrap().source, photo);
        let notice = s.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Failed to process image"));
    }

    #[test]
    fn double_trigger_starts_one_worker() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.png", 20, 20);
        let (release, gate) = mpsc::channel();
        let remover = Arc::new(GatedRemover {
            calls: AtomicUsize::new(0),
            gate: Mutex::new(gate),
        });
        let mut s = Session::new(Dispatcher::new(remover.clone(), None));
        s.select_input(&photo);

        s.trigger();
        s.trigger();
        assert_eq!(s.phase(), Phase::Running);
        assert!(s.current_notice().is_none());

        release.send(()).unwrap();
        wait_idle(&mut s);
        assert_eq!(remover.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn existing_output_waits_for_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.png", 20, 20);
        let mut s = session();
        s.select_input(&photo);
        std::fs::write(&s.output_path, b"old").unwrap();

        s.trigger();
        assert_eq!(s.phase(), Phase::AwaitingOverwrite);
        s.cancel_pending_overwrite();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(std::fs::read(&s.output_path).unwrap(), b"old");

        s.trigger();
        s.confirm_pending_overwrite();
        assert_eq!(s.phase(), Phase::Running);
        wait_idle(&mut s);
        assert!(matches!(s.last_outcome(), Some(Outcome::Success { .. })));
        assert!(image::open(&s.output_path).is_ok());
    }

    #[test]
    fn drop_during_overwrite_prompt_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.png", 20, 20);
        let other = write_photo(dir.path(), "other.png", 20, 20);
        let mut s = session();
        s.select_input(&photo);
        std::fs::write(&s.output_path, b"old").unwrap();

        s.trigger();
        assert_eq!(s.phase(), Phase::AwaitingOverwrite);
        assert!(s.handle_drop(&other.to_string_lossy()).is_none());
        assert_eq!(s.input_path, photo.to_string_lossy());
        assert_eq!(
            PathBuf::from(&s.output_path),
            dir.path().join("photo_no_bg.png")
        );

        s.confirm_pending_overwrite();
        wait_idle(&mut s);
        assert!(!dir.path().join("other_no_bg.png").exists());
        assert_eq!(s.preview().unwrap().source, dir.path().join("photo_no_bg.png"));
    }

    #[test]
    fn overwrite_without_confirmation_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.png", 20, 20);
        let mut s = session();
        s.confirm_overwrite = false;
        s.select_input(&photo);
        std::fs::write(&s.output_path, b"old").unwrap();

        s.trigger();
        assert_eq!(s.phase(), Phase::Running);
        wait_idle(&mut s);
    }

    #[test]
    fn unreadable_selection_keeps_previous_preview() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(dir.path(), "photo.bmp", 20, 20);
        let broken = dir.path().join("broken.gif");
        std::fs::write(&broken, "GIF? no").unwrap();
        let mut s = session();

        s.select_input(&photo);
        s.select_input(&broken);
        assert_eq!(s.preview().unwrap().source, photo);
        assert_eq!(s.input_path, broken.to_string_lossy());
        assert!(s
            .current_notice()
            .unwrap()
            .message
            .starts_with("Failed to load image"));
    }
}

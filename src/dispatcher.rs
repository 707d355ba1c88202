//! Runs background removal off the UI thread
//!
//! One worker thread per job, never pooled. The worker only ever talks back
//! through the job's channel; the UI loop drains it with [`Dispatcher::poll`].

use crate::error::{AppError, Result};
use crate::remover::BackgroundRemover;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Called from the worker after it posts a message, so the UI wakes up
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// What the worker reports back when it is done
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    Finished { output: PathBuf, elapsed: Duration },
    Failed { message: String },
}

enum DispatchState {
    Idle,
    Running {
        job: Job,
        rx: Receiver<WorkerMessage>,
    },
}

pub struct Dispatcher {
    remover: Arc<dyn BackgroundRemover>,
    waker: Option<Waker>,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(remover: Arc<dyn BackgroundRemover>, waker: Option<Waker>) -> Self {
        Self {
            remover,
            waker,
            state: DispatchState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DispatchState::Running { .. })
    }

    pub fn current_job(&self) -> Option<&Job> {
        match &self.state {
            DispatchState::Running { job, .. } => Some(job),
            DispatchState::Idle => None,
        }
    }

    pub fn set_remover(&mut self, remover: Arc<dyn BackgroundRemover>) {
        self.remover = remover;
    }

    /// Spawn a worker for `job`. Fails with [`AppError::Busy`] while one is running.
    pub fn start(&mut self, job: Job) -> Result<()> {
        if self.is_running() {
            return Err(AppError::Busy);
        }

        let (tx, rx) = mpsc::channel();
        let remover = Arc::clone(&self.remover);
        let waker = self.waker.clone();
        let worker_job = job.clone();

        info!(
            input = %job.input.display(),
            output = %job.output.display(),
            remover = remover.name(),
            "Starting background removal"
        );

        std::thread::Builder::new()
            .name("bg-removal".into())
            .spawn(move || {
                let started = Instant::now();
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_job(remover.as_ref(), &worker_job)
                }));

                let message = match outcome {
                    Ok(Ok(())) => WorkerMessage::Finished {
                        output: worker_job.output.clone(),
                        elapsed: started.elapsed(),
                    },
                    Ok(Err(e)) => {
                        warn!(error = %e, kind = ?e.kind(), "Background removal failed");
                        WorkerMessage::Failed {
                            message: e.to_string(),
                        }
                    }
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        error!(reason = %reason, "Background removal panicked");
                        WorkerMessage::Failed {
                            message: format!("Background removal crashed: {}", reason),
                        }
                    }
                };

                // Receiver is gone only if the app is shutting down
                tx.send(message).ok();
                if let Some(wake) = waker {
                    wake();
                }
            })?;

        self.state = DispatchState::Running { job, rx };
        Ok(())
    }

    /// Non-blocking check for a finished job. Returns to idle once a result arrives.
    pub fn poll(&mut self) -> Option<WorkerMessage> {
        let message = match &self.state {
            DispatchState::Idle => return None,
            DispatchState::Running { rx, .. } => match rx.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    error!("Worker exited without reporting");
                    WorkerMessage::Failed {
                        message: AppError::WorkerLost.to_string(),
                    }
                }
            },
        };
        self.state = DispatchState::Idle;
        debug!(?message, "Worker finished");
        Some(message)
    }
}

/// Load, remove, save. Output is always PNG whatever the extension says.
fn run_job(remover: &dyn BackgroundRemover, job: &Job) -> Result<()> {
    let image = image::open(&job.input)?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Input decoded"
    );
    let result = remover.remove_background(image)?;
    save_png(&result, &job.output)
}

fn save_png(image: &image::RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

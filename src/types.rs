//! Common types and data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Severity of a modal notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message waiting to be acknowledged by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Result of the most recent processing request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { output: PathBuf, elapsed: Duration },
    Failed { message: String },
}

/// Where the dispatcher is in its Idle → Running → Success/Failed → Idle cycle,
/// as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingOverwrite,
    Running,
}

/// Which background removal engine runs a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalEngine {
    /// ML segmentation model
    #[default]
    Segmentation,
    /// Border colour flood fill, for flat backdrops or offline use
    EdgeFlood,
}

impl RemovalEngine {
    pub fn label(self) -> &'static str {
        match self {
            RemovalEngine::Segmentation => "Segmentation model (ISNet)",
            RemovalEngine::EdgeFlood => "Flat backdrop (edge flood fill)",
        }
    }
}

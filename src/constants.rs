//! Application constants and configuration

pub const APP_NAME: &str = "Background Remover";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest side of the preview, in points
pub const PREVIEW_MAX_DIM: u32 = 400;

/// Appended to the input file stem when deriving the output path
pub const OUTPUT_SUFFIX: &str = "_no_bg";
pub const OUTPUT_EXTENSION: &str = "png";

/// Extensions accepted for dropped files (compared lowercase)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

pub const SUCCESS_TITLE: &str = "Success";
pub const ERROR_TITLE: &str = "Error";
pub const INVALID_FILE_TITLE: &str = "Invalid File";

//! Background removal engines
//!
//! The dispatcher only sees the [`BackgroundRemover`] trait, so the engine can
//! be swapped (or stubbed in tests) without touching the UI.

mod flood;
mod segment;

pub use flood::EdgeFloodRemover;
pub use segment::SegmentationRemover;

use crate::error::Result;
use image::{DynamicImage, RgbaImage};

/// Turns an image into the same image with its background made transparent.
///
/// Implementations are synchronous and may block for as long as they need;
/// they are always called off the UI thread.
pub trait BackgroundRemover: Send + Sync {
    fn name(&self) -> &str;

    fn remove_background(&self, image: DynamicImage) -> Result<RgbaImage>;
}

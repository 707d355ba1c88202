//! ML segmentation remover backed by imgly-bgremove
//!
//! Uses the ISNet general model on the pure Rust tract backend. The model is
//! downloaded into the imgly cache the first time a job runs.

use super::BackgroundRemover;
use crate::error::{AppError, Result};
use image::{DynamicImage, RgbaImage};
use imgly_bgremove::{
    BackendFactory, BackendType, BackgroundRemovalProcessor, BgRemovalError, ExecutionProvider,
    InferenceBackend, ModelCache, ModelDownloader, ModelManager, ModelSource, ModelSpec,
    ProcessorConfigBuilder, TractBackend,
};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Only hands out the tract backend; onnx is not compiled in
#[derive(Debug)]
struct TractBackendFactory;

impl BackendFactory for TractBackendFactory {
    fn create_backend(
        &self,
        backend_type: BackendType,
        model_manager: ModelManager,
    ) -> imgly_bgremove::Result<Box<dyn InferenceBackend>> {
        match backend_type {
            BackendType::Tract => Ok(Box::new(TractBackend::with_model_manager(model_manager))),
            other => Err(BgRemovalError::invalid_config(format!(
                "{:?} backend is not available in this build",
                other
            ))),
        }
    }

    fn available_backends(&self) -> Vec<BackendType> {
        vec![BackendType::Tract]
    }
}

pub struct SegmentationRemover {
    runtime: Runtime,
    model_id: String,
}

impl SegmentationRemover {
    /// Build the remover and its runtime. Nothing is downloaded yet.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .thread_name("bg-model")
            .build()?;
        Ok(Self {
            runtime,
            model_id: ModelCache::get_default_model_id(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn ensure_model(&self) -> Result<()> {
        let cache = ModelCache::new().map_err(engine_error)?;
        if cache.is_model_cached(&self.model_id) {
            return Ok(());
        }

        info!(model = %self.model_id, "Model not cached, downloading");
        let downloader = ModelDownloader::new().map_err(engine_error)?;
        let downloaded = self
            .runtime
            .block_on(downloader.download_model(ModelCache::get_default_model_url(), false))
            .map_err(engine_error)?;
        if downloaded != self.model_id {
            return Err(AppError::Removal(format!(
                "Downloaded model '{}' does not match expected '{}'",
                downloaded, self.model_id
            )));
        }
        info!(model = %self.model_id, "Model downloaded");
        Ok(())
    }

    fn processor(&self) -> Result<BackgroundRemovalProcessor> {
        let config = ProcessorConfigBuilder::new()
            .model_spec(ModelSpec {
                source: ModelSource::Downloaded(self.model_id.clone()),
                variant: None,
            })
            .backend_type(BackendType::Tract)
            .execution_provider(ExecutionProvider::Cpu)
            .build()
            .map_err(engine_error)?;
        BackgroundRemovalProcessor::with_factory(config, Box::new(TractBackendFactory))
            .map_err(engine_error)
    }
}

impl BackgroundRemover for SegmentationRemover {
    fn name(&self) -> &str {
        "segmentation"
    }

    fn remove_background(&self, image: DynamicImage) -> Result<RgbaImage> {
        self.ensure_model()?;

        let mut processor = self.processor()?;
        processor.initialize().map_err(engine_error)?;
        debug!(model = %self.model_id, "Segmentation model ready");

        let result = processor.process_image(&image).map_err(engine_error)?;
        Ok(result.image.to_rgba8())
    }
}

/// Engine errors reach the user as processing failures
fn engine_error(err: BgRemovalError) -> AppError {
    AppError::Removal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn uses_default_isnet_model() {
        let remover = SegmentationRemover::new().unwrap();
        assert_eq!(remover.model_id(), ModelCache::get_default_model_id());
        assert_eq!(remover.name(), "segmentation");
    }

    #[test]
    fn factory_only_offers_tract() {
        assert_eq!(
            TractBackendFactory.available_backends(),
            vec![BackendType::Tract]
        );
    }

    #[test]
    fn engine_errors_become_processing_failures() {
        let err = engine_error(BgRemovalError::processing("inference exploded"));
        assert_eq!(err.kind(), ErrorKind::Processing);
        assert!(err.to_string().contains("inference exploded"));
    }
}

use crate::backend::{InferenceBackend, InferenceOutput};
use crate::config::DetectorConfig;
use crate::postprocessing::PostProcessor;
use crate::serialization::PhotoReport;
use preprocess::CpuPreProcessor;
use std::path::Path;

pub struct DetectionService<B: InferenceBackend> {
    backend: B,
    postprocessor: PostProcessor,
    preprocessor: CpuPreProcessor,
}

impl<B: InferenceBackend> DetectionService<B> {
    pub fn new(backend: B, config: &DetectorConfig) -> Self {
        let postprocessor = PostProcessor::new(config.confidence_threshold);
        let preprocessor = CpuPreProcessor::new(config.input_size);
        Self {
            backend,
            postprocessor,
            preprocessor,
        }
    }

    /// Run the full decode -> preprocess -> infer -> postprocess chain on
    /// one photo. A missing file or an empty detection set is a normal
    /// outcome and yields the empty report, not an error.
    pub fn check_photo(&mut self, path: &Path) -> anyhow::Result<PhotoReport> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Photo file not found");
            return Ok(PhotoReport::empty());
        }

        let image = image::open(path)?.to_rgb8();
        let (width, height) = image.dimensions();

        tracing::debug!(width, height, "Decoded photo");

        let preprocessed = self
            .preprocessor
            .preprocess_image(image.as_raw(), width, height)?;

        let InferenceOutput { predictions } = {
            let _infer_span = tracing::info_span!("model_inference").entered();
            self.backend.infer(&preprocessed.tensor)?
        };

        match self.postprocessor.top_detection(&predictions.view())? {
            Some(detection) => {
                let class_name = self
                    .backend
                    .class_names()
                    .get(detection.class_id)
                    .ok_or_else(|| {
                        anyhow::anyhow!("No class name for id {}", detection.class_id)
                    })?;

                tracing::info!(
                    class_name,
                    confidence = detection.confidence,
                    "Object detected"
                );
                Ok(PhotoReport::detected(class_name, detection.confidence))
            }
            None => {
                tracing::info!("No objects detected in this image");
                Ok(PhotoReport::empty())
            }
        }
    }
}

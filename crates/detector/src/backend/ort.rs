use super::{InferenceBackend, InferenceOutput};
use crate::config::Device;
use crate::labels::ClassNames;
use ndarray::{Array, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};

pub struct OrtBackend {
    session: Session,
    input_name: String,
    output_name: String,
    class_names: ClassNames,
}

impl OrtBackend {
    /// Load model with the requested device
    pub fn load_with_device(path: &str, device: Device) -> anyhow::Result<Self> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let mut builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?;

        match device {
            Device::Cuda => {
                tracing::info!("Initializing ONNX Runtime with CUDA execution provider");
                // No error_on_failure: session creation falls back to CPU
                // when CUDA is unavailable on the host
                builder = builder.with_execution_providers([
                    ort::execution_providers::CUDA::default()
                        .with_device_id(0)
                        .build(),
                ])?;
            }
            Device::Cpu => {
                tracing::info!("Initializing ONNX Runtime with CPU execution provider");
            }
        }

        let session = builder.commit_from_file(path)?;

        // Exports name their tensors inconsistently ("images"/"output0" vs
        // "input"/"output"), so take the graph's own names
        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("Model has no input tensors"))?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("Model has no output tensors"))?;

        let class_names = ClassNames::from_session(&session)?;

        tracing::info!(
            classes = class_names.len(),
            input = %input_name,
            output = %output_name,
            "Model loaded from {}",
            path
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            class_names,
        })
    }
}

impl InferenceBackend for OrtBackend {
    fn load_model(path: &str) -> anyhow::Result<Self> {
        Self::load_with_device(path, Device::Cuda)
    }

    fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput> {
        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(images.view())?
        ])?;

        let predictions = outputs[self.output_name.as_str()].try_extract_array()?;

        Ok(InferenceOutput {
            predictions: predictions.into_owned(),
        })
    }

    fn class_names(&self) -> &ClassNames {
        &self.class_names
    }
}

use crate::labels::ClassNames;
use ndarray::{Array, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

pub trait InferenceBackend {
    fn load_model(path: &str) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run one forward pass over a preprocessed NCHW batch
    fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput>;

    /// Class-id-to-name table carried by the loaded model
    fn class_names(&self) -> &ClassNames;
}

pub struct InferenceOutput {
    /// [1, rows, 5 + nc] prediction rows: cx, cy, w, h, objectness,
    /// then one score per class
    pub predictions: ndarray::ArrayD<f32>,
}

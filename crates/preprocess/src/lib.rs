pub mod config;
pub mod cpu;

use ndarray::{Array, IxDyn};

pub use config::DEFAULT_INPUT_SIZE;
pub use cpu::CpuPreProcessor;

/// Result of preprocessing including the letterbox transform parameters
#[derive(Debug)]
pub struct PreprocessResult {
    /// NCHW f32 tensor ready for inference, shape [1, 3, input_h, input_w]
    pub tensor: Array<f32, IxDyn>,
    /// Scale factor applied during letterboxing
    pub scale: f32,
    /// X offset from letterboxing (in pixels)
    pub offset_x: f32,
    /// Y offset from letterboxing (in pixels)
    pub offset_y: f32,
}

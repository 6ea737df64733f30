use std::env;

pub use crate::logging::Environment;

/// Device the inference session should run on. CUDA degrades to CPU at
/// session build time when the provider cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu" => Device::Cpu,
            _ => Device::Cuda,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub environment: Environment,
    pub model_path: String,
    pub input_size: (u32, u32),
    pub confidence_threshold: f32,
    pub device: Device,
}

impl DetectorConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();

        let model_path =
            env::var("MODEL_PATH").unwrap_or_else(|_| "models/best.onnx".to_string());

        let input_width = env::var("INPUT_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(640);

        let input_height = env::var("INPUT_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(640);

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.25);

        let device = env::var("DEVICE")
            .map(|s| Device::parse(&s))
            .unwrap_or(Device::Cuda);

        Ok(Self {
            environment,
            model_path,
            input_size: (input_width, input_height),
            confidence_threshold,
            device,
        })
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            model_path: "models/best.onnx".to_string(),
            input_size: (640, 640),
            confidence_threshold: 0.25,
            device: Device::Cpu,
        }
    }
}

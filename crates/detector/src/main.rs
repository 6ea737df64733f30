use clap::Parser;
use detector::{DetectionService, DetectorConfig, PhotoReport, logging::setup_logging};
use std::path::{Path, PathBuf};

#[cfg(feature = "ort-backend")]
use detector::backend::ort::OrtBackend as Backend;

#[cfg(not(feature = "ort-backend"))]
compile_error!("The 'ort-backend' feature must be enabled");

/// Classify one photo and print the result as JSON on stdout.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the photo file
    #[arg(long = "photo-path")]
    photo_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = DetectorConfig::from_env()?;

    setup_logging(&config);

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    // Every failure past argument parsing collapses into the empty report;
    // the parent service only distinguishes "JSON on stdout" from a
    // non-zero exit
    let report = check_photo(&cli.photo_path, &config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Photo check failed, emitting empty result");
        PhotoReport::empty()
    });

    println!("{}", report.to_json()?);

    Ok(())
}

fn check_photo(photo_path: &Path, config: &DetectorConfig) -> anyhow::Result<PhotoReport> {
    tracing::info!(model_path = %config.model_path, "Loading detection model");
    let backend = Backend::load_with_device(&config.model_path, config.device)?;
    tracing::info!("Model loaded successfully");

    let mut service = DetectionService::new(backend, config);
    service.check_photo(photo_path)
}

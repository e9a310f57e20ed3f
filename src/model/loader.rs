use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::ArtifactError;

use super::encoder::{ClassLabels, LabelEncoder};
use super::features::Feature;
use super::metrics::CompileConfig;
use super::network::{DenseNetwork, Model};
use super::predict::PredictionContext;
use super::scaler::{FittedScaler, Scaler};

// ---------------------------------------------------------------------------
// Artifact locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub label_encoder: PathBuf,
}

impl Default for ArtifactPaths {
    /// Fixed file names in the working directory.
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(config::MODEL_FILE),
            scaler: dir.join(config::SCALER_FILE),
            label_encoder: dir.join(config::LABEL_ENCODER_FILE),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load, validate and cross-check the three artifacts, then compile the
/// model with the fixed training configuration.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<PredictionContext, ArtifactError> {
    let mut model: DenseNetwork = read_json(&paths.model)?;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        path: paths.model.clone(),
        reason,
    })?;
    model.compile(CompileConfig::default());

    let scaler: FittedScaler = read_json(&paths.scaler)?;
    scaler.validate().map_err(|reason| ArtifactError::Invalid {
        path: paths.scaler.clone(),
        reason,
    })?;

    let encoder: ClassLabels = read_json(&paths.label_encoder)?;
    encoder.validate().map_err(|reason| ArtifactError::Invalid {
        path: paths.label_encoder.clone(),
        reason,
    })?;

    check_compatible(&scaler, &model, &encoder)?;

    log::info!(
        "Loaded model ({} layers, {} classes) from {}",
        model.layers.len(),
        model.num_classes(),
        paths.model.display()
    );
    log::info!("Loaded scaler from {}", paths.scaler.display());
    log::info!(
        "Loaded label encoder from {}: {:?}",
        paths.label_encoder.display(),
        encoder.classes()
    );

    Ok(PredictionContext::new(scaler, model, encoder))
}

/// Dimensions that must agree across the three artifacts.
fn check_compatible(
    scaler: &dyn Scaler,
    model: &dyn Model,
    encoder: &dyn LabelEncoder,
) -> Result<(), ArtifactError> {
    if scaler.dimension() != Feature::COUNT {
        return Err(ArtifactError::Incompatible(format!(
            "scaler was fitted on {} features, expected {}",
            scaler.dimension(),
            Feature::COUNT
        )));
    }
    if model.input_dim() != scaler.dimension() {
        return Err(ArtifactError::Incompatible(format!(
            "model expects {} inputs but the scaler produces {}",
            model.input_dim(),
            scaler.dimension()
        )));
    }
    let classes = encoder.classes().len();
    if model.num_classes() != classes {
        return Err(ArtifactError::Incompatible(format!(
            "model outputs {} classes but the label encoder knows {classes}",
            model.num_classes()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an artifact as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, artifact: &T) -> Result<(), ArtifactError> {
    let text = serde_json::to_string_pretty(artifact).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

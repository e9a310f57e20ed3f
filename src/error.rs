use std::path::PathBuf;

use thiserror::Error;

use crate::model::features::Feature;

// ---------------------------------------------------------------------------
// Input errors – recoverable, shown in a modal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} is empty")]
    Missing { field: Feature },

    #[error("{field} is not a number: '{text}'")]
    NotNumeric { field: Feature, text: String },
}

impl InputError {
    pub fn field(&self) -> Feature {
        match self {
            InputError::Missing { field } | InputError::NotNumeric { field, .. } => *field,
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("model returned an empty probability distribution")]
    EmptyDistribution,

    #[error("class index {index} is outside the {known} known classes")]
    UnknownClass { index: usize, known: usize },
}

// ---------------------------------------------------------------------------
// Artifact errors – fatal at startup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("incompatible artifacts: {0}")]
    Incompatible(String),
}

// ---------------------------------------------------------------------------
// Evaluation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("model has not been compiled")]
    NotCompiled,

    #[error("no samples to evaluate")]
    NoSamples,

    #[error("sample {row}: label '{label}' is unknown to the encoder")]
    UnknownLabel { row: usize, label: String },

    #[error("sample {row}: {source}")]
    Prediction {
        row: usize,
        #[source]
        source: PredictionError,
    },
}

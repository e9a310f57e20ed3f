//! Precision agriculture desktop app.
//!
//! Soil and weather measurements go in, a crop recommendation comes out.
//! The recommendation comes from three pre-trained artifacts (a feature
//! scaler, a dense classifier and a label encoder) loaded once at startup
//! into an immutable [`model::predict::PredictionContext`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod state;
pub mod ui;

pub use error::{ArtifactError, InputError, PredictionError};
pub use model::features::{Feature, FeatureInput, FeatureVector};
pub use model::loader::{load_artifacts, ArtifactPaths};
pub use model::predict::{Prediction, PredictionContext};

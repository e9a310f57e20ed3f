/// Data layer: labeled samples and the static reference content.
///
/// Architecture:
/// ```text
///   Crop_recommendation.csv        compile-time tables
///        │                               │
///        ▼                               ▼
///   ┌──────────┐               ┌──────────────────┐
///   │ dataset  │ LabeledSample │ crops / sensors  │  shown in the UI
///   └──────────┘               └──────────────────┘
///        │
///        ▼
///   PredictionContext::evaluate
///
///   synthetic: seeded samples → fitted scaler, encoder, centroid model
/// ```

pub mod crops;
pub mod dataset;
pub mod sensors;
pub mod synthetic;

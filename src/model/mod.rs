/// Prediction layer: artifact interfaces, loading, and the prediction adapter.
///
/// Architecture:
/// ```text
///  entry fields (text)
///        │  FeatureInput::parse
///        ▼
///   ┌───────────────┐
///   │ FeatureVector │  7 × f64, canonical order
///   └───────────────┘
///        │  Scaler::transform
///        ▼
///   ┌──────────────────┐
///   │ NormalizedVector │
///   └──────────────────┘
///        │  Model::predict_distribution
///        ▼
///   ┌─────────────────────────┐
///   │ ProbabilityDistribution │  argmax → class index
///   └─────────────────────────┘
///        │  LabelEncoder::decode
///        ▼
///     crop name
/// ```
///
/// The three artifacts are read once by [`loader::load_artifacts`] and
/// bundled into an immutable [`predict::PredictionContext`].

pub mod encoder;
pub mod features;
pub mod loader;
pub mod metrics;
pub mod network;
pub mod predict;
pub mod scaler;

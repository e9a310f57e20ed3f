use serde::{Deserialize, Serialize};

use super::features::{Feature, FeatureVector};

/// Scaler output, fed straight into the model.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVector(pub Vec<f64>);

impl NormalizedVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// A fitted numeric transform applied before inference.
pub trait Scaler {
    fn transform(&self, features: &FeatureVector) -> NormalizedVector;

    /// Number of columns the scaler was fitted on.
    fn dimension(&self) -> usize;
}

// ---------------------------------------------------------------------------
// FittedScaler – serialized scaler parameters
// ---------------------------------------------------------------------------

/// Fitted parameters of one of the two common scaler layouts.
///
/// * `standard`: `(x - mean) / scale`
/// * `min_max`:  `x * scale + min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedScaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FittedScaler {
    /// Fit a standard scaler (population variance, like the usual fitting libraries).
    /// Constant columns get a scale of 1 so they map to 0.
    pub fn fit_standard(samples: &[FeatureVector]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mut mean = vec![0.0; Feature::COUNT];
        for s in samples {
            for (m, v) in mean.iter_mut().zip(s.to_array()) {
                *m += v / n;
            }
        }
        let mut var = vec![0.0; Feature::COUNT];
        for s in samples {
            for ((acc, v), m) in var.iter_mut().zip(s.to_array()).zip(&mean) {
                *acc += (v - m).powi(2) / n;
            }
        }
        let scale = var
            .into_iter()
            .map(|v| if v > 0.0 { v.sqrt() } else { 1.0 })
            .collect();
        Some(FittedScaler::Standard { mean, scale })
    }

    /// Check internal consistency. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        let (offset, scale, offset_name) = match self {
            FittedScaler::Standard { mean, scale } => (mean, scale, "mean"),
            FittedScaler::MinMax { min, scale } => (min, scale, "min"),
        };
        if offset.len() != scale.len() {
            return Err(format!(
                "{offset_name} has {} values but scale has {}",
                offset.len(),
                scale.len()
            ));
        }
        if let Some(bad) = offset.iter().chain(scale).find(|v| !v.is_finite()) {
            return Err(format!("non-finite parameter {bad}"));
        }
        Ok(())
    }
}

impl Scaler for FittedScaler {
    fn transform(&self, features: &FeatureVector) -> NormalizedVector {
        let x = features.to_array();
        let values = match self {
            FittedScaler::Standard { mean, scale } => x
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(&v, (&m, &s))| {
                    let s = if s == 0.0 { 1.0 } else { s };
                    (v - m) / s
                })
                .collect(),
            FittedScaler::MinMax { min, scale } => x
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(&v, (&lo, &s))| v * s + lo)
                .collect(),
        };
        NormalizedVector(values)
    }

    fn dimension(&self) -> usize {
        match self {
            FittedScaler::Standard { mean, .. } => mean.len(),
            FittedScaler::MinMax { min, .. } => min.len(),
        }
    }
}

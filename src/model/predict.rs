use std::fmt;

use crate::data::dataset::LabeledSample;
use crate::error::{EvaluationError, PredictionError};

use super::encoder::{ClassIndex, ClassLabel, LabelEncoder};
use super::features::{FeatureInput, FeatureVector};
use super::metrics::{CompileConfig, Evaluation, EvaluationAccumulator};
use super::network::{Model, ProbabilityDistribution};
use super::scaler::Scaler;

// ---------------------------------------------------------------------------
// Prediction – one answered request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: ClassLabel,
    pub class_index: ClassIndex,
    pub confidence: f64,
    pub distribution: ProbabilityDistribution,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Plant Type: {}", self.label)
    }
}

// ---------------------------------------------------------------------------
// PredictionContext – the loaded artifacts
// ---------------------------------------------------------------------------

/// Immutable bundle of scaler, model and label encoder. Built once at
/// startup and borrowed for every prediction.
pub struct PredictionContext {
    scaler: Box<dyn Scaler>,
    model: Box<dyn Model>,
    encoder: Box<dyn LabelEncoder>,
}

impl PredictionContext {
    pub fn new(
        scaler: impl Scaler + 'static,
        model: impl Model + 'static,
        encoder: impl LabelEncoder + 'static,
    ) -> Self {
        Self {
            scaler: Box::new(scaler),
            model: Box::new(model),
            encoder: Box::new(encoder),
        }
    }

    /// Parse the entry fields, then predict.
    pub fn predict_input(&self, input: &FeatureInput) -> Result<Prediction, PredictionError> {
        let features = input.parse()?;
        self.predict(&features)
    }

    /// Scale → predict distribution → argmax → decode, in that order.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        log::info!("Input values for prediction: {features}");

        let normalized = self.scaler.transform(features);
        log::debug!("Scaled features: {:?}", normalized.as_slice());

        let distribution = self.model.predict_distribution(&normalized);
        log::debug!("Class probabilities: {:?}", distribution.0);

        let class_index = distribution
            .argmax()
            .ok_or(PredictionError::EmptyDistribution)?;
        let label = self
            .encoder
            .decode(class_index)
            .ok_or(PredictionError::UnknownClass {
                index: class_index,
                known: self.encoder.classes().len(),
            })?;
        let confidence = distribution.get(class_index).unwrap_or(f64::NAN);

        Ok(Prediction {
            label,
            class_index,
            confidence,
            distribution,
        })
    }

    /// Compiled loss and metrics over labeled samples.
    pub fn evaluate(&self, samples: &[LabeledSample]) -> Result<Evaluation, EvaluationError> {
        let config = self
            .model
            .compile_config()
            .ok_or(EvaluationError::NotCompiled)?;
        let mut acc = EvaluationAccumulator::new(config);

        for (row, sample) in samples.iter().enumerate() {
            let target = self
                .encoder
                .encode(&sample.label)
                .ok_or_else(|| EvaluationError::UnknownLabel {
                    row,
                    label: sample.label.clone(),
                })?;
            let distribution = self
                .model
                .predict_distribution(&self.scaler.transform(&sample.features));
            if distribution.is_empty() {
                return Err(EvaluationError::Prediction {
                    row,
                    source: PredictionError::EmptyDistribution,
                });
            }
            acc.add(&distribution, target);
        }

        acc.finish().ok_or(EvaluationError::NoSamples)
    }

    pub fn classes(&self) -> &[ClassLabel] {
        self.encoder.classes()
    }

    pub fn compile_config(&self) -> Option<&CompileConfig> {
        self.model.compile_config()
    }

    pub fn input_dim(&self) -> usize {
        self.model.input_dim()
    }

    pub fn model_summary(&self) -> Vec<String> {
        self.model.summary()
    }
}

impl fmt::Debug for PredictionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionContext")
            .field("scaler_dim", &self.scaler.dimension())
            .field("model_input_dim", &self.model.input_dim())
            .field("classes", &self.encoder.classes().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::model::encoder::ClassLabels;
    use crate::model::features::Feature;
    use crate::model::scaler::NormalizedVector;

    /// Passes features through unchanged.
    struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn transform(&self, features: &FeatureVector) -> NormalizedVector {
            NormalizedVector(features.to_array().to_vec())
        }
        fn dimension(&self) -> usize {
            Feature::COUNT
        }
    }

    /// Always answers with the same distribution.
    struct FixedModel(Vec<f64>);

    impl Model for FixedModel {
        fn predict_distribution(&self, _: &NormalizedVector) -> ProbabilityDistribution {
            ProbabilityDistribution(self.0.clone())
        }
        fn input_dim(&self) -> usize {
            Feature::COUNT
        }
        fn num_classes(&self) -> usize {
            self.0.len()
        }
    }

    /// Scores class `i` by feature `i`, so the largest feature wins.
    struct PickLargestModel {
        config: CompileConfig,
    }

    impl Model for PickLargestModel {
        fn predict_distribution(&self, input: &NormalizedVector) -> ProbabilityDistribution {
            let total: f64 = input.as_slice()[..3].iter().sum();
            ProbabilityDistribution(input.as_slice()[..3].iter().map(|v| v / total).collect())
        }
        fn input_dim(&self) -> usize {
            Feature::COUNT
        }
        fn num_classes(&self) -> usize {
            3
        }
        fn compile_config(&self) -> Option<&CompileConfig> {
            Some(&self.config)
        }
    }

    fn crops() -> ClassLabels {
        ClassLabels::new(vec!["chickpea".into(), "maize".into(), "rice".into()])
    }

    fn fv(n: f64, p: f64, k: f64) -> FeatureVector {
        FeatureVector::from_array([n, p, k, 25.0, 60.0, 6.5, 100.0])
    }

    #[test]
    fn predict_decodes_the_argmax_class() {
        let ctx = PredictionContext::new(IdentityScaler, FixedModel(vec![0.1, 0.7, 0.2]), crops());
        let pred = ctx.predict(&fv(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(pred.label, "maize");
        assert_eq!(pred.class_index, 1);
        assert_eq!(pred.confidence, 0.7);
        assert_eq!(pred.to_string(), "Predicted Plant Type: maize");
    }

    #[test]
    fn predict_input_surfaces_input_errors() {
        let ctx = PredictionContext::new(IdentityScaler, FixedModel(vec![1.0]), crops());
        let err = ctx.predict_input(&FeatureInput::default()).unwrap_err();
        assert_eq!(
            err,
            PredictionError::Input(InputError::Missing {
                field: Feature::Nitrogen
            })
        );
    }

    #[test]
    fn empty_distribution_is_an_error() {
        let ctx = PredictionContext::new(IdentityScaler, FixedModel(vec![]), crops());
        assert_eq!(
            ctx.predict(&fv(1.0, 1.0, 1.0)).unwrap_err(),
            PredictionError::EmptyDistribution
        );
    }

    #[test]
    fn index_beyond_encoder_is_an_error() {
        let ctx = PredictionContext::new(
            IdentityScaler,
            FixedModel(vec![0.0, 0.0, 0.0, 1.0]),
            crops(),
        );
        assert_eq!(
            ctx.predict(&fv(1.0, 1.0, 1.0)).unwrap_err(),
            PredictionError::UnknownClass { index: 3, known: 3 }
        );
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let ctx = PredictionContext::new(
            IdentityScaler,
            PickLargestModel {
                config: CompileConfig::default(),
            },
            crops(),
        );
        let features = fv(5.0, 9.0, 2.0);
        let first = ctx.predict(&features).unwrap();
        for _ in 0..10 {
            assert_eq!(ctx.predict(&features).unwrap(), first);
        }
        assert_eq!(first.label, "maize");
    }

    #[test]
    fn evaluate_requires_compiled_model() {
        let ctx = PredictionContext::new(IdentityScaler, FixedModel(vec![1.0, 0.0, 0.0]), crops());
        let samples = vec![LabeledSample {
            features: fv(1.0, 0.0, 0.0),
            label: "chickpea".into(),
        }];
        assert_eq!(ctx.evaluate(&samples).unwrap_err(), EvaluationError::NotCompiled);
    }

    #[test]
    fn evaluate_reports_accuracy() {
        let ctx = PredictionContext::new(
            IdentityScaler,
            PickLargestModel {
                config: CompileConfig::default(),
            },
            crops(),
        );
        let samples = vec![
            LabeledSample {
                features: fv(8.0, 1.0, 1.0),
                label: "chickpea".into(),
            },
            LabeledSample {
                features: fv(1.0, 8.0, 1.0),
                label: "maize".into(),
            },
            LabeledSample {
                features: fv(1.0, 1.0, 8.0),
                label: "maize".into(),
            },
            LabeledSample {
                features: fv(1.0, 1.0, 8.0),
                label: "rice".into(),
            },
        ];
        let eval = ctx.evaluate(&samples).unwrap();
        assert_eq!(eval.samples, 4);
        assert_eq!(eval.accuracy(), Some(0.75));
        assert!(eval.loss > 0.0);
    }

    #[test]
    fn evaluate_rejects_unknown_labels_and_empty_sets() {
        let ctx = PredictionContext::new(
            IdentityScaler,
            PickLargestModel {
                config: CompileConfig::default(),
            },
            crops(),
        );
        assert_eq!(ctx.evaluate(&[]).unwrap_err(), EvaluationError::NoSamples);
        let samples = vec![LabeledSample {
            features: fv(1.0, 1.0, 1.0),
            label: "mango".into(),
        }];
        assert_eq!(
            ctx.evaluate(&samples).unwrap_err(),
            EvaluationError::UnknownLabel {
                row: 0,
                label: "mango".into()
            }
        );
    }
}

use std::collections::BTreeMap;
use std::fmt;

use super::encoder::ClassIndex;
use super::network::ProbabilityDistribution;

/// Probabilities are clipped to `[EPSILON, 1 - EPSILON]` before taking logs.
pub const EPSILON: f64 = 1e-7;

// ---------------------------------------------------------------------------
// Compile configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    SparseCategoricalCrossentropy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Optimizer {
    Adam { learning_rate: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    Accuracy,
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loss::SparseCategoricalCrossentropy => f.write_str("sparse_categorical_crossentropy"),
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimizer::Adam { learning_rate } => write!(f, "adam (lr={learning_rate})"),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Accuracy => f.write_str("accuracy"),
        }
    }
}

/// Loss, optimizer and metrics attached to a loaded model. The optimizer is
/// bookkeeping only: nothing here updates weights.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileConfig {
    pub loss: Loss,
    pub optimizer: Optimizer,
    pub metrics: Vec<Metric>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            loss: Loss::SparseCategoricalCrossentropy,
            optimizer: Optimizer::Adam {
                learning_rate: 0.001,
            },
            metrics: vec![Metric::Accuracy],
        }
    }
}

impl CompileConfig {
    pub fn loss_for(&self, dist: &ProbabilityDistribution, target: ClassIndex) -> f64 {
        match self.loss {
            Loss::SparseCategoricalCrossentropy => sparse_categorical_crossentropy(dist, target),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric computation
// ---------------------------------------------------------------------------

/// `-ln(p[target])` with clipping. A target outside the distribution counts
/// as probability zero.
pub fn sparse_categorical_crossentropy(dist: &ProbabilityDistribution, target: ClassIndex) -> f64 {
    let p = dist.get(target).unwrap_or(0.0);
    -p.clamp(EPSILON, 1.0 - EPSILON).ln()
}

/// Aggregated result of evaluating a compiled model.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub samples: usize,
    pub loss: f64,
    pub metrics: BTreeMap<Metric, f64>,
}

impl Evaluation {
    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.get(&Metric::Accuracy).copied()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples, loss {:.4}", self.samples, self.loss)?;
        for (metric, value) in &self.metrics {
            write!(f, ", {metric} {value:.4}")?;
        }
        Ok(())
    }
}

/// Running sums over `(distribution, target)` pairs.
#[derive(Debug)]
pub struct EvaluationAccumulator<'a> {
    config: &'a CompileConfig,
    samples: usize,
    loss_sum: f64,
    correct: usize,
}

impl<'a> EvaluationAccumulator<'a> {
    pub fn new(config: &'a CompileConfig) -> Self {
        Self {
            config,
            samples: 0,
            loss_sum: 0.0,
            correct: 0,
        }
    }

    pub fn add(&mut self, dist: &ProbabilityDistribution, target: ClassIndex) {
        self.samples += 1;
        self.loss_sum += self.config.loss_for(dist, target);
        if dist.argmax() == Some(target) {
            self.correct += 1;
        }
    }

    /// `None` when nothing was added.
    pub fn finish(self) -> Option<Evaluation> {
        if self.samples == 0 {
            return None;
        }
        let n = self.samples as f64;
        let metrics = self
            .config
            .metrics
            .iter()
            .map(|m| match m {
                Metric::Accuracy => (*m, self.correct as f64 / n),
            })
            .collect();
        Some(Evaluation {
            samples: self.samples,
            loss: self.loss_sum / n,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossentropy_of_confident_correct_prediction_is_small() {
        let d = ProbabilityDistribution(vec![0.0, 1.0]);
        let loss = sparse_categorical_crossentropy(&d, 1);
        assert!(loss > 0.0 && loss < 1e-6);
    }

    #[test]
    fn crossentropy_is_clipped_for_zero_probability() {
        let d = ProbabilityDistribution(vec![0.0, 1.0]);
        let loss = sparse_categorical_crossentropy(&d, 0);
        assert!((loss - (-(EPSILON.ln()))).abs() < 1e-12);
        assert_eq!(sparse_categorical_crossentropy(&d, 9), loss);
    }

    #[test]
    fn accumulator_averages_loss_and_accuracy() {
        let config = CompileConfig::default();
        let mut acc = EvaluationAccumulator::new(&config);
        acc.add(&ProbabilityDistribution(vec![0.5, 0.5]), 0);
        acc.add(&ProbabilityDistribution(vec![0.5, 0.5]), 1);
        let eval = acc.finish().unwrap();
        assert_eq!(eval.samples, 2);
        // ties go to index 0, so only the first sample is correct
        assert_eq!(eval.accuracy(), Some(0.5));
        assert!((eval.loss - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_yields_nothing() {
        let config = CompileConfig::default();
        assert!(EvaluationAccumulator::new(&config).finish().is_none());
    }

    #[test]
    fn default_config_names() {
        let config = CompileConfig::default();
        assert_eq!(config.loss.to_string(), "sparse_categorical_crossentropy");
        assert_eq!(config.optimizer.to_string(), "adam (lr=0.001)");
        assert_eq!(config.metrics, vec![Metric::Accuracy]);
    }
}

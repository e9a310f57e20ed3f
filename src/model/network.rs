use serde::{Deserialize, Serialize};

use super::encoder::ClassIndex;
use super::metrics::CompileConfig;
use super::scaler::NormalizedVector;

// ---------------------------------------------------------------------------
// ProbabilityDistribution
// ---------------------------------------------------------------------------

/// Model output: one score per known class.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityDistribution(pub Vec<f64>);

impl ProbabilityDistribution {
    /// Index of the largest probability. Ties go to the lowest index and a
    /// NaN entry counts as the maximum (first NaN wins), matching the usual
    /// numeric-array argmax. `None` only for an empty distribution.
    pub fn argmax(&self) -> Option<ClassIndex> {
        let mut best: Option<(ClassIndex, f64)> = None;
        for (i, &p) in self.0.iter().enumerate() {
            if p.is_nan() {
                return Some(i);
            }
            match best {
                Some((_, b)) if p <= b => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn get(&self, index: ClassIndex) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// `(index, probability)` pairs sorted by descending probability,
    /// stable for equal values.
    pub fn top_k(&self, k: usize) -> Vec<(ClassIndex, f64)> {
        let mut indexed: Vec<(ClassIndex, f64)> = self.0.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(k);
        indexed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A trained classifier.
pub trait Model {
    fn predict_distribution(&self, input: &NormalizedVector) -> ProbabilityDistribution;

    fn input_dim(&self) -> usize;

    fn num_classes(&self) -> usize;

    /// Loss and metric configuration, if the model has been compiled.
    fn compile_config(&self) -> Option<&CompileConfig> {
        None
    }

    /// Human-readable architecture, one line per layer.
    fn summary(&self) -> Vec<String> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Dense feed-forward network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f64]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => softmax(values),
        }
    }
}

/// Numerically stable in-place softmax.
fn softmax(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        values.iter_mut().for_each(|v| *v /= sum);
    }
}

/// One fully-connected layer. `kernel` is `inputs × units`, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub activation: Activation,
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.kernel.len()
    }

    pub fn units(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.bias.clone();
        for (x, row) in input.iter().zip(&self.kernel) {
            for (o, w) in out.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        self.activation.apply(&mut out);
        out
    }
}

/// Sequential stack of dense layers, as exported from the training side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    pub input_dim: usize,
    pub layers: Vec<DenseLayer>,
    #[serde(skip)]
    compiled: Option<CompileConfig>,
}

impl DenseNetwork {
    pub fn new(input_dim: usize, layers: Vec<DenseLayer>) -> Self {
        Self {
            input_dim,
            layers,
            compiled: None,
        }
    }

    /// Single softmax layer whose logit for class `c` is `-|x - centroid_c|²`
    /// up to a term shared by all classes, i.e. a nearest-centroid
    /// classifier. `None` if there are no centroids or their widths differ.
    pub fn nearest_centroid(centroids: &[Vec<f64>]) -> Option<Self> {
        let input_dim = centroids.first()?.len();
        if centroids.iter().any(|c| c.len() != input_dim) {
            return None;
        }
        let kernel = (0..input_dim)
            .map(|i| centroids.iter().map(|c| 2.0 * c[i]).collect())
            .collect();
        let bias = centroids
            .iter()
            .map(|c| -c.iter().map(|v| v * v).sum::<f64>())
            .collect();
        Some(Self::new(
            input_dim,
            vec![DenseLayer {
                activation: Activation::Softmax,
                kernel,
                bias,
            }],
        ))
    }

    /// Attach loss/optimizer/metric configuration. Does not touch weights.
    pub fn compile(&mut self, config: CompileConfig) {
        self.compiled = Some(config);
    }

    /// Check that layer shapes chain from `input_dim` to the output.
    pub fn validate(&self) -> Result<(), String> {
        if self.layers.is_empty() {
            return Err("network has no layers".into());
        }
        let mut width = self.input_dim;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.inputs() != width {
                return Err(format!(
                    "layer {i} expects {} inputs but receives {width}",
                    layer.inputs()
                ));
            }
            if layer.units() == 0 {
                return Err(format!("layer {i} has no units"));
            }
            if let Some(r) = layer.kernel.iter().position(|row| row.len() != layer.units()) {
                return Err(format!(
                    "layer {i} kernel row {r} has {} values, expected {}",
                    layer.kernel[r].len(),
                    layer.units()
                ));
            }
            width = layer.units();
        }
        Ok(())
    }

    fn layer_summary(&self) -> Vec<String> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, l)| {
                format!(
                    "dense_{i}: {} → {} ({:?}, {} params)",
                    l.inputs(),
                    l.units(),
                    l.activation,
                    l.inputs() * l.units() + l.units()
                )
            })
            .collect()
    }
}

impl Model for DenseNetwork {
    fn predict_distribution(&self, input: &NormalizedVector) -> ProbabilityDistribution {
        let mut activations = input.as_slice().to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        ProbabilityDistribution(activations)
    }

    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn num_classes(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::units)
    }

    fn compile_config(&self) -> Option<&CompileConfig> {
        self.compiled.as_ref()
    }

    fn summary(&self) -> Vec<String> {
        self.layer_summary()
    }
}

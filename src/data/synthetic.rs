use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::dataset::{write_samples, LabeledSample};
use crate::model::encoder::{ClassLabels, LabelEncoder};
use crate::model::features::{Feature, FeatureVector};
use crate::model::loader::{save_json, ArtifactPaths};
use crate::model::network::DenseNetwork;
use crate::model::scaler::{FittedScaler, Scaler};

pub const SAMPLES_PER_CROP: usize = 100;
pub const DEFAULT_SEED: u64 = 42;
pub const DATASET_FILE: &str = "crop_samples.csv";

/// Per-crop feature means: N, P, K, temperature, humidity, ph, rainfall.
pub const CROP_PROFILES: [(&str, [f64; Feature::COUNT]); 8] = [
    ("apple", [20.8, 134.2, 199.9, 22.6, 92.3, 5.9, 112.7]),
    ("chickpea", [40.1, 67.8, 79.9, 18.9, 16.9, 7.3, 80.1]),
    ("coffee", [101.2, 28.7, 29.9, 25.5, 58.9, 6.8, 158.1]),
    ("cotton", [117.8, 46.2, 19.6, 24.0, 79.8, 6.9, 80.4]),
    ("kidneybeans", [20.8, 67.5, 20.1, 20.1, 21.6, 5.7, 105.9]),
    ("maize", [77.8, 48.4, 19.8, 22.4, 65.1, 6.2, 84.8]),
    ("mungbean", [20.99, 47.3, 19.9, 28.5, 85.5, 6.7, 48.4]),
    ("rice", [79.9, 47.6, 39.9, 23.7, 82.3, 6.4, 236.2]),
];

/// Relative spread of each feature around its crop mean.
const RELATIVE_SPREAD: [f64; Feature::COUNT] = [0.12, 0.10, 0.05, 0.06, 0.04, 0.05, 0.12];

// ---------------------------------------------------------------------------
// SimpleRng – deterministic noise source
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG (xoshiro256**) with a Box-Muller normal sampler.
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, ..] = self.state;
        let result = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s1 << 17;
        self.state[2] ^= s0;
        self.state[3] ^= s1;
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

// ---------------------------------------------------------------------------
// Dataset and artifact construction
// ---------------------------------------------------------------------------

/// `SAMPLES_PER_CROP` noisy samples around each entry of [`CROP_PROFILES`].
pub fn synthetic_samples(rng: &mut SimpleRng) -> Vec<LabeledSample> {
    let mut samples = Vec::with_capacity(CROP_PROFILES.len() * SAMPLES_PER_CROP);
    for (crop, means) in &CROP_PROFILES {
        for _ in 0..SAMPLES_PER_CROP {
            let mut values = [0.0; Feature::COUNT];
            for (i, v) in values.iter_mut().enumerate() {
                *v = rng.gauss(means[i], means[i] * RELATIVE_SPREAD[i]);
            }
            samples.push(LabeledSample {
                features: FeatureVector::from_array(values),
                label: crop.to_string(),
            });
        }
    }
    samples
}

/// Mean of the scaled samples of each class, in encoder order.
pub fn class_centroids(
    samples: &[LabeledSample],
    scaler: &dyn Scaler,
    encoder: &dyn LabelEncoder,
) -> Result<Vec<Vec<f64>>> {
    let mut sums = vec![vec![0.0; Feature::COUNT]; encoder.classes().len()];
    let mut counts = vec![0usize; encoder.classes().len()];
    for sample in samples {
        let class = encoder
            .encode(&sample.label)
            .with_context(|| format!("label '{}' missing from encoder", sample.label))?;
        for (acc, v) in sums[class].iter_mut().zip(scaler.transform(&sample.features).0) {
            *acc += v;
        }
        counts[class] += 1;
    }
    Ok(sums
        .into_iter()
        .zip(counts)
        .map(|(sum, n)| sum.into_iter().map(|v| v / n.max(1) as f64).collect())
        .collect())
}

/// The three fitted artifacts for one labeled dataset.
#[derive(Debug, Clone)]
pub struct FittedArtifacts {
    pub scaler: FittedScaler,
    pub encoder: ClassLabels,
    pub model: DenseNetwork,
}

/// Fit a standard scaler, a sorted label encoder and a nearest-centroid model.
pub fn fit_artifacts(samples: &[LabeledSample]) -> Result<FittedArtifacts> {
    let features: Vec<FeatureVector> = samples.iter().map(|s| s.features).collect();
    let scaler = FittedScaler::fit_standard(&features).context("empty dataset")?;
    let encoder = ClassLabels::fit(samples.iter().map(|s| s.label.as_str()));
    let centroids = class_centroids(samples, &scaler, &encoder)?;
    let model = DenseNetwork::nearest_centroid(&centroids).context("no class centroids")?;
    Ok(FittedArtifacts {
        scaler,
        encoder,
        model,
    })
}

/// Everything [`generate`] wrote, plus the samples it drew.
#[derive(Debug)]
pub struct GeneratedSet {
    pub dataset: PathBuf,
    pub paths: ArtifactPaths,
    pub samples: Vec<LabeledSample>,
}

/// Draw the synthetic dataset from `seed`, then write it as CSV next to the
/// three JSON artifacts fitted on it.
pub fn generate(out_dir: &Path, seed: u64) -> Result<GeneratedSet> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let samples = synthetic_samples(&mut SimpleRng::new(seed));
    let dataset = out_dir.join(DATASET_FILE);
    write_samples(&dataset, &samples)?;

    let fitted = fit_artifacts(&samples)?;
    let paths = ArtifactPaths::in_dir(out_dir);
    save_json(&paths.model, &fitted.model)?;
    save_json(&paths.scaler, &fitted.scaler)?;
    save_json(&paths.label_encoder, &fitted.encoder)?;
    log::info!(
        "Generated {} samples and artifacts in {}",
        samples.len(),
        out_dir.display()
    );

    Ok(GeneratedSet {
        dataset,
        paths,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::Model;

    #[test]
    fn rng_is_reproducible_per_seed() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        let mut c = SimpleRng::new(8);
        let first: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let again: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        let other: Vec<u64> = (0..8).map(|_| c.next_u64()).collect();
        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn rng_floats_are_unit_interval_and_gauss_is_centred() {
        let mut rng = SimpleRng::new(DEFAULT_SEED);
        for _ in 0..1000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
        let n = 20_000;
        let mean = (0..n).map(|_| rng.gauss(5.0, 2.0)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.1, "sample mean {mean}");
    }

    #[test]
    fn samples_cover_every_profile() {
        let samples = synthetic_samples(&mut SimpleRng::new(DEFAULT_SEED));
        assert_eq!(samples.len(), CROP_PROFILES.len() * SAMPLES_PER_CROP);
        for (crop, _) in &CROP_PROFILES {
            let count = samples.iter().filter(|s| s.label == *crop).count();
            assert_eq!(count, SAMPLES_PER_CROP, "{crop}");
        }
    }

    #[test]
    fn fitted_artifacts_agree_on_shape() {
        let samples = synthetic_samples(&mut SimpleRng::new(DEFAULT_SEED));
        let fitted = fit_artifacts(&samples).unwrap();
        assert_eq!(fitted.scaler.dimension(), Feature::COUNT);
        assert_eq!(fitted.encoder.len(), CROP_PROFILES.len());
        assert_eq!(fitted.model.input_dim(), Feature::COUNT);
        assert_eq!(fitted.model.num_classes(), CROP_PROFILES.len());
        fitted.model.validate().unwrap();
    }

    #[test]
    fn centroids_reject_labels_outside_the_encoder() {
        let samples = synthetic_samples(&mut SimpleRng::new(DEFAULT_SEED));
        let fitted = fit_artifacts(&samples).unwrap();
        let stray = [LabeledSample {
            features: samples[0].features,
            label: "mango".into(),
        }];
        let err = class_centroids(&stray, &fitted.scaler, &fitted.encoder).unwrap_err();
        assert!(err.to_string().contains("mango"));
    }

    #[test]
    fn empty_dataset_cannot_be_fitted() {
        assert!(fit_artifacts(&[]).is_err());
    }
}

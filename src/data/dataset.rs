use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::features::FeatureVector;

/// One row of a labeled crop dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: String,
}

// ---------------------------------------------------------------------------
// CSV layout
// ---------------------------------------------------------------------------

/// `N,P,K,temperature,humidity,ph,rainfall,label`, the usual crop
/// recommendation dataset header.
#[derive(Debug, Serialize, Deserialize)]
struct SampleRecord {
    #[serde(rename = "N")]
    n: f64,
    #[serde(rename = "P")]
    p: f64,
    #[serde(rename = "K")]
    k: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
    label: String,
}

impl From<SampleRecord> for LabeledSample {
    fn from(r: SampleRecord) -> Self {
        LabeledSample {
            features: FeatureVector::from_array([
                r.n,
                r.p,
                r.k,
                r.temperature,
                r.humidity,
                r.ph,
                r.rainfall,
            ]),
            label: r.label,
        }
    }
}

impl From<&LabeledSample> for SampleRecord {
    fn from(s: &LabeledSample) -> Self {
        let [n, p, k, temperature, humidity, ph, rainfall] = s.features.to_array();
        SampleRecord {
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
            label: s.label.clone(),
        }
    }
}

/// Read labeled samples from a CSV file with a header row.
pub fn load_samples(path: &Path) -> Result<Vec<LabeledSample>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_samples(reader)
}

fn read_samples<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<LabeledSample>> {
    reader
        .deserialize::<SampleRecord>()
        .enumerate()
        .map(|(row, record)| {
            record
                .map(LabeledSample::from)
                .with_context(|| format!("CSV row {row}"))
        })
        .collect()
}

/// Write labeled samples as CSV with a header row.
pub fn write_samples(path: &Path, samples: &[LabeledSample]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV {}", path.display()))?;
    for sample in samples {
        writer
            .serialize(SampleRecord::from(sample))
            .context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "N,P,K,temperature,humidity,ph,rainfall,label\n\
                       90,42,43,20.87,82.0,6.5,202.9,rice\n\
                       85,58,41,21.77,80.3,7.0,226.6,rice\n";

    #[test]
    fn reads_dataset_header_layout() {
        let samples = read_samples(csv::Reader::from_reader(CSV.as_bytes())).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label, "rice");
        assert_eq!(
            samples[1].features.to_array(),
            [85.0, 58.0, 41.0, 21.77, 80.3, 7.0, 226.6]
        );
    }

    #[test]
    fn bad_row_is_reported_with_its_index() {
        let csv = "N,P,K,temperature,humidity,ph,rainfall,label\n\
                   90,42,43,20.87,82.0,6.5,202.9,rice\n\
                   90,x,43,20.87,82.0,6.5,202.9,rice\n";
        let err = read_samples(csv::Reader::from_reader(csv.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn write_then_load_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let samples = read_samples(csv::Reader::from_reader(CSV.as_bytes())).unwrap();
        write_samples(&path, &samples).unwrap();
        assert_eq!(load_samples(&path).unwrap(), samples);
    }
}

use crate::model::features::Feature;

// ---------------------------------------------------------------------------
// Simulated soil sensor (Dashboard tab)
// ---------------------------------------------------------------------------

/// Placeholder NPK readings. No hardware is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpkReading {
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

pub const PLACEHOLDER_READING: NpkReading = NpkReading {
    n: 20.0,
    p: 15.0,
    k: 10.0,
};

impl NpkReading {
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Nitrogen => Some(self.n),
            Feature::Phosphorus => Some(self.p),
            Feature::Potassium => Some(self.k),
            _ => None,
        }
    }
}

/// Deterministic pseudo-readings around the placeholder, one point per
/// hour for `hours` hours, ending at the placeholder value. Returns
/// `[hour, value]` pairs ready for plotting.
pub fn simulated_history(feature: Feature, hours: usize) -> Vec<[f64; 2]> {
    let Some(base) = PLACEHOLDER_READING.get(feature) else {
        return Vec::new();
    };
    let phase = feature.index() as f64 * 1.3;
    (0..hours)
        .map(|h| {
            let t = h as f64 - (hours.saturating_sub(1)) as f64;
            let drift = 0.08 * base * ((t * 0.45 + phase).sin() - phase.sin());
            [t, base + drift]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_ends_at_the_placeholder() {
        for feature in [Feature::Nitrogen, Feature::Phosphorus, Feature::Potassium] {
            let history = simulated_history(feature, 24);
            assert_eq!(history.len(), 24);
            let last = history.last().unwrap();
            assert_eq!(last[0], 0.0);
            assert!((last[1] - PLACEHOLDER_READING.get(feature).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn history_is_deterministic() {
        assert_eq!(
            simulated_history(Feature::Nitrogen, 12),
            simulated_history(Feature::Nitrogen, 12)
        );
    }

    #[test]
    fn only_nutrients_have_sensors() {
        assert!(simulated_history(Feature::Rainfall, 10).is_empty());
        assert_eq!(PLACEHOLDER_READING.get(Feature::Potassium), Some(10.0));
    }
}

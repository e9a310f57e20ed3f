use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Crop soil-health requirements (Blogs tab)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CropRequirement {
    pub crop: &'static str,
    pub ph: RangeInclusive<f64>,
    /// kg/ha
    pub nitrogen: RangeInclusive<f64>,
    /// kg/ha
    pub phosphorus: RangeInclusive<f64>,
    /// kg/ha
    pub potassium: RangeInclusive<f64>,
}

const fn req(
    crop: &'static str,
    ph: (f64, f64),
    n: (f64, f64),
    p: (f64, f64),
    k: (f64, f64),
) -> CropRequirement {
    CropRequirement {
        crop,
        ph: ph.0..=ph.1,
        nitrogen: n.0..=n.1,
        phosphorus: p.0..=p.1,
        potassium: k.0..=k.1,
    }
}

pub static CROP_REQUIREMENTS: [CropRequirement; 10] = [
    req("Wheat", (6.0, 7.0), (20.0, 30.0), (20.0, 30.0), (10.0, 20.0)),
    req("Rice", (5.5, 6.5), (80.0, 120.0), (40.0, 60.0), (40.0, 60.0)),
    req("Maize", (5.5, 7.0), (100.0, 150.0), (60.0, 90.0), (40.0, 60.0)),
    req("Soybean", (6.0, 7.0), (20.0, 30.0), (50.0, 80.0), (40.0, 80.0)),
    req("Barley", (6.0, 7.0), (20.0, 30.0), (20.0, 30.0), (20.0, 30.0)),
    req("Sorghum", (5.8, 6.5), (80.0, 120.0), (40.0, 60.0), (40.0, 60.0)),
    req("Cotton", (5.8, 6.5), (80.0, 100.0), (40.0, 60.0), (40.0, 60.0)),
    req("Sugarcane", (6.0, 7.5), (100.0, 150.0), (60.0, 80.0), (120.0, 150.0)),
    req("Potato", (5.0, 5.5), (100.0, 150.0), (60.0, 90.0), (150.0, 200.0)),
    req("Tomato", (6.0, 6.8), (50.0, 80.0), (40.0, 60.0), (80.0, 120.0)),
];

/// `"a-b"` with one decimal for pH and none for nutrient amounts.
pub fn format_range(range: &RangeInclusive<f64>, decimals: usize) -> String {
    format!(
        "{:.*}-{:.*}",
        decimals,
        range.start(),
        decimals,
        range.end()
    )
}

impl fmt::Display for CropRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pH {}, N {} kg/ha, P {} kg/ha, K {} kg/ha",
            format_range(&self.ph, 1),
            format_range(&self.nitrogen, 0),
            format_range(&self.phosphorus, 0),
            format_range(&self.potassium, 0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_render_as_requirement_text() {
        assert_eq!(
            CROP_REQUIREMENTS[0].to_string(),
            "pH 6.0-7.0, N 20-30 kg/ha, P 20-30 kg/ha, K 10-20 kg/ha"
        );
        assert_eq!(
            CROP_REQUIREMENTS[7].to_string(),
            "pH 6.0-7.5, N 100-150 kg/ha, P 60-80 kg/ha, K 120-150 kg/ha"
        );
    }

    #[test]
    fn ranges_are_ordered() {
        for r in &CROP_REQUIREMENTS {
            for range in [&r.ph, &r.nitrogen, &r.phosphorus, &r.potassium] {
                assert!(range.start() <= range.end(), "{}", r.crop);
            }
        }
    }
}

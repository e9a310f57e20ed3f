use std::fmt;

use crate::error::InputError;

// ---------------------------------------------------------------------------
// Feature – one named input column
// ---------------------------------------------------------------------------

/// The seven model inputs, in the order the scaler was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    pub const COUNT: usize = 7;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Column name in the training data.
    pub fn column(self) -> &'static str {
        match self {
            Feature::Nitrogen => "N",
            Feature::Phosphorus => "P",
            Feature::Potassium => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Label shown next to the entry field.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Nitrogen => "N Value:",
            Feature::Phosphorus => "P Value:",
            Feature::Potassium => "K Value:",
            Feature::Temperature => "Temperature:",
            Feature::Humidity => "Humidity:",
            Feature::Ph => "pH:",
            Feature::Rainfall => "Rainfall:",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – parsed numeric request
// ---------------------------------------------------------------------------

/// One prediction request. No ranges are enforced: any `f64` is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    pub fn from_array(values: [f64; Feature::COUNT]) -> Self {
        let [n, p, k, temperature, humidity, ph, rainfall] = values;
        Self {
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Values in canonical [`Feature::ALL`] order.
    pub fn to_array(&self) -> [f64; Feature::COUNT] {
        [
            self.n,
            self.p,
            self.k,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.to_array()[feature.index()]
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, feature) in Feature::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", feature.column(), self.get(*feature))?;
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// FeatureInput – raw entry-field text
// ---------------------------------------------------------------------------

/// Text of the seven entry fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureInput {
    fields: [String; Feature::COUNT],
}

impl FeatureInput {
    pub fn get(&self, feature: Feature) -> &str {
        &self.fields[feature.index()]
    }

    pub fn get_mut(&mut self, feature: Feature) -> &mut String {
        &mut self.fields[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, text: impl Into<String>) {
        self.fields[feature.index()] = text.into();
    }

    /// Builder-style setter, handy for tests and prefilled forms.
    pub fn with(mut self, feature: Feature, text: impl Into<String>) -> Self {
        self.set(feature, text);
        self
    }

    /// Parse every field as `f64`; the first failing field wins.
    pub fn parse(&self) -> Result<FeatureVector, InputError> {
        let mut values = [0.0; Feature::COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = parse_field(feature, self.get(feature))?;
        }
        Ok(FeatureVector::from_array(values))
    }
}

impl From<FeatureVector> for FeatureInput {
    fn from(features: FeatureVector) -> Self {
        let mut input = FeatureInput::default();
        for feature in Feature::ALL {
            input.set(feature, features.get(feature).to_string());
        }
        input
    }
}

fn parse_field(feature: Feature, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field: feature });
    }
    strip_digit_separators(trimmed)
        .and_then(|digits| digits.parse::<f64>().ok())
        .ok_or_else(|| InputError::NotNumeric {
            field: feature,
            text: trimmed.to_string(),
        })
}

/// Drop `_` digit-group separators (`1_000`). A separator must sit between
/// two digits; any other placement makes the text non-numeric.
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        if !matches!((before, after), (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit())
        {
            return None;
        }
    }
    Some(text.replace('_', ""))
}

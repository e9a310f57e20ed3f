use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub type ClassIndex = usize;
pub type ClassLabel = String;

/// Fitted mapping between class indices and human-readable crop names.
pub trait LabelEncoder {
    /// Inverse transform: class index → crop name.
    fn decode(&self, index: ClassIndex) -> Option<ClassLabel>;

    /// Forward transform: crop name → class index.
    fn encode(&self, label: &str) -> Option<ClassIndex>;

    fn classes(&self) -> &[ClassLabel];
}

/// Ordered class list; the index of a label is its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLabels {
    classes: Vec<ClassLabel>,
}

impl ClassLabels {
    pub fn new(classes: Vec<ClassLabel>) -> Self {
        Self { classes }
    }

    /// Fit from raw labels: unique values, sorted.
    pub fn fit<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = labels.into_iter().collect();
        Self {
            classes: unique.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("no classes".into());
        }
        let mut seen = BTreeSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(format!("duplicate class '{class}'"));
            }
        }
        Ok(())
    }
}

impl LabelEncoder for ClassLabels {
    fn decode(&self, index: ClassIndex) -> Option<ClassLabel> {
        self.classes.get(index).cloned()
    }

    fn encode(&self, label: &str) -> Option<ClassIndex> {
        self.classes.iter().position(|c| c == label)
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_sorts_and_deduplicates() {
        let enc = ClassLabels::fit(["rice", "maize", "rice", "apple"]);
        assert_eq!(enc.classes(), ["apple", "maize", "rice"]);
        assert_eq!(enc.encode("maize"), Some(1));
        assert_eq!(enc.decode(2).as_deref(), Some("rice"));
    }

    #[test]
    fn decode_out_of_range_is_none() {
        let enc = ClassLabels::new(vec!["rice".into()]);
        assert_eq!(enc.decode(1), None);
        assert_eq!(enc.encode("wheat"), None);
    }

    #[test]
    fn validate_rejects_empty_and_duplicates() {
        assert!(ClassLabels::new(vec![]).validate().is_err());
        let dup = ClassLabels::new(vec!["rice".into(), "rice".into()]);
        assert_eq!(dup.validate().unwrap_err(), "duplicate class 'rice'");
    }
}

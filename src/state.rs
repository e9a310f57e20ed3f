use crate::config;
use crate::data::sensors::PLACEHOLDER_READING;
use crate::error::PredictionError;
use crate::model::features::{Feature, FeatureInput};
use crate::model::loader::ArtifactPaths;
use crate::model::predict::{Prediction, PredictionContext};

// ---------------------------------------------------------------------------
// Tabs and dialogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    NpkCalculations,
    Blogs,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::NpkCalculations, Tab::Blogs, Tab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::NpkCalculations => "NPK Calculations",
            Tab::Blogs => "Blogs",
            Tab::Settings => "Settings",
        }
    }
}

/// A modal message waiting to be dismissed.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    About,
    InputError { detail: String },
    PredictionFailed { detail: String },
}

/// Entry fields on the dashboard (weather and pH only; NPK comes from the sensor).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardInput {
    pub ph: String,
    pub humidity: String,
    pub temperature: String,
    pub rainfall: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub active_tab: Tab,

    /// Entry fields of the NPK Calculations form.
    pub npk_input: FeatureInput,

    pub dashboard: DashboardInput,

    /// Text of the result label; only replaced by a successful prediction.
    pub result_text: String,

    /// Last successful prediction, for the probability chart.
    pub last_prediction: Option<Prediction>,

    pub dialog: Option<Dialog>,

    /// Whether the probability chart is drawn under the result.
    pub show_probabilities: bool,

    /// Number of classes shown in the probability chart.
    pub top_k: usize,

    /// Where the artifacts were loaded from (shown in Settings).
    pub artifact_paths: ArtifactPaths,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            npk_input: FeatureInput::default(),
            dashboard: DashboardInput::default(),
            result_text: String::new(),
            last_prediction: None,
            dialog: None,
            show_probabilities: true,
            top_k: config::DEFAULT_TOP_K,
            artifact_paths: ArtifactPaths::default(),
        }
    }
}

impl AppState {
    pub fn new(artifact_paths: ArtifactPaths) -> Self {
        Self {
            artifact_paths,
            ..Self::default()
        }
    }

    /// "Predict Plant Type" handler. On failure the result label is left
    /// as it was and a dialog is raised instead.
    pub fn run_prediction(&mut self, context: &PredictionContext) {
        match context.predict_input(&self.npk_input) {
            Ok(prediction) => {
                log::info!(
                    "Predicted '{}' (p = {:.3})",
                    prediction.label,
                    prediction.confidence
                );
                self.result_text = prediction.to_string();
                self.last_prediction = Some(prediction);
            }
            Err(PredictionError::Input(e)) => {
                log::warn!("Rejected prediction input: {e}");
                self.dialog = Some(Dialog::InputError {
                    detail: e.to_string(),
                });
            }
            Err(e) => {
                log::error!("Prediction failed: {e}");
                self.dialog = Some(Dialog::PredictionFailed {
                    detail: e.to_string(),
                });
            }
        }
    }

    /// Fill the NPK form from the sensor placeholders and the dashboard
    /// entries, then switch to that tab.
    pub fn copy_dashboard_to_form(&mut self) {
        let dash = &self.dashboard;
        let input = &mut self.npk_input;
        input.set(Feature::Nitrogen, PLACEHOLDER_READING.n.to_string());
        input.set(Feature::Phosphorus, PLACEHOLDER_READING.p.to_string());
        input.set(Feature::Potassium, PLACEHOLDER_READING.k.to_string());
        input.set(Feature::Temperature, dash.temperature.clone());
        input.set(Feature::Humidity, dash.humidity.clone());
        input.set(Feature::Ph, dash.ph.clone());
        input.set(Feature::Rainfall, dash.rainfall.clone());
        self.active_tab = Tab::NpkCalculations;
    }

    pub fn show_about(&mut self) {
        self.dialog = Some(Dialog::About);
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::encoder::ClassLabels;
    use crate::model::features::FeatureVector;
    use crate::model::network::{Model, ProbabilityDistribution};
    use crate::model::scaler::{NormalizedVector, Scaler};

    struct PassThrough;

    impl Scaler for PassThrough {
        fn transform(&self, features: &FeatureVector) -> NormalizedVector {
            NormalizedVector(features.to_array().to_vec())
        }
        fn dimension(&self) -> usize {
            Feature::COUNT
        }
    }

    /// Wet inputs (rainfall > 150) are rice, everything else maize.
    struct RainModel;

    impl Model for RainModel {
        fn predict_distribution(&self, input: &NormalizedVector) -> ProbabilityDistribution {
            let rain = input.as_slice()[Feature::Rainfall.index()];
            if rain > 150.0 {
                ProbabilityDistribution(vec![0.2, 0.8])
            } else {
                ProbabilityDistribution(vec![0.9, 0.1])
            }
        }
        fn input_dim(&self) -> usize {
            Feature::COUNT
        }
        fn num_classes(&self) -> usize {
            2
        }
    }

    fn context() -> PredictionContext {
        PredictionContext::new(
            PassThrough,
            RainModel,
            ClassLabels::new(vec!["maize".into(), "rice".into()]),
        )
    }

    fn filled(rainfall: &str) -> FeatureInput {
        FeatureInput::default()
            .with(Feature::Nitrogen, "20")
            .with(Feature::Phosphorus, "15")
            .with(Feature::Potassium, "10")
            .with(Feature::Temperature, "25")
            .with(Feature::Humidity, "60")
            .with(Feature::Ph, "6.5")
            .with(Feature::Rainfall, rainfall)
    }

    #[test]
    fn successful_prediction_updates_result_label() {
        let mut state = AppState::default();
        state.npk_input = filled("200");
        state.run_prediction(&context());
        assert_eq!(state.result_text, "Predicted Plant Type: rice");
        assert!(state.dialog.is_none());
        assert_eq!(state.last_prediction.as_ref().map(|p| p.class_index), Some(1));
    }

    #[test]
    fn blank_ph_raises_input_error_and_keeps_previous_result() {
        let ctx = context();
        let mut state = AppState::default();
        state.npk_input = filled("100");
        state.run_prediction(&ctx);
        assert_eq!(state.result_text, "Predicted Plant Type: maize");

        state.npk_input.set(Feature::Ph, "");
        state.run_prediction(&ctx);
        assert_eq!(state.result_text, "Predicted Plant Type: maize");
        assert_eq!(
            state.dialog,
            Some(Dialog::InputError {
                detail: "ph is empty".into()
            })
        );
        assert_eq!(state.last_prediction.as_ref().map(|p| p.label.as_str()), Some("maize"));
    }

    #[test]
    fn input_error_before_any_prediction_leaves_label_blank() {
        let mut state = AppState::default();
        state.npk_input = filled("lots");
        state.run_prediction(&context());
        assert!(state.result_text.is_empty());
        assert!(matches!(state.dialog, Some(Dialog::InputError { .. })));

        state.dismiss_dialog();
        assert!(state.dialog.is_none());
    }

    #[test]
    fn dashboard_values_fill_the_form() {
        let mut state = AppState::default();
        state.dashboard = DashboardInput {
            ph: "6.5".into(),
            humidity: "60".into(),
            temperature: "25".into(),
            rainfall: "100".into(),
        };
        state.copy_dashboard_to_form();
        assert_eq!(state.active_tab, Tab::NpkCalculations);
        assert_eq!(
            state.npk_input.parse().unwrap().to_array(),
            [20.0, 15.0, 10.0, 25.0, 60.0, 6.5, 100.0]
        );
    }
}

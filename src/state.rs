use std::path::Path;

use crate::color::TierColors;
use crate::config::AppConfig;
use crate::predict::{Prediction, QueryInput, EXPERIENCE_RANGES};
use crate::service::{ModelService, TrainedBundle};

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Shared model handle; trained on first use.
    pub service: &'static ModelService,

    /// Form inputs as currently typed.
    pub form: QueryInput,

    /// Inputs and result of the last successful search.
    pub last_query: Option<QueryInput>,
    pub prediction: Option<Prediction>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub colors: TierColors,
}

impl AppState {
    pub fn new(config: AppConfig, service: &'static ModelService) -> Self {
        Self {
            config,
            service,
            form: QueryInput {
                experience: EXPERIENCE_RANGES[0].to_string(),
                ..QueryInput::default()
            },
            last_query: None,
            prediction: None,
            status_message: None,
            colors: TierColors::default(),
        }
    }

    pub fn bundle(&self) -> Option<&'static TrainedBundle> {
        self.service.get()
    }

    /// Train from `path` unless a model already exists.
    pub fn load_dataset(&mut self, path: &Path) {
        if let Some(existing) = self.bundle() {
            let source = existing
                .source
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            log::warn!("Ignoring {}; model already trained from {source}", path.display());
            self.status_message = Some(format!(
                "Model already trained from {source}; restart to use another dataset."
            ));
            return;
        }

        match self.service.get_or_train(path, &self.config.tree) {
            Ok(bundle) => {
                log::info!(
                    "Model ready: {} listings, {} duplicates dropped",
                    bundle.training_rows(),
                    bundle.duplicates_dropped
                );
                self.config.data_path = Some(path.to_path_buf());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to train model: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Validate the form, make sure a model exists and run a prediction.
    pub fn submit(&mut self) {
        if self.form.validate().is_err() {
            self.status_message = Some(MISSING_FIELDS_MESSAGE.to_string());
            return;
        }

        if self.bundle().is_none() {
            match self.config.data_path.clone() {
                Some(path) => self.load_dataset(&path),
                None => {
                    self.status_message =
                        Some("Open a job listings file first (File → Open…).".to_string());
                    return;
                }
            }
        }
        let Some(bundle) = self.bundle() else {
            return;
        };

        match bundle.predict(&self.form) {
            Ok(prediction) => {
                self.last_query = Some(self.form.clone());
                self.prediction = Some(prediction);
                self.status_message = None;
            }
            Err(_) => self.status_message = Some(MISSING_FIELDS_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeParams;
    use crate::data::prepare::tests::raw;
    use crate::data::model::Tier;

    fn trained_service() -> &'static ModelService {
        let service: &'static ModelService = Box::leak(Box::new(ModelService::new()));
        let rows = vec![
            raw("Accenture", "Lead Engineer", "4-6 Years"),
            raw("Oracle", "Analyst", "1-3 Years"),
        ];
        service.install(TrainedBundle::build(&rows, &TreeParams::default()).unwrap());
        service
    }

    fn filled(state: &mut AppState) {
        state.form.company = "Accenture".into();
        state.form.title = "Lead Engineer".into();
        state.form.skills = "Rust".into();
        state.form.location = "Pune".into();
    }

    #[test]
    fn empty_form_shows_validation_message() {
        let mut state = AppState::new(AppConfig::default(), trained_service());
        state.submit();
        assert_eq!(state.status_message.as_deref(), Some(MISSING_FIELDS_MESSAGE));
        assert!(state.prediction.is_none());
    }

    #[test]
    fn filled_form_produces_a_prediction() {
        let mut state = AppState::new(AppConfig::default(), trained_service());
        filled(&mut state);
        state.submit();

        let p = state.prediction.as_ref().unwrap();
        assert_eq!(p.industry, "IT");
        assert!(Tier::ALL.contains(&p.tier));
        assert_eq!(state.last_query.as_ref().map(|q| q.experience.as_str()), Some("0-1 Years"));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn no_dataset_asks_for_a_file() {
        let service: &'static ModelService = Box::leak(Box::new(ModelService::new()));
        let mut state = AppState::new(AppConfig::default(), service);
        filled(&mut state);
        state.submit();
        assert!(state.prediction.is_none());
        assert!(state.status_message.unwrap().contains("File"));
    }
}

use crate::config::Config;
use crate::error::Result;
use crate::logic::{
    spawn_prediction, FormController, InputField, OutcomeReceiver, OutcomeSender,
    PredictionService,
};
use crate::models::PredictionResult;
use crate::ui::screens::FormField;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    pub should_quit: bool,
    pub form: FormController,
    pub focused_field: FormField,
    pub show_result: bool,
    pub status_message: Option<String>,

    outcome_tx: OutcomeSender,
    outcome_rx: OutcomeReceiver,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut form =
            FormController::new(config.form.initial_crop(), config.form.initial_month());
        for (field, value) in config.form.prefill_values() {
            form.set_value(field, value);
        }
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            form,
            focused_field: FormField::Crop,
            show_result: false,
            status_message: None,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Cycle the focused select. No-op on text inputs and while a
    /// prediction is in flight.
    pub fn cycle_select(&mut self, forward: bool) {
        if self.form.is_busy() {
            return;
        }
        let state = self.form.state();
        match self.focused_field {
            FormField::Crop => {
                let crop = state.crop();
                self.form
                    .set_crop(if forward { crop.next() } else { crop.prev() });
            }
            FormField::Month => {
                let month = state.month();
                self.form
                    .set_month(if forward { month.next() } else { month.prev() });
            }
            FormField::Input(_) => {}
        }
    }

    /// Focused text input, if it can be edited right now.
    fn focused_input(&self) -> Option<InputField> {
        if self.form.is_busy() {
            return None;
        }
        match self.focused_field {
            FormField::Input(field) => Some(field),
            _ => None,
        }
    }

    /// Type into the focused input. Only characters that can appear in a
    /// number are accepted.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(field) = self.focused_input() else {
            return false;
        };
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return false;
        }
        self.form.push_char(field, c);
        true
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_input() {
            self.form.pop_char(field);
        }
    }

    /// Start a submission on the runtime. Ignored while one is in flight.
    pub fn submit<S: PredictionService>(&mut self, service: &Arc<S>) {
        self.show_result = false;
        if let Some(request) = self.form.begin_submit() {
            spawn_prediction(Arc::clone(service), request, self.outcome_tx.clone());
        }
    }

    /// Apply any outcomes delivered since the last call.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    pub fn apply_outcome(&mut self, outcome: Result<PredictionResult>) {
        if self.form.complete_submit(outcome) && self.form.state().prediction().is_some() {
            self.show_result = true;
        }
    }

    pub fn close_result(&mut self) {
        self.show_result = false;
    }

    /// Verbose text for the result dialog, when a prediction is available.
    pub fn result_text(&self) -> Option<(String, String)> {
        self.form.state().result_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CropYieldError;
    use crate::logic::form::tests::FakeService;
    use crate::models::{ClimateField, Crop, Month, SoilField};

    fn test_config() -> Config {
        let mut config = Config::default();
        config.form.default_crop = "cassava".into();
        config.form.default_month = Some("Jun".into());
        config
    }

    fn fill(app: &mut App) {
        let values = [
            (InputField::Climate(ClimateField::MinTemp), "22"),
            (InputField::Climate(ClimateField::MaxTemp), "30"),
            (InputField::Climate(ClimateField::Rainfall), "120"),
            (InputField::Soil(SoilField::Nitrogen), "70"),
            (InputField::Soil(SoilField::Phosphorus), "75"),
            (InputField::Soil(SoilField::Potassium), "105"),
            (InputField::Soil(SoilField::Ph), "6.5"),
            (InputField::Soil(SoilField::OrganicCarbon), "5"),
            (InputField::Soil(SoilField::SoilMoisture), "50"),
        ];
        for (field, value) in values {
            app.form.set_value(field, value);
        }
    }

    async fn wait_until_idle(app: &mut App) {
        for _ in 0..100 {
            app.poll_outcomes();
            if !app.form.is_busy() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("submission never completed");
    }

    #[test]
    fn app_starts_with_configured_defaults() {
        let app = App::new(&test_config());
        assert_eq!(app.form.state().crop(), Crop::Cassava);
        assert_eq!(app.form.state().month(), Month::Jun);
        assert_eq!(app.focused_field, FormField::Crop);
        assert!(!app.show_result);
    }

    #[test]
    fn app_applies_prefill() {
        let mut config = test_config();
        config.form.prefill.insert("ph".into(), 6.5);
        let app = App::new(&config);
        assert_eq!(app.form.state().soil_value(SoilField::Ph), "6.5");
    }

    #[test]
    fn cycling_selects_updates_warning() {
        let mut app = App::new(&test_config());
        app.cycle_select(true);
        assert_eq!(app.form.state().crop(), Crop::Cocoa);
        assert_eq!(app.form.state().warning(), "");

        app.next_field();
        for _ in 0..5 {
            app.cycle_select(false);
        }
        assert_eq!(app.form.state().month(), Month::Jan);
        assert!(!app.form.state().warning().is_empty());
    }

    #[test]
    fn typing_only_accepts_numeric_characters() {
        let mut app = App::new(&test_config());
        assert!(!app.input_char('5'), "selects take no text");

        app.next_field();
        app.next_field();
        let field = InputField::Climate(ClimateField::MinTemp);
        assert_eq!(app.focused_field, FormField::Input(field));

        for c in "-2x.5".chars() {
            app.input_char(c);
        }
        assert_eq!(app.form.state().value(field), "-2.5");

        app.backspace();
        assert_eq!(app.form.state().value(field), "-2.");
    }

    #[tokio::test]
    async fn submit_opens_result_on_success() {
        let service = Arc::new(FakeService::new(|| Ok(PredictionResult::new(3.4567))));
        let mut app = App::new(&test_config());
        fill(&mut app);

        app.submit(&service);
        assert!(app.form.is_busy());

        // Re-entry while busy is ignored
        app.submit(&service);

        wait_until_idle(&mut app).await;

        assert_eq!(service.call_count(), 1);
        assert!(app.show_result);
        let (headline, body) = app.result_text().unwrap();
        assert_eq!(headline, "3.46 t/ha");
        assert!(body.contains("Cassava planted in June"));

        app.close_result();
        assert!(!app.show_result);
    }

    #[tokio::test]
    async fn edits_are_ignored_while_busy() {
        let service = Arc::new(FakeService::new(|| Ok(PredictionResult::new(2.0))));
        let mut app = App::new(&test_config());
        fill(&mut app);

        app.submit(&service);
        assert!(app.form.is_busy());

        app.cycle_select(true);
        app.next_field();
        app.cycle_select(true);
        app.next_field();
        let min_temp = InputField::Climate(ClimateField::MinTemp);
        assert_eq!(app.focused_field, FormField::Input(min_temp));
        assert!(!app.input_char('9'));
        app.backspace();

        assert_eq!(app.form.state().crop(), Crop::Cassava);
        assert_eq!(app.form.state().month(), Month::Jun);
        assert_eq!(app.form.state().value(min_temp), "22");

        wait_until_idle(&mut app).await;
        let (_, body) = app.result_text().unwrap();
        assert!(body.contains("Cassava planted in June"), "{}", body);
    }

    #[tokio::test]
    async fn changing_selects_after_success_keeps_result_label() {
        let service = Arc::new(FakeService::new(|| Ok(PredictionResult::new(2.0))));
        let mut app = App::new(&test_config());
        fill(&mut app);

        app.submit(&service);
        wait_until_idle(&mut app).await;
        app.close_result();
        app.cycle_select(true);
        assert_eq!(app.form.state().crop(), Crop::Cocoa);

        let (_, body) = app.result_text().unwrap();
        assert!(body.contains("Cassava planted in June"), "{}", body);
    }

    #[tokio::test]
    async fn failed_submit_shows_error_not_dialog() {
        let service = Arc::new(FakeService::new(|| {
            Err(CropYieldError::Transport("connection refused".into()))
        }));
        let mut app = App::new(&test_config());
        fill(&mut app);

        app.submit(&service);
        wait_until_idle(&mut app).await;

        assert!(!app.show_result);
        assert_eq!(app.form.state().error_message(), Some("connection refused"));
        assert!(app.result_text().is_none());
    }

    #[tokio::test]
    async fn invalid_form_never_spawns() {
        let service = Arc::new(FakeService::new(|| Ok(PredictionResult::new(1.0))));
        let mut app = App::new(&test_config());

        app.submit(&service);
        tokio::task::yield_now().await;
        app.poll_outcomes();

        assert_eq!(service.call_count(), 0);
        assert!(app.form.state().error_message().is_some());
    }
}

use super::advisory::planting_warning;
use super::submission::{build_request, predict_guarded, PredictionService};
use super::validation::validate;
use crate::error::{CropYieldError, FailureKind, Result};
use crate::models::{ClimateField, Crop, Month, PredictionRequest, PredictionResult, SoilField};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A free-text numeric input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputField {
    Climate(ClimateField),
    Soil(SoilField),
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Climate(f) => f.label(),
            InputField::Soil(f) => f.label(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            InputField::Climate(f) => f.unit(),
            InputField::Soil(f) => f.spec().unit,
        }
    }

    /// Resolve a payload key (`mintemp`, `nitrogen`, ...) to its input.
    pub fn from_name(name: &str) -> Option<Self> {
        ClimateField::from_name(name)
            .map(InputField::Climate)
            .or_else(|| SoilField::from_name(name).map(InputField::Soil))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Lifecycle of the most recent submit attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Request in flight for this crop and month.
    Submitting { crop: Crop, month: Month },
    /// Yield for the crop and month that were submitted, which may differ
    /// from what the selects show now.
    Succeeded {
        result: PredictionResult,
        crop: Crop,
        month: Month,
    },
    Failed(SubmissionFailure),
}

#[derive(Debug, Clone)]
pub struct FormState {
    crop: Crop,
    month: Month,
    climate: BTreeMap<ClimateField, String>,
    soil: BTreeMap<SoilField, String>,
    warning: String,
    status: SubmissionStatus,
}

impl FormState {
    pub fn new(crop: Crop, month: Month) -> Self {
        Self {
            crop,
            month,
            climate: ClimateField::all()
                .iter()
                .map(|f| (*f, String::new()))
                .collect(),
            soil: SoilField::all()
                .iter()
                .map(|f| (*f, String::new()))
                .collect(),
            warning: planting_warning(crop, month),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn crop(&self) -> Crop {
        self.crop
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn climate_value(&self, field: ClimateField) -> &str {
        self.climate.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn soil_value(&self, field: SoilField) -> &str {
        self.soil.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn value(&self, field: InputField) -> &str {
        match field {
            InputField::Climate(f) => self.climate_value(f),
            InputField::Soil(f) => self.soil_value(f),
        }
    }

    pub fn set_value(&mut self, field: InputField, value: impl Into<String>) {
        let value = value.into();
        match field {
            InputField::Climate(f) => {
                self.climate.insert(f, value);
            }
            InputField::Soil(f) => {
                self.soil.insert(f, value);
            }
        }
    }

    fn value_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Climate(f) => self.climate.entry(f).or_default(),
            InputField::Soil(f) => self.soil.entry(f).or_default(),
        }
    }

    /// Advisory text, empty when the month suits the crop.
    pub fn warning(&self) -> &str {
        &self.warning
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed(failure) => Some(&failure.message),
            _ => None,
        }
    }

    pub fn prediction(&self) -> Option<PredictionResult> {
        match self.status {
            SubmissionStatus::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Result headline and verbose message, labelled with what was submitted.
    pub fn result_text(&self) -> Option<(String, String)> {
        match &self.status {
            SubmissionStatus::Succeeded {
                result,
                crop,
                month,
            } => Some((result.headline(), result.verbose_message(*crop, *month))),
            _ => None,
        }
    }
}

/// Sole owner of the form state. Edits and submissions go through here so
/// the warning stays in sync and only one request is in flight.
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new(crop: Crop, month: Month) -> Self {
        Self {
            state: FormState::new(crop, month),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state.status, SubmissionStatus::Submitting { .. })
    }

    pub fn set_crop(&mut self, crop: Crop) {
        self.state.crop = crop;
        self.refresh_warning();
    }

    pub fn set_month(&mut self, month: Month) {
        self.state.month = month;
        self.refresh_warning();
    }

    pub fn set_value(&mut self, field: InputField, value: impl Into<String>) {
        self.state.set_value(field, value);
    }

    pub fn push_char(&mut self, field: InputField, c: char) {
        self.state.value_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: InputField) {
        self.state.value_mut(field).pop();
    }

    fn refresh_warning(&mut self) {
        self.state.warning = planting_warning(self.state.crop, self.state.month);
    }

    /// Start a submit attempt.
    ///
    /// Returns the request to send when validation passes, leaving the form
    /// in `Submitting`. Returns `None` when a request is already in flight
    /// (nothing changes) or when validation fails (status becomes `Failed`).
    pub fn begin_submit(&mut self) -> Option<PredictionRequest> {
        if self.is_busy() {
            tracing::debug!("Submit ignored: prediction already in flight");
            return None;
        }

        self.state.status = SubmissionStatus::Idle;

        let request = validate(&self.state).and_then(|()| build_request(&self.state));
        match request {
            Ok(request) => {
                tracing::info!(
                    crop = request.crop.id(),
                    month = request.month.id(),
                    "Submitting prediction request"
                );
                self.state.status = SubmissionStatus::Submitting {
                    crop: request.crop,
                    month: request.month,
                };
                Some(request)
            }
            Err(e) => {
                tracing::debug!("Validation failed: {}", e);
                self.fail(e);
                None
            }
        }
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// Outcomes that arrive when nothing is in flight are dropped. Returns
    /// whether the outcome was applied.
    pub fn complete_submit(&mut self, outcome: Result<PredictionResult>) -> bool {
        let SubmissionStatus::Submitting { crop, month } = self.state.status else {
            tracing::debug!("Discarding prediction outcome: no submission in flight");
            return false;
        };

        match outcome {
            Ok(result) => {
                tracing::info!(
                    yield_tons_per_hectare = result.yield_tons_per_hectare,
                    "Prediction received"
                );
                self.state.status = SubmissionStatus::Succeeded {
                    result,
                    crop,
                    month,
                };
            }
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                self.fail(e);
            }
        }
        true
    }

    /// Run one full submit attempt against `service`. A panicking service
    /// ends the attempt as a transport failure.
    pub async fn submit<S: PredictionService>(&mut self, service: &Arc<S>) {
        let Some(request) = self.begin_submit() else {
            return;
        };
        let outcome = predict_guarded(Arc::clone(service), request).await;
        self.complete_submit(outcome);
    }

    fn fail(&mut self, error: CropYieldError) {
        let mut message = error.to_string();
        if message.trim().is_empty() {
            message = error.failure_kind().as_str().to_string();
        }
        self.state.status = SubmissionStatus::Failed(SubmissionFailure {
            kind: error.failure_kind(),
            message,
        });
    }
}

use super::form::FormState;
use super::validation::parse_number;
use crate::error::{CropYieldError, Result};
use crate::models::{ClimateField, PredictionRequest, PredictionResult, SoilField};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Remote yield prediction: request in, yield or failure out.
pub trait PredictionService: Send + Sync + 'static {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult>> + Send;
}

pub type OutcomeSender = mpsc::UnboundedSender<Result<PredictionResult>>;
pub type OutcomeReceiver = mpsc::UnboundedReceiver<Result<PredictionResult>>;

/// Snapshot the form into a request. Expects a form that passed validation.
pub fn build_request(form: &FormState) -> Result<PredictionRequest> {
    let climate = |field: ClimateField| {
        parse_number(form.climate_value(field)).ok_or_else(|| {
            CropYieldError::Validation(format!("Please enter a numeric {}.", field.label()))
        })
    };

    let soil: BTreeMap<SoilField, f64> = SoilField::all()
        .iter()
        .map(|field| {
            parse_number(form.soil_value(*field))
                .map(|value| (*field, value))
                .ok_or_else(|| {
                    CropYieldError::Validation(format!(
                        "Please enter a valid {} between {}.",
                        field.label(),
                        field.spec().range_text()
                    ))
                })
        })
        .collect::<Result<_>>()?;

    Ok(PredictionRequest {
        crop: form.crop(),
        month: form.month(),
        maxtemp: climate(ClimateField::MaxTemp)?,
        mintemp: climate(ClimateField::MinTemp)?,
        rainfall: climate(ClimateField::Rainfall)?,
        soil,
    })
}

/// Call `service` on its own task. A panic inside the service comes back as
/// a transport failure instead of unwinding into the caller.
pub async fn predict_guarded<S: PredictionService>(
    service: Arc<S>,
    request: PredictionRequest,
) -> Result<PredictionResult> {
    let call = tokio::spawn(async move { service.predict(&request).await });
    match call.await {
        Ok(outcome) => outcome,
        Err(e) => Err(CropYieldError::Transport(format!(
            "Prediction request aborted: {}",
            e
        ))),
    }
}

/// Run the prediction on the runtime and deliver the outcome over `outcomes`.
///
/// A panic inside the service is reported as a transport failure so the form
/// always leaves `Submitting`. If the receiver is gone (the form was closed)
/// the outcome is dropped.
pub fn spawn_prediction<S: PredictionService>(
    service: Arc<S>,
    request: PredictionRequest,
    outcomes: OutcomeSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = predict_guarded(service, request).await;
        if outcomes.send(outcome).is_err() {
            tracing::debug!("Form closed before prediction completed; outcome discarded");
        }
    })
}

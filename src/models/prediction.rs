use super::{Crop, Month, SoilField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Snapshot of a validated form, serialized as the service's JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub crop: Crop,
    pub month: Month,
    pub maxtemp: f64,
    pub mintemp: f64,
    pub rainfall: f64,
    #[serde(flatten)]
    pub soil: BTreeMap<SoilField, f64>,
}

/// Estimated yield in tons per hectare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub yield_tons_per_hectare: f64,
}

impl PredictionResult {
    pub fn new(yield_tons_per_hectare: f64) -> Self {
        Self {
            yield_tons_per_hectare,
        }
    }

    pub fn headline(&self) -> String {
        format!("{:.2} t/ha", self.yield_tons_per_hectare)
    }

    pub fn verbose_message(&self, crop: Crop, month: Month) -> String {
        format!(
            "Based on the provided details for {} planted in {}, your estimated crop yield is \
             approximately {:.2} tons per hectare. This prediction factors in your temperature \
             range, rainfall and soil nutrient profile, helping you plan your harvest with \
             confidence.",
            crop, month, self.yield_tons_per_hectare
        )
    }
}

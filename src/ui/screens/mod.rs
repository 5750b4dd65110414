pub mod prediction_form;

pub use prediction_form::{FormField, PredictionFormScreen};

pub mod advisory;
pub mod form;
pub mod submission;
pub mod validation;

pub use form::{FormController, FormState, InputField, SubmissionStatus};
pub use submission::{spawn_prediction, OutcomeReceiver, OutcomeSender, PredictionService};

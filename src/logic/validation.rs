use super::form::FormState;
use crate::error::{CropYieldError, Result};
use crate::models::{ClimateField, SoilField};

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Please fill in all required fields: Minimum Temperature, Maximum Temperature and Rainfall.";

/// Parse a raw input as a finite number. Surrounding whitespace is ignored.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check the form and report the first problem found.
///
/// Climate inputs are checked first and as a group: any blank one fails with
/// [`REQUIRED_FIELDS_MESSAGE`] no matter what the soil inputs hold. Soil
/// inputs are then checked in registry order against their inclusive range.
pub fn validate(form: &FormState) -> Result<()> {
    if ClimateField::all()
        .iter()
        .any(|f| form.climate_value(*f).trim().is_empty())
    {
        return Err(CropYieldError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
    }

    for field in ClimateField::all() {
        if parse_number(form.climate_value(*field)).is_none() {
            return Err(CropYieldError::Validation(format!(
                "Please enter a numeric {}.",
                field.label()
            )));
        }
    }

    for field in SoilField::all() {
        let spec = field.spec();
        let in_range = parse_number(form.soil_value(*field)).is_some_and(|v| spec.contains(v));
        if !in_range {
            return Err(CropYieldError::Validation(format!(
                "Please enter a valid {} between {}.",
                spec.label,
                spec.range_text()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::form::{tests::filled_form, InputField};
    use crate::models::Month;

    fn message(form: &FormState) -> String {
        match validate(form) {
            Err(CropYieldError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn filled_form_is_valid() {
        assert!(validate(&filled_form(Month::Jun)).is_ok());
    }

    #[test]
    fn any_blank_climate_field_gives_generic_message() {
        for climate in ClimateField::all() {
            let mut form = filled_form(Month::Jun);
            form.set_value(InputField::Climate(*climate), "");
            assert_eq!(message(&form), REQUIRED_FIELDS_MESSAGE);

            // Still generic when soil input is also broken
            form.set_value(InputField::Soil(SoilField::Ph), "42");
            assert_eq!(message(&form), REQUIRED_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut form = filled_form(Month::Jun);
        form.set_value(InputField::Climate(ClimateField::Rainfall), "   ");
        assert_eq!(message(&form), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn non_numeric_climate_field_is_named() {
        let mut form = filled_form(Month::Jun);
        form.set_value(InputField::Climate(ClimateField::MaxTemp), "hot");
        assert_eq!(message(&form), "Please enter a numeric Maximum Temperature.");
    }

    #[test]
    fn out_of_range_soil_field_is_named() {
        for field in SoilField::all() {
            let spec = field.spec();
            for bad in [spec.min - 1.0, spec.max + 1.0] {
                let mut form = filled_form(Month::Jun);
                form.set_value(InputField::Soil(*field), bad.to_string());
                let msg = message(&form);
                assert!(msg.contains(spec.label), "{} not named in {}", spec.name, msg);
                assert!(msg.contains(&spec.range_text()));
            }
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        for field in SoilField::all() {
            let spec = field.spec();
            for edge in [spec.min, spec.max] {
                let mut form = filled_form(Month::Jun);
                form.set_value(InputField::Soil(*field), edge.to_string());
                assert!(validate(&form).is_ok(), "{} rejected {}", spec.name, edge);
            }
        }
    }

    #[test]
    fn blank_soil_field_fails_with_range_message() {
        let mut form = filled_form(Month::Jun);
        form.set_value(InputField::Soil(SoilField::Potassium), "");
        assert_eq!(
            message(&form),
            "Please enter a valid Potassium between 5mg/kg and 205mg/kg."
        );
    }

    #[test]
    fn first_failing_soil_field_wins() {
        let mut form = filled_form(Month::Jun);
        form.set_value(InputField::Soil(SoilField::SoilMoisture), "500");
        form.set_value(InputField::Soil(SoilField::Phosphorus), "1");
        let msg = message(&form);
        assert!(msg.contains("Phosphorus"));
        assert!(!msg.contains("Soil Moisture"));
    }

    #[test]
    fn unitless_range_message() {
        let mut form = filled_form(Month::Jun);
        form.set_value(InputField::Soil(SoilField::Ph), "12");
        assert_eq!(
            message(&form),
            "Please enter a valid Soil pH between 3.5 and 9.9."
        );
    }
}

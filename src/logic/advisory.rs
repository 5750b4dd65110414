use crate::models::{Crop, Month};

/// Advisory text for planting `crop` in `month`, or an empty string when the
/// month is within the crop's ideal window. Never blocks submission.
pub fn planting_warning(crop: Crop, month: Month) -> String {
    if crop.is_ideal_month(month) {
        return String::new();
    }

    let ideal: Vec<&str> = crop.ideal_months().iter().map(|m| m.id()).collect();
    format!(
        "{} is outside the ideal planting window for {} (ideal: {}). Yields may be lower than expected.",
        month,
        crop,
        ideal.join(", ")
    )
}

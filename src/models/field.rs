use serde::{Deserialize, Serialize};

/// Static metadata for one range-checked numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Range rendered as `<min><unit> and <max><unit>`.
    pub fn range_text(&self) -> String {
        format!("{}{} and {}{}", self.min, self.unit, self.max, self.unit)
    }
}

/// Soil parameters, in validation order.
pub const SOIL_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        name: "nitrogen",
        label: "Nitrogen",
        unit: "mg/kg",
        min: 0.0,
        max: 140.0,
    },
    FieldSpec {
        name: "phosphorus",
        label: "Phosphorus",
        unit: "mg/kg",
        min: 5.0,
        max: 145.0,
    },
    FieldSpec {
        name: "potassium",
        label: "Potassium",
        unit: "mg/kg",
        min: 5.0,
        max: 205.0,
    },
    FieldSpec {
        name: "ph",
        label: "Soil pH",
        unit: "",
        min: 3.5,
        max: 9.9,
    },
    FieldSpec {
        name: "organic_carbon",
        label: "Organic Carbon",
        unit: "%",
        min: 0.0,
        max: 10.0,
    },
    FieldSpec {
        name: "soil_moisture",
        label: "Soil Moisture",
        unit: "%",
        min: 0.0,
        max: 100.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    OrganicCarbon,
    SoilMoisture,
}

impl SoilField {
    pub fn all() -> &'static [SoilField] {
        &[
            SoilField::Nitrogen,
            SoilField::Phosphorus,
            SoilField::Potassium,
            SoilField::Ph,
            SoilField::OrganicCarbon,
            SoilField::SoilMoisture,
        ]
    }

    pub fn spec(&self) -> &'static FieldSpec {
        &SOIL_FIELDS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

/// Required weather inputs. Only presence is checked, not range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClimateField {
    MinTemp,
    MaxTemp,
    Rainfall,
}

impl ClimateField {
    pub fn all() -> &'static [ClimateField] {
        &[
            ClimateField::MinTemp,
            ClimateField::MaxTemp,
            ClimateField::Rainfall,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClimateField::MinTemp => "mintemp",
            ClimateField::MaxTemp => "maxtemp",
            ClimateField::Rainfall => "rainfall",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClimateField::MinTemp => "Minimum Temperature",
            ClimateField::MaxTemp => "Maximum Temperature",
            ClimateField::Rainfall => "Rainfall",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ClimateField::MinTemp | ClimateField::MaxTemp => "°C",
            ClimateField::Rainfall => "mm",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

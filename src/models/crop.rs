use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    #[default]
    Cassava,
    Cocoa,
}

impl Crop {
    pub fn all() -> &'static [Crop] {
        &[Crop::Cassava, Crop::Cocoa]
    }

    /// Identifier sent to the prediction service.
    pub fn id(&self) -> &'static str {
        match self {
            Crop::Cassava => "cassava",
            Crop::Cocoa => "cocoa",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Cassava => "Cassava",
            Crop::Cocoa => "Cocoa",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cassava" => Some(Crop::Cassava),
            "cocoa" | "cacao" => Some(Crop::Cocoa),
            _ => None,
        }
    }

    /// Months in which planting this crop is considered ideal.
    pub fn ideal_months(&self) -> &'static [Month] {
        use Month::*;
        match self {
            Crop::Cassava => &[Mar, Apr, May, Jun, Jul, Aug, Sep, Oct],
            Crop::Cocoa => &[Apr, May, Jun, Jul],
        }
    }

    pub fn is_ideal_month(&self, month: Month) -> bool {
        self.ideal_months().contains(&month)
    }

    pub fn next(&self) -> Self {
        match self {
            Crop::Cassava => Crop::Cocoa,
            Crop::Cocoa => Crop::Cassava,
        }
    }

    pub fn prev(&self) -> Self {
        // Two variants, so cycling either way lands on the other one.
        self.next()
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub fn all() -> &'static [Month] {
        use Month::*;
        &[Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov, Dec]
    }

    /// Short identifier sent to the prediction service.
    pub fn id(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }

    /// Calendar month number, 1-based.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<Self> {
        Self::all().get(n.checked_sub(1)? as usize).copied()
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.id().to_lowercase() == s || m.as_str().to_lowercase() == s)
    }

    pub fn current() -> Self {
        use chrono::Datelike;
        Self::from_number(chrono::Local::now().month()).unwrap_or(Month::Jan)
    }

    pub fn next(&self) -> Self {
        Self::from_number(self.number() % 12 + 1).unwrap_or(Month::Jan)
    }

    pub fn prev(&self) -> Self {
        Self::from_number((self.number() + 10) % 12 + 1).unwrap_or(Month::Dec)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

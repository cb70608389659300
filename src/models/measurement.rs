use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One air-quality reading: a parameter measured at a location and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Measurement {
    pub date: NaiveDateTime,

    pub location: String,

    pub parameter: String,

    pub value: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Measurement {
    pub fn new(
        date: NaiveDateTime,
        location: impl Into<String>,
        parameter: impl Into<String>,
        value: f64,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            date,
            location: location.into(),
            parameter: parameter.into(),
            value,
            lat,
            lon,
        }
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.validate().is_ok()
    }
}

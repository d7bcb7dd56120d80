use serde::{Deserialize, Serialize};

/// # A single observed lap as seen by the degradation estimator
/// every field may be missing, a missing value makes the lap invalid rather than zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    pub compound: Option<String>,
    pub tyre_age: Option<u32>,
    pub lap_time: Option<f64>,
}

impl LapRecord {
    pub fn new(compound: &str, tyre_age: u32, lap_time: f64) -> LapRecord {
        LapRecord {
            compound: Some(compound.to_string()),
            tyre_age: Some(tyre_age),
            lap_time: Some(lap_time),
        }
    }

    /// # the compound label, if it is usable for grouping
    pub fn compound_label(&self) -> Option<&str> {
        match self.compound.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Some(label),
            _ => None,
        }
    }

    /// # the `(tyre age, lap time)` sample of this lap
    /// `None` when either value is missing or not a usable number.
    pub fn sample(&self) -> Option<(f64, f64)> {
        let tyre_age = self.tyre_age?;
        let lap_time = self.lap_time?;
        if !lap_time.is_finite() || lap_time < 0.0 {
            return None;
        }

        Some((tyre_age as f64, lap_time))
    }
}

/// # A lap of a session, attributed to a driver
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLap {
    pub driver: String,
    pub lap_number: u32,
    pub record: LapRecord,
}

impl SessionLap {
    /// # the json representation used by the frontend charts
    /// laps without a lap time cannot be plotted and are skipped.
    pub fn to_point(&self) -> Option<DriverLapPoint> {
        let lap_time = self.record.lap_time.filter(|time| time.is_finite())?;

        Some(DriverLapPoint {
            lap: self.lap_number,
            tyre_age: self.record.tyre_age,
            lap_time,
            compound: self.record.compound.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLapPoint {
    pub lap: u32,
    pub tyre_age: Option<u32>,
    pub lap_time: f64,
    pub compound: Option<String>,
}

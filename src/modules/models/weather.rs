use serde::{Deserialize, Serialize};

use crate::modules::helpers::math::Math;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub air_temperature: Option<f64>,
    pub track_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: bool,
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub samples: usize,
    pub avg_air_temperature: Option<f64>,
    pub avg_track_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub rainfall: bool,
}

impl WeatherSummary {
    /// # summarize the weather samples of a session
    /// averages are rounded to one decimal and skip samples missing that value.
    pub fn from_samples(samples: &[WeatherSample]) -> WeatherSummary {
        WeatherSummary {
            samples: samples.len(),
            avg_air_temperature: average(samples.iter().map(|s| s.air_temperature)),
            avg_track_temperature: average(samples.iter().map(|s| s.track_temperature)),
            avg_humidity: average(samples.iter().map(|s| s.humidity)),
            rainfall: samples.iter().any(|s| s.rainfall),
        }
    }
}

fn average<I: Iterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let values: Vec<f64> = values.flatten().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }

    Some(Math::round_float_to_n_decimals(Math::mean(&values), 1))
}

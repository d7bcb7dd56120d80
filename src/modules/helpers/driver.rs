use serde::{Deserialize, Serialize};

use crate::modules::helpers::math::Math;
use crate::modules::models::lap::SessionLap;

pub struct DriverHelpers {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInsights {
    pub starting_tyre: Option<String>,
    pub fastest_lap: f64,
    pub fastest_lap_number: u32,
    pub stop_count: usize,
    pub stops: Vec<TyreChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TyreChange {
    pub lap: u32,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DriverHelpers {
    /// # summarize the laps of a single driver
    /// a stop is counted every time the compound differs from the previous lap.
    ///
    /// ## Arguments
    /// * `laps` - the accurate laps of one driver, ordered by lap number
    ///
    /// ## Returns
    /// * `Option<DriverInsights>` - `None` when there is no timed lap
    pub fn get_insights(laps: &[SessionLap]) -> Option<DriverInsights> {
        let mut fastest: Option<(f64, u32)> = None;
        for lap in laps {
            let lap_time = match lap.record.lap_time {
                Some(time) if time.is_finite() => time,
                _ => continue,
            };
            if fastest.map_or(true, |(best, _)| lap_time < best) {
                fastest = Some((lap_time, lap.lap_number));
            }
        }
        let (fastest_lap, fastest_lap_number) = fastest?;

        let stops: Vec<TyreChange> = laps
            .windows(2)
            .filter(|pair| pair[0].record.compound != pair[1].record.compound)
            .map(|pair| TyreChange {
                lap: pair[1].lap_number,
                from: pair[0].record.compound.clone(),
                to: pair[1].record.compound.clone(),
            })
            .collect();

        Some(DriverInsights {
            starting_tyre: laps.first().and_then(|lap| lap.record.compound.clone()),
            fastest_lap: Math::round_float_to_n_decimals(fastest_lap, 3),
            fastest_lap_number,
            stop_count: stops.len(),
            stops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::models::lap::LapRecord;

    fn lap(lap_number: u32, compound: &str, lap_time: f64) -> SessionLap {
        SessionLap {
            driver: "ALO".to_string(),
            lap_number,
            record: LapRecord::new(compound, lap_number, lap_time),
        }
    }

    #[test]
    fn no_laps_no_insights() {
        assert_eq!(DriverHelpers::get_insights(&[]), None);
    }

    #[test]
    fn finds_fastest_lap_and_stops() {
        let laps = vec![
            lap(2, "SOFT", 95.4321),
            lap(3, "SOFT", 95.1),
            lap(15, "HARD", 94.98765),
            lap(16, "HARD", 95.2),
            lap(40, "MEDIUM", 95.0),
        ];

        let insights = DriverHelpers::get_insights(&laps).unwrap();

        assert_eq!(insights.starting_tyre.as_deref(), Some("SOFT"));
        assert_eq!(insights.fastest_lap, 94.988);
        assert_eq!(insights.fastest_lap_number, 15);
        assert_eq!(insights.stop_count, 2);
        assert_eq!(
            insights.stops[0],
            TyreChange { lap: 15, from: Some("SOFT".to_string()), to: Some("HARD".to_string()) }
        );
        assert_eq!(insights.stops[1].lap, 40);
    }

    #[test]
    fn serializes_in_camel_case() {
        let insights = DriverHelpers::get_insights(&[lap(5, "HARD", 97.0)]).unwrap();
        let json = serde_json::to_value(&insights).unwrap();
        assert_eq!(json["startingTyre"], "HARD");
        assert_eq!(json["fastestLapNumber"], 5);
        assert_eq!(json["stopCount"], 0);
    }
}

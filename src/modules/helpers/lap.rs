use crate::modules::models::driver::SessionDriver;
use crate::modules::models::lap::{LapRecord, SessionLap};
use crate::modules::models::session::SessionKind;
use crate::modules::timing_api::{ApiLap, ApiPitStop, ApiStint};

pub struct LapHelper {}

impl LapHelper {
    /// # Build the accurate laps of a session
    /// joins the timed laps with the tyre stints of each driver. laps of drivers that are
    /// not in `drivers` are dropped.
    ///
    /// ## Arguments
    /// * `kind` - the kind of session the laps were driven in
    /// * `drivers` - the drivers of the session, the output follows this order
    /// * `laps` - the timed laps
    /// * `stints` - the tyre stints
    /// * `pit_stops` - the pit stops, used to drop in-laps
    ///
    /// ## Returns
    /// * `Vec<SessionLap>` - the accurate laps, per driver ordered by lap number
    pub fn prepare_session_laps(
        kind: SessionKind,
        drivers: &[SessionDriver],
        laps: &[ApiLap],
        stints: &[ApiStint],
        pit_stops: &[ApiPitStop],
    ) -> Vec<SessionLap> {
        let mut session_laps: Vec<SessionLap> = Vec::new();

        for driver in drivers {
            let mut driver_laps: Vec<&ApiLap> = laps
                .iter()
                .filter(|lap| lap.driver_number == driver.number)
                .collect();
            driver_laps.sort_by_key(|lap| lap.lap_number);

            for lap in driver_laps {
                if !LapHelper::is_accurate(kind, lap, pit_stops) {
                    continue;
                }

                let stint = LapHelper::stint_of_lap(stints, driver.number, lap.lap_number);
                session_laps.push(SessionLap {
                    driver: driver.abbr.clone(),
                    lap_number: lap.lap_number,
                    record: LapRecord {
                        compound: stint
                            .and_then(|stint| stint.compound.as_deref())
                            .map(|compound| compound.trim().to_uppercase()),
                        tyre_age: stint.and_then(|stint| LapHelper::tyre_age(stint, lap.lap_number)),
                        lap_time: lap.lap_duration,
                    },
                });
            }
        }

        session_laps
    }

    /// # check if a lap is representative of pace
    /// in-laps, out-laps, untimed laps and the opening lap from a standing start are not.
    pub fn is_accurate(kind: SessionKind, lap: &ApiLap, pit_stops: &[ApiPitStop]) -> bool {
        let timed = matches!(lap.lap_duration, Some(duration) if duration.is_finite() && duration > 0.0);
        let out_lap = lap.is_pit_out_lap.unwrap_or(false);
        let in_lap = pit_stops
            .iter()
            .any(|stop| stop.driver_number == lap.driver_number && stop.lap_number == Some(lap.lap_number));
        let start_lap = kind.has_standing_start() && lap.lap_number <= 1;

        timed && !out_lap && !in_lap && !start_lap
    }

    fn stint_of_lap(stints: &[ApiStint], driver_number: u32, lap_number: u32) -> Option<&ApiStint> {
        stints.iter().find(|stint| {
            if stint.driver_number != driver_number {
                return false;
            }
            match (stint.lap_start, stint.lap_end) {
                (Some(start), Some(end)) => start <= lap_number && lap_number <= end,
                // the last stint of a running session has no end yet
                (Some(start), None) => start <= lap_number,
                _ => false,
            }
        })
    }

    fn tyre_age(stint: &ApiStint, lap_number: u32) -> Option<u32> {
        let age_at_start = stint.tyre_age_at_start?;
        let lap_start = stint.lap_start?;
        age_at_start.checked_add(lap_number.checked_sub(lap_start)?)
    }
}

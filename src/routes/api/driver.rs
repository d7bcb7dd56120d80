use log::{error, info};
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::macros::provider_error_handler::provider_handle_error_http;
use crate::modules::helpers::driver::{DriverHelpers, DriverInsights};
use crate::modules::models::driver::{is_valid_abbreviation, SessionDriver};
use crate::modules::models::lap::{DriverLapPoint, SessionLap};
use crate::modules::models::session::SessionQuery;
use crate::modules::timing_api::BoxedProvider;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # get the drivers of a session
#[get("/drivers/<year>/<event>/<session>")]
pub async fn get_drivers(
    year: i32,
    event: String,
    session: String,
    provider: &State<BoxedProvider>,
) -> Result<Json<ApiDrivers>, Status> {
    let query = provider_handle_error_http!(SessionQuery::new(year, &event, &session), "routes/api/driver:get_drivers", "session");
    let drivers = provider_handle_error_http!(provider.drivers(&query).await, "routes/api/driver:get_drivers", "drivers");

    Ok(Json(ApiDrivers { drivers }))
}

/// # get the accurate laps of a driver in a session
/// also answers with a summary of the laps, see `DriverHelpers::get_insights`.
#[get("/deg-data/<year>/<event>/<session>/<driver>")]
pub async fn get_driver_laps(
    year: i32,
    event: String,
    session: String,
    driver: String,
    provider: &State<BoxedProvider>,
) -> Result<Json<ApiDriverLaps>, Status> {
    if !is_valid_abbreviation(&driver) {
        return Err(Status::BadRequest);
    }
    let abbr = driver.to_uppercase();

    let query = provider_handle_error_http!(SessionQuery::new(year, &event, &session), "routes/api/driver:get_driver_laps", "session");
    let laps = provider_handle_error_http!(provider.laps(&query).await, "routes/api/driver:get_driver_laps", "laps");

    let driver_laps: Vec<SessionLap> = laps.into_iter().filter(|lap| lap.driver == abbr).collect();

    // no laps can also mean the driver was not there at all
    if driver_laps.is_empty() {
        let drivers = provider_handle_error_http!(provider.drivers(&query).await, "routes/api/driver:get_driver_laps", "drivers");
        if SessionDriver::find(&drivers, &abbr).is_none() {
            info!(target: "routes/api/driver:get_driver_laps", "driver {} not in {}", abbr, query);
            return Err(Status::NotFound);
        }
    }

    Ok(Json(ApiDriverLaps {
        insights: DriverHelpers::get_insights(&driver_laps),
        data: driver_laps.iter().filter_map(SessionLap::to_point).collect(),
        driver: abbr,
    }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiDrivers {
    pub drivers: Vec<SessionDriver>,
}

/// # Struct representing a json response for the laps of a driver
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiDriverLaps {
    pub driver: String,
    pub data: Vec<DriverLapPoint>,
    pub insights: Option<DriverInsights>,
}

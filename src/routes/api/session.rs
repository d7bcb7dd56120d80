use log::{error, info};
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::errors::CustomResult;
use crate::macros::provider_error_handler::{provider_fail_soft, provider_handle_error_http};
use crate::modules::degradation::{CompoundDegradation, DegradationEstimator};
use crate::modules::models::lap::{LapRecord, SessionLap};
use crate::modules::models::session::SessionQuery;
use crate::modules::models::weather::WeatherSummary;
use crate::modules::timing_api::BoxedProvider;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # get the tyre degradation per compound over all drivers of a session
/// the frontend treats this as optional, failing to load the session answers an empty list.
#[get("/global-deg/<year>/<event>/<session>")]
pub async fn get_global_degradation(
    year: i32,
    event: String,
    session: String,
    provider: &State<BoxedProvider>,
    estimator: &State<DegradationEstimator>,
) -> Result<Json<ApiGlobalDegradation>, Status> {
    let laps: Vec<SessionLap> = provider_fail_soft!(
        load_session_laps(provider, year, &event, &session).await,
        "routes/api/session:get_global_degradation",
        "laps"
    );
    let records: Vec<LapRecord> = laps.into_iter().map(|lap| lap.record).collect();

    let global_deg = estimator.estimate(&records);
    info!(target: "routes/api/session:get_global_degradation", "{} compounds estimated for {} {} {}", global_deg.len(), year, event, session);

    Ok(Json(ApiGlobalDegradation { global_deg }))
}

/// resolving the session is part of loading, so a bad session identifier fails soft as well
async fn load_session_laps(provider: &BoxedProvider, year: i32, event: &str, session: &str) -> CustomResult<Vec<SessionLap>> {
    let query = SessionQuery::new(year, event, session)?;
    provider.laps(&query).await
}

/// # get a summary of the weather during a session
#[get("/weather/<year>/<event>/<session>")]
pub async fn get_weather(
    year: i32,
    event: String,
    session: String,
    provider: &State<BoxedProvider>,
) -> Result<Json<ApiWeather>, Status> {
    let query = provider_handle_error_http!(SessionQuery::new(year, &event, &session), "routes/api/session:get_weather", "session");
    let samples = provider_handle_error_http!(provider.weather(&query).await, "routes/api/session:get_weather", "weather");

    Ok(Json(ApiWeather { weather: WeatherSummary::from_samples(&samples) }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiGlobalDegradation {
    #[serde(rename = "globalDeg")]
    pub global_deg: Vec<CompoundDegradation>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiWeather {
    pub weather: WeatherSummary,
}

use log::{error, info};
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::macros::provider_error_handler::provider_handle_error_http;
use crate::modules::timing_api::BoxedProvider;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # get the events of a season
/// in calendar order, testing is left out.
#[get("/circuits/<year>")]
pub async fn get_circuits(year: i32, provider: &State<BoxedProvider>) -> Result<Json<ApiCircuits>, Status> {
    let circuits = provider_handle_error_http!(provider.event_names(year).await, "routes/api/schedule:get_circuits", "circuits");

    Ok(Json(ApiCircuits { circuits }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiCircuits {
    pub circuits: Vec<String>,
}

use rocket::{routes, Build, Rocket};

use crate::modules::degradation::DegradationEstimator;
use crate::modules::helpers::fairings::cors::{preflight, CORS};
use crate::modules::timing_api::BoxedProvider;
use crate::routes::api;

pub mod errors;
pub mod modules;

pub mod macros {
    pub mod provider_error_handler;
}

pub mod routes {
    pub mod api {
        pub mod driver;
        pub mod schedule;
        pub mod session;
    }
}

/// # build the webserver
///
/// ## Arguments
/// * `provider` - where the session data is loaded from
/// * `estimator` - the degradation estimator used by `/global-deg`
pub fn build_rocket(provider: BoxedProvider, estimator: DegradationEstimator) -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .manage(provider)
        .manage(estimator)
        .mount(
            "/",
            routes![
                preflight,
                // schedule
                api::schedule::get_circuits,
                // drivers
                api::driver::get_drivers,
                api::driver::get_driver_laps,
                // sessions
                api::session::get_global_degradation,
                api::session::get_weather,
            ],
        )
}

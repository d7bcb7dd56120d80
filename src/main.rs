use log::info;
use rocket::{launch, Build, Rocket};

use tyre_degradation_analyser::build_rocket;
use tyre_degradation_analyser::modules::config::Config;
use tyre_degradation_analyser::modules::degradation::DegradationEstimator;
use tyre_degradation_analyser::modules::helpers::logging::setup_logging;
use tyre_degradation_analyser::modules::timing_api::OpenF1Api;

#[launch]
fn rocket() -> Rocket<Build> {
    let config = Config::from_env().expect("Failed to read config");
    setup_logging(&config).expect("Failed to setup logging");

    let provider = OpenF1Api::new(&config).expect("Failed to create timing api client");
    info!(target: "main", "loading sessions from {}", config.timing_api_url);

    // start the webserver
    build_rocket(
        Box::new(provider),
        DegradationEstimator::new(config.min_degradation_samples),
    )
}

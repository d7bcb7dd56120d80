use std::env;
use std::process::exit;

use log::error;

use tyre_degradation_analyser::modules::config::Config;
use tyre_degradation_analyser::modules::degradation::DegradationEstimator;
use tyre_degradation_analyser::modules::helpers::logging::setup_logging;
use tyre_degradation_analyser::modules::models::lap::LapRecord;
use tyre_degradation_analyser::modules::models::session::SessionQuery;
use tyre_degradation_analyser::modules::timing_api::{OpenF1Api, TimingProvider};

/// print the degradation per compound of a session as json
///
/// usage: session_degradation <year> <event> <session>
#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Failed to read config");
    setup_logging(&config).expect("Error setting up logging");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 3 {
        eprintln!("usage: session_degradation <year> <event> <session>");
        exit(2);
    }

    let year: i32 = match args[0].parse() {
        Ok(year) => year,
        Err(_) => {
            eprintln!("invalid year: {}", args[0]);
            exit(2);
        }
    };
    let query = match SessionQuery::new(year, &args[1], &args[2]) {
        Ok(query) => query,
        Err(err) => {
            eprintln!("{}", err);
            exit(2);
        }
    };

    let provider = OpenF1Api::new(&config).expect("Failed to create timing api client");
    let laps = match provider.laps(&query).await {
        Ok(laps) => laps,
        Err(err) => {
            error!(target: "session_degradation", "failed loading laps of {}. (error: {})", query, err);
            exit(1);
        }
    };

    let records: Vec<LapRecord> = laps.into_iter().map(|lap| lap.record).collect();
    let degradation = DegradationEstimator::new(config.min_degradation_samples).estimate(&records);

    println!("{}", serde_json::json!({ "globalDeg": degradation }));
}

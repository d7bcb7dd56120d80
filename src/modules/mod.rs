pub mod config;
pub mod degradation;
pub mod timing_api;

pub mod models {
    pub mod driver;
    pub mod lap;
    pub mod session;
    pub mod weather;
}

pub mod helpers {
    pub mod driver;
    pub mod lap;
    pub mod logging;
    pub mod math;

    pub mod fairings {
        pub mod cors;
    }
}

use rocket::http::Status;
use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Request to timing provider failed. (url: {}, error: {})", url, source))]
    ProviderRequestError { url: String, source: reqwest::Error },

    #[snafu(display("Timing provider answered with status {}. (url: {})", status, url))]
    ProviderStatusError { url: String, status: u16 },

    #[snafu(display("Could not decode timing provider response. (url: {}, error: {})", url, source))]
    ProviderDecodeError { url: String, source: serde_json::Error },

    #[snafu(display("No event named '{}' in {}", event, year))]
    EventNotFoundError { year: i32, event: String },

    #[snafu(display("Event '{}' in {} has no {} session", event, year, session))]
    SessionNotFoundError { year: i32, event: String, session: String },

    #[snafu(display("Driver '{}' did not take part in this session", driver))]
    DriverNotFoundError { driver: String },

    #[snafu(display("Unknown session identifier '{}'", identifier))]
    InvalidSessionError { identifier: String },

    #[snafu(display("Invalid value for {}: '{}'", key, value))]
    ConfigError { key: String, value: String },
}

impl Error {
    /// # the http status a route should answer with for this error
    pub fn status(&self) -> Status {
        match self {
            Error::EventNotFoundError { .. }
            | Error::SessionNotFoundError { .. }
            | Error::DriverNotFoundError { .. } => Status::NotFound,
            Error::InvalidSessionError { .. } => Status::BadRequest,
            Error::ProviderRequestError { .. }
            | Error::ProviderStatusError { .. }
            | Error::ProviderDecodeError { .. } => Status::BadGateway,
            Error::ConfigError { .. } => Status::InternalServerError,
        }
    }
}

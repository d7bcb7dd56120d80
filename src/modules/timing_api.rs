use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snafu::ResultExt;

use crate::errors::{CustomResult, Error, ProviderDecodeSnafu, ProviderRequestSnafu};
use crate::modules::config::Config;
use crate::modules::helpers::lap::LapHelper;
use crate::modules::models::driver::{normalize_color, SessionDriver};
use crate::modules::models::lap::SessionLap;
use crate::modules::models::session::{SessionKind, SessionQuery};
use crate::modules::models::weather::WeatherSample;

/// # Source of session timing data
/// implementations only fetch and reshape, filtering laps down to accurate laps
/// is part of the contract of `laps`.
#[async_trait]
pub trait TimingProvider: Send + Sync {
    /// names of all events of a season in calendar order, testing excluded
    async fn event_names(&self, year: i32) -> CustomResult<Vec<String>>;

    async fn drivers(&self, query: &SessionQuery) -> CustomResult<Vec<SessionDriver>>;

    /// accurate laps of every driver, laps through the pit lane excluded
    async fn laps(&self, query: &SessionQuery) -> CustomResult<Vec<SessionLap>>;

    async fn weather(&self, query: &SessionQuery) -> CustomResult<Vec<WeatherSample>>;
}

pub type BoxedProvider = Box<dyn TimingProvider>;

/// # Timing provider backed by the OpenF1 rest api
pub struct OpenF1Api {
    client: Client,
    base_url: String,
}

impl OpenF1Api {
    pub fn new(config: &Config) -> CustomResult<OpenF1Api> {
        let client = Client::builder()
            .timeout(config.timing_api_timeout)
            .build()
            .context(ProviderRequestSnafu { url: config.timing_api_url.clone() })?;

        Ok(OpenF1Api {
            client,
            base_url: config.timing_api_url.clone(),
        })
    }

    /// # get a list of records from an endpoint
    /// a `404` means the query matched nothing and gives an empty list.
    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> CustomResult<Vec<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(target: "timing_api:get_list", "requesting {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .context(ProviderRequestSnafu { url: url.clone() })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Error::ProviderStatusError { url, status: status.as_u16() });
        }

        let body = response.text().await.context(ProviderRequestSnafu { url: url.clone() })?;
        parse_list(&url, &body)
    }

    async fn meetings(&self, year: i32) -> CustomResult<Vec<ApiMeeting>> {
        self.get_list("meetings", &[("year", year.to_string())]).await
    }

    async fn session_key(&self, query: &SessionQuery) -> CustomResult<u32> {
        let meetings = self.meetings(query.year).await?;
        let meeting = find_meeting(&meetings, &query.event).ok_or_else(|| Error::EventNotFoundError {
            year: query.year,
            event: query.event.clone(),
        })?;

        let sessions: Vec<ApiSession> = self
            .get_list("sessions", &[("meeting_key", meeting.meeting_key.to_string())])
            .await?;
        let session = find_session(&sessions, query.kind).ok_or_else(|| Error::SessionNotFoundError {
            year: query.year,
            event: query.event.clone(),
            session: query.kind.to_string(),
        })?;

        info!(target: "timing_api:session_key", "resolved {} to session {}", query, session.session_key);
        Ok(session.session_key)
    }

    async fn session_list<T: DeserializeOwned>(&self, endpoint: &str, session_key: u32) -> CustomResult<Vec<T>> {
        self.get_list(endpoint, &[("session_key", session_key.to_string())]).await
    }
}

#[async_trait]
impl TimingProvider for OpenF1Api {
    async fn event_names(&self, year: i32) -> CustomResult<Vec<String>> {
        let meetings = self.meetings(year).await?;
        Ok(calendar(meetings))
    }

    async fn drivers(&self, query: &SessionQuery) -> CustomResult<Vec<SessionDriver>> {
        let session_key = self.session_key(query).await?;
        let drivers: Vec<ApiDriver> = self.session_list("drivers", session_key).await?;

        Ok(to_session_drivers(drivers))
    }

    async fn laps(&self, query: &SessionQuery) -> CustomResult<Vec<SessionLap>> {
        let session_key = self.session_key(query).await?;

        let (drivers, laps, stints, pit_stops) = tokio::try_join!(
            self.session_list::<ApiDriver>("drivers", session_key),
            self.session_list::<ApiLap>("laps", session_key),
            self.session_list::<ApiStint>("stints", session_key),
            self.session_list::<ApiPitStop>("pit", session_key),
        )?;

        let drivers = to_session_drivers(drivers);
        Ok(LapHelper::prepare_session_laps(query.kind, &drivers, &laps, &stints, &pit_stops))
    }

    async fn weather(&self, query: &SessionQuery) -> CustomResult<Vec<WeatherSample>> {
        let session_key = self.session_key(query).await?;
        let samples: Vec<ApiWeather> = self.session_list("weather", session_key).await?;

        Ok(samples.into_iter().map(ApiWeather::into_sample).collect())
    }
}

fn parse_list<T: DeserializeOwned>(url: &str, body: &str) -> CustomResult<Vec<T>> {
    serde_json::from_str(body).context(ProviderDecodeSnafu { url: url.to_string() })
}

/// # find an event by name
/// the official event name is preferred, the location and country are tried after that.
fn find_meeting<'a>(meetings: &'a [ApiMeeting], event: &str) -> Option<&'a ApiMeeting> {
    let event = event.trim();
    let matches = |value: &Option<String>| {
        value
            .as_deref()
            .map(|value| value.eq_ignore_ascii_case(event))
            .unwrap_or(false)
    };

    meetings
        .iter()
        .find(|meeting| meeting.meeting_name.eq_ignore_ascii_case(event))
        .or_else(|| meetings.iter().find(|meeting| matches(&meeting.location)))
        .or_else(|| meetings.iter().find(|meeting| matches(&meeting.country_name)))
}

fn find_session(sessions: &[ApiSession], kind: SessionKind) -> Option<&ApiSession> {
    kind.provider_names().iter().find_map(|name| {
        sessions
            .iter()
            .find(|session| session.session_name.eq_ignore_ascii_case(name))
    })
}

fn calendar(mut meetings: Vec<ApiMeeting>) -> Vec<String> {
    meetings.sort_by(|a, b| a.date_start.cmp(&b.date_start));

    let mut names: Vec<String> = Vec::new();
    for meeting in meetings {
        if meeting.meeting_name.to_lowercase().contains("testing") {
            continue;
        }
        if !names.contains(&meeting.meeting_name) {
            names.push(meeting.meeting_name);
        }
    }

    names
}

fn to_session_drivers(drivers: Vec<ApiDriver>) -> Vec<SessionDriver> {
    let mut session_drivers: Vec<SessionDriver> = Vec::new();

    for driver in drivers {
        let abbr = match driver.name_acronym {
            Some(abbr) if !abbr.trim().is_empty() => abbr.trim().to_uppercase(),
            _ => continue,
        };
        if session_drivers.iter().any(|known| known.number == driver.driver_number) {
            continue;
        }

        session_drivers.push(SessionDriver {
            name: driver.full_name.unwrap_or_else(|| abbr.clone()),
            abbr,
            number: driver.driver_number,
            team: driver.team_name.unwrap_or_default(),
            color: normalize_color(driver.team_colour.as_deref()),
        });
    }

    session_drivers
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMeeting {
    pub meeting_key: u32,
    pub meeting_name: String,
    pub location: Option<String>,
    pub country_name: Option<String>,
    pub date_start: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSession {
    pub session_key: u32,
    pub session_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDriver {
    pub driver_number: u32,
    pub name_acronym: Option<String>,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
    pub team_colour: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLap {
    pub driver_number: u32,
    pub lap_number: u32,
    pub lap_duration: Option<f64>,
    pub is_pit_out_lap: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiStint {
    pub driver_number: u32,
    pub lap_start: Option<u32>,
    pub lap_end: Option<u32>,
    pub compound: Option<String>,
    pub tyre_age_at_start: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPitStop {
    pub driver_number: u32,
    pub lap_number: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWeather {
    pub air_temperature: Option<f64>,
    pub track_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl ApiWeather {
    fn into_sample(self) -> WeatherSample {
        WeatherSample {
            air_temperature: self.air_temperature,
            track_temperature: self.track_temperature,
            humidity: self.humidity,
            rainfall: self.rainfall.map(|rain| rain > 0.0).unwrap_or(false),
            wind_speed: self.wind_speed,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// # The kind of session of a race weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Practice1,
    Practice2,
    Practice3,
    SprintQualifying,
    Sprint,
    Qualifying,
    Race,
}

impl SessionKind {
    /// # the session names the timing provider uses for this kind
    /// sprint qualifying was called a sprint shootout in 2023.
    pub fn provider_names(&self) -> &'static [&'static str] {
        match self {
            SessionKind::Practice1 => &["Practice 1"],
            SessionKind::Practice2 => &["Practice 2"],
            SessionKind::Practice3 => &["Practice 3"],
            SessionKind::SprintQualifying => &["Sprint Qualifying", "Sprint Shootout"],
            SessionKind::Sprint => &["Sprint"],
            SessionKind::Qualifying => &["Qualifying"],
            SessionKind::Race => &["Race"],
        }
    }

    /// # whether the session starts from the grid
    /// the opening lap of these sessions is never representative.
    pub fn has_standing_start(&self) -> bool {
        matches!(self, SessionKind::Race | SessionKind::Sprint)
    }
}

impl FromStr for SessionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FP1" => Ok(SessionKind::Practice1),
            "FP2" => Ok(SessionKind::Practice2),
            "FP3" => Ok(SessionKind::Practice3),
            "SQ" | "SS" => Ok(SessionKind::SprintQualifying),
            "S" => Ok(SessionKind::Sprint),
            "Q" => Ok(SessionKind::Qualifying),
            "R" => Ok(SessionKind::Race),
            _ => Err(Error::InvalidSessionError { identifier: s.to_string() }),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.provider_names()[0])
    }
}

/// # Identifies one session of one event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionQuery {
    pub year: i32,
    pub event: String,
    pub kind: SessionKind,
}

impl SessionQuery {
    pub fn new(year: i32, event: &str, session: &str) -> Result<SessionQuery, Error> {
        Ok(SessionQuery {
            year,
            event: event.trim().to_string(),
            kind: session.parse()?,
        })
    }
}

impl fmt::Display for SessionQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event, self.kind)
    }
}

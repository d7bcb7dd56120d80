use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DRIVER_COLOR: &str = "#ffffff";

static ABBREVIATION: OnceLock<Regex> = OnceLock::new();
static COLOR: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDriver {
    pub abbr: String,
    pub number: u32,
    pub name: String,
    pub team: String,
    pub color: String,
}

impl SessionDriver {
    /// # find a driver by abbreviation
    /// the abbreviation is compared case insensitive.
    pub fn find<'a>(drivers: &'a [SessionDriver], abbr: &str) -> Option<&'a SessionDriver> {
        drivers.iter().find(|driver| driver.abbr.eq_ignore_ascii_case(abbr))
    }
}

/// # check that a driver abbreviation looks like one
/// abbreviations are three ascii letters, e.g. `VER`.
pub fn is_valid_abbreviation(abbr: &str) -> bool {
    ABBREVIATION
        .get_or_init(|| Regex::new(r"^[A-Za-z]{3}$").expect("abbreviation pattern"))
        .is_match(abbr)
}

/// # turn a team colour into a css hex colour
/// the provider sends colours without `#` and sometimes not at all.
pub fn normalize_color(color: Option<&str>) -> String {
    let re = COLOR.get_or_init(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("colour pattern"));

    color
        .and_then(|color| re.captures(color.trim()))
        .and_then(|captures| captures.get(1))
        .map(|hex| format!("#{}", hex.as_str()))
        .unwrap_or_else(|| DEFAULT_DRIVER_COLOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations() {
        assert!(is_valid_abbreviation("VER"));
        assert!(is_valid_abbreviation("ham"));
        assert!(!is_valid_abbreviation("VERS"));
        assert!(!is_valid_abbreviation("V3R"));
        assert!(!is_valid_abbreviation("../"));
    }

    #[test]
    fn colors() {
        assert_eq!(normalize_color(Some("3671C6")), "#3671C6");
        assert_eq!(normalize_color(Some("#e8002d")), "#e8002d");
        assert_eq!(normalize_color(Some("blue")), DEFAULT_DRIVER_COLOR);
        assert_eq!(normalize_color(None), DEFAULT_DRIVER_COLOR);
    }

    #[test]
    fn patterns_are_reused_across_calls() {
        for _ in 0..3 {
            assert!(is_valid_abbreviation("NOR"));
            assert_eq!(normalize_color(Some(" ff8000 ")), "#ff8000");
        }
        assert!(ABBREVIATION.get().is_some());
        assert!(COLOR.get().is_some());
    }

    #[test]
    fn find_ignores_case() {
        let drivers = vec![SessionDriver {
            abbr: "LEC".to_string(),
            number: 16,
            name: "Charles LECLERC".to_string(),
            team: "Ferrari".to_string(),
            color: "#e8002d".to_string(),
        }];
        assert_eq!(SessionDriver::find(&drivers, "lec").map(|d| d.number), Some(16));
        assert!(SessionDriver::find(&drivers, "SAI").is_none());
    }
}

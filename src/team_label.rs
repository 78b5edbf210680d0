use once_cell::sync::Lazy;
use regex::Regex;

// Upstream naming is free text; the grammar below is the stable contract:
// an age marker is "U" or "Under" followed by digits, a division marker is
// "Div" or "Division" followed by digits, both case-insensitive.
static AGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:u|under\s*)(\d+)").expect("age marker pattern"));
static DIVISION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)div(?:ision)?\s*(\d+)").expect("division marker pattern"));

/// Entries with no parseable age sort after every graded team.
const UNGRADED_AGE_ORDER: u32 = 999;
/// Within an age group, teams without a division sort last.
const NO_DIVISION_ORDER: u32 = 99;

/// Canonical identity for one club side, derived from its free-text name.
///
/// Two names with the same age and division collapse to the same `key`; a
/// name with no age marker keeps its normalized lowercase text as a
/// singleton key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamIdentity {
    pub age: Option<u32>,
    pub division: Option<u32>,
    pub key: String,
    pub label: String,
}

impl TeamIdentity {
    pub fn age_order(&self) -> u32 {
        self.age.unwrap_or(UNGRADED_AGE_ORDER)
    }

    pub fn division_order(&self) -> u32 {
        self.division.unwrap_or(NO_DIVISION_ORDER)
    }
}

/// Total: never fails, only degrades to the full name as its own key.
pub fn resolve_team(name: &str) -> TeamIdentity {
    let name = collapse_whitespace(name);
    let age = AGE_MARKER
        .captures(&name)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let Some(age) = age else {
        return TeamIdentity {
            age: None,
            division: None,
            key: name.to_lowercase(),
            label: name,
        };
    };
    let division = DIVISION_MARKER
        .captures(&name)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let (key, label) = match division {
        Some(div) => (format!("u{age}-div{div}"), format!("U{age} Div {div}")),
        None => (format!("u{age}"), format!("U{age}")),
    };
    TeamIdentity {
        age: Some(age),
        division,
        key,
        label,
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

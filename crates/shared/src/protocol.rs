use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendeeCount {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5+")]
    FivePlus,
}

impl AttendeeCount {
    pub const ALL: [AttendeeCount; 5] = [
        AttendeeCount::One,
        AttendeeCount::Two,
        AttendeeCount::Three,
        AttendeeCount::Four,
        AttendeeCount::FivePlus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendeeCount::One => "1",
            AttendeeCount::Two => "2",
            AttendeeCount::Three => "3",
            AttendeeCount::Four => "4",
            AttendeeCount::FivePlus => "5+",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttendeeCount::One => "1 Person",
            AttendeeCount::Two => "2 People",
            AttendeeCount::Three => "3 People",
            AttendeeCount::Four => "4 People",
            AttendeeCount::FivePlus => "5+ People",
        }
    }
}

impl fmt::Display for AttendeeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendeeCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendeeCount::ALL
            .into_iter()
            .find(|count| count.as_str() == s.trim())
            .ok_or_else(|| format!("attendee count must be one of 1, 2, 3, 4, 5+ (got '{s}')"))
    }
}

/// A validated registration, free of relay credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSubmission {
    pub event: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attendees: AttendeeCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// Body posted to the form relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayPayload {
    pub access_key: String,
    pub subject: String,
    pub from_name: String,
    pub to: String,
    pub event: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attendees: AttendeeCount,
    pub special_requirements: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id can be used verbatim as a URL path segment and a directory name.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Happening Now",
            EventStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("unknown event status '{other}'")),
        }
    }
}

/// Display precedence is the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorTier {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl SponsorTier {
    pub const ORDERED: [SponsorTier; 4] = [
        SponsorTier::Platinum,
        SponsorTier::Gold,
        SponsorTier::Silver,
        SponsorTier::Bronze,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SponsorTier::Platinum => "platinum",
            SponsorTier::Gold => "gold",
            SponsorTier::Silver => "silver",
            SponsorTier::Bronze => "bronze",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            SponsorTier::Platinum => "Platinum Sponsors",
            SponsorTier::Gold => "Gold Sponsors",
            SponsorTier::Silver => "Silver Sponsors",
            SponsorTier::Bronze => "Bronze Sponsors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub tier: SponsorTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tamil_title: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    pub status: EventStatus,
    #[serde(default)]
    pub registration_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsors: Option<Vec<Sponsor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl EventRecord {
    pub fn display_venue(&self) -> &str {
        self.venue.as_deref().unwrap_or(&self.location)
    }

    pub fn time_range(&self) -> String {
        match &self.end_time {
            Some(end) => format!("{} - {}", self.time, end),
            None => self.time.clone(),
        }
    }

    pub fn about_text(&self) -> &str {
        self.long_description.as_deref().unwrap_or(&self.description)
    }

    pub fn offers_registration(&self) -> bool {
        self.registration_open && self.status == EventStatus::Upcoming
    }

    pub fn detail_path(&self) -> String {
        format!("/{}", self.id)
    }

    /// Sponsors grouped by tier in display precedence. Tiers without sponsors are left out.
    pub fn sponsors_by_tier(&self) -> Vec<(SponsorTier, Vec<&Sponsor>)> {
        let Some(sponsors) = &self.sponsors else {
            return Vec::new();
        };

        SponsorTier::ORDERED
            .into_iter()
            .filter_map(|tier| {
                let members: Vec<&Sponsor> =
                    sponsors.iter().filter(|sponsor| sponsor.tier == tier).collect();
                (!members.is_empty()).then_some((tier, members))
            })
            .collect()
    }
}

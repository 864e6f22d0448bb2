use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::{EventId, EventRecord, EventStatus};
use thiserror::Error;
use tracing::debug;

const BUILTIN_EVENTS: &str = include_str!("../data/events.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate event id '{0}'")]
    DuplicateId(EventId),
    #[error("event id '{0}' must be non-empty and use only a-z, 0-9, '-' or '_'")]
    InvalidId(EventId),
    #[error("event '{id}' is missing required field '{field}'")]
    MissingField { id: EventId, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    events: Vec<EventRecord>,
}

/// Ordered, read-only collection of event records.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<EventRecord>,
}

impl Catalog {
    pub fn from_records(events: Vec<EventRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            validate_record(event)?;
            if !seen.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateId(event.id.clone()));
            }
        }
        Ok(Self { events })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::from_records(file.events)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), events = catalog.len(), "loaded event catalog");
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_EVENTS)
    }

    pub fn list_all(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn find_by_id(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|event| event.id.as_str() == id)
    }

    pub fn list_by_status(&self, status: EventStatus) -> Vec<&EventRecord> {
        self.events
            .iter()
            .filter(|event| event.status == status)
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EventId> {
        self.events.iter().map(|event| &event.id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn validate_record(event: &EventRecord) -> Result<(), CatalogError> {
    if !event.id.is_path_safe() {
        return Err(CatalogError::InvalidId(event.id.clone()));
    }

    let required = [
        ("title", event.title.as_str()),
        ("subtitle", event.subtitle.as_str()),
        ("description", event.description.as_str()),
        ("date", event.date.as_str()),
        ("time", event.time.as_str()),
        ("location", event.location.as_str()),
        ("image", event.image.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(missing(event, field));
        }
    }

    for sponsor in event.sponsors.iter().flatten() {
        if sponsor.name.trim().is_empty() {
            return Err(missing(event, "sponsors.name"));
        }
    }
    for item in event.schedule.iter().flatten() {
        if item.time.trim().is_empty() {
            return Err(missing(event, "schedule.time"));
        }
        if item.activity.trim().is_empty() {
            return Err(missing(event, "schedule.activity"));
        }
    }

    Ok(())
}

fn missing(event: &EventRecord, field: &'static str) -> CatalogError {
    CatalogError::MissingField {
        id: event.id.clone(),
        field,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

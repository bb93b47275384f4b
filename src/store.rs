//! This module provides the in-memory collection of events
//!
//! The store can optionally be backed by a JSON file, see [`EventStore::from_file`] and [`EventStore::save_to_file`].

use std::convert::TryFrom;
use std::path::{Path, PathBuf};
use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::event::{Event, EventId, EventTime};


/// Reasons why an event can be refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty, or only contains whitespace
    EmptyTitle,
    /// The event form was submitted while it was not open
    FormClosed,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            ValidationError::EmptyTitle => write!(f, "Event title must not be empty"),
            ValidationError::FormClosed => write!(f, "The event form is not open"),
        }
    }
}

impl Error for ValidationError {}


/// Where an unreadable events file is moved to: `<path>.bak`, or `<path>.bak.N` if that one is taken already
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    let base = PathBuf::from(name);

    let mut candidate = base.clone();
    let mut n = 1;
    while candidate.exists() {
        let mut name = base.as_os_str().to_os_string();
        name.push(format!(".{}", n));
        candidate = PathBuf::from(name);
        n += 1;
    }
    candidate
}


/// The collection of every event, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEvents")]
pub struct EventStore {
    events: Vec<Event>,
}

/// The serialized form of an [`EventStore`], before its invariants are checked
#[derive(Deserialize)]
struct StoredEvents {
    events: Vec<Event>,
}

impl TryFrom<StoredEvents> for EventStore {
    type Error = String;

    fn try_from(stored: StoredEvents) -> Result<Self, Self::Error> {
        let store = EventStore { events: stored.events };
        if let Some(dup) = store.first_duplicate_id() {
            return Err(format!("event {} is present several times", dup));
        }
        if let Some(blank) = store.events.iter().find(|e| e.title().trim().is_empty()) {
            return Err(format!("event {} has no title", blank.id()));
        }
        Ok(store)
    }
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let store: Self = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)
                .map_err(|err| format!("Invalid events file {:?}: {}", path, err))?,
        };

        log::debug!("Loaded {} events from {:?}", store.len(), path);
        Ok(store)
    }

    /// Load the events of `path`, or start with no events if there is no such file.
    ///
    /// A file that cannot be loaded is renamed (see [`backup_path`]) before an empty store is returned, so that saving this store later does not erase it.
    /// Returns an error when the file can neither be loaded nor moved aside.
    pub fn load_or_set_aside(path: &Path) -> Result<Self, Box<dyn Error>> {
        if path.exists() == false {
            log::debug!("No events file at {:?}, starting with no events", path);
            return Ok(Self::new());
        }

        match Self::from_file(path) {
            Ok(store) => Ok(store),
            Err(err) => {
                let backup = backup_path(path);
                std::fs::rename(path, &backup)
                    .map_err(|rename_err| format!("{}. Unable to move it to {:?}: {}", err, backup, rename_err))?;
                log::warn!("{}. It has been moved to {:?}, starting with no events", err, backup);
                Ok(Self::new())
            },
        }
    }

    /// Store the current events to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, self)?;
        log::debug!("Saved {} events to {:?}", self.len(), path);
        Ok(())
    }

    fn first_duplicate_id(&self) -> Option<&EventId> {
        let mut seen = std::collections::HashSet::new();
        self.events.iter()
            .map(|e| e.id())
            .find(|id| seen.insert(*id) == false)
    }


    /// Create a new event and append it.
    ///
    /// This is refused (and nothing changes) when `title` is blank.
    pub fn add(&mut self, title: &str, date: NaiveDate, time: EventTime, description: &str) -> Result<&Event, ValidationError> {
        if title.trim().is_empty() {
            log::debug!("Refusing to add an event with a blank title");
            return Err(ValidationError::EmptyTitle);
        }

        let mut id = EventId::random();
        while self.get(&id).is_some() {
            log::warn!("Event ID {} collides with an existing one, picking another one", id);
            id = EventId::random();
        }

        let event = Event::new(id, title.to_string(), date, time, description.to_string());
        log::info!("Adding event {} \"{}\" on {} at {}", event.id(), event.title(), event.date(), event.time());
        self.events.push(event);

        let last = self.events.len() - 1;
        Ok(&self.events[last])
    }

    /// Remove an event. Unknown IDs are ignored.
    pub fn remove(&mut self, id: &EventId) -> Option<Event> {
        match self.events.iter().position(|e| e.id() == id) {
            None => {
                log::debug!("No event {} to remove", id);
                None
            },
            Some(index) => {
                let removed = self.events.remove(index);
                log::info!("Removed event {} \"{}\"", removed.id(), removed.title());
                Some(removed)
            },
        }
    }

    /// Returns every event that happens on `date`, in insertion order
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter()
            .filter(|e| e.is_on(date))
            .collect()
    }

    /// Returns every event, sorted by date.
    ///
    /// Events of the same day keep their insertion order: their time of day is not taken into account.
    pub fn chronological(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.date());
        sorted
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Iterate over events in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

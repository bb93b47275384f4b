//! Calendar events

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::DEFAULT_EVENT_TIME;


/// A single dated event.
///
/// Events are immutable once created. They can only be removed from their [`EventStore`](crate::store::EventStore).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique identifier, used as a deletion key
    id: EventId,
    /// The display name of the event. Never blank.
    title: String,
    /// The day this event happens on
    date: NaiveDate,
    /// The time of day this event starts at
    time: EventTime,
    /// Free text, may be empty
    description: String,
}

impl Event {
    /// Create an Event. Only the store is allowed to do this, since it guarantees unique IDs and valid titles.
    pub(crate) fn new(id: EventId, title: String, date: NaiveDate, time: EventTime, description: String) -> Self {
        Self { id, title, date, time, description }
    }

    pub fn id(&self) -> &EventId        { &self.id          }
    pub fn title(&self) -> &str         { &self.title       }
    pub fn date(&self) -> NaiveDate     { self.date         }
    pub fn time(&self) -> EventTime     { self.time         }
    pub fn description(&self) -> &str   { &self.description }

    /// The date and time this event starts at, in local time
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.as_naive_time())
    }

    /// Whether this event happens on `date` (time of day is ignored)
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}



#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId {
    content: String,
}
impl EventId {
    /// Generate a random EventId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for EventId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for EventId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<EventId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(EventId{ content })
    }
}



/// A time of day, written in 24-hour `HH:MM` form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTime {
    time: NaiveTime,
}

const TIME_FORMAT: &str = "%H:%M";

impl EventTime {
    /// Returns `None` for out-of-range values
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { time })
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.time
    }
}

impl Default for EventTime {
    fn default() -> Self {
        let (hour, minute) = DEFAULT_EVENT_TIME;
        Self { time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN) }
    }
}

/// A string that is not a valid `HH:MM` time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidTime {
    input: String,
}

impl Display for InvalidTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:?} is not a valid HH:MM time", self.input)
    }
}

impl std::error::Error for InvalidTime {}

impl FromStr for EventTime {
    type Err = InvalidTime;

    /// Hours and minutes must both have two digits, e.g. `09:05`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTime { input: s.to_string() };

        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if well_formed == false {
            return Err(invalid());
        }

        NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
            .map(|time| Self { time })
            .map_err(|_| invalid())
    }
}

impl Display for EventTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.time.format(TIME_FORMAT))
    }
}

/// Used to support serde
impl Serialize for EventTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D>(deserializer: D) -> Result<EventTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_time_is_nine() {
        assert_eq!(EventTime::default().to_string(), "09:00");
    }

    #[test]
    fn parse_times() {
        let t: EventTime = "17:45".parse().unwrap();
        assert_eq!(t, EventTime::from_hm(17, 45).unwrap());
        assert_eq!(t.to_string(), "17:45");

        assert!("25:00".parse::<EventTime>().is_err());
        assert!("noon".parse::<EventTime>().is_err());
        assert!("".parse::<EventTime>().is_err());
        assert_eq!(" 08:15 ".parse::<EventTime>().unwrap(), EventTime::from_hm(8, 15).unwrap());
    }

    #[test]
    fn times_need_two_digit_fields() {
        assert_eq!("09:05".parse::<EventTime>().unwrap(), EventTime::from_hm(9, 5).unwrap());

        for input in &["9:5", "9:05", "09:5", "009:05", "09:005", "09-05", "+9:05", "09:05:00"] {
            let err = input.parse::<EventTime>().unwrap_err();
            assert!(err.to_string().contains(input), "{}", err);
        }
        assert!("23:60".parse::<EventTime>().is_err());
    }

    #[test]
    fn serde_event() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let event = Event::new(EventId::from("abc"), "Standup".to_string(), date, EventTime::default(), String::new());

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""id":"abc""#));
        assert!(json.contains(r#""date":"2024-03-05""#));
        assert!(json.contains(r#""time":"09:00""#));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.starts_at(), date.and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(EventId::random(), EventId::random());
    }
}

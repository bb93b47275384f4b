//! A module to build iCal files out of events

use chrono::{DateTime, Utc};
use ics::properties::{Description, DtStart, Summary};
use ics::{escape_text, ICalendar};

use crate::config::default_prod_id;
use crate::event::Event;

/// Create an iCal file that contains a single event
pub fn build_from(event: &Event, dtstamp: &DateTime<Utc>) -> String {
    build_calendar(std::iter::once(event), dtstamp)
}

/// Create an iCal file that contains every given event
pub fn build_calendar<'a, I>(events: I, dtstamp: &DateTime<Utc>) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    let prod_id = default_prod_id();
    let mut calendar = ICalendar::new("2.0", prod_id);

    let s_dtstamp = format_utc(dtstamp);
    for event in events {
        let mut vevent = ics::Event::new(event.id().to_string(), s_dtstamp.clone());
        // No timezone is attached: this is a "floating" local time
        vevent.push(DtStart::new(event.starts_at().format("%Y%m%dT%H%M%S").to_string()));
        vevent.push(Summary::new(escape_text(event.title().to_string())));
        if event.description().is_empty() == false {
            vevent.push(Description::new(escape_text(event.description().to_string())));
        }
        calendar.add_event(vevent);
    }

    calendar.to_string()
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use crate::event::{EventId, EventTime};

    fn event(id: &str, title: &str, description: &str) -> Event {
        Event::new(
            EventId::from(id),
            title.to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            EventTime::from_hm(9, 30).unwrap(),
            description.to_string(),
        )
    }

    #[test]
    fn test_ical_from_event() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ev = event("0b2b1bd6-4e5e-4bcb-9d4b-ef2c1d6a1b3e", "Standup with ÜTF-8 characters", "");

        let ical = build_from(&ev, &now);
        assert!(ical.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ical.contains(&format!("PRODID:{}\r\n", default_prod_id())));
        assert!(ical.contains("BEGIN:VEVENT\r\n"));
        assert!(ical.contains("UID:0b2b1bd6-4e5e-4bcb-9d4b-ef2c1d6a1b3e\r\n"));
        assert!(ical.contains("DTSTAMP:20240301T120000Z\r\n"));
        assert!(ical.contains("DTSTART:20240305T093000\r\n"));
        assert!(ical.contains("SUMMARY:Standup with ÜTF-8 characters\r\n"));
        assert!(ical.contains("DESCRIPTION") == false);
        assert!(ical.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
    }

    #[test]
    fn test_ical_several_events() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let events = vec![event("a", "First", "Bring coffee"), event("b", "Second", "")];

        let ical = build_calendar(&events, &now);
        assert_eq!(ical.matches("BEGIN:VEVENT").count(), 2);
        assert!(ical.contains("DESCRIPTION:Bring coffee\r\n"));
        assert_eq!(ical.matches("BEGIN:VCALENDAR").count(), 1);
    }
}

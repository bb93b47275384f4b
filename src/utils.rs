//! Some utility functions

use std::fmt::{Display, Formatter};

use crate::view::{CalendarView, CellView, DayView};

/// How many characters of an event ID are displayed
pub const SHORT_ID_LEN: usize = 8;

/// Plain text rendering.
///
/// Days with events are marked with `*`, the selected day is bracketed and today is followed by `<`.
impl Display for CalendarView {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f, "{:^35}", self.month_label)?;
        for label in self.weekday_labels.iter() {
            write!(f, " {:<4}", label)?;
        }
        writeln!(f)?;

        for week in &self.weeks {
            for cell in week {
                write_cell(f, cell)?;
            }
            writeln!(f)?;
        }

        if let Some(selected) = self.selected() {
            for line in &selected.events {
                writeln!(f, "  {}  ({})", line.label, short_id(line.id.as_str()))?;
            }
        }

        if let Some(form) = &self.form {
            writeln!(f, "\n-- New event on {} --", form.date.format("%Y-%m-%d"))?;
            writeln!(f, "  title:       {}", form.title)?;
            writeln!(f, "  time:        {}", form.time)?;
            writeln!(f, "  description: {}", form.description)?;
        }

        writeln!(f, "\nUpcoming events")?;
        if self.upcoming.is_empty() {
            writeln!(f, "  No events scheduled. Select a day or start a new event to add one.")?;
        }
        for event in &self.upcoming {
            writeln!(f, "  {}  {}  {}", short_id(event.id.as_str()), event.title, event.when)?;
            if let Some(description) = &event.description {
                writeln!(f, "            {}", description)?;
            }
        }

        writeln!(f, "\n[theme: {}]", self.theme)
    }
}

/// Render a view as plain text
pub fn format_view(view: &CalendarView) -> String {
    view.to_string()
}

/// A debug utility that pretty-prints a view
pub fn print_view(view: &CalendarView) {
    println!("{}", format_view(view));
}

fn write_cell(f: &mut Formatter<'_>, cell: &CellView) -> Result<(), std::fmt::Error> {
    match cell {
        CellView::Blank => write!(f, "     "),
        CellView::Day(day) => write_day(f, day),
    }
}

fn write_day(f: &mut Formatter<'_>, day: &DayView) -> Result<(), std::fmt::Error> {
    use chrono::Datelike;

    let marker = if day.events.is_empty() { ' ' } else { '*' };
    let today = if day.is_today { '<' } else { ' ' };
    if day.is_selected {
        write!(f, "[{:>2}]{}", day.date.day(), marker)
    } else {
        write!(f, " {:>2}{}{}", day.date.day(), marker, today)
    }
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::controller::{CalendarApp, FixedClock};
    use crate::preference::PreferenceController;
    use crate::storage::MemoryStorage;
    use crate::store::EventStore;

    fn march_2024() -> CalendarApp<MemoryStorage> {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let preference = PreferenceController::initialize(MemoryStorage::new(), &false);
        CalendarApp::new(EventStore::new(), preference, Box::new(FixedClock(today)))
    }

    #[test]
    fn empty_month() {
        let text = format_view(&march_2024().view());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "March 2024");
        assert!(lines[1].starts_with(" Sun  Mon  Tue  Wed  Thu  Fri  Sat"));
        assert_eq!(lines[2], format!("{}  1    2  ", " ".repeat(25)));
        // Today is selected
        assert!(lines[5].starts_with("[17] "));
        assert!(text.contains("\nUpcoming events\n  No events scheduled. Select a day or start a new event to add one.\n"));
        assert!(text.contains("-- New event") == false);
        assert!(text.ends_with("\n[theme: light]\n"));
    }

    #[test]
    fn markers_and_form() {
        let mut app = march_2024();
        assert!(app.click_day(5));
        app.set_title("Standup");
        app.set_description("Room 4");
        let id = app.submit_form().unwrap();
        let short = short_id(id.as_str()).to_string();

        app.open_form();
        app.set_title("Lunch");
        app.set_time("12:30").unwrap();

        let view = app.view();
        let text = view.to_string();
        assert_eq!(format_view(&view), text);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], "  3    4  [ 5]*  6    7    8    9  ");
        assert!(lines[5].starts_with(" 17 < 18  "));
        assert!(text.contains(&format!("  09:00 - Standup  ({})\n", short)));
        assert!(text.contains("\n-- New event on 2024-03-05 --\n  title:       Lunch\n  time:        12:30\n  description: \n"));
        assert!(text.contains(&format!("  {}  Standup  2024-03-05 at 09:00\n            Room 4\n", short)));
        assert!(text.contains("No events scheduled") == false);
    }

    #[test]
    fn short_ids() {
        assert_eq!(short_id("0b2b1bd6-4e5e-4bcb"), "0b2b1bd6");
        assert_eq!(short_id("abc"), "abc");
    }
}

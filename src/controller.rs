//! The interaction controller
//!
//! [`CalendarApp`] is what a front-end talks to. It owns the navigation date, the event form, the [`EventStore`] and the [`PreferenceController`],
//! and every user action is one of its `&mut self` methods. After any of them, [`CalendarApp::view`] reflects the new state.

use chrono::{Datelike, Local, NaiveDate};

use crate::event::{Event, EventId, EventTime, InvalidTime};
use crate::grid::{self, MonthGrid};
use crate::preference::{PreferenceController, Theme};
use crate::storage::KeyValueStorage;
use crate::store::{EventStore, ValidationError};
use crate::view::CalendarView;


/// Tells what the current day is
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The host's local clock
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that is stuck on a given day
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}


/// Move `date` by `delta` months, rolling the year as needed.
///
/// The day of month is kept when possible, and clamped to the last day of the target month otherwise (Jan 31 + 1 month is Feb 28 or 29).
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;

    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first,
        None => {
            log::warn!("Cannot move {} by {} months, staying there", date, delta);
            return date;
        },
    };
    let day = date.day().min(grid::days_in_month(first));
    first.with_day(day).unwrap_or(first)
}



/// Unsaved content of the event form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftEvent {
    pub title: String,
    pub time: EventTime,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open,
}

/// The event creation form, and its draft
#[derive(Clone, Debug, PartialEq)]
pub struct EventForm {
    state: FormState,
    draft: DraftEvent,
}

impl Default for EventForm {
    fn default() -> Self {
        Self { state: FormState::Closed, draft: DraftEvent::default() }
    }
}

impl EventForm {
    pub fn state(&self) -> FormState   { self.state }
    pub fn is_open(&self) -> bool      { self.state == FormState::Open }
    pub fn draft(&self) -> &DraftEvent { &self.draft }

    fn open(&mut self) {
        self.state = FormState::Open;
    }

    /// Close the form. The draft is reset.
    fn close(&mut self) {
        self.state = FormState::Closed;
        self.draft = DraftEvent::default();
    }

    /// Returns a mutable draft, if the form is open. Drafts only exist while the form is shown.
    fn draft_mut(&mut self) -> Option<&mut DraftEvent> {
        match self.state {
            FormState::Open => Some(&mut self.draft),
            FormState::Closed => {
                log::debug!("Ignoring an edit of the event form, since it is closed");
                None
            },
        }
    }
}



/// The calendar widget state, and every action a user can perform on it
pub struct CalendarApp<S: KeyValueStorage> {
    store: EventStore,
    selected_date: NaiveDate,
    form: EventForm,
    preference: PreferenceController<S>,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStorage> CalendarApp<S> {
    /// Create an app focused on the current day
    pub fn new(store: EventStore, preference: PreferenceController<S>, clock: Box<dyn Clock>) -> Self {
        let selected_date = clock.today();
        Self {
            store,
            selected_date,
            form: EventForm::default(),
            preference,
            clock,
        }
    }

    pub fn selected_date(&self) -> NaiveDate                 { self.selected_date }
    pub fn store(&self) -> &EventStore                       { &self.store }
    pub fn form(&self) -> &EventForm                         { &self.form }
    pub fn preference(&self) -> &PreferenceController<S>     { &self.preference }

    /// The grid of the month being displayed
    pub fn grid(&self) -> MonthGrid {
        MonthGrid::for_date(self.selected_date)
    }

    /// The current day, according to this app's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }


    pub fn previous_month(&mut self) {
        self.set_selected_date(shift_month(self.selected_date, -1));
    }

    pub fn next_month(&mut self) {
        self.set_selected_date(shift_month(self.selected_date, 1));
    }

    /// Go back to the current day
    pub fn go_to_today(&mut self) {
        self.set_selected_date(self.clock.today());
    }

    fn set_selected_date(&mut self, date: NaiveDate) {
        log::debug!("Selected date is now {}", date);
        self.selected_date = date;
    }

    /// Select a day of the displayed month, and open the event form for it.
    ///
    /// Returns `false` (and does nothing) if the displayed month has no such day.
    pub fn click_day(&mut self, day: u32) -> bool {
        match self.grid().day(day) {
            None => {
                log::debug!("Ignoring a click on day {}, which is not in the displayed month", day);
                false
            },
            Some(date) => {
                self.set_selected_date(date);
                self.form.open();
                true
            },
        }
    }


    /// Open the event form for the selected date
    pub fn open_form(&mut self) {
        self.form.open();
    }

    /// Close the event form and drop its draft
    pub fn cancel_form(&mut self) {
        self.form.close();
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(draft) = self.form.draft_mut() {
            draft.title = title.to_string();
        }
    }

    /// Set the draft time from an `HH:MM` string. The draft is left untouched if it cannot be parsed.
    pub fn set_time(&mut self, time: &str) -> Result<(), InvalidTime> {
        let time: EventTime = time.parse()?;
        if let Some(draft) = self.form.draft_mut() {
            draft.time = time;
        }
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        if let Some(draft) = self.form.draft_mut() {
            draft.description = description.to_string();
        }
    }

    /// Create an event from the draft, on the selected date.
    ///
    /// On success, the form is closed and its draft reset. Otherwise the form stays open, as it is.
    pub fn submit_form(&mut self) -> Result<EventId, ValidationError> {
        if self.form.is_open() == false {
            return Err(ValidationError::FormClosed);
        }

        let draft = self.form.draft();
        let id = self.store
            .add(&draft.title, self.selected_date, draft.time, &draft.description)?
            .id()
            .clone();

        self.form.close();
        Ok(id)
    }

    /// Remove an event. Unknown IDs are ignored.
    pub fn delete_event(&mut self, id: &EventId) -> Option<Event> {
        self.store.remove(id)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preference.toggle()
    }


    /// The current state, as it should be displayed
    pub fn view(&self) -> CalendarView {
        CalendarView::build(self.selected_date, self.clock.today(), &self.store, &self.form, &self.preference)
    }
}

//! A render-ready projection of the calendar state
//!
//! A [`CalendarView`] is rebuilt from scratch after every action. It holds no reference to the state it was built from.

use chrono::NaiveDate;

use crate::controller::{EventForm, FormState};
use crate::event::{Event, EventId};
use crate::grid::{GridCell, MonthGrid, WEEKDAY_LABELS};
use crate::preference::{PreferenceController, Theme};
use crate::storage::KeyValueStorage;
use crate::store::EventStore;

#[derive(Clone, Debug, PartialEq)]
pub struct CalendarView {
    /// e.g. "March 2024"
    pub month_label: String,
    pub weekday_labels: [&'static str; 7],
    /// Leading blanks, then one cell per day of the displayed month, split in weeks.
    /// The last week may be shorter than the others.
    pub weeks: Vec<Vec<CellView>>,
    /// `Some` while the event form is shown
    pub form: Option<FormView>,
    /// Every event, by ascending date
    pub upcoming: Vec<EventSummary>,
    pub theme: Theme,
    /// Classes to set on the outermost element
    pub root_classes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellView {
    Blank,
    Day(DayView),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<EventLine>,
}

/// An event, as shown inside a day cell
#[derive(Clone, Debug, PartialEq)]
pub struct EventLine {
    pub id: EventId,
    /// `HH:MM - title`
    pub label: String,
}

/// An event, as shown in the upcoming list
#[derive(Clone, Debug, PartialEq)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    /// `date at HH:MM`
    pub when: String,
    /// `None` when the description is empty
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    /// The date the event will be created on
    pub date: NaiveDate,
    pub title: String,
    pub time: String,
    pub description: String,
}

impl CalendarView {
    pub fn build<S: KeyValueStorage>(
        selected_date: NaiveDate,
        today: NaiveDate,
        store: &EventStore,
        form: &EventForm,
        preference: &PreferenceController<S>,
    ) -> Self {
        let grid = MonthGrid::for_date(selected_date);

        let to_view = |cell: GridCell| match cell {
            GridCell::Blank => CellView::Blank,
            GridCell::Day(date) => CellView::Day(DayView {
                date,
                is_today: date == today,
                is_selected: date == selected_date,
                events: store.events_on(date).into_iter().map(EventLine::from).collect(),
            }),
        };
        let weeks = grid.rows()
            .into_iter()
            .map(|week| week.into_iter().map(&to_view).collect())
            .collect();

        let form = match form.state() {
            FormState::Closed => None,
            FormState::Open => {
                let draft = form.draft();
                Some(FormView {
                    date: selected_date,
                    title: draft.title.clone(),
                    time: draft.time.to_string(),
                    description: draft.description.clone(),
                })
            },
        };

        Self {
            month_label: selected_date.format("%B %Y").to_string(),
            weekday_labels: WEEKDAY_LABELS,
            weeks,
            form,
            upcoming: store.chronological().into_iter().map(EventSummary::from).collect(),
            theme: preference.theme(),
            root_classes: preference.root_style().classes().map(String::from).collect(),
        }
    }

    /// Every cell, in reading order
    pub fn cells(&self) -> impl Iterator<Item = &CellView> {
        self.weeks.iter().flatten()
    }

    /// The cell of the selected day
    pub fn selected(&self) -> Option<&DayView> {
        self.cells().find_map(|cell| match cell {
            CellView::Day(d) if d.is_selected => Some(d),
            _ => None,
        })
    }

    /// The cell of a given day of the displayed month
    pub fn day(&self, day: u32) -> Option<&DayView> {
        self.cells()
            .filter_map(|cell| match cell {
                CellView::Day(d) => Some(d),
                CellView::Blank => None,
            })
            .nth(day.checked_sub(1)? as usize)
    }
}

impl From<&Event> for EventLine {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().clone(),
            label: format!("{} - {}", event.time(), event.title()),
        }
    }
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        let description = match event.description() {
            "" => None,
            d => Some(d.to_string()),
        };
        Self {
            id: event.id().clone(),
            title: event.title().to_string(),
            when: format!("{} at {}", event.date().format("%Y-%m-%d"), event.time()),
            description,
        }
    }
}

//! Month grid layout
//!
//! A month is drawn as a 7-column grid starting on Sunday: `first_day_of_month` blank cells, followed by one cell per day of the month.

use chrono::{Datelike, Duration, NaiveDate};

/// Column headers of the grid, in day-of-week index order (0 = Sunday)
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Number of columns of the grid
pub const COLUMNS: usize = 7;

/// Number of days in the month that contains `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = match date.month() {
        12 => (date.year() + 1, 1),
        m => (date.year(), m + 1),
    };

    // "Day 0" of the following month is the last day of this one
    match NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|first_of_next| first_of_next.pred_opt()) {
        Some(last_day) => last_day.day(),
        // December of the last year chrono can represent
        None => 31,
    }
}

/// Day-of-week index (0 = Sunday .. 6 = Saturday) of the first day of the month that contains `date`
pub fn first_day_of_month(date: NaiveDate) -> u32 {
    first_of_month(date).weekday().num_days_from_sunday()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}


/// A slot of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridCell {
    /// Leading padding before the first day of the month
    Blank,
    /// A numbered day of the month
    Day(NaiveDate),
}

impl GridCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(d) => Some(*d),
        }
    }
}


/// The layout of a month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
    days_in_month: u32,
    first_day_of_month: u32,
}

impl MonthGrid {
    /// Compute the grid of the month that contains `date`. The day of month of `date` is irrelevant.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            first: first_of_month(date),
            days_in_month: days_in_month(date),
            first_day_of_month: first_day_of_month(date),
        }
    }

    pub fn year(&self) -> i32              { self.first.year() }
    pub fn month(&self) -> u32             { self.first.month() }
    pub fn days_in_month(&self) -> u32     { self.days_in_month }
    pub fn first_day_of_month(&self) -> u32 { self.first_day_of_month }

    /// Total number of cells (leading blanks included)
    pub fn len(&self) -> usize {
        (self.first_day_of_month + self.days_in_month) as usize
    }

    /// Returns the date of the given day of month, if this month has such a day
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        Some(self.first + Duration::days(i64::from(day - 1)))
    }

    /// Every cell of the grid, in reading order
    pub fn cells(&self) -> Vec<GridCell> {
        let blanks = std::iter::repeat(GridCell::Blank).take(self.first_day_of_month as usize);
        let days = self.first
            .iter_days()
            .take(self.days_in_month as usize)
            .map(GridCell::Day);
        blanks.chain(days).collect()
    }

    /// The cells, split in weeks. The last week may be shorter than [`COLUMNS`].
    pub fn rows(&self) -> Vec<Vec<GridCell>> {
        self.cells()
            .chunks(COLUMNS)
            .map(|week| week.to_vec())
            .collect()
    }
}

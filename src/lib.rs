//! This crate provides the logic of a month-view calendar widget.
//!
//! It computes month grids in the [`grid`] module, and keeps dated events in an [`EventStore`](store::EventStore).
//!
//! The display preference (dark or light) is resolved and persisted by a [`PreferenceController`](preference::PreferenceController), that relies on host collaborators from the [`storage`] module. \
//! A [`CalendarApp`](controller::CalendarApp) ties all of these together: it handles navigation between months and the event creation form, and produces a render-ready [`CalendarView`](view::CalendarView) after every action.
//!
//! Events can also be exported to iCal files, see the [`ical`] module.

pub mod config;
pub mod grid;
mod event;
pub use event::{Event, EventId, EventTime, InvalidTime};
pub mod store;
pub use store::EventStore;
pub mod storage;
pub mod preference;
pub mod controller;
pub use controller::CalendarApp;
pub mod view;
pub mod ical;

pub mod utils;

//! Checks that what should survive a restart does survive it

use chrono::NaiveDate;

use desk_calendar::config::DARK_MODE_KEY;
use desk_calendar::controller::{CalendarApp, FixedClock};
use desk_calendar::preference::{PreferenceController, Theme};
use desk_calendar::storage::{FileStorage, KeyValueStorage};
use desk_calendar::store::EventStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn test_preference_survives_restart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();

    // First session: no saved preference, system says dark
    let mut pref = PreferenceController::initialize(FileStorage::new(dir.path()), &true);
    assert_eq!(pref.theme(), Theme::Dark);
    assert_eq!(pref.toggle(), Theme::Light);

    // Second session: the saved preference wins over the system
    let pref = PreferenceController::initialize(FileStorage::new(dir.path()), &true);
    assert_eq!(pref.theme(), Theme::Light);
    assert_eq!(pref.storage().get(DARK_MODE_KEY).unwrap(), Some("false".to_string()));
}

#[test]
fn test_events_survive_restart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let events_path = dir.path().join("data").join("events.json");

    let id = {
        let pref = PreferenceController::initialize(FileStorage::new(dir.path()), &false);
        let mut app = CalendarApp::new(EventStore::new(), pref, Box::new(FixedClock(today())));
        app.click_day(12);
        app.set_title("Dentist");
        app.set_time("16:45").unwrap();
        app.set_description("Second floor");
        let id = app.submit_form().unwrap();
        app.store().save_to_file(&events_path).unwrap();
        id
    };

    let store = EventStore::from_file(&events_path).unwrap();
    let pref = PreferenceController::initialize(FileStorage::new(dir.path()), &false);
    let app = CalendarApp::new(store, pref, Box::new(FixedClock(today())));

    let event = app.store().get(&id).unwrap();
    assert_eq!(event.title(), "Dentist");
    assert_eq!(event.time().to_string(), "16:45");
    assert_eq!(event.description(), "Second floor");
    assert_eq!(app.view().day(12).unwrap().events[0].label, "16:45 - Dentist");
}

#[test]
fn test_corrupted_events_file() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    std::fs::write(&path, "{ not json").unwrap();
    assert!(EventStore::from_file(&path).is_err());

    let duplicated = r#"{"events":[
        {"id":"a","title":"One","date":"2024-03-01","time":"09:00","description":""},
        {"id":"a","title":"Two","date":"2024-03-02","time":"10:00","description":""}
    ]}"#;
    std::fs::write(&path, duplicated).unwrap();
    assert!(EventStore::from_file(&path).is_err());

    let untitled = r#"{"events":[
        {"id":"b","title":"  ","date":"2024-03-01","time":"09:00","description":""}
    ]}"#;
    std::fs::write(&path, untitled).unwrap();
    assert!(EventStore::from_file(&path).is_err());
}

#[test]
fn test_unreadable_events_file_is_not_overwritten() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    // Two events sharing an ID, e.g. after a bad manual edit
    let content = r#"{"events":[
        {"id":"a","title":"Mortgage signing","date":"2024-03-01","time":"09:00","description":""},
        {"id":"a","title":"Passport renewal","date":"2024-03-02","time":"10:00","description":""}
    ]}"#;
    std::fs::write(&path, content).unwrap();

    let store = EventStore::load_or_set_aside(&path).unwrap();
    let pref = PreferenceController::initialize(FileStorage::new(dir.path()), &false);
    let mut app = CalendarApp::new(store, pref, Box::new(FixedClock(today())));
    assert!(app.view().upcoming.is_empty());

    app.click_day(3);
    app.set_title("Groceries");
    app.submit_form().unwrap();
    app.store().save_to_file(&path).unwrap();

    let backup = std::fs::read_to_string(dir.path().join("events.json.bak")).unwrap();
    assert!(backup.contains("Mortgage signing"));
    assert!(backup.contains("Passport renewal"));
    assert_eq!(EventStore::from_file(&path).unwrap().len(), 1);
}

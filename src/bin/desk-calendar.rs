//! A line-oriented front-end for the calendar.
//!
//! Events are saved in `$DESK_CALENDAR_DATA/events.json`, and the display preference in `$DESK_CALENDAR_DATA/preferences/`.
//! An events file that cannot be loaded is moved to `events.json.bak` rather than overwritten.
//! Set the RUST_LOG environment variable to display more info about what happens.

use std::error::Error;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use desk_calendar::controller::{CalendarApp, LocalClock};
use desk_calendar::preference::PreferenceController;
use desk_calendar::storage::{EnvSystemPreference, FileStorage};
use desk_calendar::store::EventStore;
use desk_calendar::utils::{print_view, short_id};
use desk_calendar::EventId;

const DATA_ENV_VAR: &str = "DESK_CALENDAR_DATA";
const DEFAULT_DATA_FOLDER: &str = "desk-calendar-data";
const EVENTS_FILE: &str = "events.json";
const PREFERENCES_FOLDER: &str = "preferences";
const EXPORT_FILE: &str = "events.ics";

const HELP: &str = "Commands:
  prev | next | today     change the displayed month
  day N                   select day N and open the event form
  new                     open the event form for the selected day
  title TEXT              set the title of the event being created
  time HH:MM              set its time
  desc TEXT               set its description
  add                     create the event
  cancel                  close the event form
  del ID                  delete the event whose ID starts with ID
  theme                   toggle dark mode
  export                  write every event to an iCal file
  help | quit";

type App = CalendarApp<FileStorage>;

enum Flow {
    Continue,
    Quit,
}

fn main() {
    env_logger::init();

    let data_folder = std::env::var(DATA_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FOLDER));

    let events_path = data_folder.join(EVENTS_FILE);
    let store = match EventStore::load_or_set_aside(&events_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("Unable to load events, refusing to start so that {:?} is not overwritten", events_path);
            std::process::exit(1);
        }
    };

    let storage = FileStorage::new(&data_folder.join(PREFERENCES_FOLDER));
    log::debug!("Display preference is stored in {:?}", storage.folder());
    let preference = PreferenceController::initialize(storage, &EnvSystemPreference);
    let mut app = CalendarApp::new(store, preference, Box::new(LocalClock));

    println!("{}\n", HELP);
    print_view(&app.view());
    prompt();

    for line in stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Unable to read input: {}", err);
                break;
            }
        };

        match run_command(&mut app, line.trim(), &data_folder) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => (),
            Err(err) => println!("Error: {}", err),
        }
        print_view(&app.view());
        prompt();
    }
}

fn prompt() {
    print!("> ");
    let _ = stdout().flush();
}

fn run_command(app: &mut App, line: &str, data_folder: &Path) -> Result<Flow, Box<dyn Error>> {
    let (command, argument) = match line.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match command {
        "" => (),
        "prev" => app.previous_month(),
        "next" => app.next_month(),
        "today" => app.go_to_today(),
        "day" => {
            let day: u32 = argument.parse()?;
            if app.click_day(day) == false {
                return Err(format!("{} has no day {}", app.view().month_label, day).into());
            }
        },
        "new" => app.open_form(),
        "title" => app.set_title(argument),
        "time" => app.set_time(argument)?,
        "desc" => app.set_description(argument),
        "add" => {
            match app.submit_form() {
                Ok(id) => {
                    log::debug!("Created event {}", id);
                    save(app, data_folder)?;
                },
                // A refused event simply leaves the form as it is
                Err(err) => log::debug!("Event not created: {}", err),
            }
        },
        "cancel" => app.cancel_form(),
        "del" => {
            let id = find_event_id(app, argument)?;
            app.delete_event(&id);
            save(app, data_folder)?;
        },
        "theme" => { app.toggle_theme(); },
        "export" => {
            let path = data_folder.join(EXPORT_FILE);
            std::fs::create_dir_all(data_folder)?;
            let ical = desk_calendar::ical::build_calendar(app.store().chronological(), &Utc::now());
            std::fs::write(&path, ical)?;
            println!("Exported {} events to {:?}", app.store().len(), path);
        },
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => return Err(format!("Unknown command {:?}. Type 'help' to list commands", other).into()),
    }

    Ok(Flow::Continue)
}

fn find_event_id(app: &App, prefix: &str) -> Result<EventId, Box<dyn Error>> {
    if prefix.is_empty() {
        return Err("Which event? Give the start of its ID".into());
    }

    let matches: Vec<&EventId> = app.store().iter()
        .map(|e| e.id())
        .filter(|id| id.as_str().starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(format!("No event ID starts with {}", prefix).into()),
        several => Err(format!(
            "{} events match {}: {}",
            several.len(), prefix,
            several.iter().map(|id| short_id(id.as_str())).collect::<Vec<_>>().join(", ")
        ).into()),
    }
}

fn save(app: &App, data_folder: &Path) -> Result<(), Box<dyn Error>> {
    app.store().save_to_file(&data_folder.join(EVENTS_FILE))
}

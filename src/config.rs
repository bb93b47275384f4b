//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static ORG_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("My organization".to_string())));

/// Part of the ProdID string that describes the product name (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("DeskCalendar".to_string())));

/// The key-value storage key that holds the dark mode preference (`"true"` or `"false"`)
pub const DARK_MODE_KEY: &str = "darkMode";

/// The time pre-filled in a fresh event form, as `(hour, minute)`
pub const DEFAULT_EVENT_TIME: (u32, u32) = (9, 0);

/// Environment variable read by [`EnvSystemPreference`](crate::storage::EnvSystemPreference)
pub const COLOR_SCHEME_ENV_VAR: &str = "DESK_CALENDAR_COLOR_SCHEME";

/// The `-//ORG//PRODUCT//EN` string used in iCal exports
pub fn default_prod_id() -> String {
    // A panic while one of these was locked does not make its value any less valid
    let org = ORG_NAME.lock().unwrap_or_else(|e| e.into_inner()).clone();
    let product = PRODUCT_NAME.lock().unwrap_or_else(|e| e.into_inner()).clone();
    format!("-//{}//{}//EN", org, product)
}

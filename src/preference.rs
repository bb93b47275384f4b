//! Dark/light display preference
//!
//! The [`PreferenceController`] is the only owner of the theme and of the [`RootStyle`] it is applied to.
//! Everything else only gets read access.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::config::DARK_MODE_KEY;
use crate::storage::{KeyValueStorage, SystemPreference};

/// The root-level class that is set while the dark theme is active
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The value persisted in the key-value storage
    fn as_stored_value(&self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}


/// Root-level presentation classes, that a renderer applies to its outermost element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootStyle {
    classes: BTreeSet<String>,
}

impl RootStyle {
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.as_str())
    }

    fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}


/// Resolves, applies and persists the dark/light preference
#[derive(Debug)]
pub struct PreferenceController<S: KeyValueStorage> {
    storage: S,
    theme: Theme,
    root_style: RootStyle,
}

impl<S: KeyValueStorage> PreferenceController<S> {
    /// Read the persisted preference (or the system default when there is none) and apply it.
    ///
    /// This never fails: an unreadable storage falls back to the system preference.
    pub fn initialize(storage: S, system: &dyn SystemPreference) -> Self {
        let theme = match storage.get(DARK_MODE_KEY) {
            Ok(Some(saved)) if saved.trim().is_empty() == false => {
                log::debug!("Using the persisted display preference {:?}", saved);
                Theme::from_dark(saved.trim() == "true")
            },
            Ok(_) => {
                log::debug!("No persisted display preference, using the system one");
                Theme::from_dark(system.prefers_dark())
            },
            Err(err) => {
                log::warn!("Unable to read the display preference: {}. Using the system one", err);
                Theme::from_dark(system.prefers_dark())
            },
        };

        let mut controller = Self {
            storage,
            theme,
            root_style: RootStyle::default(),
        };
        controller.apply();
        log::info!("Display preference initialized to {}", controller.theme);
        controller
    }

    /// Flip the theme, apply it and persist it.
    ///
    /// A persistence failure is logged and otherwise ignored.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.apply();

        if let Err(err) = self.storage.set(DARK_MODE_KEY, self.theme.as_stored_value()) {
            log::warn!("Unable to persist the display preference: {}", err);
        }
        log::info!("Display preference toggled to {}", self.theme);
        self.theme
    }

    fn apply(&mut self) {
        self.root_style.set_class(DARK_CLASS, self.theme.is_dark());
    }

    pub fn theme(&self) -> Theme             { self.theme }
    pub fn is_dark(&self) -> bool            { self.theme.is_dark() }
    pub fn root_style(&self) -> &RootStyle   { &self.root_style }
    pub fn storage(&self) -> &S              { &self.storage }
}

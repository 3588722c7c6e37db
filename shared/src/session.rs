//! Session token storage.
//!
//! The browser keeps the token in `localStorage` and the CLI in a JSON file;
//! both sit behind [`TokenStore`] so the client code does not care which.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ClientError;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USERNAME_KEY: &str = "username";
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Characters of the username shown on the header button.
pub const SHORT_NAME_LEN: usize = 6;

/// String key/value storage for session data
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        (**self).remove(key)
    }
}

/// In-process store, used by tests and as a throwaway session
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn stored_value(self) -> &'static str {
        if self.is_dark() {
            "true"
        } else {
            "false"
        }
    }
}

/// Theme to apply on page load and whether it came from the system preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDecision {
    pub theme: Theme,
    /// The stored value was missing or unreadable; persist `theme`.
    pub persist: bool,
}

/// An explicit stored choice wins; otherwise follow the system preference.
pub fn resolve_theme(stored: Option<&str>, prefers_dark: impl FnOnce() -> bool) -> ThemeDecision {
    match stored {
        Some("true") => ThemeDecision {
            theme: Theme::Dark,
            persist: false,
        },
        Some("false") => ThemeDecision {
            theme: Theme::Light,
            persist: false,
        },
        _ => ThemeDecision {
            theme: if prefers_dark() { Theme::Dark } else { Theme::Light },
            persist: true,
        },
    }
}

/// First few characters of a username, for the header button.
pub fn short_name(username: &str) -> String {
    username.chars().take(SHORT_NAME_LEN).collect()
}

/// Login state kept in a [`TokenStore`]
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty() && token != "null")
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY).filter(|name| !name.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn save_login(&self, token: &str, username: &str) -> Result<(), ClientError> {
        self.store.set(ACCESS_TOKEN_KEY, token)?;
        self.store.set(USERNAME_KEY, username)?;
        tracing::debug!(username, "session stored");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Resolves the theme and persists a detected system preference.
    pub fn load_theme(&self, prefers_dark: impl FnOnce() -> bool) -> Result<Theme, ClientError> {
        let stored = self.store.get(DARK_MODE_KEY);
        let decision = resolve_theme(stored.as_deref(), prefers_dark);
        if decision.persist {
            self.save_theme(decision.theme)?;
        }
        Ok(decision.theme)
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), ClientError> {
        self.store.set(DARK_MODE_KEY, theme.stored_value())
    }

    /// Flips the theme and stores the new choice.
    pub fn toggle_theme(&self, current: Theme) -> Result<Theme, ClientError> {
        let next = current.toggled();
        self.save_theme(next)?;
        Ok(next)
    }
}

use booking_shared::session::{Session, Theme};

use crate::services::storage::LocalStorageStore;

const DARK_MODE_CLASS: &str = "dark-mode";

fn prefers_dark() -> bool {
    gloo::utils::window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn apply(theme: Theme) {
    let body = gloo::utils::body();
    if let Err(e) = body
        .class_list()
        .toggle_with_force(DARK_MODE_CLASS, theme.is_dark())
    {
        tracing::error!("Failed to apply theme: {:?}", e);
    }
}

pub fn current_theme() -> Theme {
    if gloo::utils::body().class_list().contains(DARK_MODE_CLASS) {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Applies the stored theme, falling back to the system preference.
pub fn apply_stored_theme() -> Theme {
    let session = Session::new(LocalStorageStore);
    let theme = session.load_theme(prefers_dark).unwrap_or_else(|e| {
        tracing::warn!("Could not persist theme: {}", e);
        if prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    });
    apply(theme);
    theme
}

pub fn toggle(current: Theme) -> Theme {
    let session = Session::new(LocalStorageStore);
    let next = session.toggle_theme(current).unwrap_or_else(|e| {
        tracing::warn!("Could not persist theme: {}", e);
        current.toggled()
    });
    apply(next);
    next
}

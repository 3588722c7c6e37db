//! Whole-page side effects.

pub fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

pub fn reload() {
    if let Err(e) = gloo::utils::window().location().reload() {
        tracing::error!("Failed to reload page: {:?}", e);
    }
}

/// Full navigation, so every component re-reads the stored session.
pub fn redirect(path: &str) {
    if let Err(e) = gloo::utils::window().location().set_href(path) {
        tracing::error!("Failed to redirect to {}: {:?}", path, e);
    }
}

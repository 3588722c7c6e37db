use booking_shared::session::short_name;
use yew::prelude::*;

/// Who is logged in, shared through a `ContextProvider`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub username: Option<String>,
    /// The header has asked the backend at least once.
    pub checked: bool,
}

impl AuthState {
    pub fn logged_in(username: String) -> Self {
        Self {
            username: Some(username),
            checked: true,
        }
    }

    pub fn logged_out() -> Self {
        Self {
            username: None,
            checked: true,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    pub fn short_name(&self) -> Option<String> {
        self.username.as_deref().map(short_name)
    }
}

/// Shared login state; a lone component without a provider gets a private one.
#[hook]
pub fn use_auth() -> UseStateHandle<AuthState> {
    let fallback = use_state(AuthState::default);
    use_context::<UseStateHandle<AuthState>>().unwrap_or(fallback)
}

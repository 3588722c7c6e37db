use booking_shared::{ClientError, TokenStore};
use gloo::storage::{LocalStorage, Storage};

/// `window.localStorage`, holding plain strings so values stay readable from devtools
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl TokenStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to read {} from local storage: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| ClientError::storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| ClientError::storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_shared::session::{Session, ACCESS_TOKEN_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_round_trip_through_local_storage() {
        let session = Session::new(LocalStorageStore);
        session.save_login("token-123", "yamada").unwrap();

        assert_eq!(
            LocalStorage::raw().get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("token-123")
        );
        assert_eq!(session.username().as_deref(), Some("yamada"));

        session.clear().unwrap();
        assert_eq!(session.access_token(), None);
    }
}

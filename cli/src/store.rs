use booking_shared::{ClientError, TokenStore};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Session values kept as a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A file that is not a JSON object is treated as empty and replaced on
    /// the next write. Failing to read the file at all is an error.
    fn read(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(ClientError::storage(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt session file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ClientError::storage)?;
        }
        let content = serde_json::to_string_pretty(values).map_err(ClientError::storage)?;
        std::fs::write(&self.path, content).map_err(ClientError::storage)
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut values = self.read()?;
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut values = self.read()?;
        if values.remove(key).is_some() {
            self.write(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_shared::session::{Session, Theme};

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        assert_eq!(store.get("accessToken"), None);
        assert!(store.remove("accessToken").is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_session_persists_between_stores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        Session::new(FileStore::new(&path))
            .save_login("abc", "suzuki")
            .unwrap();

        let session = Session::new(FileStore::new(&path));
        assert_eq!(session.access_token().as_deref(), Some("abc"));
        assert_eq!(session.username().as_deref(), Some("suzuki"));

        session.clear().unwrap();
        assert!(!Session::new(FileStore::new(&path)).has_token());
    }

    #[test]
    fn test_theme_is_kept_after_logout() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(FileStore::new(dir.path().join("session.json")));

        session.save_login("abc", "suzuki").unwrap();
        session.save_theme(Theme::Dark).unwrap();
        session.clear().unwrap();

        assert_eq!(session.load_theme(|| false).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("username"), None);

        store.set("username", "tanaka").unwrap();
        assert_eq!(store.get("username").as_deref(), Some("tanaka"));
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("username"), None);
        assert!(store.set("username", "tanaka").is_err());
        assert!(store.remove("accessToken").is_err());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        store.set("theme", "dark").unwrap();
        store.set("accessToken", "abc").unwrap();
        store.remove("accessToken").unwrap();

        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }
}

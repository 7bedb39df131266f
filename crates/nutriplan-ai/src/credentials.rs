//! Persistent storage for the provider API key.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::ProviderError;

const APP_DIR: &str = "nutriplan";
const KEY_FILE: &str = "api_key";

/// A single API key kept in a file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory, if one exists.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(APP_DIR).join(KEY_FILE)))
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key. A missing or blank file yields `None`.
    pub fn load(&self) -> Result<Option<String>, ProviderError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let key = content.trim();
                Ok((!key.is_empty()).then(|| key.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a key, replacing any previous one.
    pub fn save(&self, api_key: &str) -> Result<(), ProviderError> {
        let key = api_key.trim();
        if key.is_empty() {
            return Err(ProviderError::MissingCredential);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = open_private(&self.path)?;
        file.write_all(key.as_bytes())?;

        tracing::debug!(path = %self.path.display(), "stored API key");
        Ok(())
    }

    /// Remove the stored key. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, ProviderError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open for writing with owner-only permissions, narrowing an existing file
/// before anything is written to it.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// Show only the start of a key.
pub fn mask_key(api_key: &str) -> String {
    let visible: String = api_key.chars().take(4).collect();
    if api_key.chars().count() <= 4 {
        "****".to_owned()
    } else {
        format!("{visible}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("nested").join("api_key"))
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_trims() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.save("  sk-secret \n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("sk-secret"));
    }

    #[test]
    fn test_save_rejects_blank() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(matches!(
            store.save("   "),
            Err(ProviderError::MissingCredential)
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(!store.clear().unwrap());
        store.save("pplx-1").unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_blank_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "\n  \n").unwrap();
        assert_eq!(CredentialStore::new(path).load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.save("AIza").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_narrows_existing_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "old-key-that-is-longer").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = CredentialStore::new(&path);
        store.save("sk-new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().as_deref(), Some("sk-new"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdef"), "sk-a****");
        assert_eq!(mask_key("abc"), "****");
    }
}

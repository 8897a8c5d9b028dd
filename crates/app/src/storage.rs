//! JSON file store.
//!
//! Keeps each key in its own `<key>.json` file under a data directory, which
//! is how the command-line front end remembers the cart and the signed-in
//! user between runs.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use storefront::storage::{PersistentStore, StoreError};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistentStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        trace!(path = %path.display(), bytes = value.len(), "saved");

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront::{
        cart::CartStore,
        catalog::Catalog,
        products::ProductId,
        storage::{CART_KEY, USER_KEY},
    };
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_key_loads_as_none() -> TestResult {
        let dir = tempdir()?;
        let store = JsonFileStore::open(dir.path())?;

        assert_eq!(store.load(CART_KEY)?, None);

        Ok(())
    }

    #[test]
    fn save_then_load_from_a_new_handle() -> TestResult {
        let dir = tempdir()?;

        JsonFileStore::open(dir.path())?.save(USER_KEY, r#"{"email":"a@b.c","name":"A"}"#)?;

        let reopened = JsonFileStore::open(dir.path())?;

        assert_eq!(
            reopened.load(USER_KEY)?.as_deref(),
            Some(r#"{"email":"a@b.c","name":"A"}"#)
        );
        assert!(dir.path().join("storefront_user.json").exists());

        Ok(())
    }

    #[test]
    fn open_creates_nested_directory() -> TestResult {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");

        let store = JsonFileStore::open(&nested)?;

        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());

        Ok(())
    }

    #[test]
    fn remove_missing_key_is_ok() -> TestResult {
        let dir = tempdir()?;
        let store = JsonFileStore::open(dir.path())?;

        store.remove(USER_KEY)?;
        store.save(USER_KEY, "{}")?;
        store.remove(USER_KEY)?;

        assert_eq!(store.load(USER_KEY)?, None);

        Ok(())
    }

    #[test]
    fn path_like_keys_are_rejected() -> TestResult {
        let dir = tempdir()?;
        let store = JsonFileStore::open(dir.path())?;

        assert!(matches!(
            store.save("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.load(""), Err(StoreError::InvalidKey(_))));

        Ok(())
    }

    #[test]
    fn cart_persists_across_restores() -> TestResult {
        let dir = tempdir()?;
        let catalog = Arc::new(Catalog::seeded()?);

        let mut cart =
            CartStore::restore(catalog.clone(), Arc::new(JsonFileStore::open(dir.path())?))?;
        cart.add(ProductId::new(3))?;
        cart.add(ProductId::new(3))?;

        let restored = CartStore::restore(catalog, Arc::new(JsonFileStore::open(dir.path())?))?;

        assert_eq!(restored.count(), 2);
        assert_eq!(restored.total(), cart.total());

        Ok(())
    }
}

//! Bearer token persistence under a single fixed storage key. The token is an
//! opaque string; nothing here inspects or validates it.

use crate::storage::{Storage, StorageError};
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::Arc};

/// Storage key holding the platform bearer token.
pub const TOKEN_KEY: &str = "english_learning_token";

#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenStore")
            .field("key", &TOKEN_KEY)
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns the persisted token, treating an empty value as absent.
    ///
    /// # Errors
    /// Returns `StorageError` if the storage cannot be read.
    pub fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// # Errors
    /// Returns `StorageError` if the storage cannot be written.
    pub fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token.expose_secret())
    }

    /// # Errors
    /// Returns `StorageError` if the storage cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use anyhow::Result;

    #[test]
    fn set_get_clear() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        let tokens = TokenStore::new(storage.clone());

        assert!(tokens.get()?.is_none());

        tokens.set(&SecretString::from("T1"))?;
        assert_eq!(storage.get(TOKEN_KEY)?.as_deref(), Some("T1"));
        let token = tokens.get()?.map(|token| token.expose_secret().to_string());
        assert_eq!(token.as_deref(), Some("T1"));

        tokens.clear()?;
        assert!(tokens.get()?.is_none());
        assert_eq!(storage.get(TOKEN_KEY)?, None);
        Ok(())
    }

    #[test]
    fn empty_value_is_absent() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "")?;
        let tokens = TokenStore::new(storage);
        assert!(tokens.get()?.is_none());
        Ok(())
    }

    #[test]
    fn debug_does_not_leak_token() -> Result<()> {
        let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
        tokens.set(&SecretString::from("super-secret"))?;
        assert!(!format!("{tokens:?}").contains("super-secret"));
        Ok(())
    }
}

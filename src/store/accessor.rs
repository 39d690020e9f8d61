//! Typed per-key accessors.
//!
//! An [`Accessor`] binds one storage key to one serde shape so that widget
//! controllers never touch raw JSON. Reads of an absent key yield `None` (or
//! the type's default); reads of a malformed value surface as
//! [`StoreError::Decode`] instead of being silently coerced.

use crate::store::KvStore;
use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// A typed view over a single store key.
///
/// Cheap to clone; all clones share the underlying store handle. The key is
/// fixed at construction, so a controller holding an `Accessor<Vec<Todo>>`
/// can only ever read and write its own slice of the namespace.
#[derive(Debug, Clone)]
pub struct Accessor<T> {
    store: KvStore,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Accessor<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Binds `key` in `store` to the shape `T`.
    pub fn new(store: KvStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// The storage key this accessor is bound to.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads and decodes the value, `None` when the key is absent.
    pub async fn get(&self) -> Result<Option<T>, StoreError> {
        self.store.get_as(self.key).await
    }

    /// Replaces the stored value wholesale.
    pub async fn set(&self, value: &T) -> Result<(), StoreError> {
        self.store.set_as(self.key, value).await
    }
}

impl<T> Accessor<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Reads the value, substituting `T::default()` when the key is absent.
    ///
    /// The default is not written back; the key stays absent until the first
    /// explicit write.
    pub async fn get_or_default(&self) -> Result<T, StoreError> {
        Ok(self.get().await?.unwrap_or_default())
    }

    /// Read-modify-write: loads the current value (or the default), applies
    /// `mutate`, and stores the result.
    ///
    /// The read and write happen in sequence within this call; concurrent
    /// updates to the same key settle last-write-wins, which matches the
    /// store's general contract.
    pub async fn update<F>(&self, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.get_or_default().await?;
        mutate(&mut value);
        self.set(&value).await?;
        Ok(value)
    }
}

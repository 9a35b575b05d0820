//! [`Memo`]ization of computed reports.

use std::{collections::HashMap, future::Future, hash::Hash, sync::Arc};

use derive_more::Display;
use smart_default::SmartDefault;
use tokio::sync::Mutex;
use tracing as log;
use xxhash_rust::xxh3;

/// [`Memo`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Maximum number of values kept at once.
    ///
    /// Zero disables memoization.
    #[default(64)]
    pub capacity: usize,
}

/// Key of a memoized value.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0:016x}")]
pub struct Key(u64);

impl Key {
    /// Calculates the [`Key`] of the provided inputs.
    #[must_use]
    pub fn of(inputs: &impl Hash) -> Self {
        use std::hash::Hasher as _;

        let mut hasher = xxh3::Xxh3Builder::new().build();
        inputs.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Table of computed values by their [`Key`]s.
///
/// Cleared completely once full.
#[derive(Debug)]
pub struct Memo<V> {
    /// [`Config`] of this [`Memo`].
    config: Config,

    /// Memoized values.
    entries: Mutex<HashMap<Key, Arc<V>>>,
}

impl<V> Memo<V> {
    /// Creates a new empty [`Memo`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value memoized by the provided [`Key`], computing and
    /// memoizing it with the provided function if there is none.
    ///
    /// # Errors
    ///
    /// If the computation fails. Failures are not memoized.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: Key,
        compute: F,
    ) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.entries.lock().await.get(&key) {
            log::debug!(%key, "memo hit");
            return Ok(Arc::clone(value));
        }
        log::debug!(%key, "memo miss");

        let value = Arc::new(compute().await?);
        if self.config.capacity > 0 {
            let mut entries = self.entries.lock().await;
            if entries.len() >= self.config.capacity {
                entries.clear();
            }
            drop(entries.insert(key, Arc::clone(&value)));
        }
        Ok(value)
    }

    /// Counts the memoized values.
    pub async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

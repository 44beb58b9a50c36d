//! In-memory mock backends.
//!
//! Each mock repository owns a [`MockTable`] seeded from [`fixtures`] and
//! applies the same domain rules a backend would, so stores behave the same
//! against either data source.

pub mod auth;
pub mod fixtures;
pub mod inventory;
pub mod picking;
pub mod stock_in;
pub mod stock_out;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use wareflow_core::{Entity, Page, PageRequest, Timestamped};

use crate::error::{ClientError, ClientResult};

pub use auth::{DEMO_PASSWORD, DEMO_USERNAME, MockAuthRepository};
pub use inventory::MockInventoryRepository;
pub use picking::MockPickingRepository;
pub use stock_in::MockStockInRepository;
pub use stock_out::MockStockOutRepository;

/// Key/value table behind a lock, for tests and offline demos.
#[derive(Debug)]
pub struct MockTable<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for MockTable<K, V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> MockTable<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(rows: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            inner: RwLock::new(rows.into_iter().collect()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn upsert(&self, key: K, value: V) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list(&self) -> Vec<V> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Mutate one row in place. The row is only written back when `f`
    /// succeeds; a missing key is [`ClientError::NotFound`].
    pub fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> ClientResult<R>) -> ClientResult<(V, R)> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let current = map.get(key).ok_or(ClientError::NotFound)?;
        let mut draft = current.clone();
        let out = f(&mut draft)?;
        map.insert(key.clone(), draft.clone());
        Ok((draft, out))
    }
}

/// Counter behind backend-assigned reference numbers. Never reuses a value,
/// even after rows are deleted.
#[derive(Debug, Default)]
pub struct Sequence(AtomicU64);

impl Sequence {
    pub fn starting_after(issued: usize) -> Self {
        Self(AtomicU64::new(issued as u64))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Filter, order newest first and slice one page, the way a backend list
/// endpoint does.
pub(crate) fn page_of<V>(rows: Vec<V>, keep: impl Fn(&V) -> bool, request: PageRequest) -> Page<V>
where
    V: Clone + Timestamped + Entity,
    V::Id: Ord,
{
    let mut rows: Vec<V> = rows.into_iter().filter(|r| keep(r)).collect();
    rows.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    Page::paginate(&rows, request)
}

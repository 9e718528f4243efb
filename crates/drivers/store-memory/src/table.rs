//! Versioned record table shared by both stores.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use quorum_ports::Versioned;

/// Records keyed by raw id, each with a version counter.
///
/// Ids are allocated under the same write lock that stores the row, so
/// ascending id order is commit order.
#[derive(Debug)]
pub(crate) struct Table<T> {
    inner: RwLock<Rows<T>>,
}

#[derive(Debug)]
struct Rows<T> {
    map: BTreeMap<u64, Versioned<T>>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Rows {
                map: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    /// Allocate the next id, let `stamp` write it into the value, and store it.
    pub(crate) fn insert(&self, stamp: impl FnOnce(u64) -> T) -> Versioned<T> {
        let mut rows = self.inner.write();
        let id = rows.next_id;
        rows.next_id += 1;
        let row = Versioned::new(stamp(id), Versioned::<T>::INITIAL);
        rows.map.insert(id, row.clone());
        row
    }

    pub(crate) fn get(&self, id: u64) -> Option<Versioned<T>> {
        self.inner.read().map.get(&id).cloned()
    }

    /// `None` if absent, `Some(false)` on a version mismatch.
    pub(crate) fn swap(&self, id: u64, expected_version: u64, value: T) -> Option<bool> {
        let mut rows = self.inner.write();
        let row = rows.map.get_mut(&id)?;
        if row.version != expected_version {
            return Some(false);
        }
        row.value = value;
        row.version += 1;
        Some(true)
    }

    /// `None` if absent, `Some(false)` on a version mismatch.
    pub(crate) fn remove(&self, id: u64, expected_version: u64) -> Option<bool> {
        let mut rows = self.inner.write();
        let version = rows.map.get(&id)?.version;
        if version != expected_version {
            return Some(false);
        }
        rows.map.remove(&id);
        Some(true)
    }

    pub(crate) fn page(&self, offset: usize, limit: usize, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .map
            .values()
            .filter(|row| keep(&row.value))
            .skip(offset)
            .take(limit)
            .map(|row| row.value.clone())
            .collect()
    }
}

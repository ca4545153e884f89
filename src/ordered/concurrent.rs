//! Thread-safe comparator-ordered set.
//!
//! [`ConcurrentComparatorSet`] wraps a [`ComparatorOrderedSet`] in a
//! `parking_lot::RwLock`. Every mutation runs under the write lock, so the
//! collision check and the insertion of one element form a single atomic step:
//! when several threads insert elements that compare equal, exactly one of
//! them succeeds and the set never holds two equivalent elements.
//!
//! Reads take the read lock. Iteration goes through [`snapshot`], which
//! clones the underlying persistent tree in O(1) and then iterates without
//! holding any lock; the snapshot reflects the set at the moment it was taken.
//!
//! [`snapshot`]: ConcurrentComparatorSet::snapshot
//!
//! # Examples
//!
//! ```rust
//! use comparator_set::comparator::comparing;
//! use comparator_set::ordered::ConcurrentComparatorSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ConcurrentComparatorSet::new(comparing(|word: &String| word.len())));
//!
//! let handles: Vec<_> = ["Dog", "Cat", "Cow"]
//!     .into_iter()
//!     .map(|word| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || set.insert(word.to_string()))
//!     })
//!     .collect();
//!
//! let inserted = handles
//!     .into_iter()
//!     .map(|handle| handle.join().unwrap())
//!     .filter(|inserted| *inserted)
//!     .count();
//!
//! // All three words have length 3: exactly one survives.
//! assert_eq!(inserted, 1);
//! assert_eq!(set.len(), 1);
//! ```

use super::error::Collision;
use super::set::ComparatorOrderedSet;
use crate::comparator::Comparator;
use parking_lot::RwLock;
use std::fmt;

/// A comparator-ordered set that can be shared between threads.
///
/// Share it with `Arc<ConcurrentComparatorSet<T, C>>`. The set is `Send` and
/// `Sync` when `T` and `C` are.
pub struct ConcurrentComparatorSet<T, C> {
    inner: RwLock<ComparatorOrderedSet<T, C>>,
}

static_assertions::assert_impl_all!(
    ConcurrentComparatorSet<String, crate::comparator::NaturalOrder>: Send, Sync
);

impl<T, C> ConcurrentComparatorSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    #[must_use]
    pub const fn new(comparator: C) -> Self {
        Self {
            inner: RwLock::new(ComparatorOrderedSet::new(comparator)),
        }
    }

    /// Returns the number of elements at the time of the call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the set held no elements at the time of the call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Consumes the lock and returns the underlying set.
    #[must_use]
    pub fn into_inner(self) -> ComparatorOrderedSet<T, C> {
        self.inner.into_inner()
    }
}

impl<T: Clone, C: Clone> ConcurrentComparatorSet<T, C> {
    /// Returns a point-in-time copy of the set.
    ///
    /// The copy shares its tree with the live set and costs O(1); later
    /// updates to either do not affect the other.
    #[must_use]
    pub fn snapshot(&self) -> ComparatorOrderedSet<T, C> {
        self.inner.read().clone()
    }

    /// Returns the elements in comparator order at the time of the call.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.snapshot().into_iter().collect()
    }

    /// Returns the smallest element under the comparator.
    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.inner.read().first().cloned()
    }

    /// Returns the largest element under the comparator.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.inner.read().last().cloned()
    }
}

impl<T: Clone, C: Comparator<T>> ConcurrentComparatorSet<T, C> {
    /// Atomically inserts `element` unless an equivalent element is present.
    /// Returns whether the element was inserted.
    pub fn insert(&self, element: T) -> bool {
        self.inner.write().insert(element)
    }

    /// Atomically inserts `element`, or hands it back on a collision.
    ///
    /// # Errors
    ///
    /// Returns [`Collision`] carrying `element` when an equivalent element is
    /// already present.
    pub fn try_insert(&self, element: T) -> Result<(), Collision<T>> {
        self.inner.write().try_insert(element)
    }

    /// Inserts every element of `elements` under one write lock and returns
    /// how many were inserted.
    ///
    /// The batch is collected before the lock is taken, so producing the
    /// elements never runs while other threads are blocked.
    pub fn insert_all<I>(&self, elements: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let batch: Vec<T> = elements.into_iter().collect();
        let offered = batch.len();
        let inserted = self.inner.write().insert_all(batch);
        tracing::debug!(offered, inserted, "batch inserted into concurrent set");
        inserted
    }

    /// Atomically stores `element`, returning any equivalent element it
    /// displaced.
    pub fn replace(&self, element: T) -> Option<T> {
        self.inner.write().replace(element)
    }

    /// Returns `true` if some element compares equal to `probe`.
    #[must_use]
    pub fn contains(&self, probe: &T) -> bool {
        self.inner.read().contains(probe)
    }

    /// Returns a copy of the stored element that compares equal to `probe`.
    #[must_use]
    pub fn get(&self, probe: &T) -> Option<T> {
        self.inner.read().get(probe).cloned()
    }

    /// Removes the element that compares equal to `probe`. Returns whether an
    /// element was removed.
    pub fn remove(&self, probe: &T) -> bool {
        self.inner.write().remove(probe)
    }

    /// Removes and returns the element that compares equal to `probe`.
    pub fn take(&self, probe: &T) -> Option<T> {
        self.inner.write().take(probe)
    }
}

impl<T, C: Default> Default for ConcurrentComparatorSet<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C> From<ComparatorOrderedSet<T, C>> for ConcurrentComparatorSet<T, C> {
    fn from(set: ComparatorOrderedSet<T, C>) -> Self {
        Self {
            inner: RwLock::new(set),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ConcurrentComparatorSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConcurrentComparatorSet")
            .field("elements", &*self.inner.read())
            .finish()
    }
}

//! Object identity as a comparison key.
//!
//! Rust values have no built-in identity hash, so identity is made explicit:
//! [`Identified<T>`] pairs a value with an [`ObjectId`] allocated from a
//! process-wide counter. Two `Identified` values built from equal payloads
//! are different objects; a clone is the same object and keeps its id.
//!
//! [`ByIdentity`] compares `Identified` values by id and is the usual
//! tie-break for a comparator that only inspects part of an element:
//!
//! ```rust
//! use comparator_set::comparator::{ComparatorExt, Identified, by_identity, comparing};
//! use comparator_set::ordered::ComparatorOrderedSet;
//!
//! let comparator = comparing(|word: &Identified<&str>| word.chars().next())
//!     .then_by(by_identity());
//! let mut set = ComparatorOrderedSet::new(comparator);
//!
//! assert!(set.insert(Identified::new("Disappear!!")));
//! assert!(set.insert(Identified::new("Disappear!!!")));
//! assert_eq!(set.len(), 2);
//! ```
//!
//! [`ByAddress`] does the same for values already shared through `Arc` or
//! `Rc`, comparing the addresses of the shared allocations.

use super::Comparator;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

/// A process-unique identifier for an [`Identified`] value.
///
/// Identifiers are allocated in increasing order, so comparing ids orders
/// objects by creation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocates a fresh identifier.
    #[must_use]
    pub fn allocate() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// A value tagged with the identity of the object that holds it.
///
/// Equality (`PartialEq`, `Hash`) covers both the id and the value, so two
/// `Identified` values are equal only when they are the same object.
/// `Identified<T>` dereferences to `T`, which lets key extractors read the
/// payload directly.
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::Identified;
///
/// let first = Identified::new("Dog".to_string());
/// let second = Identified::new("Dog".to_string());
///
/// assert_eq!(*first, *second);
/// assert_ne!(first, second);
/// assert_eq!(first.clone(), first);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identified<T> {
    id: ObjectId,
    value: T,
}

impl<T> Identified<T> {
    /// Wraps `value` as a new object with a fresh identity.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            id: ObjectId::allocate(),
            value,
        }
    }

    /// Returns this object's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns a reference to the payload.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Discards the identity and returns the payload.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Identified<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Identified<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for Identified<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Display> fmt::Display for Identified<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(formatter)
    }
}

/// Compares [`Identified`] values by their [`ObjectId`].
///
/// Injective over distinct objects: it reports [`Ordering::Equal`] only for
/// the same object (or a clone of it).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByIdentity;

/// Returns the [`ByIdentity`] comparator.
#[inline]
#[must_use]
pub const fn by_identity() -> ByIdentity {
    ByIdentity
}

impl<T> Comparator<Identified<T>> for ByIdentity {
    #[inline]
    fn compare(&self, left: &Identified<T>, right: &Identified<T>) -> Ordering {
        left.id.cmp(&right.id)
    }
}

/// Compares shared pointers by the address of their allocation.
///
/// Handles cloned from the same `Arc` (or `Rc`) are equal; separately
/// allocated values are distinct even when their contents are equal. The
/// order between distinct allocations is arbitrary but stable while both
/// are alive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByAddress;

impl<T: ?Sized> Comparator<Arc<T>> for ByAddress {
    #[inline]
    fn compare(&self, left: &Arc<T>, right: &Arc<T>) -> Ordering {
        Arc::as_ptr(left)
            .cast::<()>()
            .cmp(&Arc::as_ptr(right).cast::<()>())
    }
}

impl<T: ?Sized> Comparator<Rc<T>> for ByAddress {
    #[inline]
    fn compare(&self, left: &Rc<T>, right: &Rc<T>) -> Ordering {
        Rc::as_ptr(left)
            .cast::<()>()
            .cmp(&Rc::as_ptr(right).cast::<()>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_object_ids_are_unique_and_increasing() {
        let first = ObjectId::allocate();
        let second = ObjectId::allocate();
        assert!(first < second);
    }

    #[rstest]
    fn test_clone_keeps_identity() {
        let original = Identified::new(42);
        let copy = original.clone();
        assert_eq!(original.id(), copy.id());
        assert_eq!(ByIdentity.compare(&original, &copy), Ordering::Equal);
    }

    #[rstest]
    fn test_equal_payloads_are_distinct_objects() {
        let first = Identified::new("Disappear!!");
        let second = Identified::new("Disappear!!");
        assert_eq!(first.get(), second.get());
        assert_ne!(ByIdentity.compare(&first, &second), Ordering::Equal);
    }

    #[rstest]
    fn test_deref_and_into_inner() {
        let word = Identified::new("Cat".to_string());
        assert_eq!(word.len(), 3);
        assert_eq!(word.to_string(), "Cat");
        assert_eq!(word.into_inner(), "Cat");
    }

    #[rstest]
    fn test_by_address_on_arc() {
        let shared: Arc<str> = Arc::from("Dog");
        let alias = Arc::clone(&shared);
        let other: Arc<str> = Arc::from("Dog");

        assert_eq!(ByAddress.compare(&shared, &alias), Ordering::Equal);
        assert_ne!(ByAddress.compare(&shared, &other), Ordering::Equal);
    }

    #[rstest]
    fn test_by_address_on_rc() {
        let shared = Rc::new(1);
        let other = Rc::new(1);

        assert_eq!(ByAddress.compare(&shared, &Rc::clone(&shared)), Ordering::Equal);
        assert_eq!(
            ByAddress.compare(&shared, &other),
            ByAddress.compare(&other, &shared).reverse()
        );
    }
}

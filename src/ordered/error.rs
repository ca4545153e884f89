//! Error returned when an insertion collides with a stored element.

use std::fmt;

/// Returned by [`ComparatorOrderedSet::try_insert`] when the set already holds
/// an element that compares equal to the new one.
///
/// The set keeps its existing element; the rejected element is handed back
/// so the caller can decide what to do with it.
///
/// [`ComparatorOrderedSet::try_insert`]: super::ComparatorOrderedSet::try_insert
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::comparing;
/// use comparator_set::ordered::ComparatorOrderedSet;
///
/// let mut set = ComparatorOrderedSet::new(comparing(|word: &&str| word.len()));
/// set.try_insert("Dog").unwrap();
///
/// let collision = set.try_insert("Cat").unwrap_err();
/// assert_eq!(collision.rejected(), &"Cat");
/// assert_eq!(collision.into_rejected(), "Cat");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision<T> {
    rejected: T,
}

impl<T> Collision<T> {
    pub(super) const fn new(rejected: T) -> Self {
        Self { rejected }
    }

    /// Returns the element that was not inserted.
    #[inline]
    #[must_use]
    pub const fn rejected(&self) -> &T {
        &self.rejected
    }

    /// Consumes the error and returns the element that was not inserted.
    #[inline]
    #[must_use]
    pub fn into_rejected(self) -> T {
        self.rejected
    }
}

impl<T: fmt::Debug> fmt::Display for Collision<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{:?} collides with an element already in the set",
            self.rejected
        )
    }
}

impl<T: fmt::Debug> std::error::Error for Collision<T> {}

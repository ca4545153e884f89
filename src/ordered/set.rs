//! Sorted set whose uniqueness is defined by a comparator.
//!
//! This module provides [`ComparatorOrderedSet`], an ordered set that takes
//! its ordering from a [`Comparator`] supplied at construction instead of from
//! the elements' `Ord` implementation.
//!
//! # Uniqueness
//!
//! The comparator is the only notion of equality the set knows. Inserting an
//! element that compares [`Ordering::Equal`] to a stored element is a no-op:
//! the stored element stays, the new one is discarded. With a comparator that
//! only inspects part of an element, distinct elements silently collapse:
//!
//! ```rust
//! use comparator_set::comparator::comparing;
//! use comparator_set::ordered::ComparatorOrderedSet;
//!
//! let mut set = ComparatorOrderedSet::new(comparing(|word: &&str| word.chars().next()));
//! set.insert_all(["Dog", "Disappear!!", "Cat", "Disappear!!!"]);
//!
//! let words: Vec<&str> = set.iter().copied().collect();
//! assert_eq!(words, vec!["Cat", "Dog"]);
//! ```
//!
//! # Time Complexity
//!
//! | Operation           | Complexity   |
//! |---------------------|--------------|
//! | `insert`            | O(log N)     |
//! | `replace`           | O(log N)     |
//! | `remove` / `take`   | O(log N)     |
//! | `contains` / `get`  | O(log N)     |
//! | `first` / `last`    | O(log N)     |
//! | `len` / `is_empty`  | O(1)         |
//! | `clone`             | O(1)         |
//!
//! Cloning shares the tree: a clone is an independent snapshot, and later
//! updates to either copy only rebuild the path they touch.
//!
//! [`Ordering::Equal`]: std::cmp::Ordering::Equal

use super::error::Collision;
use super::tree::{self, Insertion, Link, Node, OnCollision};
use super::ReferenceCounter;
use crate::comparator::Comparator;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

/// Inline capacity of the iterator stacks. Balanced trees of up to about
/// 2^16 elements never spill to the heap.
const ITERATOR_STACK_CAPACITY: usize = 32;

// =============================================================================
// ComparatorOrderedSet Definition
// =============================================================================

/// An ordered set of `T` whose order and uniqueness come from a comparator.
///
/// # Type Parameters
///
/// * `T` - The element type. Mutating operations require `Clone`, because
///   tree nodes are shared between snapshots.
/// * `C` - The comparator, any [`Comparator<T>`] including plain closures.
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::{ComparatorExt, Identified, by_identity, comparing};
/// use comparator_set::ordered::ComparatorOrderedSet;
///
/// // A tie-break on identity keeps every distinct object.
/// let comparator = comparing(|word: &Identified<String>| word.chars().next())
///     .then_by(by_identity());
/// let mut set = ComparatorOrderedSet::new(comparator);
///
/// let inserted = set.insert_all(
///     ["Dog", "Disappear!!", "Cat", "Disappear!!!"]
///         .map(|word| Identified::new(word.to_string())),
/// );
/// assert_eq!(inserted, 4);
/// assert_eq!(set.first().map(|word| word.as_str()), Some("Cat"));
/// ```
pub struct ComparatorOrderedSet<T, C> {
    /// Root node of the tree
    root: Link<T>,
    /// Number of elements
    length: usize,
    /// Sole source of ordering and equality
    comparator: C,
}

impl<T, C> ComparatorOrderedSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comparator_set::comparator::NaturalOrder;
    /// use comparator_set::ordered::ComparatorOrderedSet;
    ///
    /// let set: ComparatorOrderedSet<i32, _> = ComparatorOrderedSet::new(NaturalOrder);
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator the set was built with.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every element, keeping the comparator.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Returns the smallest element under the comparator.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        tree::leftmost(&self.root)
    }

    /// Returns the largest element under the comparator.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        tree::rightmost(&self.root)
    }

    /// Returns a lazy iterator over the elements in ascending comparator
    /// order. Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comparator_set::comparator::NaturalOrder;
    /// use comparator_set::ordered::ComparatorOrderedSet;
    ///
    /// let set: ComparatorOrderedSet<i32, NaturalOrder> = [3, 1, 2].into_iter().collect();
    /// let elements: Vec<&i32> = set.iter().collect();
    /// assert_eq!(elements, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.length)
    }

    #[cfg(test)]
    pub(crate) fn is_balanced(&self) -> bool {
        tree::is_root_black(&self.root) && tree::black_height(&self.root).is_some()
    }
}

impl<T: Clone, C: Comparator<T>> ComparatorOrderedSet<T, C> {
    /// Inserts `element` unless an element comparing equal to it is already
    /// present. Returns whether the element was inserted.
    ///
    /// On a collision the stored element is kept and `element` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comparator_set::comparator::comparing;
    /// use comparator_set::ordered::ComparatorOrderedSet;
    ///
    /// let mut set = ComparatorOrderedSet::new(comparing(|word: &&str| word.chars().next()));
    /// assert!(set.insert("Dog"));
    /// assert!(!set.insert("Disappear!!"));
    /// assert_eq!(set.get(&"D"), Some(&"Dog"));
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        self.try_insert(element).is_ok()
    }

    /// Inserts `element`, or hands it back inside a [`Collision`] if an element
    /// comparing equal to it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`Collision`] carrying `element` when the set already holds an
    /// element the comparator reports as equal.
    pub fn try_insert(&mut self, element: T) -> Result<(), Collision<T>> {
        match tree::insert(&self.root, element, &self.comparator, OnCollision::Keep) {
            Insertion::Inserted(new_root) => {
                self.root = new_root;
                self.length += 1;
                Ok(())
            }
            Insertion::Rejected(rejected) => {
                tracing::trace!(
                    length = self.length,
                    "element collides with a stored element; keeping the stored one"
                );
                Err(Collision::new(rejected))
            }
            Insertion::Replaced(..) => unreachable!("keep-on-collision insertion never replaces"),
        }
    }

    /// Inserts every element of `elements` in order and returns how many were
    /// inserted.
    ///
    /// Each element is checked against the whole current set, including
    /// elements inserted earlier in the same call.
    pub fn insert_all<I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut inserted = 0;
        for element in elements {
            if self.insert(element) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Stores `element`, displacing any element that compares equal to it.
    /// Returns the displaced element.
    ///
    /// This is the explicit keep-last counterpart of [`insert`](Self::insert).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comparator_set::comparator::comparing;
    /// use comparator_set::ordered::ComparatorOrderedSet;
    ///
    /// let mut set = ComparatorOrderedSet::new(comparing(|word: &&str| word.len()));
    /// assert_eq!(set.replace("Dog"), None);
    /// assert_eq!(set.replace("Cat"), Some("Dog"));
    /// assert_eq!(set.first(), Some(&"Cat"));
    /// ```
    pub fn replace(&mut self, element: T) -> Option<T> {
        match tree::insert(&self.root, element, &self.comparator, OnCollision::Replace) {
            Insertion::Inserted(new_root) => {
                self.root = new_root;
                self.length += 1;
                None
            }
            Insertion::Replaced(new_root, displaced) => {
                tracing::trace!(length = self.length, "element displaced a stored element");
                self.root = new_root;
                Some(displaced)
            }
            Insertion::Rejected(_) => unreachable!("replace-on-collision insertion never rejects"),
        }
    }

    /// Returns `true` if some element compares equal to `probe`.
    #[must_use]
    pub fn contains(&self, probe: &T) -> bool {
        self.get(probe).is_some()
    }

    /// Returns the stored element that compares equal to `probe`.
    #[must_use]
    pub fn get(&self, probe: &T) -> Option<&T> {
        tree::find(&self.root, probe, &self.comparator)
    }

    /// Removes the element that compares equal to `probe`. Returns whether an
    /// element was removed.
    pub fn remove(&mut self, probe: &T) -> bool {
        self.take(probe).is_some()
    }

    /// Removes and returns the element that compares equal to `probe`.
    pub fn take(&mut self, probe: &T) -> Option<T> {
        let (new_root, removed) = tree::remove(&self.root, probe, &self.comparator)?;
        self.root = new_root;
        self.length -= 1;
        Some(removed)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// A lazy in-order iterator over the elements of a [`ComparatorOrderedSet`].
pub struct Iter<'a, T> {
    stack: SmallVec<[&'a Node<T>; ITERATOR_STACK_CAPACITY]>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.descend_left(root);
        iterator
    }

    fn descend_left(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(&node.right);
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the elements of a [`ComparatorOrderedSet`].
///
/// Nodes may be shared with other snapshots, so elements are cloned out.
pub struct IntoIter<T> {
    stack: SmallVec<[ReferenceCounter<Node<T>>; ITERATOR_STACK_CAPACITY]>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn new(root: Link<T>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.descend_left(root);
        iterator
    }

    fn descend_left(&mut self, mut link: Link<T>) {
        while let Some(node) = link {
            link = node.left.clone();
            self.stack.push(node);
        }
    }
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.clone());
        self.remaining -= 1;
        Some(node.element.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> FusedIterator for IntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Clone> Clone for ComparatorOrderedSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, C: Default> Default for ComparatorOrderedSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T: Clone, C: Comparator<T>> Extend<T> for ComparatorOrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T: Clone, C: Comparator<T> + Default> FromIterator<T> for ComparatorOrderedSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.insert_all(iter);
        set
    }
}

impl<T: Clone, C> IntoIterator for ComparatorOrderedSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.length)
    }
}

impl<'a, T, C> IntoIterator for &'a ComparatorOrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold equal elements in the same order.
/// Comparators are not compared.
impl<T: PartialEq, C> PartialEq for ComparatorOrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for ComparatorOrderedSet<T, C> {}

impl<T: Hash, C> Hash for ComparatorOrderedSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ComparatorOrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for ComparatorOrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

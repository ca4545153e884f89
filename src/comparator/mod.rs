//! Comparators and comparator composition.
//!
//! A [`Comparator`] is a three-way comparison over borrowed elements. Every
//! closure of the shape `Fn(&T, &T) -> Ordering` is a comparator, and the
//! helpers in this module build the common shapes:
//!
//! - [`comparing`]: compare by an `Ord` key extracted from each element
//! - [`comparing_by`]: compare by a key with its own comparator
//! - [`NaturalOrder`]: delegate to the element's `Ord` implementation
//! - [`ComparatorExt::then_by`] / [`ComparatorExt::then_comparing`]: tie-break
//! - [`ComparatorExt::reversed`]: invert the order
//!
//! # Uniqueness follows the comparator
//!
//! A [`ComparatorOrderedSet`](crate::ordered::ComparatorOrderedSet) treats two
//! elements as duplicates whenever its comparator reports [`Ordering::Equal`].
//! A comparator that only looks at part of an element therefore merges
//! elements that differ elsewhere. Composing a tie-break that is injective over
//! the elements you want to keep apart (for example
//! [`ByIdentity`](identity::ByIdentity)) makes every distinct element survive.
//!
//! ```rust
//! use comparator_set::comparator::{Comparator, ComparatorExt, comparing};
//! use std::cmp::Ordering;
//!
//! let by_first_char = comparing(|word: &&str| word.chars().next());
//! assert_eq!(by_first_char.compare(&"Dog", &"Disappear!!"), Ordering::Equal);
//!
//! let by_first_char_then_length = by_first_char.then_comparing(|word: &&str| word.len());
//! assert_eq!(
//!     by_first_char_then_length.compare(&"Dog", &"Disappear!!"),
//!     Ordering::Less
//! );
//! ```

pub mod identity;

pub use identity::{ByAddress, ByIdentity, Identified, ObjectId, by_identity};

use std::cmp::Ordering;
use std::fmt;

/// A total three-way comparison over elements of type `T`.
///
/// Implementations must be consistent (antisymmetric and transitive) for the
/// containers in this crate to order elements meaningfully. Inconsistent
/// comparators are not detected; they only produce an unspecified order.
pub trait Comparator<T: ?Sized> {
    /// Compares two elements.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if the comparator considers both elements equal.
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Equal
    }
}

/// Composition helpers available on every comparator.
///
/// The methods only build combinator values, so they need no element type;
/// the element type is fixed where the composed comparator is used.
pub trait ComparatorExt: Sized {
    /// Chains a tie-break comparator consulted only when `self` reports
    /// [`Ordering::Equal`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comparator_set::comparator::{Comparator, ComparatorExt, NaturalOrder, comparing};
    /// use std::cmp::Ordering;
    ///
    /// let by_length = comparing(|word: &String| word.len()).then_by(NaturalOrder);
    /// assert_eq!(
    ///     by_length.compare(&"ab".to_string(), &"aa".to_string()),
    ///     Ordering::Greater
    /// );
    /// ```
    #[inline]
    fn then_by<D>(self, next: D) -> ThenComparing<Self, D> {
        ThenComparing {
            primary: self,
            secondary: next,
        }
    }

    /// Chains a tie-break on an `Ord` key extracted from each element.
    #[inline]
    fn then_comparing<F>(self, key: F) -> ThenComparing<Self, KeyComparator<F>> {
        self.then_by(comparing(key))
    }

    /// Inverts the order imposed by this comparator.
    #[inline]
    fn reversed(self) -> Reversed<Self> {
        Reversed { inner: self }
    }
}

impl<C> ComparatorExt for C {}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

// =============================================================================
// Natural Order
// =============================================================================

/// Compares elements with their own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

// =============================================================================
// Key Comparators
// =============================================================================

/// Compares elements by an `Ord` key. Built by [`comparing`].
#[derive(Clone, Copy)]
pub struct KeyComparator<F> {
    key: F,
}

/// Builds a comparator that orders elements by the key `key` extracts.
///
/// Elements with equal keys compare as [`Ordering::Equal`], whatever else
/// distinguishes them.
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::{Comparator, comparing};
/// use std::cmp::Ordering;
///
/// let by_first_char = comparing(|word: &String| word.chars().next());
/// assert_eq!(
///     by_first_char.compare(&"Cat".to_string(), &"Dog".to_string()),
///     Ordering::Less
/// );
/// ```
#[inline]
pub const fn comparing<F>(key: F) -> KeyComparator<F> {
    KeyComparator { key }
}

impl<T, K, F> Comparator<T> for KeyComparator<F>
where
    T: ?Sized,
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.key)(left).cmp(&(self.key)(right))
    }
}

impl<F> fmt::Debug for KeyComparator<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("KeyComparator")
    }
}

/// Compares elements by a key, ordering the keys with another comparator.
/// Built by [`comparing_by`].
#[derive(Clone, Copy)]
pub struct KeyByComparator<F, C> {
    key: F,
    key_comparator: C,
}

/// Builds a comparator that orders elements by the key `key` extracts, using
/// `key_comparator` to order the keys.
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::{Comparator, ComparatorExt, NaturalOrder, comparing_by};
/// use std::cmp::Ordering;
///
/// let by_length_descending = comparing_by(|word: &&str| word.len(), NaturalOrder.reversed());
/// assert_eq!(by_length_descending.compare(&"long", &"tiny!"), Ordering::Greater);
/// ```
#[inline]
pub const fn comparing_by<F, C>(key: F, key_comparator: C) -> KeyByComparator<F, C> {
    KeyByComparator {
        key,
        key_comparator,
    }
}

impl<T, K, F, C> Comparator<T> for KeyByComparator<F, C>
where
    T: ?Sized,
    F: Fn(&T) -> K,
    C: Comparator<K>,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.key_comparator
            .compare(&(self.key)(left), &(self.key)(right))
    }
}

impl<F, C: fmt::Debug> fmt::Debug for KeyByComparator<F, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("KeyByComparator")
            .field("key_comparator", &self.key_comparator)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Lexicographic composition of two comparators. Built by
/// [`ComparatorExt::then_by`].
///
/// Reports [`Ordering::Equal`] only when both comparators do.
#[derive(Clone, Copy, Debug)]
pub struct ThenComparing<A, B> {
    primary: A,
    secondary: B,
}

impl<T, A, B> Comparator<T> for ThenComparing<A, B>
where
    T: ?Sized,
    A: Comparator<T>,
    B: Comparator<T>,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.primary
            .compare(left, right)
            .then_with(|| self.secondary.compare(left, right))
    }
}

/// Inverts another comparator. Built by [`ComparatorExt::reversed`].
#[derive(Clone, Copy, Debug)]
pub struct Reversed<C> {
    inner: C,
}

impl<T, C> Comparator<T> for Reversed<C>
where
    T: ?Sized,
    C: Comparator<T>,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(right, left)
    }
}

// =============================================================================
// Tests
// =============================================================================

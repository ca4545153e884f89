//! Comparator-ordered sets.
//!
//! - [`ComparatorOrderedSet`]: sorted set ordered and deduplicated by a
//!   comparator (persistent red-black tree)
//! - [`ConcurrentComparatorSet`]: a lock-protected variant that can be shared
//!   between threads (`concurrent` feature)
//!
//! # Uniqueness by Comparator
//!
//! Both sets treat two elements as the same element whenever the comparator
//! reports [`Ordering::Equal`](std::cmp::Ordering::Equal). The first element
//! of an equivalence class to arrive is kept; later ones are discarded unless
//! they are stored with an explicit `replace`.
//!
//! ```rust
//! use comparator_set::comparator::{ComparatorExt, Identified, by_identity, comparing};
//! use comparator_set::ordered::ComparatorOrderedSet;
//!
//! let words = ["Dog", "Disappear!!", "Cat", "Disappear!!!"];
//!
//! // Keyed on the first character only: two words disappear.
//! let mut collapsed = ComparatorOrderedSet::new(comparing(|word: &&str| word.chars().next()));
//! collapsed.insert_all(words);
//! assert_eq!(collapsed.len(), 2);
//!
//! // Tie-broken by identity: every word survives.
//! let mut kept = ComparatorOrderedSet::new(
//!     comparing(|word: &Identified<&str>| word.chars().next()).then_by(by_identity()),
//! );
//! kept.insert_all(words.map(Identified::new));
//! assert_eq!(kept.len(), 4);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer for tree nodes.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod set;
mod tree;

#[cfg(feature = "concurrent")]
mod concurrent;

#[cfg(feature = "serde")]
mod serialization;

pub use error::Collision;
pub use set::ComparatorOrderedSet;
pub use set::IntoIter;
pub use set::Iter;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentComparatorSet;

#[cfg(feature = "serde")]
pub use serialization::WithComparator;

// =============================================================================
// Tests
// =============================================================================

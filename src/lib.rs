//! # comparator-set
//!
//! Sorted sets whose uniqueness is defined by a comparator rather than by the
//! elements' own equality.
//!
//! ## Overview
//!
//! A sorted set built on a custom comparator uses that comparator for two
//! jobs: placing elements and deciding whether an element is already present.
//! Elements that compare as equal collapse into one, even when they are
//! distinct values. This crate makes that behavior explicit and gives the
//! tools to control it:
//!
//! - **Comparators**: the [`Comparator`](comparator::Comparator) trait, key
//!   comparators, and lexicographic composition
//! - **Identity**: [`Identified`](comparator::Identified) values and the
//!   [`ByIdentity`](comparator::ByIdentity) tie-break that keeps distinct
//!   objects apart
//! - **Sets**: [`ComparatorOrderedSet`](ordered::ComparatorOrderedSet) and its
//!   thread-safe counterpart
//!   [`ConcurrentComparatorSet`](ordered::ConcurrentComparatorSet)
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` for tree nodes, making sets `Send` and `Sync`
//! - `concurrent`: `ConcurrentComparatorSet` (enables `arc`)
//! - `serde`: Serialization support
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use comparator_set::prelude::*;
//!
//! let words = ["Dog", "Disappear!!", "Cat", "Disappear!!!"];
//!
//! let mut by_first_char = ComparatorOrderedSet::new(comparing(|word: &&str| word.chars().next()));
//! by_first_char.insert_all(words);
//! assert_eq!(by_first_char.iter().copied().collect::<Vec<_>>(), vec!["Cat", "Dog"]);
//!
//! let mut by_first_char_then_identity = ComparatorOrderedSet::new(
//!     comparing(|word: &Identified<&str>| word.chars().next()).then_by(by_identity()),
//! );
//! by_first_char_then_identity.insert_all(words.map(Identified::new));
//! assert_eq!(by_first_char_then_identity.len(), 4);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use comparator_set::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::*;
    pub use crate::ordered::*;
}

pub mod comparator;
pub mod ordered;

//! Serde support for [`ComparatorOrderedSet`].
//!
//! A set serializes as a sequence in comparator order. Deserializing needs a
//! comparator: `Deserialize` is implemented when the comparator is `Default`,
//! and [`WithComparator`] supplies one explicitly as a `DeserializeSeed`.
//! Deserialized elements go through the ordinary insertion path, so later
//! elements that collide with earlier ones are dropped.

use super::set::ComparatorOrderedSet;
use crate::comparator::Comparator;
use serde::de::{DeserializeSeed, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T: Serialize, C> Serialize for ComparatorOrderedSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

/// Deserializes a [`ComparatorOrderedSet`] ordered by the given comparator.
///
/// # Examples
///
/// ```rust
/// use comparator_set::comparator::comparing;
/// use comparator_set::ordered::WithComparator;
/// use serde::de::DeserializeSeed;
///
/// let comparator = comparing(|word: &String| word.chars().next());
/// let mut deserializer = serde_json::Deserializer::from_str(r#"["Dog", "Disappear!!", "Cat"]"#);
/// let set = WithComparator::new(comparator).deserialize(&mut deserializer).unwrap();
///
/// assert_eq!(set.len(), 2);
/// ```
pub struct WithComparator<T, C> {
    comparator: C,
    element_marker: PhantomData<fn() -> T>,
}

impl<T, C> WithComparator<T, C> {
    /// Wraps the comparator the deserialized set will use.
    #[must_use]
    pub const fn new(comparator: C) -> Self {
        Self {
            comparator,
            element_marker: PhantomData,
        }
    }
}

impl<'de, T, C> DeserializeSeed<'de> for WithComparator<T, C>
where
    T: Deserialize<'de> + Clone,
    C: Comparator<T>,
{
    type Value = ComparatorOrderedSet<T, C>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, T, C> Visitor<'de> for WithComparator<T, C>
where
    T: Deserialize<'de> + Clone,
    C: Comparator<T>,
{
    type Value = ComparatorOrderedSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = ComparatorOrderedSet::new(self.comparator);
        while let Some(element) = access.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

impl<'de, T, C> Deserialize<'de> for ComparatorOrderedSet<T, C>
where
    T: Deserialize<'de> + Clone,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        WithComparator::new(C::default()).deserialize(deserializer)
    }
}

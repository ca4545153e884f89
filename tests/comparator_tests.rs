//! Unit tests for comparators and their composition.

use comparator_set::comparator::{
    ByAddress, Comparator, ComparatorExt, Identified, NaturalOrder, by_identity, comparing,
    comparing_by,
};
use rstest::rstest;
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::Arc;

#[rstest]
#[case(1, 2, Ordering::Less)]
#[case(2, 2, Ordering::Equal)]
#[case(3, 2, Ordering::Greater)]
fn test_natural_order(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
    assert_eq!(NaturalOrder.compare(&left, &right), expected);
    assert_eq!(NaturalOrder.reversed().compare(&left, &right), expected.reverse());
}

#[rstest]
fn test_closure_is_a_comparator() {
    let by_absolute = |left: &i32, right: &i32| left.abs().cmp(&right.abs());
    assert!(by_absolute.equivalent(&-4, &4));
    assert_eq!(by_absolute.compare(&-1, &3), Ordering::Less);
}

#[rstest]
fn test_key_comparator_ignores_rest_of_element() {
    let by_first_char = comparing(|word: &&str| word.chars().next());
    assert!(by_first_char.equivalent(&"Dog", &"Disappear!!"));
    assert_eq!(by_first_char.compare(&"Cat", &"Dog"), Ordering::Less);
}

#[rstest]
fn test_comparing_by_uses_key_comparator() {
    let by_length_descending = comparing_by(|word: &&str| word.len(), NaturalOrder.reversed());
    assert_eq!(
        by_length_descending.compare(&"longer", &"short"),
        Ordering::Less
    );
}

#[rstest]
fn test_then_by_only_consulted_on_ties() {
    let comparator = comparing(|pair: &(i32, i32)| pair.0).then_by(NaturalOrder.reversed());

    assert_eq!(comparator.compare(&(1, 0), &(2, 9)), Ordering::Less);
    assert_eq!(comparator.compare(&(1, 9), &(1, 0)), Ordering::Less);
    assert_eq!(comparator.compare(&(1, 5), &(1, 5)), Ordering::Equal);
}

#[rstest]
fn test_then_comparing_chains_keys() {
    let comparator = comparing(|word: &&str| word.len()).then_comparing(|word: &&str| word.chars().last());
    assert_eq!(comparator.compare(&"ab", &"ba"), Ordering::Greater);
    assert!(comparator.equivalent(&"ab", &"cb"));
}

#[rstest]
fn test_by_identity_separates_equal_values() {
    let first = Identified::new("Disappear!!");
    let second = Identified::new("Disappear!!");

    assert_eq!(*first, *second);
    assert_ne!(by_identity().compare(&first, &second), Ordering::Equal);
    assert!(by_identity().equivalent(&first, &first.clone()));
}

#[rstest]
fn test_identity_tie_break_only_applies_within_class() {
    let comparator = comparing(|word: &Identified<&str>| word.len()).then_by(by_identity());
    let short = Identified::new("zz");
    let long = Identified::new("aaa");

    assert_eq!(comparator.compare(&short, &long), Ordering::Less);
}

#[rstest]
fn test_identities_increase_with_creation_order() {
    let earlier = Identified::new(0);
    let later = Identified::new(0);
    assert!(earlier.id() < later.id());
    assert_eq!(by_identity().compare(&earlier, &later), Ordering::Less);
}

#[rstest]
fn test_by_address_for_shared_pointers() {
    let shared = Arc::new(String::from("Dog"));
    let alias = Arc::clone(&shared);
    let lookalike = Arc::new(String::from("Dog"));

    assert!(ByAddress.equivalent(&shared, &alias));
    assert!(!ByAddress.equivalent(&shared, &lookalike));

    let local = Rc::new(1);
    assert!(ByAddress.equivalent(&local, &Rc::clone(&local)));
    assert!(!ByAddress.equivalent(&local, &Rc::new(1)));
}

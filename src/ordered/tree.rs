//! Persistent red-black tree ordered by a runtime comparator.
//!
//! Nodes are immutable and shared through [`ReferenceCounter`]; every update
//! copies the path from the root to the touched node and shares the rest.
//! Insertion follows Okasaki's balance scheme and deletion Kahrs' scheme, so
//! the usual invariants hold after every operation:
//!
//! 1. The root is black
//! 2. Red nodes have only black children
//! 3. Every path from the root to a leaf has the same number of black nodes
//!
//! The comparator decides both the position of an element and whether it is
//! already present: the walk stops at the first node that compares
//! [`Ordering::Equal`].

use super::ReferenceCounter;
use crate::comparator::Comparator;
use std::cmp::Ordering;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

/// A tree node. Children are shared between versions of the tree.
pub(super) struct Node<T> {
    pub(super) element: T,
    color: Color,
    pub(super) left: Link<T>,
    pub(super) right: Link<T>,
}

pub(super) type Link<T> = Option<ReferenceCounter<Node<T>>>;

/// What an insertion did to the tree.
pub(super) enum Insertion<T> {
    /// The element was added; holds the new root.
    Inserted(Link<T>),
    /// The element took the place of a colliding one; holds the new root and
    /// the displaced element.
    Replaced(Link<T>, T),
    /// A colliding element is already present; the new element is handed back.
    Rejected(T),
}

/// How [`insert`] treats an element that collides with a stored one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum OnCollision {
    Keep,
    Replace,
}

fn make<T>(color: Color, left: Link<T>, element: T, right: Link<T>) -> Link<T> {
    Some(ReferenceCounter::new(Node {
        element,
        color,
        left,
        right,
    }))
}

fn red_parts<T>(link: &Link<T>) -> Option<(&Link<T>, &T, &Link<T>)> {
    link.as_deref()
        .filter(|node| node.color == Color::Red)
        .map(|node| (&node.left, &node.element, &node.right))
}

fn black_node<T>(link: &Link<T>) -> Option<&Node<T>> {
    link.as_deref().filter(|node| node.color == Color::Black)
}

fn is_black_node<T>(link: &Link<T>) -> bool {
    black_node(link).is_some()
}

fn blacken<T: Clone>(link: Link<T>) -> Link<T> {
    match red_parts(&link) {
        Some((left, element, right)) => make(Color::Black, left.clone(), element.clone(), right.clone()),
        None => link,
    }
}

fn redden<T: Clone>(link: &Link<T>) -> Link<T> {
    match black_node(link) {
        Some(node) => make(
            Color::Red,
            node.left.clone(),
            node.element.clone(),
            node.right.clone(),
        ),
        None => link.clone(),
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Returns the stored element that compares equal to `probe`.
pub(super) fn find<'a, T, C>(mut link: &'a Link<T>, probe: &T, comparator: &C) -> Option<&'a T>
where
    C: Comparator<T> + ?Sized,
{
    while let Some(node) = link.as_deref() {
        match comparator.compare(probe, &node.element) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(&node.element),
        }
    }
    None
}

pub(super) fn leftmost<T>(mut link: &Link<T>) -> Option<&T> {
    let mut found = None;
    while let Some(node) = link.as_deref() {
        found = Some(&node.element);
        link = &node.left;
    }
    found
}

pub(super) fn rightmost<T>(mut link: &Link<T>) -> Option<&T> {
    let mut found = None;
    while let Some(node) = link.as_deref() {
        found = Some(&node.element);
        link = &node.right;
    }
    found
}

// =============================================================================
// Insertion
// =============================================================================

/// Inserts `element` below `root`, returning what happened.
pub(super) fn insert<T, C>(
    root: &Link<T>,
    element: T,
    comparator: &C,
    on_collision: OnCollision,
) -> Insertion<T>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    match insert_into(root, element, comparator, on_collision) {
        Insertion::Inserted(new_root) => Insertion::Inserted(blacken(new_root)),
        other => other,
    }
}

fn insert_into<T, C>(
    link: &Link<T>,
    element: T,
    comparator: &C,
    on_collision: OnCollision,
) -> Insertion<T>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let Some(node) = link.as_deref() else {
        return Insertion::Inserted(make(Color::Red, None, element, None));
    };

    match comparator.compare(&element, &node.element) {
        Ordering::Less => match insert_into(&node.left, element, comparator, on_collision) {
            Insertion::Inserted(new_left) => Insertion::Inserted(rebuild_after_insert(
                node.color,
                new_left,
                node.element.clone(),
                node.right.clone(),
            )),
            Insertion::Replaced(new_left, displaced) => Insertion::Replaced(
                make(node.color, new_left, node.element.clone(), node.right.clone()),
                displaced,
            ),
            rejected @ Insertion::Rejected(_) => rejected,
        },
        Ordering::Greater => match insert_into(&node.right, element, comparator, on_collision) {
            Insertion::Inserted(new_right) => Insertion::Inserted(rebuild_after_insert(
                node.color,
                node.left.clone(),
                node.element.clone(),
                new_right,
            )),
            Insertion::Replaced(new_right, displaced) => Insertion::Replaced(
                make(node.color, node.left.clone(), node.element.clone(), new_right),
                displaced,
            ),
            rejected @ Insertion::Rejected(_) => rejected,
        },
        Ordering::Equal => match on_collision {
            OnCollision::Keep => Insertion::Rejected(element),
            OnCollision::Replace => Insertion::Replaced(
                make(node.color, node.left.clone(), element, node.right.clone()),
                node.element.clone(),
            ),
        },
    }
}

fn rebuild_after_insert<T: Clone>(color: Color, left: Link<T>, element: T, right: Link<T>) -> Link<T> {
    match color {
        Color::Black => balance(left, element, right),
        Color::Red => make(Color::Red, left, element, right),
    }
}

/// Resolves a red-red violation directly below a black node.
fn balance<T: Clone>(left: Link<T>, element: T, right: Link<T>) -> Link<T> {
    // Both children red: push the blackness down
    if let (Some((a, x, b)), Some((c, z, d))) = (red_parts(&left), red_parts(&right)) {
        return make(
            Color::Red,
            make(Color::Black, a.clone(), x.clone(), b.clone()),
            element,
            make(Color::Black, c.clone(), z.clone(), d.clone()),
        );
    }

    if let Some((left_left, left_element, left_right)) = red_parts(&left) {
        // Left-Left
        if let Some((a, x, b)) = red_parts(left_left) {
            return make(
                Color::Red,
                make(Color::Black, a.clone(), x.clone(), b.clone()),
                left_element.clone(),
                make(Color::Black, left_right.clone(), element, right),
            );
        }
        // Left-Right
        if let Some((b, y, c)) = red_parts(left_right) {
            return make(
                Color::Red,
                make(Color::Black, left_left.clone(), left_element.clone(), b.clone()),
                y.clone(),
                make(Color::Black, c.clone(), element, right),
            );
        }
    }

    if let Some((right_left, right_element, right_right)) = red_parts(&right) {
        // Right-Right
        if let Some((c, z, d)) = red_parts(right_right) {
            return make(
                Color::Red,
                make(Color::Black, left, element, right_left.clone()),
                right_element.clone(),
                make(Color::Black, c.clone(), z.clone(), d.clone()),
            );
        }
        // Right-Left
        if let Some((b, y, c)) = red_parts(right_left) {
            return make(
                Color::Red,
                make(Color::Black, left, element, b.clone()),
                y.clone(),
                make(Color::Black, c.clone(), right_element.clone(), right_right.clone()),
            );
        }
    }

    make(Color::Black, left, element, right)
}

// =============================================================================
// Removal
// =============================================================================

/// Removes the element that compares equal to `probe`.
///
/// Returns the new root and the removed element, or `None` when nothing
/// collides with `probe`.
pub(super) fn remove<T, C>(root: &Link<T>, probe: &T, comparator: &C) -> Option<(Link<T>, T)>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let removed = find(root, probe, comparator)?.clone();
    Some((blacken(delete_from(root, probe, comparator)), removed))
}

fn delete_from<T, C>(link: &Link<T>, probe: &T, comparator: &C) -> Link<T>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let node = link.as_deref()?;
    match comparator.compare(probe, &node.element) {
        Ordering::Less => {
            let new_left = delete_from(&node.left, probe, comparator);
            if is_black_node(&node.left) {
                balance_left(new_left, node.element.clone(), node.right.clone())
            } else {
                make(Color::Red, new_left, node.element.clone(), node.right.clone())
            }
        }
        Ordering::Greater => {
            let new_right = delete_from(&node.right, probe, comparator);
            if is_black_node(&node.right) {
                balance_right(node.left.clone(), node.element.clone(), new_right)
            } else {
                make(Color::Red, node.left.clone(), node.element.clone(), new_right)
            }
        }
        Ordering::Equal => fuse(&node.left, &node.right),
    }
}

/// Restores the black height after the left subtree lost one black node.
fn balance_left<T: Clone>(left: Link<T>, element: T, right: Link<T>) -> Link<T> {
    if let Some((a, x, b)) = red_parts(&left) {
        return make(
            Color::Red,
            make(Color::Black, a.clone(), x.clone(), b.clone()),
            element,
            right,
        );
    }

    if is_black_node(&right) {
        return balance(left, element, redden(&right));
    }

    if let Some((right_left, right_element, right_right)) = red_parts(&right)
        && let Some(inner) = black_node(right_left)
    {
        return make(
            Color::Red,
            make(Color::Black, left, element, inner.left.clone()),
            inner.element.clone(),
            balance(inner.right.clone(), right_element.clone(), redden(right_right)),
        );
    }

    make(Color::Black, left, element, right)
}

/// Restores the black height after the right subtree lost one black node.
fn balance_right<T: Clone>(left: Link<T>, element: T, right: Link<T>) -> Link<T> {
    if let Some((b, y, c)) = red_parts(&right) {
        return make(
            Color::Red,
            left,
            element,
            make(Color::Black, b.clone(), y.clone(), c.clone()),
        );
    }

    if is_black_node(&left) {
        return balance(redden(&left), element, right);
    }

    if let Some((left_left, left_element, left_right)) = red_parts(&left)
        && let Some(inner) = black_node(left_right)
    {
        return make(
            Color::Red,
            balance(redden(left_left), left_element.clone(), inner.left.clone()),
            inner.element.clone(),
            make(Color::Black, inner.right.clone(), element, right),
        );
    }

    make(Color::Black, left, element, right)
}

/// Joins two subtrees whose elements are all ordered left before right.
fn fuse<T: Clone>(left: &Link<T>, right: &Link<T>) -> Link<T> {
    let (Some(left_node), Some(right_node)) = (left.as_deref(), right.as_deref()) else {
        return left.clone().or_else(|| right.clone());
    };

    match (left_node.color, right_node.color) {
        (Color::Red, Color::Red) => {
            let middle = fuse(&left_node.right, &right_node.left);
            if let Some((b, z, c)) = red_parts(&middle) {
                make(
                    Color::Red,
                    make(Color::Red, left_node.left.clone(), left_node.element.clone(), b.clone()),
                    z.clone(),
                    make(Color::Red, c.clone(), right_node.element.clone(), right_node.right.clone()),
                )
            } else {
                make(
                    Color::Red,
                    left_node.left.clone(),
                    left_node.element.clone(),
                    make(Color::Red, middle, right_node.element.clone(), right_node.right.clone()),
                )
            }
        }
        (Color::Black, Color::Black) => {
            let middle = fuse(&left_node.right, &right_node.left);
            if let Some((b, z, c)) = red_parts(&middle) {
                make(
                    Color::Red,
                    make(Color::Black, left_node.left.clone(), left_node.element.clone(), b.clone()),
                    z.clone(),
                    make(Color::Black, c.clone(), right_node.element.clone(), right_node.right.clone()),
                )
            } else {
                balance_left(
                    left_node.left.clone(),
                    left_node.element.clone(),
                    make(Color::Black, middle, right_node.element.clone(), right_node.right.clone()),
                )
            }
        }
        (Color::Black, Color::Red) => make(
            Color::Red,
            fuse(left, &right_node.left),
            right_node.element.clone(),
            right_node.right.clone(),
        ),
        (Color::Red, Color::Black) => make(
            Color::Red,
            left_node.left.clone(),
            left_node.element.clone(),
            fuse(&left_node.right, right),
        ),
    }
}

// =============================================================================
// Invariant Checks
// =============================================================================

/// Returns the black height of the tree, or `None` if a red node has a red
/// child or two paths disagree on their black height.
#[cfg(test)]
pub(super) fn black_height<T>(link: &Link<T>) -> Option<usize> {
    let Some(node) = link.as_deref() else {
        return Some(1);
    };
    if node.color == Color::Red
        && (red_parts(&node.left).is_some() || red_parts(&node.right).is_some())
    {
        return None;
    }
    let left_height = black_height(&node.left)?;
    let right_height = black_height(&node.right)?;
    if left_height != right_height {
        return None;
    }
    Some(left_height + usize::from(node.color == Color::Black))
}

#[cfg(test)]
pub(super) fn is_root_black<T>(link: &Link<T>) -> bool {
    link.as_deref()
        .is_none_or(|node| node.color == Color::Black)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use rstest::rstest;

    fn build(elements: impl IntoIterator<Item = i32>) -> Link<i32> {
        elements.into_iter().fold(None, |root, element| {
            match insert(&root, element, &NaturalOrder, OnCollision::Keep) {
                Insertion::Inserted(new_root) => new_root,
                _ => root,
            }
        })
    }

    fn in_order(link: &Link<i32>, output: &mut Vec<i32>) {
        if let Some(node) = link.as_deref() {
            in_order(&node.left, output);
            output.push(node.element);
            in_order(&node.right, output);
        }
    }

    fn assert_valid(link: &Link<i32>) {
        assert!(is_root_black(link), "root must be black");
        assert!(black_height(link).is_some(), "red-black invariants violated");
    }

    #[rstest]
    #[case::ascending((0..200).collect())]
    #[case::descending((0..200).rev().collect())]
    #[case::interleaved((0..100).flat_map(|index| [index, 199 - index]).collect())]
    fn test_insert_keeps_tree_balanced(#[case] elements: Vec<i32>) {
        let root = build(elements);
        assert_valid(&root);

        let mut output = Vec::new();
        in_order(&root, &mut output);
        assert_eq!(output, (0..200).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_insert_collision_hands_element_back() {
        let root = build([1, 2, 3]);
        match insert(&root, 2, &NaturalOrder, OnCollision::Keep) {
            Insertion::Rejected(element) => assert_eq!(element, 2),
            _ => panic!("expected the colliding element to be rejected"),
        }
    }

    #[rstest]
    fn test_insert_replace_returns_displaced() {
        let by_tens = |left: &i32, right: &i32| (left / 10).cmp(&(right / 10));
        let root = [10, 20, 30].into_iter().fold(None, |root, element| {
            match insert(&root, element, &by_tens, OnCollision::Keep) {
                Insertion::Inserted(new_root) => new_root,
                _ => root,
            }
        });

        match insert(&root, 25, &by_tens, OnCollision::Replace) {
            Insertion::Replaced(new_root, displaced) => {
                assert_eq!(displaced, 20);
                assert_eq!(find(&new_root, &21, &by_tens), Some(&25));
                assert_eq!(find(&root, &21, &by_tens), Some(&20));
            }
            _ => panic!("expected a replacement"),
        }
    }

    #[rstest]
    fn test_remove_keeps_tree_balanced() {
        let mut root = build(0..128);
        for element in (0..128).step_by(3) {
            let (new_root, removed) =
                remove(&root, &element, &NaturalOrder).expect("element is present");
            assert_eq!(removed, element);
            assert_valid(&new_root);
            root = new_root;
        }

        let mut output = Vec::new();
        in_order(&root, &mut output);
        let expected: Vec<i32> = (0..128).filter(|element| element % 3 != 0).collect();
        assert_eq!(output, expected);
    }

    #[rstest]
    fn test_remove_until_empty() {
        let mut root = build(0..64);
        for element in (0..64).rev() {
            root = remove(&root, &element, &NaturalOrder)
                .expect("element is present")
                .0;
            assert_valid(&root);
        }
        assert!(root.is_none());
    }

    #[rstest]
    fn test_remove_missing_is_none() {
        let root = build([1, 2, 3]);
        assert!(remove(&root, &4, &NaturalOrder).is_none());
    }

    #[rstest]
    fn test_leftmost_and_rightmost() {
        let root = build([5, 1, 9, 3]);
        assert_eq!(leftmost(&root), Some(&1));
        assert_eq!(rightmost(&root), Some(&9));
        assert_eq!(leftmost::<i32>(&None), None);
    }
}

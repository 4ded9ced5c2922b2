use crate::entry::Entry;
use crate::slot::Slot;
use crate::treap::node::Node;
use crate::treap::{Error, Result};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::rc::Rc;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

/// Merges `r_tree` into `l_tree`.
///
/// Precondition: every key in `l_tree` is strictly less than every key in
/// `r_tree`. The root with the higher priority wins; ties go to the right
/// input so that the outcome is deterministic.
pub fn merge<T, U>(l_tree: &mut Tree<T, U>, r_tree: Tree<T, U>) {
    match (l_tree.take(), r_tree) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority > r_node.priority {
                merge(&mut l_node.right, Some(r_node));
                l_node.update();
                *l_tree = Some(l_node);
            } else {
                let mut new_tree = Some(l_node);
                merge(&mut new_tree, r_node.left.take());
                r_node.left = new_tree;
                r_node.update();
                *l_tree = Some(r_node);
            }
        },
        (new_tree, None) | (None, new_tree) => *l_tree = new_tree,
    }
}

/// Partitions a tree by `key`.
///
/// Keys less than `key` stay in `tree`; the return value is the detached
/// node with an equal key, if any, followed by the subtree of keys greater
/// than `key`. Only a root-to-leaf chain is touched, so heap order inside
/// all three parts is undisturbed.
pub fn split<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> (Tree<T, U>, Tree<T, U>)
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    match tree.take() {
        Some(mut node) => match key.cmp(node.entry.key.get().borrow()) {
            Ordering::Less => {
                let (matched, right) = split(&mut node.left, key);
                *tree = node.left.take();
                node.left = right;
                node.update();
                (matched, Some(node))
            },
            Ordering::Greater => {
                let ret = split(&mut node.right, key);
                node.update();
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                *tree = node.left.take();
                let right = node.right.take();
                node.update();
                (Some(node), right)
            },
        },
        None => (None, None),
    }
}

/// Inserts `new_node` into the tree. If a node with an equal key already
/// exists, its value slot is overwritten in place, reusing the node with
/// its key and priority, and the displaced slot is returned.
pub fn insert<T, U>(tree: &mut Tree<T, U>, mut new_node: Node<T, U>) -> Option<Slot<U>>
where
    T: Ord,
{
    let (matched, right) = split(tree, new_node.entry.key.get());
    let displaced = match matched {
        Some(mut node) => {
            let old = mem::replace(&mut node.entry.value, new_node.entry.value);
            merge(tree, Some(node));
            Some(old)
        },
        None => {
            merge(tree, Some(Box::new(new_node)));
            None
        },
    };
    merge(tree, right);
    displaced
}

/// Removes the node with an equal key, if any, and returns its entry slots.
pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<(Slot<T>, Slot<U>)>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let (matched, right) = split(tree, key);
    merge(tree, right);
    matched.map(|node| {
        let Node { entry, .. } = *node;
        let Entry { key, value } = entry;
        (key, value)
    })
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.entry.key.get().borrow()) {
            Ordering::Less => get(&node.left, key),
            Ordering::Greater => get(&node.right, key),
            Ordering::Equal => Some(&node.entry),
        }
    })
}

pub fn ceil<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.entry.key.get().borrow()) {
            Ordering::Greater => ceil(&node.right, key),
            Ordering::Less => {
                match ceil(&node.left, key) {
                    None => Some(&node.entry),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.entry),
        }
    })
}

pub fn floor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.entry.key.get().borrow()) {
            Ordering::Less => floor(&node.left, key),
            Ordering::Greater => {
                match floor(&node.right, key) {
                    None => Some(&node.entry),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.entry),
        }
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

pub fn len<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        Some(ref node) => node.len,
        None => 0,
    }
}

/// Unions two trees whose key sets may overlap, consuming both.
///
/// The higher-priority root becomes the pivot (ties go to the left input,
/// which is the calling map), the other tree is split by the pivot's key,
/// and a matching duplicate from the other tree is dropped; the pivot's
/// value wins.
pub fn union<T, U>(l_tree: Tree<T, U>, r_tree: Tree<T, U>) -> Tree<T, U>
where
    T: Ord,
{
    match (l_tree, r_tree) {
        (None, tree) | (tree, None) => tree,
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority >= r_node.priority {
                let mut rest = Some(r_node);
                let (_, hi) = split(&mut rest, l_node.entry.key.get());
                l_node.left = union(l_node.left.take(), rest);
                l_node.right = union(l_node.right.take(), hi);
                l_node.update();
                Some(l_node)
            } else {
                let mut rest = Some(l_node);
                let (_, hi) = split(&mut rest, r_node.entry.key.get());
                r_node.left = union(rest, r_node.left.take());
                r_node.right = union(hi, r_node.right.take());
                r_node.update();
                Some(r_node)
            }
        },
    }
}

/// Intersects two trees, consuming both. A pivot survives only when the
/// other tree contains an equal key; otherwise the recursive results are
/// merged without it, since the pivot's priority no longer bounds them.
pub fn intersection<T, U>(l_tree: Tree<T, U>, r_tree: Tree<T, U>) -> Tree<T, U>
where
    T: Ord,
{
    match (l_tree, r_tree) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority >= r_node.priority {
                let mut rest = Some(r_node);
                let (matched, hi) = split(&mut rest, l_node.entry.key.get());
                let left = intersection(l_node.left.take(), rest);
                let right = intersection(l_node.right.take(), hi);
                reassemble(l_node, left, right, matched.is_some())
            } else {
                let mut rest = Some(l_node);
                let (matched, hi) = split(&mut rest, r_node.entry.key.get());
                let left = intersection(rest, r_node.left.take());
                let right = intersection(hi, r_node.right.take());
                reassemble(r_node, left, right, matched.is_some())
            }
        },
        _ => None,
    }
}

/// Subtracts `r_tree` from `l_tree`, consuming both. The pivot is always
/// the left root, so the operation is directional; a pivot survives only
/// when the right tree contains no equal key.
pub fn difference<T, U>(l_tree: Tree<T, U>, r_tree: Tree<T, U>) -> Tree<T, U>
where
    T: Ord,
{
    match (l_tree, r_tree) {
        (None, _) => None,
        (tree, None) => tree,
        (Some(mut l_node), mut rest) => {
            let (matched, hi) = split(&mut rest, l_node.entry.key.get());
            let left = difference(l_node.left.take(), rest);
            let right = difference(l_node.right.take(), hi);
            reassemble(l_node, left, right, matched.is_none())
        },
    }
}

fn reassemble<T, U>(
    mut pivot: Box<Node<T, U>>,
    left: Tree<T, U>,
    right: Tree<T, U>,
    keep_pivot: bool,
) -> Tree<T, U> {
    if keep_pivot {
        pivot.left = left;
        pivot.right = right;
        pivot.update();
        Some(pivot)
    } else {
        let mut result = left;
        merge(&mut result, right);
        result
    }
}

/// Rewrites every shared value slot, in ascending key order, with the
/// handle returned by `transform`. An inline value slot is a usage error
/// and stops the walk before that slot is touched.
pub fn map_values<T, U, F>(tree: &mut Tree<T, U>, transform: &mut F) -> Result<()>
where
    F: FnMut(&U) -> Rc<U>,
{
    if let Some(ref mut node) = tree {
        map_values(&mut node.left, transform)?;
        match node.entry.value {
            Slot::Shared(ref mut handle) => {
                let new_handle = transform(&**handle);
                *handle = new_handle;
            },
            Slot::Owned(_) => return Err(Error::OwnedValueTransform),
        }
        map_values(&mut node.right, transform)?;
    }
    Ok(())
}

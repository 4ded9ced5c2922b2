use crate::entry::Entry;
use crate::slot::{Layout, Slot, StorageMode};
use crate::treap::node::Node;
use crate::treap::tree;
use crate::treap::{Error, Result};
use rand::Rng;
use rand::XorShiftRng;
use std::borrow::Borrow;
use std::ops::Index;
use std::rc::Rc;

/// An ordered map implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and
/// a heap property. Each node has a key, a value, and a priority. The key of
/// any node is greater than all keys in its left subtree and less than all
/// keys occuring in its right subtree. The priority of a node is greater
/// than the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the
/// logarithm of the number of keys.
///
/// Because balance depends only on the priorities, two maps can be combined
/// wholesale: [`union`](#method.union), [`intersection`](#method.intersection),
/// and [`difference`](#method.difference) consume the other map and rebuild
/// `self` in expected `O(m log (n / m + 1))` time for maps of size `m <= n`.
///
/// # Examples
///
/// ```
/// use treap_collections::treap::TreapMap;
///
/// let mut map = TreapMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// assert!(map.remove(&0).is_some());
/// assert_eq!(map.get(&0), None);
/// ```
pub struct TreapMap<T, U> {
    tree: tree::Tree<T, U>,
    layout: Layout,
    rng: XorShiftRng,
}

impl<T, U> TreapMap<T, U> {
    /// Constructs a new, empty `TreapMap<T, U>` that stores keys and values
    /// inline.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_layout(Layout::default())
    }

    /// Constructs a new, empty `TreapMap<T, U>` whose key and value storage
    /// modes are given by `layout`. The layout is fixed for the lifetime of
    /// the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::slot::{Layout, StorageMode};
    /// use treap_collections::treap::TreapMap;
    ///
    /// let layout = Layout {
    ///     key: StorageMode::Owned,
    ///     value: StorageMode::Shared,
    /// };
    /// let map: TreapMap<u32, String> = TreapMap::with_layout(layout);
    /// ```
    pub fn with_layout(layout: Layout) -> Self {
        TreapMap {
            tree: None,
            layout,
            rng: XorShiftRng::new_unseeded(),
        }
    }

    /// Returns the storage layout the map was constructed with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Inserts a key-value pair into the map. If the key already exists, the
    /// old node is kept with its key and priority unchanged, and only its
    /// value is overwritten; the displaced value slot is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::slot::Slot;
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(Slot::Owned(1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<Slot<U>>
    where
        T: Ord,
    {
        let entry = Entry {
            key: Slot::new(key, self.layout.key),
            value: Slot::new(value, self.layout.value),
        };
        let priority = self.rng.next_u32();
        tree::insert(&mut self.tree, Node::new(entry, priority))
    }

    /// Removes a key-value pair from the map. If the key exists in the map,
    /// it will return the associated pair of slots. Otherwise it will return
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::slot::Slot;
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((Slot::Owned(1), Slot::Owned(1))));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(Slot<T>, Slot<U>)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::remove(&mut self.tree, key)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key. It will return `None` if the key does not exist in
    /// the map. The reference is a view into the current tree and cannot
    /// outlive the next mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| entry.value.get())
    }

    /// Returns references to the stored key and value associated with a
    /// particular key, or `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 2);
    /// assert_eq!(map.get_key_value(&1), Some((&1, &2)));
    /// assert_eq!(map.get_key_value(&3), None);
    /// ```
    pub fn get_key_value<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| (entry.key.get(), entry.value.get()))
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        tree::len(&self.tree)
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Returns a key in the map that is less than or equal to a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| entry.key.get())
    }

    /// Returns a key in the map that is greater than or equal to a
    /// particular key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| entry.key.get())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T>
    where
        T: Ord,
    {
        tree::min(&self.tree).map(|entry| entry.key.get())
    }

    /// Returns the maximum key of the map. Returns `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        tree::max(&self.tree).map(|entry| entry.key.get())
    }

    /// Merges `other` into this map. The resulting map contains every key
    /// that was in either map; for a key present in both, the value kept is
    /// the one from the map whose node had the higher priority, with ties
    /// won by `self`. `other` is consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut a = TreapMap::new();
    /// a.insert(1, 1);
    /// a.insert(3, 3);
    ///
    /// let mut b = TreapMap::new();
    /// b.insert(3, 5);
    /// b.insert(4, 4);
    ///
    /// a.union(b);
    /// assert_eq!(a.keys().collect::<Vec<&u32>>(), vec![&1, &3, &4]);
    /// ```
    pub fn union(&mut self, other: TreapMap<T, U>)
    where
        T: Ord,
    {
        let tree = self.tree.take();
        self.tree = tree::union(tree, other.tree);
    }

    /// Intersects this map with `other`. The resulting map contains every
    /// key that was in both maps; for each key, the value kept is the one
    /// from the map whose node had the higher priority, with ties won by
    /// `self`. `other` is consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut a = TreapMap::new();
    /// a.insert(1, 1);
    /// a.insert(3, 3);
    ///
    /// let mut b = TreapMap::new();
    /// b.insert(3, 5);
    /// b.insert(4, 4);
    ///
    /// a.intersection(b);
    /// assert_eq!(a.keys().collect::<Vec<&u32>>(), vec![&3]);
    /// ```
    pub fn intersection(&mut self, other: TreapMap<T, U>)
    where
        T: Ord,
    {
        let tree = self.tree.take();
        self.tree = tree::intersection(tree, other.tree);
    }

    /// Removes from this map every key that is present in `other`, keeping
    /// this map's nodes for all remaining keys. `other` is consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut a = TreapMap::new();
    /// a.insert(1, 1);
    /// a.insert(3, 3);
    ///
    /// let mut b = TreapMap::new();
    /// b.insert(3, 5);
    /// b.insert(4, 4);
    ///
    /// a.difference(b);
    /// assert_eq!(a.keys().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn difference(&mut self, other: TreapMap<T, U>)
    where
        T: Ord,
    {
        let tree = self.tree.take();
        self.tree = tree::difference(tree, other.tree);
    }

    /// Rewrites every value in ascending key order with the handle returned
    /// by `transform`. Keys are never passed to `transform` and cannot be
    /// changed by it.
    ///
    /// Values must be stored with `StorageMode::Shared`; calling this on a
    /// map whose values are stored inline reports
    /// [`Error::OwnedValueTransform`](../treap/enum.Error.html) without
    /// touching any value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use treap_collections::slot::{Layout, StorageMode};
    /// use treap_collections::treap::TreapMap;
    ///
    /// let layout = Layout {
    ///     key: StorageMode::Owned,
    ///     value: StorageMode::Shared,
    /// };
    /// let mut map = TreapMap::with_layout(layout);
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// map.map_values(|value| Rc::new(value + 1)).unwrap();
    /// assert_eq!(map.get(&1), Some(&11));
    /// assert_eq!(map.get(&2), Some(&21));
    ///
    /// let mut inline: TreapMap<u32, u32> = TreapMap::new();
    /// inline.insert(1, 10);
    /// assert!(inline.map_values(|value| Rc::new(value + 1)).is_err());
    /// ```
    pub fn map_values<F>(&mut self, mut transform: F) -> Result<()>
    where
        F: FnMut(&U) -> Rc<U>,
    {
        if self.layout.value == StorageMode::Owned {
            return Err(Error::OwnedValueTransform);
        }
        tree::map_values(&mut self.tree, &mut transform)
    }

    /// Returns an iterator over the map. The iterator will yield key-value
    /// pairs using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapMapIter<T, U> {
        TreapMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(2, 4);
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn keys(&self) -> TreapMapKeys<T, U> {
        TreapMapKeys { inner: self.iter() }
    }
}

impl<T, U> IntoIterator for TreapMap<T, U> {
    type IntoIter = TreapMapIntoIter<T, U>;
    type Item = (Slot<T>, Slot<U>);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a TreapMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = TreapMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields the
/// stored key and value slots.
pub struct TreapMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
    type Item = (Slot<T>, Slot<U>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = node;
            let Entry { key, value } = entry;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// immutable references.
pub struct TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T, U> Iterator for TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            (node.entry.key.get(), node.entry.value.get())
        })
    }
}

/// An iterator over the keys of a `TreapMap<T, U>` in ascending order.
pub struct TreapMapKeys<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    inner: TreapMapIter<'a, T, U>,
}

impl<'a, T, U> Iterator for TreapMapKeys<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| pair.0)
    }
}

impl<T, U> Clone for TreapMap<T, U>
where
    T: Clone,
    U: Clone,
{
    /// Duplicates the map structurally: priorities are copied unchanged, so
    /// the clone has exactly the same shape as the original. Inline slots
    /// are deep-copied; shared slots alias the same payloads.
    fn clone(&self) -> Self {
        TreapMap {
            tree: self.tree.clone(),
            layout: self.layout,
            rng: self.rng.clone(),
        }
    }
}

impl<T, U> Default for TreapMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> Index<&'a V> for TreapMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

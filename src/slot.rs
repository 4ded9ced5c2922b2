//! Storage modes for keys and values held by a collection.
//!
//! Every key and value lives in a [`Slot`]: either an inline copy owned by
//! the node, or a reference-counted handle to a payload shared with the
//! caller. The mode of every slot a collection creates is fixed by its
//! [`Layout`] at construction time.

use std::rc::Rc;

/// How a single key or value slot stores its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StorageMode {
    /// The slot owns an inline copy of the payload.
    Owned,
    /// The slot holds a reference-counted handle; the payload may be shared
    /// with the caller and with duplicates of the collection.
    Shared,
}

/// Construction-time storage configuration of a map: one mode for keys and
/// one for values.
///
/// # Examples
///
/// ```
/// use treap_collections::slot::{Layout, StorageMode};
///
/// let layout = Layout {
///     key: StorageMode::Owned,
///     value: StorageMode::Shared,
/// };
/// assert_eq!(Layout::default().key, StorageMode::Owned);
/// assert_eq!(layout.value, StorageMode::Shared);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub key: StorageMode,
    pub value: StorageMode,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            key: StorageMode::Owned,
            value: StorageMode::Owned,
        }
    }
}

/// A single key or value slot.
///
/// Cloning a slot follows its mode: an `Owned` slot deep-copies the payload,
/// while a `Shared` slot copies only the handle, so the clone aliases the
/// same payload.
///
/// # Examples
///
/// ```
/// use treap_collections::slot::{Slot, StorageMode};
///
/// let owned = Slot::new(1, StorageMode::Owned);
/// let shared = Slot::new(2, StorageMode::Shared);
///
/// assert_eq!(*owned.get(), 1);
/// assert_eq!(*shared.get(), 2);
/// assert_eq!(shared.mode(), StorageMode::Shared);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Slot<T> {
    Owned(T),
    Shared(Rc<T>),
}

impl<T> Slot<T> {
    /// Wraps a payload according to the given storage mode.
    pub fn new(value: T, mode: StorageMode) -> Self {
        match mode {
            StorageMode::Owned => Slot::Owned(value),
            StorageMode::Shared => Slot::Shared(Rc::new(value)),
        }
    }

    /// Returns a reference to the payload, regardless of mode.
    pub fn get(&self) -> &T {
        match self {
            Slot::Owned(value) => value,
            Slot::Shared(handle) => &**handle,
        }
    }

    /// Returns the storage mode of this slot.
    pub fn mode(&self) -> StorageMode {
        match self {
            Slot::Owned(_) => StorageMode::Owned,
            Slot::Shared(_) => StorageMode::Shared,
        }
    }

    /// Unwraps the payload, cloning it only if the slot is shared and other
    /// handles to the payload are still alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::slot::{Slot, StorageMode};
    ///
    /// let slot = Slot::new(String::from("a"), StorageMode::Shared);
    /// assert_eq!(slot.into_owned(), "a");
    /// ```
    pub fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            Slot::Owned(value) => value,
            Slot::Shared(handle) => Rc::try_unwrap(handle).unwrap_or_else(|handle| (*handle).clone()),
        }
    }
}

impl<T> PartialEq for Slot<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Slot<T>) -> bool {
        self.get() == other.get()
    }
}

impl<T> Eq for Slot<T> where T: Eq {}

#[cfg(test)]
mod tests {
    use super::{Layout, Slot, StorageMode};
    use std::rc::Rc;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.key, StorageMode::Owned);
        assert_eq!(layout.value, StorageMode::Owned);
    }

    #[test]
    fn test_owned_clone_is_independent() {
        let slot = Slot::new(vec![1, 2], StorageMode::Owned);
        let mut copy = slot.clone();
        if let Slot::Owned(ref mut values) = copy {
            values.push(3);
        }
        assert_eq!(*slot.get(), vec![1, 2]);
        assert_eq!(*copy.get(), vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_clone_aliases() {
        let slot = Slot::new(1, StorageMode::Shared);
        let copy = slot.clone();
        match (&slot, &copy) {
            (Slot::Shared(original), Slot::Shared(alias)) => {
                assert!(Rc::ptr_eq(original, alias));
            },
            _ => panic!("expected shared slots"),
        }
    }

    #[test]
    fn test_into_owned() {
        assert_eq!(Slot::new(1, StorageMode::Owned).into_owned(), 1);
        let shared = Slot::new(2, StorageMode::Shared);
        let alias = shared.clone();
        assert_eq!(shared.into_owned(), 2);
        assert_eq!(alias.into_owned(), 2);
    }

    #[test]
    fn test_eq_ignores_mode() {
        let owned = Slot::new(1, StorageMode::Owned);
        let shared = Slot::new(1, StorageMode::Shared);
        assert_eq!(owned, shared);
    }
}

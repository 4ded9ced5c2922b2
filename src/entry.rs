use crate::slot::Slot;
use std::cmp::Ordering;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Entry<T, U> {
    pub key: Slot<T>,
    pub value: Slot<U>,
}

impl<T, U> Ord for Entry<T, U>
where
    T: Ord,
{
    fn cmp(&self, other: &Entry<T, U>) -> Ordering {
        self.key.get().cmp(other.key.get())
    }
}

impl<T, U> PartialOrd for Entry<T, U>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Entry<T, U>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, U> PartialEq for Entry<T, U>
where
    T: Ord,
{
    fn eq(&self, other: &Entry<T, U>) -> bool {
        self.key.get() == other.key.get()
    }
}

impl<T, U> Eq for Entry<T, U> where T: Ord {}

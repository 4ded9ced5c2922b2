//! Ordered collections built on a treap: a binary search tree balanced by
//! random per-node priorities. In addition to the usual map and set
//! operations, whole collections can be combined with union, intersection,
//! and difference in expected `O(m log (n / m + 1))` time.

extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

mod entry;
pub mod slot;
pub mod treap;

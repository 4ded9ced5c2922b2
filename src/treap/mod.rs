//! Probabilistic binary search tree where each node also maintains the heap invariant.
//!
//! Because rebalancing is driven purely by the per-node priorities, two
//! independently built trees can be combined with union, intersection, and
//! difference without any auxiliary metadata.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapKeys};
pub use self::set::{TreapSet, TreapSetIntoIter, TreapSetIter};

use std::error;
use std::fmt;
use std::result;

#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A value transform was requested on a map whose values are stored
    /// inline; rewriting values through returned handles requires shared
    /// value storage.
    OwnedValueTransform,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OwnedValueTransform => {
                write!(f, "values are stored inline; transforming requires shared value storage")
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

//! Package implement an ordered, in-memory multiset index.
//!
//! Entries are totally ordered values held in a [red-black tree][rbt],
//! the tree stays height balanced under arbitrary sequences of insert
//! and remove operations. Duplicate values are allowed; equal values
//! are stored in insertion order.
//!
//! Refer to [Index] type for the API. Writes require `&mut self`, the
//! index provides no internal synchronization; wrap it in an exclusive
//! lock if concurrent access is needed.
//!
//! [rbt]: https://en.wikipedia.org/wiki/Red-black_tree

use std::{error, fmt, result};

/// Short form to compose Error values.
///
/// Here is an example:
///
/// ```ignore
/// return err_at!(KeyNotFound, msg: "missing key")
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
}

mod arena;
mod depth;
mod index;
mod node;
mod op;
mod stats;

pub use crate::depth::Depth;
pub use crate::index::{Index, Iter, IterNodes, NodeEntry, MAX_TREE_DEPTH};
pub use crate::node::{Color, Value};
pub use crate::op::Write;
pub use crate::stats::Stats;

#[cfg(any(test, feature = "perf"))]
pub use crate::index::load_index;

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;

/// Error variants that can be returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the failing
/// call site, and a message.
pub enum Error {
    /// Lookup or remove operation on a missing key. This is a normal,
    /// recoverable outcome, the index is left untouched.
    KeyNotFound(String, String),
    /// Tree invariant got breached, indicates a corrupted index.
    /// Non-recoverable, call the programmer.
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> result::Result<(), fmt::Error> {
        use Error::{Fatal, KeyNotFound};

        match self {
            KeyNotFound(p, m) => write!(f, "{} KeyNotFound: {}", p, m),
            Fatal(p, m) => write!(f, "{} Fatal: {}", p, m),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

// Widen a printable u128 seed into SmallRng's 32-byte seed.
#[cfg(any(test, feature = "perf"))]
pub(crate) fn to_seed(seed: u128) -> [u8; 32] {
    let mut bytes = [0_u8; 32];
    bytes[..16].copy_from_slice(&seed.to_le_bytes());
    bytes
}

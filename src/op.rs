use arbitrary::Arbitrary;

#[allow(unused_imports)]
use crate::Index;

/// Write operations allowed on [Index].
///
/// Passed as argument to [Index::write] method. Typically used while
/// replaying operations from external entities like op-logs, or while
/// generating randomized operations in tests.
///
/// * `exclusive`, when true the index takes exclusive ownership of the
///   payload; when false the payload is stored behind a shared
///   reference.
#[derive(Clone, Debug, Arbitrary)]
pub enum Write<T> {
    /// Refer to Index::insert and Index::insert_shared.
    Ins { value: T, exclusive: bool },
    /// Refer to Index::remove.
    Rem { key: T },
}

impl<T> Write<T> {
    #[inline]
    pub fn insert(value: T) -> Write<T> {
        Write::Ins {
            value,
            exclusive: true,
        }
    }

    #[inline]
    pub fn insert_shared(value: T) -> Write<T> {
        Write::Ins {
            value,
            exclusive: false,
        }
    }

    #[inline]
    pub fn remove(key: T) -> Write<T> {
        Write::Rem { key }
    }
}

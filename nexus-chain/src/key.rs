//! Compact arena handles used as node links.
//!
//! Links between nodes are keys into the owning arena rather than pointers.
//! A reserved sentinel (`NONE`) stands in for a missing neighbor, which keeps
//! a link the width of the key type instead of `Option<K>`.

/// An arena handle with a reserved "no node" value.
///
/// # Example
///
/// ```
/// use nexus_chain::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel marking an absent link.
    ///
    /// Never handed out by storage, so a live node can never alias it.
    const NONE: Self;

    /// Builds a key from an arena slot position.
    fn from_usize(val: usize) -> Self;

    /// Returns the arena slot position this key refers to.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this refers to a slot.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);

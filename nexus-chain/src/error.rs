//! Error types for positional operations.

use core::fmt;

/// Positional insert rejected because the index was past the end.
///
/// Carries the value back so the caller keeps ownership of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds<T> {
    /// The rejected index.
    pub index: usize,
    /// Length of the container at the time of the call.
    pub len: usize,
    /// The value that was not inserted.
    pub value: T,
}

impl<T> OutOfBounds<T> {
    /// Returns the value that could not be inserted.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for OutOfBounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insertion index {} out of bounds for length {}",
            self.index, self.len
        )
    }
}

impl<T: fmt::Debug> std::error::Error for OutOfBounds<T> {}

use std::ops::Range;

use crate::error::Result;

/// Take rows by index, creating a new collection from those indexes.
pub trait Take {
    type Output;

    /// Rows at `indices`, in the order given. Fails on an index past the end.
    fn take(&self, indices: &[usize]) -> Result<Self::Output>;

    /// Rows in `range`, clamped to the collection length.
    fn take_range(&self, range: &Range<usize>) -> Self::Output;
}

// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Typed Indices
//!
//! Phantom-typed wrappers around `usize` so that a row index cannot be passed
//! where a column or city index is expected. `TypedIndex<T>` is
//! `#[repr(transparent)]` and compiles down to a plain `usize`.
//!
//! ```rust
//! use bramble_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy)]
//! struct CityTag;
//! impl TypedIndexTag for CityTag { const NAME: &'static str = "CityIndex"; }
//!
//! type CityIndex = TypedIndex<CityTag>;
//! let c = CityIndex::new(3);
//! assert_eq!(c.get(), 3);
//! assert_eq!(format!("{}", c), "CityIndex(3)");
//! ```

/// Names an index space for `Debug`/`Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index tagged with the index space `T` it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize`.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index directly after this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }

    /// Iterates over all indices `0..len` of this index space.
    #[inline]
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct RowTag;

    impl TypedIndexTag for RowTag {
        const NAME: &'static str = "RowIndex";
    }

    type RowIndex = TypedIndex<RowTag>;

    #[test]
    fn test_new_get_next() {
        let r = RowIndex::new(4);
        assert_eq!(r.get(), 4);
        assert_eq!(r.next().get(), 5);
    }

    #[test]
    fn test_conversions_roundtrip() {
        let r: RowIndex = 7usize.into();
        let raw: usize = r.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        let r = RowIndex::new(2);
        assert_eq!(format!("{}", r), "RowIndex(2)");
        assert_eq!(format!("{:?}", r), "RowIndex(2)");
    }

    #[test]
    fn test_range_yields_all_indices_in_order() {
        let all: Vec<usize> = RowIndex::range(3).map(|r| r.get()).collect();
        assert_eq!(all, vec![0, 1, 2]);
        assert_eq!(RowIndex::range(0).len(), 0);
        let rev: Vec<usize> = RowIndex::range(3).rev().map(|r| r.get()).collect();
        assert_eq!(rev, vec![2, 1, 0]);
    }
}

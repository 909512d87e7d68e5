//! Flattened jagged arrays.
//!
//! A [`SlicedArray`] stores a list of variable-length slices as one flat
//! value array plus a monotonically increasing array of end offsets. Face
//! lists use it with one slice of vertex indices per face.

use std::ops::Range;

use crate::error::{MeshError, Result};

/// A list of variable-length slices stored contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicedArray<T> {
    values: Vec<T>,
    ends: Vec<usize>,
}

impl<T> Default for SlicedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlicedArray<T> {
    /// Create an empty array.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            ends: Vec::new(),
        }
    }

    /// Create an empty array with room for `slices` slices and `values` values.
    pub fn with_capacity(slices: usize, values: usize) -> Self {
        Self {
            values: Vec::with_capacity(values),
            ends: Vec::with_capacity(slices),
        }
    }

    /// Build from flat values and per-slice end offsets.
    ///
    /// Offsets must be non-decreasing and the last one must equal
    /// `values.len()`.
    pub fn from_parts(values: Vec<T>, ends: Vec<usize>) -> Result<Self> {
        let mut last = 0;
        for &end in &ends {
            if end < last {
                return Err(MeshError::InvalidSliceBounds {
                    end,
                    len: values.len(),
                });
            }
            last = end;
        }
        if last != values.len() {
            return Err(MeshError::InvalidSliceBounds {
                end: last,
                len: values.len(),
            });
        }
        Ok(Self { values, ends })
    }

    /// Append one slice.
    pub fn push_slice(&mut self, slice: &[T])
    where
        T: Clone,
    {
        self.values.extend_from_slice(slice);
        self.ends.push(self.values.len());
    }

    /// Number of slices.
    #[inline]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether there are no slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Range of flat value positions covered by slice `i`.
    #[inline]
    pub fn range(&self, i: usize) -> Range<usize> {
        let start = if i == 0 { 0 } else { self.ends[i - 1] };
        start..self.ends[i]
    }

    /// Slice `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &[T] {
        &self.values[self.range(i)]
    }

    /// Index of the slice containing flat position `pos`.
    #[inline]
    pub fn slice_of(&self, pos: usize) -> usize {
        self.ends.partition_point(|&end| end <= pos)
    }

    /// Iterate over all slices.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// The flat value array.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The end offsets.
    #[inline]
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    /// Split into flat values and end offsets.
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>) {
        (self.values, self.ends)
    }
}

impl<T: Clone> SlicedArray<T> {
    /// Build from a list of slices.
    pub fn from_slices<S: AsRef<[T]>>(slices: &[S]) -> Self {
        let total = slices.iter().map(|s| s.as_ref().len()).sum();
        let mut array = Self::with_capacity(slices.len(), total);
        for slice in slices {
            array.push_slice(slice.as_ref());
        }
        array
    }
}

impl<T: Clone> FromIterator<Vec<T>> for SlicedArray<T> {
    fn from_iter<It: IntoIterator<Item = Vec<T>>>(iter: It) -> Self {
        let mut array = Self::new();
        for slice in iter {
            array.push_slice(&slice);
        }
        array
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slices() {
        let array = SlicedArray::from_slices(&[vec![0, 1, 2], vec![2, 1, 3, 4]]);
        assert_eq!(array.len(), 2);
        assert_eq!(array.get(0), &[0, 1, 2]);
        assert_eq!(array.get(1), &[2, 1, 3, 4]);
        assert_eq!(array.ends(), &[3, 7]);
        assert_eq!(array.range(1), 3..7);
    }

    #[test]
    fn test_slice_of() {
        let array = SlicedArray::from_slices(&[[0u8, 1, 2], [3, 4, 5]]);
        assert_eq!(array.slice_of(0), 0);
        assert_eq!(array.slice_of(2), 0);
        assert_eq!(array.slice_of(3), 1);
        assert_eq!(array.slice_of(5), 1);
    }

    #[test]
    fn test_from_parts_validates() {
        assert!(SlicedArray::from_parts(vec![0, 1, 2, 3], vec![2, 4]).is_ok());
        assert!(SlicedArray::from_parts(vec![0, 1, 2, 3], vec![3, 2]).is_err());
        assert!(SlicedArray::from_parts(vec![0, 1, 2, 3], vec![2, 3]).is_err());
        assert!(SlicedArray::<i32>::from_parts(vec![], vec![]).is_ok());
    }

    #[test]
    fn test_empty_slices_allowed() {
        let array = SlicedArray::from_parts(vec![7, 8], vec![0, 2, 2]).unwrap();
        assert_eq!(array.len(), 3);
        assert!(array.get(0).is_empty());
        assert_eq!(array.get(1), &[7, 8]);
        assert!(array.get(2).is_empty());
    }

    #[test]
    fn test_collect() {
        let array: SlicedArray<u32> = vec![vec![1, 2], vec![3]].into_iter().collect();
        let slices: Vec<&[u32]> = array.iter().collect();
        assert_eq!(slices, vec![&[1, 2][..], &[3][..]]);
    }
}

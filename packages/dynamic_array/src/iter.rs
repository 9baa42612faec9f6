use std::iter::FusedIterator;
use std::mem;

use crate::{DynamicArray, OwnedBuffer};

/// An iterator that moves the elements out of a [`DynamicArray`].
///
/// Created by the [`IntoIterator`] implementation of [`DynamicArray`]. Each yielded element is
/// replaced by a default value in the underlying buffer, which is released when the iterator
/// is dropped.
///
/// # Example
///
/// ```rust
/// use dynamic_array::dynamic_array;
///
/// let array = dynamic_array!["a".to_string(), "b".to_string()];
///
/// let owned: Vec<String> = array.into_iter().collect();
/// assert_eq!(owned, ["a", "b"]);
/// ```
#[derive(Debug)]
pub struct IntoIter<T> {
    buffer: OwnedBuffer<T>,

    /// Index of the next element to yield from the front.
    front: usize,

    /// One past the index of the next element to yield from the back.
    back: usize,
}

impl<T: Default> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front < back <= capacity, so the slot is in bounds.
        let slot = unsafe { self.buffer.get_unchecked_mut(self.front) };

        // Cannot overflow because front < back.
        self.front = self.front.wrapping_add(1);

        Some(mem::take(slot))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl<T: Default> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // Cannot underflow because back > front >= 0.
        self.back = self.back.wrapping_sub(1);

        // SAFETY: back < capacity after the decrement, so the slot is in bounds.
        let slot = unsafe { self.buffer.get_unchecked_mut(self.back) };

        Some(mem::take(slot))
    }
}

impl<T: Default> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        // Cannot underflow because front <= back.
        self.back.wrapping_sub(self.front)
    }
}

impl<T: Default> FusedIterator for IntoIter<T> {}

impl<T: Default> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let (buffer, len) = self.into_parts();

        IntoIter {
            buffer,
            front: 0,
            back: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Default> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: Default> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        // Growing for the lower bound up front skips the intermediate growth steps.
        let (lower_bound, _) = iter.size_hint();
        self.grow_to_fit(self.len().saturating_add(lower_bound))
            .unwrap_or_else(|error| error.escalate());

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

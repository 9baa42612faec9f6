use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::{DynamicArrayBuilder, Error, OwnedBuffer, Position, Result};

/// A resizable sequence of `T` stored in one contiguous block of memory.
///
/// The array owns an [`OwnedBuffer<T>`] whose capacity may exceed the number of elements in the
/// array. The first [`len()`][Self::len] slots of the buffer are the contents of the array, in
/// insertion order. The remaining slots are allocated but not part of the contents: they hold
/// default values or values left behind by [`pop_back()`][Self::pop_back],
/// [`erase()`][Self::erase] and [`clear()`][Self::clear], and are overwritten when the array
/// grows into them again.
///
/// # Growth
///
/// When an operation needs more slots than the buffer has, the capacity grows to the larger of
/// the required length and twice the current capacity, so that a sequence of `n` appends
/// performs `O(n)` element moves in total. Growth allocates a new buffer of default values
/// (hence the `T: Default` bound on growing operations), moves the contents across and releases
/// the old buffer. Capacity never shrinks except by replacing the whole array.
///
/// Every growing operation comes in two flavors. The `try_*` flavor reports allocation problems
/// as an [`Error`] and leaves the array unchanged. The plain flavor treats allocation failure as
/// fatal, like the standard collections do.
///
/// # Contract violations
///
/// Indexing out of bounds, popping from an empty array and inserting or erasing at a position
/// outside the array are caller bugs and panic. Use [`at()`][Self::at] for access that reports
/// an out-of-range index as a recoverable error instead.
///
/// # Examples
///
/// ```rust
/// use dynamic_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// assert_eq!(array.capacity(), 0);
///
/// array.push_back("first".to_string());
/// array.push_back("second".to_string());
/// assert_eq!(array.len(), 2);
/// assert_eq!(array.capacity(), 2);
///
/// let position = array.insert(array.begin() + 1, "middle".to_string());
/// assert_eq!(array[position], "middle");
/// assert_eq!(array.as_slice(), ["first", "middle", "second"]);
///
/// assert!(array.at(3).is_err());
/// ```
pub struct DynamicArray<T> {
    /// Every slot is initialized; only the first `len` are contents.
    buffer: OwnedBuffer<T>,

    /// Number of slots at the start of the buffer that are part of the contents.
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array without allocating.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::<u32>::new();
    ///
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            buffer: OwnedBuffer::empty(),
            len: 0,
        }
    }

    /// Creates a builder for configuring and constructing a [`DynamicArray`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::<u64>::builder().capacity(16).build();
    ///
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 16);
    /// ```
    #[inline]
    pub fn builder() -> DynamicArrayBuilder<T> {
        DynamicArrayBuilder::new()
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot be described by a memory layout. Allocator failure is
    /// escalated via [`std::alloc::handle_alloc_error`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self
    where
        T: Default,
    {
        Self::try_with_capacity(capacity).unwrap_or_else(|error| error.escalate())
    }

    /// Creates an empty array with room for exactly `capacity` elements, reporting allocation
    /// problems as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocationFailed`] if the buffer
    /// cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self>
    where
        T: Default,
    {
        Ok(Self {
            buffer: OwnedBuffer::try_new(capacity)?,
            len: 0,
        })
    }

    /// Creates an array of `len` default values, with a capacity of exactly `len`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::<i32>::with_len(3);
    ///
    /// assert_eq!(array.as_slice(), [0, 0, 0]);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    #[must_use]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self {
            buffer: OwnedBuffer::new(len),
            len,
        }
    }

    /// Creates an array of `len` copies of `value`, with a capacity of exactly `len`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::from_value(2, "x");
    ///
    /// assert_eq!(array.as_slice(), ["x", "x"]);
    /// ```
    #[must_use]
    pub fn from_value(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let buffer =
            OwnedBuffer::try_from_fn(len, |_| value.clone()).unwrap_or_else(|e| e.escalate());

        Self { buffer, len }
    }

    /// Creates an array from an iterator that yields exactly `len` items, with a capacity of
    /// exactly `len`.
    pub(crate) fn from_exact_iter(len: usize, items: impl IntoIterator<Item = T>) -> Self {
        let mut items = items.into_iter();

        let buffer = OwnedBuffer::try_from_fn(len, |_| {
            items
                .next()
                .expect("iterator must yield as many items as it promised")
        })
        .unwrap_or_else(|e| e.escalate());

        Self { buffer, len }
    }

    /// The number of elements in the array.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of elements the array can hold without allocating.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether the array has no elements. An empty array may still hold allocated capacity.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The contents of the array as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer
            .as_slice()
            .get(..self.len)
            .expect("len never exceeds capacity")
    }

    /// The contents of the array as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;

        self.buffer
            .as_mut_slice()
            .get_mut(..len)
            .expect("len never exceeds capacity")
    }

    /// Returns a reference to the element at `index`, or an error if there is no such element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`. The array is unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::{Error, dynamic_array};
    ///
    /// let array = dynamic_array![1, 2, 3];
    ///
    /// assert_eq!(*array.at(2).unwrap(), 3);
    /// assert!(matches!(
    ///     array.at(3),
    ///     Err(Error::IndexOutOfRange { index: 3, len: 3 })
    /// ));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns an exclusive reference to the element at `index`, or an error if there is no
    /// such element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`. The array is unchanged.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a reference to the element at `index`, or `None` if there is no such element.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns an exclusive reference to the element at `index`, or `None` if there is no
    /// such element.
    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// In debug builds, the bounds are verified with an assertion.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.len()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds in array of length {}",
            self.len
        );

        // SAFETY: The caller guarantees index < len and len <= capacity.
        unsafe { self.buffer.get_unchecked(index) }
    }

    /// Returns an exclusive reference to the element at `index` without bounds checking.
    ///
    /// In debug builds, the bounds are verified with an assertion.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.len()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "index {index} out of bounds in array of length {}",
            self.len
        );

        // SAFETY: The caller guarantees index < len and len <= capacity.
        unsafe { self.buffer.get_unchecked_mut(index) }
    }

    /// The position of the first element (equal to [`end()`][Self::end] if the array is empty).
    #[must_use]
    #[inline]
    #[allow(
        clippy::unused_self,
        reason = "positions belong to an array even though the first one is always zero"
    )]
    pub fn begin(&self) -> Position {
        Position::new(0)
    }

    /// The position one past the last element.
    #[must_use]
    #[inline]
    pub fn end(&self) -> Position {
        Position::new(self.len)
    }

    /// Iterates over the elements of the array.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over the elements of the array, allowing them to be modified.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Removes all elements from the array.
    ///
    /// The capacity is unchanged and the removed values stay in their slots (they are dropped
    /// when overwritten or when the array is dropped).
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Removes the last element from the array. The capacity is unchanged.
    ///
    /// The removed value stays in its slot until that slot is overwritten or the array is
    /// dropped.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) {
        assert!(!self.is_empty(), "pop_back() called on an empty array");

        // Cannot underflow because we just asserted that the array is not empty.
        self.len = self.len.wrapping_sub(1);
    }

    /// Removes the element at `position`, shifting all following elements one slot to the
    /// left, and returns the position now occupied by the element that followed the removed
    /// one (equal to [`end()`][Self::end] if the last element was removed).
    ///
    /// The removed value ends up in the slot just past the new end of the array.
    ///
    /// # Panics
    ///
    /// Panics if `position` does not refer to an element of the array.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::dynamic_array;
    ///
    /// let mut array = dynamic_array!['a', 'b', 'c'];
    ///
    /// let next = array.erase(array.begin());
    /// assert_eq!(array[next], 'b');
    /// assert_eq!(array.as_slice(), ['b', 'c']);
    ///
    /// let next = array.erase(array.begin() + 1);
    /// assert_eq!(next, array.end());
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        let index = position.index();
        let len = self.len;

        let tail = self.as_mut_slice().get_mut(index..).unwrap_or_default();
        assert!(
            !tail.is_empty(),
            "erase position {index} does not refer to an element of an array of length {len}"
        );

        tail.rotate_left(1);

        // Cannot underflow because the assertion above guarantees the array is not empty.
        self.len = self.len.wrapping_sub(1);

        position
    }

    /// Exchanges the contents (and capacities) of two arrays without moving any element.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the contents out of `self` into a new array, leaving `self` empty and without
    /// capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::dynamic_array;
    ///
    /// let mut source = dynamic_array![1, 2, 3];
    /// let target = source.take();
    ///
    /// assert_eq!(target.as_slice(), [1, 2, 3]);
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            buffer: self.buffer.take(),
            len: mem::take(&mut self.len),
        }
    }

    /// Dismantles the array into its buffer and the number of leading slots that are contents.
    pub(crate) fn into_parts(self) -> (OwnedBuffer<T>, usize) {
        (self.buffer, self.len)
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(debug_assertions)]
    fn integrity_check(&self) {
        assert!(
            self.len <= self.buffer.capacity(),
            "array length {} exceeds buffer capacity {}",
            self.len,
            self.buffer.capacity()
        );
    }
}

impl<T: Default> DynamicArray<T> {
    /// Ensures the capacity is at least `new_capacity`.
    ///
    /// Does nothing if the capacity is already sufficient. Otherwise, allocates a buffer of
    /// exactly `new_capacity` slots, moves the elements into it in order and releases the old
    /// buffer.
    ///
    /// Unlike [`Vec::reserve`], the argument is the total capacity, not the additional capacity.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot be described by a memory layout. Allocator failure is
    /// escalated via [`std::alloc::handle_alloc_error`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::dynamic_array;
    ///
    /// let mut array = dynamic_array![1, 2];
    ///
    /// array.reserve(10);
    /// assert_eq!(array.capacity(), 10);
    ///
    /// array.reserve(5);
    /// assert_eq!(array.capacity(), 10);
    /// assert_eq!(array.as_slice(), [1, 2]);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        self.try_reserve(new_capacity)
            .unwrap_or_else(|error| error.escalate());
    }

    /// Ensures the capacity is at least `new_capacity`, reporting allocation problems as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocationFailed`] if the new buffer
    /// cannot be allocated. The array is unchanged in that case.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let mut replacement = OwnedBuffer::try_new(new_capacity)?;

        // The old slots receive the default values from the new buffer in exchange,
        // all of which are dropped together with the old buffer below.
        for (target, source) in replacement
            .as_mut_slice()
            .iter_mut()
            .zip(self.as_mut_slice())
        {
            mem::swap(target, source);
        }

        self.buffer = replacement;

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Resizes the array to `new_len` elements.
    ///
    /// Shrinking keeps the first `new_len` elements. Growing appends default values, growing the
    /// capacity to the larger of `new_len` and twice the current capacity if needed.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot be described by a memory layout. Allocator failure is
    /// escalated via [`std::alloc::handle_alloc_error`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::dynamic_array;
    ///
    /// let mut array = dynamic_array![1, 2, 3];
    ///
    /// array.resize(5);
    /// assert_eq!(array.as_slice(), [1, 2, 3, 0, 0]);
    ///
    /// array.resize(2);
    /// assert_eq!(array.as_slice(), [1, 2]);
    /// ```
    pub fn resize(&mut self, new_len: usize) {
        self.try_resize(new_len)
            .unwrap_or_else(|error| error.escalate());
    }

    /// Resizes the array to `new_len` elements, reporting allocation problems as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocationFailed`] if growing the
    /// capacity fails. The array is unchanged in that case.
    pub fn try_resize(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.len {
            self.grow_to_fit(new_len)?;

            // Slots past the old end may hold leftovers from earlier removals.
            for slot in self
                .buffer
                .as_mut_slice()
                .iter_mut()
                .take(new_len)
                .skip(self.len)
            {
                *slot = T::default();
            }
        }

        self.len = new_len;

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Appends an element to the back of the array, growing the capacity to the larger of one
    /// and twice the current capacity if the array is full.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot be described by a memory layout. Allocator failure is
    /// escalated via [`std::alloc::handle_alloc_error`].
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value)
            .unwrap_or_else(|error| error.escalate());
    }

    /// Appends an element to the back of the array, reporting allocation problems as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocationFailed`] if growing the
    /// capacity fails. The array is unchanged in that case and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        let new_len = self.len_plus_one()?;
        self.grow_to_fit(new_len)?;

        // SAFETY: grow_to_fit() guarantees capacity >= len + 1, so slot len is in bounds.
        let slot = unsafe { self.buffer.get_unchecked_mut(self.len) };
        *slot = value;

        self.len = new_len;

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Inserts an element at `position`, shifting the element there and all following elements
    /// one slot to the right. Returns the position of the inserted element.
    ///
    /// Inserting at [`end()`][Self::end] appends. If the array is full, the capacity grows to
    /// the larger of one and twice the current capacity first.
    ///
    /// # Panics
    ///
    /// Panics if `position` is past [`end()`][Self::end] or if the capacity cannot be
    /// described by a memory layout. Allocator failure is escalated via
    /// [`std::alloc::handle_alloc_error`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::dynamic_array;
    ///
    /// let mut array = dynamic_array![1, 3];
    ///
    /// let inserted = array.insert(array.begin() + 1, 2);
    /// assert_eq!(inserted.index(), 1);
    /// assert_eq!(array.as_slice(), [1, 2, 3]);
    ///
    /// array.insert(array.end(), 4);
    /// assert_eq!(array.as_slice(), [1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, position: Position, value: T) -> Position {
        self.try_insert(position, value)
            .unwrap_or_else(|error| error.escalate())
    }

    /// Inserts an element at `position`, reporting allocation problems as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] or [`Error::AllocationFailed`] if growing the
    /// capacity fails. The array is unchanged in that case and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `position` is past [`end()`][Self::end].
    pub fn try_insert(&mut self, position: Position, value: T) -> Result<Position> {
        let index = position.index();

        assert!(
            index <= self.len,
            "insert position {index} is past the end of an array of length {}",
            self.len
        );

        let new_len = self.len_plus_one()?;
        self.grow_to_fit(new_len)?;

        // SAFETY: grow_to_fit() guarantees capacity >= len + 1, so slot len is in bounds.
        let slot = unsafe { self.buffer.get_unchecked_mut(self.len) };
        *slot = value;

        self.len = new_len;

        // The new value sits at the old end; rotating moves it to `index` and shifts everything
        // from `index` onward one slot to the right.
        self.as_mut_slice()
            .get_mut(index..)
            .expect("index <= old len < new len")
            .rotate_right(1);

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(position)
    }

    /// Ensures room for `required_len` elements, growing to at least twice the current capacity
    /// if any growth is needed. All growing operations go through here.
    pub(crate) fn grow_to_fit(&mut self, required_len: usize) -> Result<()> {
        let capacity = self.capacity();

        if required_len <= capacity {
            return Ok(());
        }

        self.try_reserve(required_len.max(capacity.saturating_mul(2)))
    }

    fn len_plus_one(&self) -> Result<usize> {
        self.len.checked_add(1).ok_or(Error::CapacityOverflow {
            requested: usize::MAX,
        })
    }
}

impl<T> Default for DynamicArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the contents into a new array whose capacity equals the source's length.
impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        Self::from_exact_iter(self.len, self.iter().cloned())
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        let len = self.len;

        self.as_slice().get(index).unwrap_or_else(|| {
            panic!("index {index} out of bounds in array of length {len}")
        })
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len;

        self.as_mut_slice().get_mut(index).unwrap_or_else(|| {
            panic!("index {index} out of bounds in array of length {len}")
        })
    }
}

impl<T> Index<Position> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, position: Position) -> &Self::Output {
        &self[position.index()]
    }
}

impl<T> IndexMut<Position> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self[position.index()]
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_exact_iter(N, items)
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_exact_iter(items.len(), items.iter().cloned())
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::undocumented_unsafe_blocks,
    clippy::redundant_clone,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::dynamic_array;

    assert_impl_all!(DynamicArray<u32>: Send, Sync, Clone, Default, fmt::Debug);
    assert_not_impl_any!(DynamicArray<Rc<u32>>: Send, Sync);

    /// Counts how many instances have been dropped.
    #[derive(Debug, Default)]
    struct DropCounter {
        drops: Option<Rc<Cell<usize>>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            if let Some(drops) = &self.drops {
                drops.set(drops.get() + 1);
            }
        }
    }

    fn counted(drops: &Rc<Cell<usize>>) -> DropCounter {
        DropCounter {
            drops: Some(Rc::clone(drops)),
        }
    }

    #[test]
    fn new_is_empty_without_capacity() {
        let array = DynamicArray::<String>::new();

        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 0);
        assert!(array.is_empty());
        assert_eq!(array.begin(), array.end());
        assert_eq!(array.iter().count(), 0);
    }

    #[test]
    fn with_capacity_is_logically_empty() {
        let array = DynamicArray::<u8>::with_capacity(7);

        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 7);
        assert!(array.is_empty());
    }

    #[test]
    fn with_len_fills_defaults() {
        let array = DynamicArray::<String>::with_len(3);

        assert_eq!(array.len(), 3);
        assert_eq!(array.capacity(), 3);
        assert!(array.iter().all(String::is_empty));
    }

    #[test]
    fn from_value_fills_copies() {
        let array = DynamicArray::from_value(4, 9_u16);

        assert_eq!(array.as_slice(), [9, 9, 9, 9]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn from_array_preserves_order() {
        let array = DynamicArray::from([3, 1, 2]);

        assert_eq!(array.as_slice(), [3, 1, 2]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn from_slice_clones_items() {
        let source = ["a".to_string(), "b".to_string()];
        let array = DynamicArray::from(&source[..]);

        assert_eq!(array.as_slice(), source);
        assert_eq!(array.capacity(), 2);
    }

    #[test]
    fn push_back_grows_by_doubling() {
        let mut array = DynamicArray::new();
        let mut observed_capacities = Vec::new();

        for value in 0..9 {
            array.push_back(value);
            observed_capacities.push(array.capacity());
        }

        assert_eq!(observed_capacities, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(array.as_slice(), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn push_back_into_spare_capacity_keeps_capacity() {
        let mut array = DynamicArray::with_capacity(4);

        array.push_back(1);
        array.push_back(2);

        assert_eq!(array.capacity(), 4);
        assert_eq!(array[array.len() - 1], 2);
    }

    #[test]
    fn pop_back_keeps_capacity() {
        let mut array = dynamic_array![1, 2, 3];

        array.pop_back();

        assert_eq!(array.as_slice(), [1, 2]);
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    #[should_panic(expected = "pop_back() called on an empty array")]
    fn pop_back_on_empty_panics() {
        let mut array = DynamicArray::<u32>::with_capacity(2);

        array.pop_back();
    }

    #[test]
    fn push_after_pop_overwrites_leftover() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynamicArray::new();

        array.push_back(counted(&drops));
        array.pop_back();

        // The popped value lingers in the spare slot until overwritten.
        assert_eq!(drops.get(), 0);

        array.push_back(DropCounter::default());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn at_checks_bounds() {
        let mut array = dynamic_array![5, 6];

        assert_eq!(*array.at(0).unwrap(), 5);
        assert_eq!(*array.at(1).unwrap(), 6);
        assert!(matches!(
            array.at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));

        *array.at_mut(1).unwrap() = 60;
        assert_eq!(array.as_slice(), [5, 60]);
        assert!(array.at_mut(2).is_err());
    }

    #[test]
    fn at_does_not_expose_spare_capacity() {
        let array = DynamicArray::<u32>::with_capacity(4);

        assert!(matches!(
            array.at(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds in array of length 3")]
    fn index_out_of_bounds_panics() {
        let array = dynamic_array![1, 2, 3];

        let _value = array[3];
    }

    #[test]
    fn unchecked_access_matches_checked_access() {
        let array = dynamic_array![10, 20, 30];

        for index in 0..array.len() {
            assert_eq!(unsafe { array.get_unchecked(index) }, array.at(index).unwrap());
        }
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut array = dynamic_array![1, 2, 3, 4];

        array.clear();

        assert!(array.is_empty());
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn resize_truncates_and_extends() {
        let mut array = dynamic_array![1, 2, 3, 4];

        array.resize(2);
        assert_eq!(array.as_slice(), [1, 2]);
        assert_eq!(array.capacity(), 4);

        array.resize(4);
        // Leftovers from the truncation are reset to defaults.
        assert_eq!(array.as_slice(), [1, 2, 0, 0]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn resize_beyond_capacity_doubles_or_fits() {
        let mut array = dynamic_array![1, 2, 3];

        array.resize(4);
        assert_eq!(array.capacity(), 6);
        assert_eq!(array.as_slice(), [1, 2, 3, 0]);

        array.resize(20);
        assert_eq!(array.capacity(), 20);
        assert_eq!(array.len(), 20);
        assert_eq!(&array.as_slice()[..4], [1, 2, 3, 0]);
    }

    #[test]
    fn reserve_exact_when_growing() {
        let mut array = dynamic_array![1, 2, 3];

        array.reserve(10);

        assert_eq!(array.capacity(), 10);
        assert_eq!(array.as_slice(), [1, 2, 3]);
    }

    #[test]
    fn reserve_not_above_capacity_is_noop() {
        let mut array = DynamicArray::<u32>::with_capacity(8);
        array.push_back(1);
        let data_ptr = array.as_slice().as_ptr();

        array.reserve(8);
        array.reserve(3);

        assert_eq!(array.capacity(), 8);
        assert_eq!(array.as_slice().as_ptr(), data_ptr);
    }

    #[test]
    fn reserve_moves_elements_without_cloning_or_dropping() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynamicArray::new();
        array.push_back(counted(&drops));
        array.push_back(counted(&drops));

        array.reserve(16);

        assert_eq!(drops.get(), 0);
        assert_eq!(array.len(), 2);

        drop(array);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn try_reserve_overflow_leaves_array_unchanged() {
        let mut array = dynamic_array![1_u64, 2, 3];

        let result = array.try_reserve(usize::MAX);

        assert!(matches!(result, Err(Error::CapacityOverflow { .. })));
        assert_eq!(array.as_slice(), [1, 2, 3]);
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn try_resize_overflow_leaves_array_unchanged() {
        let mut array = dynamic_array![1_u64, 2];

        assert!(array.try_resize(usize::MAX).is_err());
        assert_eq!(array.as_slice(), [1, 2]);
    }

    #[test]
    fn insert_into_middle_shifts_tail() {
        let mut array = dynamic_array![1, 2, 4, 5];
        array.reserve(8);

        let position = array.insert(array.begin() + 2, 3);

        assert_eq!(position.index(), 2);
        assert_eq!(array[position], 3);
        assert_eq!(array.as_slice(), [1, 2, 3, 4, 5]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn insert_at_front_and_end() {
        let mut array = dynamic_array![2];

        array.insert(array.begin(), 1);
        array.insert(array.end(), 3);

        assert_eq!(array.as_slice(), [1, 2, 3]);
    }

    #[test]
    fn insert_grows_full_array() {
        let mut array = DynamicArray::new();

        array.insert(array.end(), 'b');
        assert_eq!(array.capacity(), 1);

        array.insert(array.begin(), 'a');
        assert_eq!(array.capacity(), 2);

        array.insert(array.begin() + 1, 'x');
        assert_eq!(array.capacity(), 4);
        assert_eq!(array.as_slice(), ['a', 'x', 'b']);
    }

    #[test]
    #[should_panic(expected = "is past the end")]
    fn insert_past_end_panics() {
        let mut array = dynamic_array![1, 2];

        array.insert(array.end() + 1, 3);
    }

    #[test]
    fn erase_shifts_tail_left() {
        let mut array = dynamic_array![1, 2, 3, 4];

        let next = array.erase(array.begin() + 1);

        assert_eq!(array.as_slice(), [1, 3, 4]);
        assert_eq!(array[next], 3);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn erase_last_returns_end() {
        let mut array = dynamic_array![1, 2, 3];

        let next = array.erase(array.end() - 1);

        assert_eq!(next, array.end());
        assert_eq!(array.as_slice(), [1, 2]);
    }

    #[test]
    #[should_panic(expected = "does not refer to an element")]
    fn erase_at_end_panics() {
        let mut array = dynamic_array![1, 2];

        array.erase(array.end());
    }

    #[test]
    #[should_panic(expected = "does not refer to an element")]
    fn erase_on_empty_panics() {
        let mut array = DynamicArray::<u8>::new();

        array.erase(array.begin());
    }

    #[test]
    fn insert_then_erase_restores_sequence() {
        let original = dynamic_array![10, 20, 30, 40];

        for index in 0..=original.len() {
            let mut array = original.clone();

            let inserted = array.insert(Position::new(index), 99);
            array.erase(inserted);

            assert_eq!(array, original, "round trip at index {index}");
        }
    }

    #[test]
    fn clone_is_compacted_and_independent() {
        let mut source = DynamicArray::with_capacity(10);
        source.push_back("a".to_string());
        source.push_back("b".to_string());

        let mut copy = source.clone();
        assert_eq!(copy.capacity(), 2);
        assert_eq!(copy, source);

        copy.push_back("c".to_string());
        copy[0].push('!');

        assert_eq!(source.len(), 2);
        assert_eq!(source.as_slice(), ["a", "b"]);
        assert_eq!(copy.as_slice(), ["a!", "b", "c"]);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = dynamic_array![1, 2];
        let mut target = DynamicArray::with_capacity(10);
        target.push_back(7);

        target.clone_from(&source);

        assert_eq!(target.as_slice(), [1, 2]);
        assert_eq!(target.capacity(), 2);
    }

    #[test]
    fn take_transfers_everything() {
        let mut source = DynamicArray::with_capacity(5);
        source.push_back(1);
        source.push_back(2);

        let target = source.take();

        assert_eq!(target.as_slice(), [1, 2]);
        assert_eq!(target.capacity(), 5);
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);

        // The source remains usable.
        source.push_back(3);
        assert_eq!(source.as_slice(), [3]);
    }

    #[test]
    fn mem_take_behaves_like_take() {
        let mut source = dynamic_array![1, 2, 3];

        let target = mem::take(&mut source);

        assert_eq!(target.len(), 3);
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = dynamic_array![1, 2, 3];
        let mut b = DynamicArray::with_capacity(10);
        b.push_back(9);

        a.swap(&mut b);

        assert_eq!(a.as_slice(), [9]);
        assert_eq!(a.capacity(), 10);
        assert_eq!(b.as_slice(), [1, 2, 3]);
        assert_eq!(b.capacity(), 3);
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut array = DynamicArray::new();

        for step in 0_usize..50 {
            match step % 5 {
                0 | 1 => array.push_back(step),
                2 => {
                    array.insert(array.begin(), step);
                }
                3 if !array.is_empty() => {
                    array.erase(array.begin());
                }
                _ => array.resize(step % 7),
            }

            assert!(array.len() <= array.capacity());
        }
    }

    #[test]
    fn drop_releases_every_slot_once() {
        let drops = Rc::new(Cell::new(0));

        {
            let mut array = DynamicArray::with_capacity(4);
            array.push_back(counted(&drops));
            array.push_back(counted(&drops));
            array.push_back(counted(&drops));
            array.erase(array.begin());
            array.pop_back();
        }

        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn debug_lists_contents_only() {
        let mut array = DynamicArray::with_capacity(4);
        array.push_back(1);
        array.push_back(2);

        assert_eq!(format!("{array:?}"), "[1, 2]");
    }

    #[test]
    fn zero_sized_elements() {
        let mut array = DynamicArray::new();

        for _ in 0..100 {
            array.push_back(());
        }
        array.erase(array.begin() + 50);

        assert_eq!(array.len(), 99);
        assert!(array.capacity() >= 99);
    }
}

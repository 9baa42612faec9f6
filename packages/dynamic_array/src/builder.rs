use std::marker::PhantomData;

use crate::{DynamicArray, Result};

/// Builder for creating an instance of [`DynamicArray`].
///
/// All settings are optional. Without any settings, the builder produces the same empty,
/// non-allocating array as [`DynamicArray::new()`].
///
/// # Examples
///
/// Reserving room up front:
///
/// ```
/// use dynamic_array::DynamicArray;
///
/// let array = DynamicArray::<String>::builder().capacity(32).build();
///
/// assert!(array.is_empty());
/// assert_eq!(array.capacity(), 32);
/// ```
///
/// Handling allocation problems instead of treating them as fatal:
///
/// ```
/// use dynamic_array::{DynamicArray, Error};
///
/// let result = DynamicArray::<u64>::builder().capacity(usize::MAX).try_build();
///
/// assert!(matches!(result, Err(Error::CapacityOverflow { .. })));
/// ```
///
/// # Thread safety
///
/// The builder holds plain configuration values and no elements, so it is [`Send`] and [`Sync`]
/// regardless of `T`. Configuration can happen on a different thread than where the array is
/// used.
#[derive(Debug)]
#[must_use]
pub struct DynamicArrayBuilder<T> {
    capacity: usize,

    _item: PhantomData<fn() -> T>,
}

impl<T> DynamicArrayBuilder<T> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            _item: PhantomData,
        }
    }

    /// Sets the number of elements the array can hold before it first needs to grow.
    ///
    /// The array is still created empty; this only reserves room.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::builder().capacity(4).build();
    /// array.push_back(1);
    /// array.push_back(2);
    ///
    /// assert_eq!(array.capacity(), 4);
    /// ```
    #[inline]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the array with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the capacity cannot be described by a memory layout. Allocator failure is
    /// escalated via [`std::alloc::handle_alloc_error`].
    #[must_use]
    #[inline]
    pub fn build(self) -> DynamicArray<T>
    where
        T: Default,
    {
        self.try_build().unwrap_or_else(|error| error.escalate())
    }

    /// Builds the array with the specified configuration, reporting allocation problems
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`][crate::Error::CapacityOverflow] or
    /// [`Error::AllocationFailed`][crate::Error::AllocationFailed] if the requested capacity
    /// cannot be allocated.
    #[inline]
    pub fn try_build(self) -> Result<DynamicArray<T>>
    where
        T: Default,
    {
        DynamicArray::try_with_capacity(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::Error;

    // Test trait implementations.
    assert_impl_all!(DynamicArrayBuilder<u32>: Send, Sync, std::fmt::Debug);
    assert_impl_all!(DynamicArrayBuilder<Rc<u32>>: Send, Sync);

    #[test]
    fn builder_new_creates_default_state() {
        let builder = DynamicArrayBuilder::<u32>::new();

        assert_eq!(builder.capacity, 0);
    }

    #[test]
    fn default_build_does_not_reserve() {
        let array = DynamicArrayBuilder::<u32>::new().build();

        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 0);
    }

    #[test]
    fn capacity_sets_capacity_correctly() {
        let builder = DynamicArrayBuilder::<u32>::new().capacity(12);
        assert_eq!(builder.capacity, 12);

        let array = builder.build();
        assert_eq!(array.capacity(), 12);
        assert!(array.is_empty());
    }

    #[test]
    fn last_capacity_wins() {
        let array = DynamicArrayBuilder::<u32>::new()
            .capacity(100)
            .capacity(3)
            .build();

        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn try_build_reports_capacity_overflow() {
        let result = DynamicArrayBuilder::<u64>::new()
            .capacity(usize::MAX)
            .try_build();

        assert!(matches!(
            result,
            Err(Error::CapacityOverflow {
                requested: usize::MAX
            })
        ));
    }

    #[test]
    #[should_panic(expected = "exceeds the maximum supported allocation size")]
    fn build_panics_on_capacity_overflow() {
        let _array = DynamicArrayBuilder::<u64>::new()
            .capacity(usize::MAX)
            .build();
    }
}

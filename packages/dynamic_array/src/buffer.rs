use std::alloc::{Layout, alloc, dealloc};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::{mem, slice};

use scopeguard::ScopeGuard;

use crate::{Error, Result};

/// Allocates and exclusively owns a fixed number of initialized elements of type `T`.
///
/// The buffer has no notion of which slots are "in use" - every slot in `[0, capacity)` always
/// holds a valid `T`, either default-constructed or produced by a caller-supplied generator.
/// Tracking which of those values are meaningful is the responsibility of the owner.
///
/// A buffer with zero capacity, or a buffer of a zero-sized `T`, does not allocate.
///
/// The buffer is intentionally not [`Clone`]: copying requires knowing how many elements are
/// meaningful, which only the owner knows.
///
/// # Ownership transfer
///
/// Besides regular Rust moves, ownership of the memory block can be transferred out of a place
/// with [`take()`][Self::take] (leaving an empty buffer behind) or exchanged with another buffer
/// with [`swap()`][Self::swap]. Neither operation touches the elements.
///
/// # Thread safety
///
/// The buffer is [`Send`] and [`Sync`] exactly when `T` is, like any other owning collection.
#[derive(Debug)]
pub struct OwnedBuffer<T> {
    /// First slot of the block. Dangling (but well-aligned) when no memory is allocated.
    ptr: NonNull<T>,

    /// Number of initialized slots owned by the buffer.
    capacity: usize,

    // We own values of type T and drop them when we are dropped.
    _owns_items: PhantomData<T>,
}

// SAFETY: The buffer uniquely owns its elements, so moving it to another thread is equivalent
// to moving the elements, which is allowed when T is Send.
unsafe impl<T: Send> Send for OwnedBuffer<T> {}

// SAFETY: Shared access to the buffer only hands out shared references to the elements,
// which is allowed from multiple threads when T is Sync.
unsafe impl<T: Sync> Sync for OwnedBuffer<T> {}

impl<T> OwnedBuffer<T> {
    /// Creates a buffer that owns no memory and has zero capacity.
    #[must_use]
    #[inline]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns_items: PhantomData,
        }
    }

    /// Allocates a buffer with `capacity` default-constructed elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` elements of `T` cannot be described by a memory layout. Allocator
    /// failure is escalated via [`std::alloc::handle_alloc_error`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::OwnedBuffer;
    ///
    /// let buffer = OwnedBuffer::<u32>::new(4);
    ///
    /// assert_eq!(buffer.capacity(), 4);
    /// assert_eq!(buffer.as_slice(), &[0, 0, 0, 0]);
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self
    where
        T: Default,
    {
        Self::try_new(capacity).unwrap_or_else(|error| error.escalate())
    }

    /// Allocates a buffer with `capacity` default-constructed elements, reporting failure
    /// to obtain memory as an error instead of escalating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if `capacity` elements of `T` cannot be described by a
    /// memory layout and [`Error::AllocationFailed`] if the allocator cannot provide the memory.
    pub fn try_new(capacity: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::try_from_fn(capacity, |_| T::default())
    }

    /// Allocates a buffer with `capacity` elements, initializing the slot at each index with
    /// the value returned by `f(index)`, in ascending index order.
    ///
    /// If `f` panics, the elements initialized so far are dropped and the memory is released
    /// before the panic continues to unwind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if `capacity` elements of `T` cannot be described by a
    /// memory layout and [`Error::AllocationFailed`] if the allocator cannot provide the memory.
    /// The generator is not called if an error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynamic_array::OwnedBuffer;
    ///
    /// let buffer = OwnedBuffer::try_from_fn(3, |index| index * 10).unwrap();
    ///
    /// assert_eq!(buffer.as_slice(), &[0, 10, 20]);
    /// ```
    pub fn try_from_fn(capacity: usize, mut f: impl FnMut(usize) -> T) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::empty());
        }

        let layout = Self::layout_for(capacity)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: The layout has a non-zero size, which is the only requirement of alloc().
            let block = unsafe { alloc(layout) };

            NonNull::new(block.cast::<T>()).ok_or(Error::AllocationFailed { layout })?
        };

        // Until every slot is initialized, the guard owns the block. If the generator panics,
        // the guard drops the initialized prefix and releases the memory.
        let mut partial = scopeguard::guard(
            (ptr, 0_usize),
            move |(ptr, initialized): (NonNull<T>, usize)| {
                // SAFETY: Exactly the first `initialized` slots were written by the loop below
                // and nothing else has dropped them.
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), initialized));
                }

                if layout.size() != 0 {
                    // SAFETY: The block was allocated above with this same layout and
                    // has not been released yet.
                    unsafe {
                        dealloc(ptr.as_ptr().cast(), layout);
                    }
                }
            },
        );

        for index in 0..capacity {
            let value = f(index);

            // SAFETY: index < capacity and the block holds capacity slots of T, so the target
            // is in bounds and suitably aligned. The slot is uninitialized, so nothing is
            // overwritten without being dropped.
            unsafe {
                ptr.as_ptr().add(index).write(value);
            }

            // Cannot overflow because index < capacity.
            partial.1 = index.wrapping_add(1);
        }

        let (ptr, initialized) = ScopeGuard::into_inner(partial);
        debug_assert_eq!(initialized, capacity);

        Ok(Self {
            ptr,
            capacity,
            _owns_items: PhantomData,
        })
    }

    /// The number of element slots owned by the buffer.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer owns zero slots.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns a reference to the slot at `index` without bounds checking.
    ///
    /// In debug builds, the bounds are verified with an assertion.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.capacity()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.capacity,
            "slot {index} out of bounds in buffer of capacity {}",
            self.capacity
        );

        // SAFETY: The caller guarantees index < capacity and every slot is initialized.
        unsafe { self.ptr.add(index).as_ref() }
    }

    /// Returns an exclusive reference to the slot at `index` without bounds checking.
    ///
    /// In debug builds, the bounds are verified with an assertion.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index < self.capacity()`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.capacity,
            "slot {index} out of bounds in buffer of capacity {}",
            self.capacity
        );

        // SAFETY: The caller guarantees index < capacity, every slot is initialized and
        // we hold an exclusive reference to the buffer.
        unsafe { self.ptr.add(index).as_mut() }
    }

    /// Returns all slots of the buffer as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid for capacity initialized elements (or dangling and well-aligned
        // with capacity 0 / zero-sized T), and the lifetime is tied to &self.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }

    /// Returns all slots of the buffer as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: ptr is valid for capacity initialized elements (or dangling and well-aligned
        // with capacity 0 / zero-sized T), and we hold an exclusive reference to the buffer.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    /// Exchanges the memory blocks (and capacities) of two buffers.
    ///
    /// No element is constructed, moved or dropped.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Transfers ownership of the memory block out of `self`, leaving an empty buffer
    /// with zero capacity in its place.
    #[must_use]
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    fn layout_for(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity)
            .map_err(|_layout_error| Error::CapacityOverflow { requested: capacity })
    }
}

impl<T> Default for OwnedBuffer<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for OwnedBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }

        // SAFETY: Every one of the capacity slots holds an initialized T that nothing else
        // has dropped, and we are dropping them exactly once before releasing the memory.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr(),
                self.capacity,
            ));
        }

        let layout = Self::layout_for(self.capacity)
            .expect("layout was successfully calculated when the buffer was allocated");

        if layout.size() == 0 {
            return;
        }

        // SAFETY: The block was allocated in try_from_fn() with this same layout and
        // has not been released yet.
        unsafe {
            dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::undocumented_unsafe_blocks,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(OwnedBuffer<u32>: Send, Sync, Default, std::fmt::Debug);
    assert_not_impl_any!(OwnedBuffer<u32>: Clone, Copy);
    assert_not_impl_any!(OwnedBuffer<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(OwnedBuffer<Cell<u32>>: Sync);

    /// Counts how many instances have been dropped.
    #[derive(Debug)]
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn zero_capacity_is_empty() {
        let buffer = OwnedBuffer::<String>::new(0);

        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.as_slice().is_empty());
    }

    #[test]
    fn new_default_constructs_every_slot() {
        let buffer = OwnedBuffer::<String>::new(5);

        assert_eq!(buffer.capacity(), 5);
        assert!(!buffer.is_empty());
        assert!(buffer.as_slice().iter().all(String::is_empty));
    }

    #[test]
    fn try_from_fn_initializes_in_index_order() {
        let mut calls = Vec::new();

        let buffer = OwnedBuffer::try_from_fn(4, |index| {
            calls.push(index);
            index * 2
        })
        .unwrap();

        assert_eq!(calls, vec![0, 1, 2, 3]);
        assert_eq!(buffer.as_slice(), &[0, 2, 4, 6]);
    }

    #[test]
    fn unchecked_access_reads_and_writes_slots() {
        let mut buffer = OwnedBuffer::<u64>::new(3);

        unsafe {
            *buffer.get_unchecked_mut(1) = 42;
            assert_eq!(*buffer.get_unchecked(0), 0);
            assert_eq!(*buffer.get_unchecked(1), 42);
            assert_eq!(*buffer.get_unchecked(2), 0);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn unchecked_access_out_of_bounds_panics_in_debug() {
        let buffer = OwnedBuffer::<u64>::new(3);

        _ = unsafe { buffer.get_unchecked(3) };
    }

    #[test]
    fn swap_exchanges_blocks_and_capacities() {
        let mut a = OwnedBuffer::try_from_fn(2, |index| index + 1).unwrap();
        let mut b = OwnedBuffer::try_from_fn(3, |index| index + 10).unwrap();

        let a_ptr = a.as_slice().as_ptr();
        let b_ptr = b.as_slice().as_ptr();

        a.swap(&mut b);

        assert_eq!(a.capacity(), 3);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_slice(), &[10, 11, 12]);
        assert_eq!(b.as_slice(), &[1, 2]);

        // The blocks themselves moved, not the elements.
        assert_eq!(a.as_slice().as_ptr(), b_ptr);
        assert_eq!(b.as_slice().as_ptr(), a_ptr);
    }

    #[test]
    fn take_leaves_empty_buffer_behind() {
        let mut source = OwnedBuffer::try_from_fn(3, |index| index).unwrap();
        let source_ptr = source.as_slice().as_ptr();

        let target = source.take();

        assert_eq!(source.capacity(), 0);
        assert!(source.as_slice().is_empty());
        assert_eq!(target.capacity(), 3);
        assert_eq!(target.as_slice(), &[0, 1, 2]);
        assert_eq!(target.as_slice().as_ptr(), source_ptr);
    }

    #[test]
    fn drop_drops_every_slot_once() {
        let drops = Rc::new(Cell::new(0));

        let buffer = OwnedBuffer::try_from_fn(4, |_| DropCounter {
            drops: Rc::clone(&drops),
        })
        .unwrap();

        assert_eq!(drops.get(), 0);

        drop(buffer);

        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn take_does_not_drop_elements() {
        let drops = Rc::new(Cell::new(0));

        let mut source = OwnedBuffer::try_from_fn(2, |_| DropCounter {
            drops: Rc::clone(&drops),
        })
        .unwrap();

        let target = source.take();
        drop(source);
        assert_eq!(drops.get(), 0);

        drop(target);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn panicking_generator_drops_initialized_prefix() {
        let drops = Rc::new(Cell::new(0));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            OwnedBuffer::try_from_fn(5, |index| {
                assert!(index < 3, "generator failure");

                DropCounter {
                    drops: Rc::clone(&drops),
                }
            })
        }));

        assert!(result.is_err());
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let result = OwnedBuffer::<u64>::try_new(usize::MAX);

        assert!(matches!(
            result,
            Err(Error::CapacityOverflow {
                requested: usize::MAX
            })
        ));
    }

    #[test]
    fn capacity_overflow_does_not_call_generator() {
        let mut called = false;

        let result = OwnedBuffer::<u64>::try_from_fn(usize::MAX, |_| {
            called = true;
            0
        });

        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn zero_sized_elements_do_not_allocate() {
        let buffer = OwnedBuffer::<()>::new(1000);

        assert_eq!(buffer.capacity(), 1000);
        assert_eq!(buffer.as_slice().len(), 1000);
    }

    #[test]
    fn zero_sized_elements_are_dropped() {
        thread_local! {
            static ZST_DROPS: Cell<usize> = const { Cell::new(0) };
        }

        #[derive(Default)]
        struct Marker;

        impl Drop for Marker {
            fn drop(&mut self) {
                ZST_DROPS.with(|drops| drops.set(drops.get() + 1));
            }
        }

        drop(OwnedBuffer::<Marker>::new(7));

        assert_eq!(ZST_DROPS.with(Cell::get), 7);
    }

    #[test]
    fn default_is_empty() {
        let buffer = OwnedBuffer::<u8>::default();

        assert_eq!(buffer.capacity(), 0);
    }
}

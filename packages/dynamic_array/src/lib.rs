#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable, contiguous array with explicit capacity management and position-based editing.
//!
//! This crate provides [`DynamicArray`], a sequence container that stores its elements in one
//! contiguous heap buffer, together with [`OwnedBuffer`], the fixed-capacity storage it is built
//! on. Every slot of the buffer always holds a valid value, so elements are moved around with
//! safe swaps and rotations and never through uninitialized memory.
//!
//! # Key Features
//!
//! - **Geometric growth**: Appending an element to a full array at least doubles its capacity,
//!   so `n` appends perform `O(log n)` reallocations
//! - **Explicit capacity control**: [`reserve()`](DynamicArray::reserve) and
//!   [`resize()`](DynamicArray::resize) size the buffer up front
//! - **Position-based editing**: [`insert()`](DynamicArray::insert) and
//!   [`erase()`](DynamicArray::erase) operate on [`Position`] values and return the position
//!   to continue from
//! - **Checked and unchecked access**: [`at()`](DynamicArray::at) reports out-of-range access as
//!   an [`Error`], indexing panics and [`get_unchecked()`](DynamicArray::get_unchecked) leaves
//!   the check to the caller
//! - **Fallible allocation**: every operation that may allocate has a `try_` variant that returns
//!   allocation problems as an [`Error`] instead of treating them as fatal
//! - **Value semantics**: cloning creates an independent deep copy; comparison, ordering and
//!   hashing consider the contents only
//!
//! # Capacity Model
//!
//! An array has a length (the number of elements it holds) and a capacity (the number of slots
//! in its buffer). The slots past the length still contain valid values, either defaults created
//! by growth or elements left behind by [`pop_back()`](DynamicArray::pop_back) and
//! [`erase()`](DynamicArray::erase). They are never observable through the public API and are
//! dropped together with the buffer.
//!
//! Because growth fills the new slots with [`Default::default()`], operations that may grow the
//! array require `T: Default`.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use dynamic_array::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! assert_eq!(array.capacity(), 0);
//!
//! array.push_back("first".to_string());
//! array.push_back("second".to_string());
//! array.push_back("third".to_string());
//!
//! assert_eq!(array.len(), 3);
//! assert_eq!(array.capacity(), 4);
//! assert_eq!(array[1], "second");
//! ```
//!
//! ## Editing by Position
//!
//! ```rust
//! use dynamic_array::dynamic_array;
//!
//! let mut array = dynamic_array![1, 2, 4];
//!
//! let inserted = array.insert(array.begin() + 2, 3);
//! assert_eq!(array[inserted], 3);
//! assert_eq!(array, [1, 2, 3, 4]);
//!
//! let next = array.erase(array.begin());
//! assert_eq!(array[next], 2);
//! assert_eq!(array, [2, 3, 4]);
//! ```
//!
//! ## Handling Allocation Failure
//!
//! ```rust
//! use dynamic_array::{DynamicArray, Error};
//!
//! let mut array = DynamicArray::<u64>::new();
//!
//! let result = array.try_reserve(usize::MAX);
//! assert!(matches!(result, Err(Error::CapacityOverflow { .. })));
//!
//! // The array is unchanged after a failed reservation.
//! assert_eq!(array.capacity(), 0);
//! ```
//!
//! # Thread Safety
//!
//! [`DynamicArray<T>`] and [`OwnedBuffer<T>`] are [`Send`] and [`Sync`] whenever `T` is. They
//! use no interior mutability, so sharing requires the usual `&`/`&mut` discipline or external
//! synchronization.

mod array;
mod buffer;
mod builder;
mod cmp;
mod error;
mod iter;
mod macros;
mod position;

pub use array::DynamicArray;
pub use buffer::OwnedBuffer;
pub use builder::*;
pub use error::Error;
pub(crate) use error::Result;
pub use iter::IntoIter;
pub use position::Position;

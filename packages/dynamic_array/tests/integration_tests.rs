//! Integration tests for the `dynamic_array` package.
//!
//! These tests exercise `DynamicArray` through its public API only, covering the capacity
//! model, position-based editing, value semantics and cleanup of owned values.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::thread;

use dynamic_array::{DynamicArray, Error, OwnedBuffer, Position, dynamic_array};

/// Counts how many times values created from the same counter have been dropped.
#[derive(Debug, Default)]
struct DropCounter(Option<Rc<Cell<usize>>>);

impl DropCounter {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self(Some(Rc::clone(drops)))
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        if let Some(drops) = &self.0 {
            drops.set(drops.get() + 1);
        }
    }
}

#[test]
fn length_never_exceeds_capacity_across_mixed_operations() {
    let mut array = DynamicArray::new();

    for step in 0..200_u32 {
        match step % 7 {
            0 | 1 | 2 => array.push_back(step),
            3 => {
                array.insert(array.begin() + array.len() / 2, step);
            }
            4 if !array.is_empty() => {
                array.erase(array.begin());
            }
            5 if !array.is_empty() => array.pop_back(),
            6 => array.resize(array.len() + 3),
            _ => array.reserve(array.capacity() + 1),
        }

        assert!(array.len() <= array.capacity());
    }
}

#[test]
fn push_back_follows_doubling_sequence() {
    let mut array = DynamicArray::new();
    let mut previous_capacity = array.capacity();

    for value in 0..100_usize {
        let previous_len = array.len();
        array.push_back(value);

        assert_eq!(array.len(), previous_len + 1);
        assert_eq!(array[array.len() - 1], value);

        if previous_len == previous_capacity {
            assert_eq!(array.capacity(), (previous_capacity * 2).max(1));
        } else {
            assert_eq!(array.capacity(), previous_capacity);
        }

        previous_capacity = array.capacity();
    }
}

#[test]
fn pop_back_keeps_capacity() {
    let mut array = dynamic_array![1, 2, 3, 4, 5];
    let capacity = array.capacity();

    while !array.is_empty() {
        let len = array.len();
        array.pop_back();

        assert_eq!(array.len(), len - 1);
        assert_eq!(array.capacity(), capacity);
    }
}

#[test]
fn insert_then_erase_restores_every_position() {
    let original = dynamic_array![10, 20, 30, 40];

    for index in 0..=original.len() {
        let mut array = original.clone();

        let inserted = array.insert(Position::new(index), 99);
        assert_eq!(array[inserted], 99);
        assert_eq!(array.len(), original.len() + 1);

        array.erase(inserted);
        assert_eq!(array, original);
    }
}

#[test]
fn erase_walks_the_array() {
    let mut array = dynamic_array![1, 2, 3, 4, 5, 6];

    // Erase every other element, continuing from the position erase() returns.
    let mut position = array.begin();
    while position != array.end() {
        position = array.erase(position);

        if position != array.end() {
            position += 1;
        }
    }

    assert_eq!(array, [2, 4, 6]);
}

#[test]
fn checked_access_matches_indexing() {
    let array = dynamic_array!["a", "b", "c"];

    for index in 0..array.len() {
        assert_eq!(array.at(index).ok(), Some(&array[index]));
    }

    assert!(matches!(
        array.at(3),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn checked_access_on_empty_array_fails() {
    let array = DynamicArray::<u8>::new();

    assert!(matches!(
        array.at(0),
        Err(Error::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn copy_is_independent() {
    let original = dynamic_array![vec![1], vec![2]];
    let mut copy = original.clone();

    copy.push_back(vec![3]);
    copy[0].push(100);

    assert_eq!(original.len(), 2);
    assert_eq!(original[0], [1]);
    assert_eq!(original[1], [2]);
}

#[test]
fn copy_is_compacted() {
    let mut original = DynamicArray::with_capacity(50);
    original.push_back(1);
    original.push_back(2);

    let copy = original.clone();

    assert_eq!(copy.capacity(), 2);
    assert_eq!(copy, original);
}

#[test]
fn move_transfers_everything() {
    let mut source = dynamic_array![1, 2, 3];
    let capacity = source.capacity();

    let target = source.take();

    assert_eq!(target, [1, 2, 3]);
    assert_eq!(target.capacity(), capacity);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);

    // The emptied array remains fully usable.
    source.push_back(4);
    assert_eq!(source, [4]);
}

#[test]
fn comparisons() {
    assert!(dynamic_array![1, 2, 3] == dynamic_array![1, 2, 3]);
    assert!(dynamic_array![1, 2] < dynamic_array![1, 2, 3]);
    assert!(dynamic_array![2] > dynamic_array![1, 9]);
    assert!(dynamic_array![1, 2, 3] != dynamic_array![1, 2]);
}

#[test]
fn resize_truncates_and_extends() {
    let mut array = dynamic_array![1, 2, 3, 4];

    array.resize(2);
    assert_eq!(array, [1, 2]);

    array.resize(5);
    assert_eq!(array, [1, 2, 0, 0, 0]);
}

#[test]
fn reserve_only_grows() {
    let mut array = dynamic_array![1, 2, 3];

    array.reserve(2);
    assert_eq!(array.capacity(), 3);

    array.reserve(3);
    assert_eq!(array.capacity(), 3);

    array.reserve(20);
    assert_eq!(array.capacity(), 20);
    assert_eq!(array, [1, 2, 3]);
}

#[test]
fn failed_growth_leaves_array_unchanged() {
    let mut array = dynamic_array![1_u64, 2, 3];

    assert!(matches!(
        array.try_reserve(usize::MAX),
        Err(Error::CapacityOverflow { .. })
    ));
    assert!(matches!(
        array.try_resize(usize::MAX),
        Err(Error::CapacityOverflow { .. })
    ));

    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn construction_variants() {
    let empty = DynamicArray::<String>::new();
    assert_eq!((empty.len(), empty.capacity()), (0, 0));

    let reserved = DynamicArray::<String>::with_capacity(8);
    assert_eq!((reserved.len(), reserved.capacity()), (0, 8));

    let defaulted = DynamicArray::<String>::with_len(3);
    assert_eq!((defaulted.len(), defaulted.capacity()), (3, 3));
    assert!(defaulted.iter().all(String::is_empty));

    let filled = DynamicArray::from_value(2, "x".to_string());
    assert_eq!(filled, ["x".to_string(), "x".to_string()]);

    let literal = DynamicArray::from(["a", "b"]);
    assert_eq!((literal.len(), literal.capacity()), (2, 2));

    let from_slice = DynamicArray::from(&[1, 2, 3][..]);
    assert_eq!(from_slice, [1, 2, 3]);
}

#[test]
fn positions_span_the_contents() {
    let array = dynamic_array![5, 6, 7];

    assert_eq!(array.end() - array.begin(), array.len());
    assert_eq!(array[array.end() - 1], 7);

    let empty = DynamicArray::<u8>::new();
    assert_eq!(empty.begin(), empty.end());
}

#[test]
fn every_owned_value_is_dropped_exactly_once() {
    let drops = Rc::new(Cell::new(0));

    {
        let mut array = DynamicArray::new();

        for _ in 0..10 {
            array.push_back(DropCounter::new(&drops));
        }

        array.insert(array.begin() + 3, DropCounter::new(&drops));
        array.erase(array.begin());
        array.pop_back();
        array.resize(4);

        // Removed values linger in spare slots until the array is dropped.
        assert_eq!(drops.get(), 0);
    }

    assert_eq!(drops.get(), 11);
}

#[test]
fn owned_buffer_is_usable_on_its_own() {
    let mut buffer = OwnedBuffer::<u32>::new(4);
    assert_eq!(buffer.capacity(), 4);

    for (index, slot) in buffer.as_mut_slice().iter_mut().enumerate() {
        *slot = u32::try_from(index).unwrap() * 2;
    }

    let taken = buffer.take();

    assert_eq!(taken.as_slice(), [0, 2, 4, 6]);
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn array_moves_between_threads() {
    let array = dynamic_array![1_u64, 2, 3];

    let summed = thread::spawn(move || array.iter().sum::<u64>())
        .join()
        .unwrap();

    assert_eq!(summed, 6);
}

#[test]
fn array_shared_between_threads_with_mutex() {
    let shared = Arc::new(Mutex::new(DynamicArray::new()));

    let handles = (0..4_u32)
        .map(|thread_index| {
            let shared = Arc::clone(&shared);

            thread::spawn(move || {
                for value in 0..25 {
                    shared.lock().unwrap().push_back(thread_index * 100 + value);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    let array = shared.lock().unwrap();
    assert_eq!(array.len(), 100);
    assert!(array.capacity() >= 100);
}

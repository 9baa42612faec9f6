//! Comparison operators for [`DynamicArray`].
//!
//! Arrays compare by their contents only. Capacity and the values left in spare slots never
//! affect the outcome.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::DynamicArray;

/// Two arrays are equal if they have the same length and are equal element by element.
impl<T: PartialEq> PartialEq for DynamicArray<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynamicArray<T> {
    #[inline]
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    #[inline]
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Arrays are ordered lexicographically: the first differing element decides and an array that
/// is a prefix of another orders before it.
impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dynamic_array;

    #[test]
    fn equal_contents_are_equal() {
        assert_eq!(dynamic_array![1, 2, 3], dynamic_array![1, 2, 3]);
        assert_ne!(dynamic_array![1, 2, 3], dynamic_array![1, 2]);
        assert_ne!(dynamic_array![1, 2, 3], dynamic_array![1, 2, 4]);
    }

    #[test]
    fn capacity_does_not_affect_equality() {
        let mut roomy = DynamicArray::with_capacity(16);
        roomy.push_back(1);
        roomy.push_back(2);

        assert_eq!(roomy, dynamic_array![1, 2]);
    }

    #[test]
    fn spare_slots_do_not_affect_equality() {
        let mut with_leftovers = dynamic_array![1, 2, 3];
        with_leftovers.pop_back();

        assert_eq!(with_leftovers, dynamic_array![1, 2]);
    }

    #[test]
    fn empty_arrays_are_equal() {
        assert_eq!(
            DynamicArray::<u8>::new(),
            DynamicArray::<u8>::with_capacity(4)
        );
    }

    #[test]
    fn compares_with_slices_and_arrays() {
        let array = dynamic_array![1, 2, 3];

        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array, &[1, 2, 3][..]);
        assert!(array == *[1, 2, 3].as_slice());
        assert_ne!(array, [1, 2]);
    }

    #[test]
    fn prefix_orders_first() {
        assert!(dynamic_array![1, 2] < dynamic_array![1, 2, 3]);
        assert!(dynamic_array![1, 2, 3] > dynamic_array![1, 2]);
        assert!(DynamicArray::<i32>::new() < dynamic_array![0]);
    }

    #[test]
    fn first_difference_decides_order() {
        assert!(dynamic_array![2] > dynamic_array![1, 9]);
        assert!(dynamic_array![1, 9] < dynamic_array![2]);
        assert_eq!(
            dynamic_array![1, 2, 3].cmp(&dynamic_array![1, 3]),
            Ordering::Less
        );
    }

    #[test]
    fn derived_operators_are_consistent() {
        let small = dynamic_array![1, 2];
        let large = dynamic_array![1, 2, 3];
        let same = dynamic_array![1, 2];

        assert!(small <= large);
        assert!(small <= same);
        assert!(large >= small);
        assert!(same >= small);
        assert!(!(small > same));
        assert!(!(small < same));
    }

    #[test]
    fn partial_ord_with_incomparable_elements() {
        let nan = dynamic_array![f64::NAN];

        assert_eq!(nan.partial_cmp(&dynamic_array![1.0]), None);
        assert!(dynamic_array![1.0, f64::NAN] < dynamic_array![2.0]);
    }

    #[test]
    fn equal_arrays_hash_equally() {
        let mut roomy = DynamicArray::with_capacity(8);
        roomy.push_back("a");

        let mut set = HashSet::new();
        set.insert(dynamic_array!["a"]);

        assert!(set.contains(&roomy));
    }
}

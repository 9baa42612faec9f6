/// Creates a [`DynamicArray`][crate::DynamicArray] from a literal sequence of elements.
///
/// The array's length and capacity both equal the number of elements.
///
/// - `dynamic_array![]` creates an empty array without allocating.
/// - `dynamic_array![a, b, c]` creates an array containing the given elements in order.
/// - `dynamic_array![value; count]` creates an array of `count` clones of `value`.
///
/// # Examples
///
/// ```rust
/// use dynamic_array::{DynamicArray, dynamic_array};
///
/// let empty: DynamicArray<u8> = dynamic_array![];
/// assert_eq!(empty.capacity(), 0);
///
/// let listed = dynamic_array![1, 2, 3];
/// assert_eq!(listed.as_slice(), [1, 2, 3]);
/// assert_eq!(listed.capacity(), 3);
///
/// let repeated = dynamic_array!["x"; 2];
/// assert_eq!(repeated.as_slice(), ["x", "x"]);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($value:expr; $count:expr) => {
        $crate::DynamicArray::from_value($count, $value)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($item),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::DynamicArray;

    #[test]
    fn empty_literal() {
        let array: DynamicArray<String> = dynamic_array![];

        assert!(array.is_empty());
        assert_eq!(array.capacity(), 0);
    }

    #[test]
    fn listed_literal_with_trailing_comma() {
        let array = dynamic_array!["a", "b", "c",];

        assert_eq!(array.as_slice(), ["a", "b", "c"]);
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn repeated_literal() {
        let array = dynamic_array![vec![1_u8]; 3];

        assert_eq!(array.len(), 3);
        assert_eq!(array.capacity(), 3);
        assert!(array.iter().all(|item| item == &[1]));
    }

    #[test]
    fn repeated_literal_with_zero_count() {
        let array = dynamic_array![42; 0];

        assert!(array.is_empty());
        assert_eq!(array.capacity(), 0);
    }
}

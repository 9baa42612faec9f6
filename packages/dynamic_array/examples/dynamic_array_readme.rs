//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use `DynamicArray` as a growable array with explicit capacity management.

use dynamic_array::{DynamicArray, dynamic_array};

fn main() {
    println!("=== Dynamic Array README Example ===");

    // Create an array with room for four elements.
    let mut array = DynamicArray::builder().capacity(4).build();

    array.push_back("alpha".to_string());
    array.push_back("gamma".to_string());

    // Insert between the two existing elements.
    array.insert(array.begin() + 1, "beta".to_string());

    assert_eq!(array, ["alpha", "beta", "gamma"].map(String::from));
    assert_eq!(array.capacity(), 4);

    // Clones are independent deep copies.
    let mut copy = array.clone();
    copy[0].push_str("-changed");

    println!("Original: {array:?}");
    println!("Copy: {copy:?}");
    assert_eq!(array[0], "alpha");

    // Arrays compare lexicographically by their contents.
    assert!(dynamic_array![1, 2] < dynamic_array![1, 2, 3]);
    assert!(dynamic_array![2] > dynamic_array![1, 9]);

    println!("README example completed successfully!");
}

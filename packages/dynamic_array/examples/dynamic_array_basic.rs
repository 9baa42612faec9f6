//! Basic usage example for `DynamicArray`.
//!
//! This example demonstrates how the capacity of a `DynamicArray` grows as elements are
//! appended, and how elements are edited by position.

use dynamic_array::DynamicArray;

fn main() {
    let mut array = DynamicArray::new();

    println!("Created DynamicArray with capacity: {}", array.capacity());

    // Each time the array is full, the capacity at least doubles.
    for value in 1..=9_u32 {
        array.push_back(value * 10);

        println!(
            "Pushed {:>3}: length {}, capacity {}",
            value * 10,
            array.len(),
            array.capacity()
        );
    }

    // Access elements by index, by position and with a checked lookup.
    let first = array[0];
    let third = array[array.begin() + 2];

    println!("First element: {first}");
    println!("Third element: {third}");

    match array.at(100) {
        Ok(value) => println!("Element 100: {value}"),
        Err(error) => println!("Checked lookup failed: {error}"),
    }

    // Insert in the middle; everything after the position shifts right.
    let inserted = array.insert(array.begin() + 1, 15);
    println!(
        "Inserted {} at index {}: {array:?}",
        array[inserted],
        inserted.index()
    );

    // Erase from the front; the returned position refers to the next element.
    let next = array.erase(array.begin());
    println!("Erased the first element, next is {}: {array:?}", array[next]);

    // Removing from the back never releases capacity.
    array.pop_back();
    array.pop_back();

    println!(
        "After two pops: length {}, capacity {}",
        array.len(),
        array.capacity()
    );

    array.clear();

    println!(
        "After clear: length {}, capacity {}",
        array.len(),
        array.capacity()
    );

    println!("Example completed successfully!");
}

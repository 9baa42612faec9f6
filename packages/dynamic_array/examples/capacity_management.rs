//! Demonstrates the ways to manage the capacity of a `DynamicArray`.
//!
//! This example shows reserving capacity up front, resizing, moving contents between arrays
//! and handling allocation problems through the fallible `try_` operations.

use dynamic_array::{DynamicArray, Error};

fn main() {
    println!("=== DynamicArray Capacity Management Examples ===");
    println!();

    // Example 1: Reserving capacity up front
    println!("Example 1: Reserving capacity up front");
    println!("--------------------------------------");

    let mut reserved = DynamicArray::<u64>::new();
    reserved.reserve(100);

    for value in 0..100 {
        reserved.push_back(value);
    }

    println!("  Length: {}", reserved.len());
    println!("  Capacity: {}", reserved.capacity());

    // Reserving less than the current capacity does nothing.
    reserved.reserve(10);
    println!("  Capacity after reserve(10): {}", reserved.capacity());

    println!();

    // Example 2: Resizing
    println!("Example 2: Resizing");
    println!("-------------------");

    let mut resized = DynamicArray::<u8>::with_len(3);
    println!("  Created with three default elements: {resized:?}");

    resized.resize(4);
    println!(
        "  After resize(4): {resized:?}, capacity {}",
        resized.capacity()
    );

    resized.resize(1);
    println!(
        "  After resize(1): {resized:?}, capacity {}",
        resized.capacity()
    );

    println!();

    // Example 3: Moving contents between arrays
    println!("Example 3: Moving contents between arrays");
    println!("-----------------------------------------");

    let mut source = DynamicArray::from([1, 2, 3]);
    let mut target = source.take();

    println!(
        "  Source after take: {source:?}, capacity {}",
        source.capacity()
    );
    println!("  Target after take: {target:?}");

    source.swap(&mut target);

    println!("  Source after swap: {source:?}");
    println!("  Target after swap: {target:?}");

    println!();

    // Example 4: Fallible allocation
    println!("Example 4: Fallible allocation");
    println!("------------------------------");

    let mut huge = DynamicArray::<u64>::new();

    match huge.try_reserve(usize::MAX) {
        Ok(()) => println!("  Reserved an impossible amount of memory?!"),
        Err(Error::CapacityOverflow { requested }) => {
            println!("  Refused to reserve {requested} elements");
        }
        Err(error) => println!("  Reservation failed: {error}"),
    }

    println!("  Capacity after failed reservation: {}", huge.capacity());

    println!();
    println!("All capacity management examples completed successfully!");
}

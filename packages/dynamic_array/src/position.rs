use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A position in a [`DynamicArray`][crate::DynamicArray], identifying a slot by its distance
/// from the start of the array.
///
/// Positions are obtained from [`begin()`][crate::DynamicArray::begin] and
/// [`end()`][crate::DynamicArray::end] and moved around with ordinary arithmetic. They are
/// used to address elements (`array[position]`) and to name the target of
/// [`insert()`][crate::DynamicArray::insert] and [`erase()`][crate::DynamicArray::erase].
///
/// # Invalidation
///
/// A position is a plain index and does not borrow the array, so it cannot detect that the array
/// changed underneath it. After an operation that increases the capacity, every previously
/// obtained position must be considered invalid. After an insert or erase, positions at or after
/// the mutation point no longer refer to the same element. Using an invalid position is never
/// memory-unsafe but may address a different element or fail a bounds check.
///
/// # Example
///
/// ```rust
/// use dynamic_array::dynamic_array;
///
/// let array = dynamic_array![10, 20, 30];
///
/// let second = array.begin() + 1;
/// assert_eq!(array[second], 20);
/// assert_eq!(array.end() - second, 2);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    index: usize,
}

impl Position {
    /// Creates a position addressing the slot at `index`.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// The distance of this position from the start of the array.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl From<usize> for Position {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl Add<usize> for Position {
    type Output = Self;

    #[inline]
    fn add(self, rhs: usize) -> Self::Output {
        Self::new(
            self.index
                .checked_add(rhs)
                .expect("position moved past the largest representable index"),
        )
    }
}

impl AddAssign<usize> for Position {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl Sub<usize> for Position {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: usize) -> Self::Output {
        Self::new(
            self.index
                .checked_sub(rhs)
                .expect("position moved before the start of the array"),
        )
    }
}

impl SubAssign<usize> for Position {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

/// The distance between two positions. The left-hand side must not precede the right-hand side.
impl Sub for Position {
    type Output = usize;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index
            .checked_sub(rhs.index)
            .expect("distance between positions must not be negative")
    }
}

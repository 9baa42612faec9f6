use std::alloc::{Layout, handle_alloc_error};

use thiserror::Error;

/// Errors reported by the fallible (`try_*` and checked access) operations of this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Checked access was attempted at an index that is not part of the logical contents.
    ///
    /// The container is left unchanged when this error is returned.
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,

        /// The logical length of the array at the time of the request.
        len: usize,
    },

    /// The requested number of elements cannot be represented as a memory layout on this platform.
    #[error("capacity of {requested} elements exceeds the maximum supported allocation size")]
    CapacityOverflow {
        /// The number of element slots that was requested.
        requested: usize,
    },

    /// The global allocator was unable to provide the requested memory block.
    #[error("memory allocation of {} bytes (alignment {}) failed", layout.size(), layout.align())]
    AllocationFailed {
        /// The layout of the memory block that could not be allocated.
        layout: Layout,
    },
}

impl Error {
    /// Escalates the error the way the standard collections escalate allocation problems.
    ///
    /// Allocator failures go through [`handle_alloc_error`], which by default aborts the process.
    /// Everything else becomes a panic with the error message.
    #[cfg_attr(test, mutants::skip)] // Diverges; nothing observable to assert on besides the panic.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::AllocationFailed { layout } => handle_alloc_error(layout),
            other => panic!("{other}"),
        }
    }
}

/// A specialized `Result` type for dynamic array operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

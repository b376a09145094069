//! Error types for rowmul operations.
//!
//! All failures are detected before any worker thread touches the output
//! matrix, so a caller never observes a partially computed result: either the
//! full product is returned, or one of these errors is.

use std::fmt;
use std::io;

/// Errors that can occur while multiplying matrices.
#[derive(Debug)]
pub enum RowmulError {
    /// The inner dimensions of the two operands disagree (`a.cols != b.rows`).
    DimensionMismatch {
        /// Rows of the left operand.
        a_rows: usize,
        /// Columns of the left operand.
        a_cols: usize,
        /// Rows of the right operand.
        b_rows: usize,
        /// Columns of the right operand.
        b_cols: usize,
    },
    /// A backing buffer does not match the declared matrix extents.
    ShapeMismatch {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
        /// Actual length of the supplied buffer.
        len: usize,
    },
    /// The operating system refused to create a worker thread.
    ///
    /// There is no silent degradation to fewer threads: if any of the
    /// requested workers cannot be spawned, the whole multiply fails.
    ThreadSpawn {
        /// Spawn-order index of the worker that failed to start.
        worker: usize,
        /// The underlying I/O error from the thread builder.
        source: io::Error,
    },
}

impl fmt::Display for RowmulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowmulError::DimensionMismatch {
                a_rows,
                a_cols,
                b_rows,
                b_cols,
            } => write!(
                f,
                "matrix dimension mismatch: a is {a_rows}x{a_cols}, b is {b_rows}x{b_cols} \
                 (a.cols must equal b.rows)"
            ),
            RowmulError::ShapeMismatch { rows, cols, len } => write!(
                f,
                "buffer of length {len} cannot back a {rows}x{cols} matrix \
                 (expected {} elements)",
                rows * cols
            ),
            RowmulError::ThreadSpawn { worker, source } => {
                write!(f, "failed to spawn worker thread {worker}: {source}")
            }
        }
    }
}

impl std::error::Error for RowmulError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RowmulError::ThreadSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for rowmul operations.
pub type Result<T> = std::result::Result<T, RowmulError>;

/// Creates a dimension-mismatch error from the two operand shapes.
pub(crate) fn dimension_mismatch(
    a_rows: usize,
    a_cols: usize,
    b_rows: usize,
    b_cols: usize,
) -> RowmulError {
    RowmulError::DimensionMismatch {
        a_rows,
        a_cols,
        b_rows,
        b_cols,
    }
}

/// Creates a shape-mismatch error for an ill-sized backing buffer.
pub(crate) fn shape_mismatch(rows: usize, cols: usize, len: usize) -> RowmulError {
    RowmulError::ShapeMismatch { rows, cols, len }
}

/// Creates a thread-spawn error for the worker with the given spawn index.
pub(crate) fn thread_spawn(worker: usize, source: io::Error) -> RowmulError {
    RowmulError::ThreadSpawn { worker, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let error = dimension_mismatch(4, 3, 5, 2);
        let display = format!("{}", error);
        assert!(display.contains("dimension mismatch"));
        assert!(display.contains("4x3"));
        assert!(display.contains("5x2"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let error = shape_mismatch(2, 3, 5);
        let display = format!("{}", error);
        assert!(display.contains("length 5"));
        assert!(display.contains("2x3"));
        assert!(display.contains("expected 6"));
    }

    #[test]
    fn test_thread_spawn_display_and_source() {
        let io_err = io::Error::new(io::ErrorKind::WouldBlock, "resource exhausted");
        let error = thread_spawn(7, io_err);
        let display = format!("{}", error);
        assert!(display.contains("worker thread 7"));
        assert!(display.contains("resource exhausted"));

        use std::error::Error;
        assert!(error.source().is_some());
    }
}

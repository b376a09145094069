//! The dynamic-row-distribution multiply engine.
//!
//! `C = A * B` is decomposed by output row: a fixed pool of worker threads
//! repeatedly claims the next unclaimed row of `C` from a shared
//! [`RowCursor`] and computes it in full. Whole-row granularity keeps the
//! critical section down to an integer bump while still balancing load
//! dynamically: a thread that lands on a core with less competition simply
//! claims more rows.
//!
//! Threads are created per call and joined before the call returns; there is
//! no persistent pool, no cancellation, and no partial result. The join is
//! the synchronization edge that makes every worker's writes visible to the
//! caller.

use std::thread;
use std::time::Duration;

use crate::clock::thread_cpu_time;
use crate::cursor::RowCursor;
use crate::error::{self, Result};
use crate::matrix::Matrix;

/// Instrumentation reported by one worker after it finishes.
///
/// Under dynamic row distribution the per-worker row counts are
/// nondeterministic; only their sum (the total row count of `C`) is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Number of output rows this worker computed.
    pub rows_completed: usize,
    /// CPU time this worker's thread consumed, measured on the per-thread
    /// CPU clock (see [`crate::clock`]). Summed across workers this can
    /// exceed the wall time of the multiply.
    pub cpu_time: Duration,
}

/// Computes one output row: `c_row = a_row * b`.
///
/// Pure with respect to its inputs; the only side effect is writing into the
/// caller-owned `c_row`. Distinct rows occupy disjoint memory, so concurrent
/// invocations for different rows need no synchronization. Accumulation is
/// plain `f64` arithmetic in a fixed order, which keeps the result
/// bit-for-bit independent of which thread computes the row.
///
/// # Panics
///
/// Panics if `a_row.len() != b.rows()` or `c_row.len() != b.cols()`; the
/// dispatcher establishes both before any worker runs.
pub fn multiply_row(a_row: &[f64], b: &Matrix, c_row: &mut [f64]) {
    assert_eq!(a_row.len(), b.rows());
    assert_eq!(c_row.len(), b.cols());

    for (j, out) in c_row.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &a_ik) in a_row.iter().enumerate() {
            sum += a_ik * b[(k, j)];
        }
        *out = sum;
    }
}

/// The worker loop: claim a row, compute it, repeat until the cursor is
/// exhausted. Runs identically on a spawned thread and, in single-pass mode,
/// on the caller's thread.
fn run_worker(a: &Matrix, b: &Matrix, cursor: &RowCursor<'_>) -> WorkerStats {
    let cpu_start = thread_cpu_time();
    let mut rows_completed = 0;

    while let Some((i, c_row)) = cursor.claim_next() {
        multiply_row(a.row(i), b, c_row);
        rows_completed += 1;
    }

    WorkerStats {
        rows_completed,
        cpu_time: thread_cpu_time().saturating_sub(cpu_start),
    }
}

/// Multiplies `a * b` using `threads` worker threads and returns the product
/// together with per-worker statistics in spawn order.
///
/// `threads == 0` is the degenerate single-pass mode: the same worker loop
/// runs once, synchronously, on the calling thread, and the stats vector has
/// exactly one entry. It doubles as the uncontended baseline when measuring
/// parallel speedup.
///
/// The call either completes all rows of the product or fails before any
/// output is produced; a partially written matrix is never returned.
///
/// # Errors
///
/// * [`RowmulError::DimensionMismatch`](crate::RowmulError::DimensionMismatch)
///   if `a.cols() != b.rows()`, checked before any allocation or spawn.
/// * [`RowmulError::ThreadSpawn`](crate::RowmulError::ThreadSpawn) if the OS
///   cannot create one of the requested workers.
///
/// # Examples
///
/// ```
/// use rowmul::{multiply, Matrix};
///
/// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
/// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0])?;
///
/// let (c, stats) = multiply(&a, &b, 2)?;
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// assert_eq!(stats.iter().map(|s| s.rows_completed).sum::<usize>(), 2);
/// # Ok::<(), rowmul::RowmulError>(())
/// ```
pub fn multiply(a: &Matrix, b: &Matrix, threads: usize) -> Result<(Matrix, Vec<WorkerStats>)> {
    if a.cols() != b.rows() {
        return Err(error::dimension_mismatch(
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols(),
        ));
    }

    let n = a.rows();
    let m = b.cols();
    let mut c = Matrix::zeros(n, m);

    let stats = {
        let cursor = RowCursor::new(c.as_mut_slice(), n, m);
        if threads == 0 {
            vec![run_worker(a, b, &cursor)]
        } else {
            spawn_workers(a, b, &cursor, threads)?
        }
    };

    Ok((c, stats))
}

/// Spawns `threads` workers over the shared cursor, joins them all, and
/// collects their stats in spawn order.
fn spawn_workers(
    a: &Matrix,
    b: &Matrix,
    cursor: &RowCursor<'_>,
    threads: usize,
) -> Result<Vec<WorkerStats>> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for worker in 0..threads {
            let builder = thread::Builder::new().name(format!("rowmul-worker-{worker}"));
            let handle = builder
                .spawn_scoped(scope, || run_worker(a, b, cursor))
                .map_err(|source| error::thread_spawn(worker, source))?;
            handles.push(handle);
        }

        let mut stats = Vec::with_capacity(threads);
        for handle in handles {
            match handle.join() {
                Ok(worker_stats) => stats.push(worker_stats),
                // Workers contain no panicking paths of their own; a panic
                // here is a bug and is forwarded rather than swallowed.
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        Ok(stats)
    })
}

//! Shared work cursor handing out output rows to worker threads.
//!
//! The cursor is the only mutable state shared between workers. It pairs a
//! monotonically increasing row index with the matching slice of the output
//! buffer, so a successful claim transfers *exclusive* ownership of that
//! row's memory to the claiming thread. Disjointness of concurrent writes is
//! therefore guaranteed by the borrow checker rather than by convention:
//! there is no way to obtain a row slice except through [`RowCursor::claim_next`],
//! and each slice is handed out exactly once.

use std::mem;
use std::sync::{Mutex, PoisonError};

/// Hands out `(row index, output row slice)` pairs, each exactly once.
///
/// Rows are granted in increasing index order. Which thread receives which
/// row is nondeterministic and varies run to run; only completeness and
/// disjointness of the partition are guaranteed.
pub struct RowCursor<'buf> {
    inner: Mutex<CursorState<'buf>>,
}

struct CursorState<'buf> {
    /// Next unclaimed row index, in `[0, rows]`.
    next_row: usize,
    rows: usize,
    cols: usize,
    /// Unclaimed tail of the output buffer, `(rows - next_row) * cols` long.
    rest: &'buf mut [f64],
}

impl<'buf> RowCursor<'buf> {
    /// Creates a cursor over an output buffer holding `rows` rows of `cols`
    /// elements each.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len() != rows * cols`.
    pub fn new(buf: &'buf mut [f64], rows: usize, cols: usize) -> Self {
        assert_eq!(
            buf.len(),
            rows * cols,
            "output buffer length {} does not match {rows}x{cols}",
            buf.len()
        );
        RowCursor {
            inner: Mutex::new(CursorState {
                next_row: 0,
                rows,
                cols,
                rest: buf,
            }),
        }
    }

    /// Claims the next unclaimed output row, or `None` once all rows have
    /// been handed out.
    ///
    /// Safe to call from any number of threads concurrently. The critical
    /// section is a single integer bump and a slice split; no numeric work
    /// ever runs while the lock is held.
    pub fn claim_next(&self) -> Option<(usize, &'buf mut [f64])> {
        // A worker never panics while holding the lock, so a poisoned mutex
        // still guards consistent state.
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.next_row == state.rows {
            return None;
        }
        let index = state.next_row;
        state.next_row += 1;

        let rest = mem::take(&mut state.rest);
        let (row, rest) = rest.split_at_mut(state.cols);
        state.rest = rest;
        Some((index, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_claims_every_row_once_in_order() {
        let mut buf = vec![0.0; 4 * 3];
        let cursor = RowCursor::new(&mut buf, 4, 3);

        for expected in 0..4 {
            let (index, row) = cursor.claim_next().unwrap();
            assert_eq!(index, expected);
            assert_eq!(row.len(), 3);
        }
        assert!(cursor.claim_next().is_none());
        // Exhaustion is permanent.
        assert!(cursor.claim_next().is_none());
    }

    #[test]
    fn test_claimed_rows_are_disjoint_slices() {
        let mut buf = vec![0.0; 3 * 2];
        let cursor = RowCursor::new(&mut buf, 3, 2);

        let (_, r0) = cursor.claim_next().unwrap();
        let (_, r1) = cursor.claim_next().unwrap();
        let (_, r2) = cursor.claim_next().unwrap();

        // Both rows stay writable at the same time, which is only possible
        // because the slices do not overlap.
        r0[0] = 1.0;
        r1[0] = 2.0;
        r2[1] = 3.0;
        drop((r0, r1, r2));

        assert_eq!(buf, vec![1.0, 0.0, 2.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_zero_width_rows_are_still_counted() {
        let mut buf = vec![];
        let cursor = RowCursor::new(&mut buf, 5, 0);

        let mut claimed = 0;
        while let Some((_, row)) = cursor.claim_next() {
            assert!(row.is_empty());
            claimed += 1;
        }
        assert_eq!(claimed, 5);
    }

    #[test]
    fn test_concurrent_claims_partition_all_rows() {
        const ROWS: usize = 997;
        const THREADS: usize = 8;

        let mut buf = vec![0.0; ROWS * 2];
        let cursor = RowCursor::new(&mut buf, ROWS, 2);

        let per_thread: Vec<Vec<usize>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        let mut mine = Vec::new();
                        while let Some((index, row)) = cursor.claim_next() {
                            row[0] = index as f64;
                            mine.push(index);
                        }
                        mine
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let all: Vec<usize> = per_thread.into_iter().flatten().collect();
        assert_eq!(all.len(), ROWS, "every row claimed exactly once");
        let distinct: HashSet<usize> = all.iter().copied().collect();
        assert_eq!(distinct.len(), ROWS, "no row claimed twice");
        assert!(distinct.contains(&0) && distinct.contains(&(ROWS - 1)));

        for (i, chunk) in buf.chunks_exact(2).enumerate() {
            assert_eq!(chunk[0], i as f64);
        }
    }
}

//! 🧮 Parallel dense matrix multiplication with dynamic row distribution.
//!
//! `rowmul` computes `C = A * B` by handing out rows of `C`, one at a time,
//! to a fixed pool of worker threads. The row hand-off goes through a single
//! mutex-guarded cursor whose critical section is one integer bump, so the
//! numeric work itself never serializes; load balances itself because faster
//! workers simply claim more rows.
//!
//! Each worker measures its own consumed CPU time on a per-thread CPU clock
//! and reports it, together with its row count, when the multiply finishes.
//! Summed worker CPU time exceeding wall-clock time is the observable proof
//! of parallel speedup.
//!
//! # Quick start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use rowmul::{multiply, Matrix};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let a = Matrix::random(64, 32, &mut rng);
//! let b = Matrix::random(32, 48, &mut rng);
//!
//! let (c, stats) = multiply(&a, &b, 4)?;
//! assert_eq!(c.rows(), 64);
//! assert_eq!(c.cols(), 48);
//! assert_eq!(stats.len(), 4);
//! assert_eq!(stats.iter().map(|s| s.rows_completed).sum::<usize>(), 64);
//! # Ok::<(), rowmul::RowmulError>(())
//! ```
//!
//! Passing `threads == 0` runs the same worker loop once on the calling
//! thread with no contention at all; it is the baseline against which the
//! threaded runs are compared.

pub mod clock;
pub mod cursor;
pub mod error;
pub mod matmul;
pub mod matrix;

pub use error::{Result, RowmulError};
pub use matmul::{multiply, multiply_row, WorkerStats};
pub use matrix::Matrix;

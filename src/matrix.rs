//! Dense row-major matrices of `f64`.
//!
//! A [`Matrix`] is a logical `rows x cols` view over a flat buffer in which
//! each row occupies a contiguous run of memory. Row-major layout is what
//! makes the multiply engine's row partitioning cheap: handing a worker
//! exclusive ownership of one output row is just slicing the buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::error::{self, Result};

/// A dense `rows x cols` matrix of `f64` stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix with every element set to zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RowmulError::ShapeMismatch`](crate::RowmulError::ShapeMismatch)
    /// if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(error::shape_mismatch(rows, cols, data.len()));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Creates a matrix filled with uniform random values in `[0, 1)`.
    ///
    /// Callers that need reproducible inputs should pass a seeded generator:
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use rowmul::Matrix;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let a = Matrix::random(4, 4, &mut rng);
    /// assert_eq!(a.rows(), 4);
    /// ```
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows * cols).map(|_| rng.random::<f64>()).collect();
        Matrix { rows, cols, data }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrows row `i` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Borrows the whole backing buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the backing buffer, for row partitioning.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns a new matrix that is the transpose of `self`.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Orthonormalizes the rows of `self` in place via Gram-Schmidt.
    ///
    /// After the call, every row has unit magnitude and is orthogonal to all
    /// other rows, so `self * self.transpose()` is the identity (up to
    /// floating-point rounding). Requires `rows <= cols` and linearly
    /// independent rows for a meaningful result; random matrices satisfy the
    /// independence requirement with probability 1.
    pub fn orthonormalize(&mut self) {
        let cols = self.cols;
        for i in 0..self.rows {
            let (done, rest) = self.data.split_at_mut(i * cols);
            let row = &mut rest[..cols];
            for prev in done.chunks_exact(cols) {
                let proj = dot(prev, row);
                for (x, p) in row.iter_mut().zip(prev) {
                    *x -= proj * p;
                }
            }
            let mag = dot(row, row).sqrt();
            for x in row.iter_mut() {
                *x /= mag;
            }
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

/// Fixed-width grid rendering, one text line per matrix row.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "{:8.3} ", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

use num_traits::One;

use crate::linalg::LinalgError;
use crate::traits::C64;

use super::Matrix;

impl Matrix {
    /// Extract a sub-matrix of size `rows x cols` starting at `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Matrix {
        assert!(
            i + rows <= self.nrows && j + cols <= self.ncols,
            "block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, rows, cols, self.nrows, self.ncols,
        );
        Matrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)])
    }

    /// Write a sub-matrix into self starting at position `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn set_block(&mut self, i: usize, j: usize, src: &Matrix) {
        assert!(
            i + src.nrows <= self.nrows && j + src.ncols <= self.ncols,
            "set_block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, src.nrows, src.ncols, self.nrows, self.ncols,
        );
        for c in 0..src.ncols {
            for r in 0..src.nrows {
                self[(i + r, j + c)] = src[(r, c)];
            }
        }
    }

    /// Extract the top-left corner of size `rows x cols`.
    pub fn top_left(&self, rows: usize, cols: usize) -> Matrix {
        self.block(0, 0, rows, cols)
    }

    /// Sub-block spanning rows `begin_row..=end_row` and columns
    /// `begin_col..=end_col`, using 1-based positions.
    ///
    /// ```
    /// use zmatrix::Matrix;
    /// let m = Matrix::from_real_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// let b = m.minor(2, 2, 3, 3).unwrap();
    /// assert_eq!(b, Matrix::from_real_rows(2, 2, &[5.0, 6.0, 8.0, 9.0]));
    /// ```
    pub fn minor(
        &self,
        begin_row: usize,
        begin_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> Result<Matrix, LinalgError> {
        if begin_row < 1
            || begin_col < 1
            || end_row < begin_row
            || end_col < begin_col
            || end_row > self.nrows
            || end_col > self.ncols
        {
            return Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: (end_row, end_col),
            });
        }
        Ok(self.block(
            begin_row - 1,
            begin_col - 1,
            end_row - begin_row + 1,
            end_col - begin_col + 1,
        ))
    }

    /// Drop the first row and the first column.
    pub fn first_minor(&self) -> Matrix {
        assert!(self.nrows > 0 && self.ncols > 0, "first_minor of an empty matrix");
        self.block(1, 1, self.nrows - 1, self.ncols - 1)
    }

    /// Place `rhs` to the right of `self`.
    ///
    /// Fails with a dimension error if the row counts differ.
    pub fn append_right(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.nrows != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.nrows, rhs.ncols),
                got: rhs.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + rhs.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&rhs.data);
        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols + rhs.ncols,
        })
    }

    /// Place `rhs` below `self`.
    ///
    /// Fails with a dimension error if the column counts differ.
    pub fn append_bottom(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.ncols != rhs.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: (rhs.nrows, self.ncols),
                got: rhs.shape(),
            });
        }
        let mut out = Matrix::zeros(self.nrows + rhs.nrows, self.ncols);
        out.set_block(0, 0, self);
        out.set_block(self.nrows, 0, rhs);
        Ok(out)
    }

    /// Embed `self` below and to the right of a `k x k` identity block.
    ///
    /// The result is `(nrows + k) x (ncols + k)`; off-diagonal blocks are
    /// zero. Used to lift a reflector acting on trailing rows to full size.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let h = Matrix::from_real_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
    /// let e = h.expand(1);
    /// assert_eq!(e.shape(), (3, 3));
    /// assert_eq!(e[(0, 0)], c64(1.0, 0.0));
    /// assert_eq!(e[(1, 2)], c64(1.0, 0.0));
    /// ```
    pub fn expand(&self, k: usize) -> Matrix {
        let mut out = Matrix::zeros(self.nrows + k, self.ncols + k);
        for i in 0..k {
            out[(i, i)] = C64::one();
        }
        out.set_block(k, k, self);
        out
    }

    /// Append one row and one column of zeros with a `1` in the new
    /// bottom-right corner.
    pub fn expand_bottom(&self) -> Matrix {
        let mut out = Matrix::zeros(self.nrows + 1, self.ncols + 1);
        out.set_block(0, 0, self);
        out[(self.nrows, self.ncols)] = C64::one();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::c64;
    use num_traits::Zero;

    fn mat3x4() -> Matrix {
        Matrix::from_fn(3, 4, |i, j| c64((i * 4 + j) as f64, 0.0))
    }

    #[test]
    fn block_extract() {
        let m = mat3x4();
        let b = m.block(1, 1, 2, 2);
        assert_eq!(b[(0, 0)], c64(5.0, 0.0));
        assert_eq!(b[(1, 1)], c64(10.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn block_out_of_bounds() {
        let _ = mat3x4().block(2, 2, 2, 2);
    }

    #[test]
    fn minor_one_based() {
        let m = mat3x4();
        assert_eq!(m.minor(1, 1, 3, 4).unwrap(), m);
        assert_eq!(m.minor(2, 3, 2, 3).unwrap()[(0, 0)], c64(6.0, 0.0));
        assert!(m.minor(0, 1, 2, 2).is_err());
        assert!(m.minor(1, 1, 4, 2).is_err());
    }

    #[test]
    fn first_minor_drops_leading_row_and_column() {
        let m = mat3x4();
        assert_eq!(m.first_minor(), m.block(1, 1, 2, 3));
    }

    #[test]
    fn append_right_and_bottom() {
        let a = Matrix::eye(2);
        let b = Matrix::from_real_rows(2, 1, &[5.0, 6.0]);
        let r = a.append_right(&b).unwrap();
        assert_eq!(r.shape(), (2, 3));
        assert_eq!(r[(1, 2)], c64(6.0, 0.0));
        assert!(a.append_right(&Matrix::zeros(3, 1)).is_err());

        let c = Matrix::from_real_rows(1, 2, &[7.0, 8.0]);
        let d = a.append_bottom(&c).unwrap();
        assert_eq!(d.shape(), (3, 2));
        assert_eq!(d[(2, 1)], c64(8.0, 0.0));
        assert!(a.append_bottom(&b).is_err());
    }

    #[test]
    fn expand_identity_padding() {
        let h = Matrix::from_fn(2, 2, |_, _| c64(2.0, 0.0));
        let e = h.expand(2);
        assert_eq!(e.shape(), (4, 4));
        assert_eq!(e[(0, 0)], c64(1.0, 0.0));
        assert_eq!(e[(1, 1)], c64(1.0, 0.0));
        assert_eq!(e[(0, 2)], C64::zero());
        assert_eq!(e[(3, 3)], c64(2.0, 0.0));
        assert_eq!(h.expand(0), h);
    }

    #[test]
    fn expand_bottom_identity_corner() {
        let h = Matrix::from_fn(2, 2, |_, _| c64(2.0, 0.0));
        let e = h.expand_bottom();
        assert_eq!(e[(2, 2)], c64(1.0, 0.0));
        assert_eq!(e[(2, 0)], C64::zero());
        assert_eq!(e[(1, 1)], c64(2.0, 0.0));
    }
}

use std::fmt;

use crate::error::ConfigError;

/// Dense row-major `f64` matrix.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wraps row-major `data`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ConfigError> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| ConfigError::new(format!("{rows}x{cols} matrix is too large")))?;
        if data.len() != expected {
            return Err(ConfigError::new(format!(
                "{rows}x{cols} matrix needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Writes one element; returns `false` if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
            true
        } else {
            false
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// Product `self · other`, using the O(rows·cols·inner) triple loop.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `self.cols() != other.rows()`.
    ///
    /// ```
    /// use arenakit::numeric::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let b = Matrix::from_vec(3, 1, vec![1.0, 0.0, -1.0]).unwrap();
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[-2.0, -2.0]);
    /// assert!(b.multiply(&a).is_err());
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, ConfigError> {
        if self.cols != other.rows {
            return Err(ConfigError::new(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.data[i * self.cols + k];
                for j in 0..other.cols {
                    out.data[i * other.cols + j] += lhs * other.data[k * other.cols + j];
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows = f.debug_list();
        for row in self.data.chunks(self.cols.max(1)).take(self.rows) {
            rows.entry(&row);
        }
        rows.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.multiply(&Matrix::identity(2)).unwrap(), a);
        assert_eq!(Matrix::identity(2).multiply(&a).unwrap(), a);
    }

    #[test]
    fn rectangular_product() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!((c.rows(), c.cols()), (2, 2));
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let a = Matrix::zeros(2, 3);
        let err = a.multiply(&Matrix::zeros(2, 3)).unwrap_err();
        assert!(err.message().contains("2x3 by 2x3"));
        assert!(Matrix::from_vec(2, 2, vec![1.0]).is_err());
    }

    #[test]
    fn transpose_and_accessors() {
        let mut a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.get(2, 1), Some(6.0));
        assert_eq!(t.get(3, 0), None);
        assert!(a.set(1, 2, 9.0));
        assert!(!a.set(2, 0, 1.0));
        assert_eq!(a.get(1, 2), Some(9.0));
    }

    #[test]
    fn empty_inner_dimension_gives_zeros() {
        let a = Matrix::zeros(2, 0);
        let b = Matrix::zeros(0, 3);
        assert_eq!(a.multiply(&b).unwrap(), Matrix::zeros(2, 3));
    }
}

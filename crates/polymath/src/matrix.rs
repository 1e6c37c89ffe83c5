//! Square matrices and linear systems.

use itertools::Itertools;

use crate::{EPSILON, Float, Vector, VectorRef};

/// N-by-N square matrix, stored as a list of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: Vec<Vector>,
}

impl Matrix {
    /// Constructs a square matrix with one row (and one column) per element
    /// of `rows`. Rows are padded or truncated to fit.
    pub fn from_rows<V: VectorRef>(rows: impl IntoIterator<Item = V>) -> Self {
        let rows = rows.into_iter().collect_vec();
        let ndim = rows.len() as u8;
        let rows = rows
            .iter()
            .map(|row| (0..ndim).map(|col| row.get(col)).collect())
            .collect();
        Self { rows }
    }

    /// Returns the number of rows and columns.
    pub fn ndim(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Solves `self * x = rhs` for `x` by Gauss-Jordan elimination with
    /// partial pivoting, or returns `None` if the matrix is singular.
    pub fn solve(&self, rhs: impl VectorRef) -> Option<Vector> {
        let n = self.rows.len();

        // Augmented matrix `[self | rhs]`
        let mut aug = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut r = row.0.to_vec();
                r.push(rhs.get(i as u8));
                r
            })
            .collect_vec();

        for col in 0..n {
            let pivot = (col..n).max_by(|&a, &b| aug[a][col].abs().total_cmp(&aug[b][col].abs()))?;
            if aug[pivot][col].abs() < EPSILON {
                return None;
            }
            aug.swap(pivot, col);
            let pivot_row = aug[col].clone();
            for (i, row) in aug.iter_mut().enumerate() {
                let factor = row[col] / pivot_row[col];
                if i != col && factor != 0.0 {
                    for (x, p) in row.iter_mut().zip(&pivot_row).skip(col) {
                        *x -= factor * p;
                    }
                }
            }
        }

        Some(aug.iter().enumerate().map(|(i, row)| row[n] / row[i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{assert_approx_eq, vector};

    #[test]
    fn test_matrix_solve() {
        let rows = [
            vector![2.0, 1.0, -1.0],
            vector![-3.0, -1.0, 2.0],
            vector![-2.0, 1.0, 2.0],
        ];
        let m = Matrix::from_rows(&rows);
        assert_eq!(m.ndim(), 3);
        let x = m.solve(vector![8.0, -11.0, -3.0]).unwrap();
        assert_approx_eq!(x, vector![2.0, 3.0, -1.0]);
        for (row, expected) in rows.iter().zip([8.0, -11.0, -3.0]) {
            assert_approx_eq!(row.dot(&x), expected);
        }

        // Right-hand side given as a slice.
        let x = m.solve([8.0, -11.0, -3.0].as_slice()).unwrap();
        assert_approx_eq!(x, vector![2.0, 3.0, -1.0]);
    }

    #[test]
    fn test_matrix_solve_with_row_swap() {
        let m = Matrix::from_rows([vector![0.0, 1.0], vector![1.0]]);
        assert_approx_eq!(m.solve(vector![5.0, 7.0]).unwrap(), vector![7.0, 5.0]);
    }

    #[test]
    fn test_singular_matrix() {
        let m = Matrix::from_rows([vector![1.0, 2.0], vector![2.0, 4.0]]);
        assert_eq!(m.solve(vector![1.0, 2.0]), None);
    }
}

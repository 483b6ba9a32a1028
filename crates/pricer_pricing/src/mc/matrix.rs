//! Row-major scenario-by-draw matrices.
//!
//! Rows are spot scenarios and columns are draws, so reducing a row gives
//! the estimate for one scenario. Row kernels run in parallel with rayon;
//! each element depends only on its own inputs, so the output does not
//! depend on the thread count.

use rayon::prelude::*;

/// Dense `rows × cols` matrix of per-path values.
///
/// # Memory Layout
///
/// `data[row * cols + col]`, one contiguous block per spot scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PathMatrix {
    /// Builds a matrix by filling each row with `fill(row_index, row)`.
    pub fn from_row_fn<F>(rows: usize, cols: usize, fill: F) -> Self
    where
        F: Fn(usize, &mut [f64]) + Sync + Send,
    {
        let mut data = vec![0.0; rows * cols];
        if cols > 0 {
            data.par_chunks_mut(cols)
                .enumerate()
                .for_each(|(i, row)| fill(i, row));
        }
        Self { rows, cols, data }
    }

    /// Number of spot scenarios.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of draws per scenario.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Values for one scenario.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Element-wise map, also passing the row index.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64 + Sync + Send,
    {
        Self::from_row_fn(self.rows, self.cols, |i, out| {
            for (o, &x) in out.iter_mut().zip(self.row(i)) {
                *o = f(i, x);
            }
        })
    }

    /// Element-wise combination of two equally shaped matrices.
    pub fn zip_map<F>(&self, other: &PathMatrix, f: F) -> Self
    where
        F: Fn(usize, f64, f64) -> f64 + Sync + Send,
    {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self::from_row_fn(self.rows, self.cols, |i, out| {
            for ((o, &a), &b) in out.iter_mut().zip(self.row(i)).zip(other.row(i)) {
                *o = f(i, a, b);
            }
        })
    }

    /// Element-wise combination of three equally shaped matrices.
    pub fn zip3_map<F>(&self, second: &PathMatrix, third: &PathMatrix, f: F) -> Self
    where
        F: Fn(usize, f64, f64, f64) -> f64 + Sync + Send,
    {
        debug_assert_eq!((self.rows, self.cols), (second.rows, second.cols));
        debug_assert_eq!((self.rows, self.cols), (third.rows, third.cols));
        Self::from_row_fn(self.rows, self.cols, |i, out| {
            let rows = self.row(i).iter().zip(second.row(i)).zip(third.row(i));
            for (o, ((&a, &b), &c)) in out.iter_mut().zip(rows) {
                *o = f(i, a, b, c);
            }
        })
    }

    /// Per-row mean and population standard deviation (divisor = `cols`).
    pub fn row_mean_std(&self) -> (Vec<f64>, Vec<f64>) {
        (0..self.rows)
            .into_par_iter()
            .map(|i| mean_std(self.row(i)))
            .unzip()
    }
}

/// Two-pass mean and population standard deviation.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_row_fn_layout() {
        let m = PathMatrix::from_row_fn(2, 3, |i, row| {
            for (j, x) in row.iter_mut().enumerate() {
                *x = (10 * i + j) as f64;
            }
        });
        assert_eq!(m.row(0), &[0.0, 1.0, 2.0]);
        assert_eq!(m.row(1), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_row_mean_std_population() {
        let m = PathMatrix::from_row_fn(1, 4, |_, row| row.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]));
        let (mean, std) = m.row_mean_std();
        assert_relative_eq!(mean[0], 2.5, epsilon = 1e-15);
        // population variance of 1..4 is 1.25
        assert_relative_eq!(std[0], 1.25_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_zip_maps_pass_row_index() {
        let a = PathMatrix::from_row_fn(2, 2, |_, row| row.fill(1.0));
        let b = PathMatrix::from_row_fn(2, 2, |_, row| row.fill(2.0));
        let z = a.zip_map(&b, |i, x, y| x + y + i as f64);
        assert_eq!(z.row(0), &[3.0, 3.0]);
        assert_eq!(z.row(1), &[4.0, 4.0]);

        let z3 = a.zip3_map(&b, &b, |_, x, y, w| x - 2.0 * y + w);
        assert_eq!(z3.row(1), &[-1.0, -1.0]);
    }

    #[test]
    fn test_empty_rows() {
        let m = PathMatrix::from_row_fn(0, 5, |_, _| unreachable!());
        let (mean, std) = m.row_mean_std();
        assert!(mean.is_empty() && std.is_empty());
    }

    #[test]
    fn test_nan_propagates_to_mean() {
        let m = PathMatrix::from_row_fn(1, 3, |_, row| row.copy_from_slice(&[1.0, f64::NAN, 2.0]));
        let (mean, std) = m.row_mean_std();
        assert!(mean[0].is_nan());
        assert!(std[0].is_nan());
    }
}

// crates/gauss-core/src/spectral.rs
//
// Covariance eigen-decomposition of a set of row vectors, and the
// dispersion measure built on it:
//
//   dispersion(S) = sum_i |lambda_i(cov(S))|
//
// Covariance is the population form (divide by n), so a single point has
// zero covariance and zero dispersion.

use nalgebra::storage::Storage;
use nalgebra::{DMatrix, DVector, Dyn, Matrix, SymmetricEigen};

/// Eigenbasis (columns) and eigenvalues of a subset's covariance.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub basis: DMatrix<f64>,
    pub eigenvalues: DVector<f64>,
}

pub fn covariance<S: Storage<f64, Dyn, Dyn>>(points: &Matrix<f64, Dyn, Dyn, S>) -> DMatrix<f64> {
    let (n, d) = points.shape();
    if n == 0 {
        return DMatrix::zeros(d, d);
    }

    let mean: Vec<f64> = (0..d).map(|c| points.column(c).mean()).collect();
    let centered = DMatrix::from_fn(n, d, |r, c| points[(r, c)] - mean[c]);

    (centered.transpose() * &centered) / n as f64
}

pub fn decompose<S: Storage<f64, Dyn, Dyn>>(points: &Matrix<f64, Dyn, Dyn, S>) -> Decomposition {
    let eig = SymmetricEigen::new(covariance(points));
    Decomposition {
        basis: eig.eigenvectors,
        eigenvalues: eig.eigenvalues,
    }
}

/// Larger = more spread out, less coherent group.
pub fn dispersion<S: Storage<f64, Dyn, Dyn>>(points: &Matrix<f64, Dyn, Dyn, S>) -> f64 {
    if points.nrows() < 2 || points.ncols() == 0 {
        return 0.0;
    }
    decompose(points).eigenvalues.iter().map(|l| l.abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covariance_of_axis_aligned_points() {
        let m = DMatrix::from_row_slice(4, 2, &[-1.0, 0.0, 1.0, 0.0, 0.0, -2.0, 0.0, 2.0]);
        let c = covariance(&m);
        assert!((c[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((c[(1, 1)] - 2.0).abs() < 1e-12);
        assert!(c[(0, 1)].abs() < 1e-12);
    }

    #[test]
    fn dispersion_equals_total_variance() {
        // Covariance is PSD, so the absolute eigenvalue sum is its trace.
        let m = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.0, 1.0, 10.0, 10.0]);
        let trace = covariance(&m).trace();
        assert!((dispersion(&m) - trace).abs() < 1e-9);
    }

    #[test]
    fn singleton_and_empty_have_zero_dispersion() {
        let one = DMatrix::from_row_slice(1, 3, &[4.0, 5.0, 6.0]);
        assert_eq!(dispersion(&one), 0.0);
        let none = DMatrix::<f64>::zeros(0, 3);
        assert_eq!(dispersion(&none), 0.0);
    }

    #[test]
    fn dispersion_reads_row_views() {
        let m = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.0, 1.0, 10.0, 10.0]);
        let head = dispersion(&m.rows(0, 2));
        assert!((head - 0.25).abs() < 1e-12);
    }
}

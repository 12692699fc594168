// crates/gauss-core/src/entropy.rs
//
// Self-entropy: attention-style reduction of three same-shaped matrices
// (query, key, value) to one scalar per row.
//
//   w_i = softmax_j(k_i . q_j)          (rows x rows)
//   m_i = sum_j w_ij * v_j              (rows x cols)
//   e_i = -sum_c p_ic ln p_ic,  p_i = softmax(m_i)
//
// Permuting the rows of all three operands permutes the output the same way.
// The value is NOT scale invariant: callers pick one encoding (raw features
// for clustering, one-hot bytes for the cipher search) and stick to it.

use nalgebra::DMatrix;

use crate::error::{GaussError, Result};

/// Width of a one-hot byte row.
pub const BYTE_SYMBOLS: usize = 256;

pub fn self_entropy(q: &DMatrix<f64>, k: &DMatrix<f64>, v: &DMatrix<f64>) -> Result<Vec<f64>> {
    check_same_shape("key", k, q)?;
    check_same_shape("value", v, q)?;

    let rows = q.nrows();
    if rows == 0 {
        return Ok(Vec::new());
    }
    if q.ncols() == 0 {
        // A distribution over zero symbols carries no information.
        return Ok(vec![0.0; rows]);
    }

    let mut weights = k * q.transpose();
    softmax_rows(&mut weights);

    let mut mixed = &weights * v;
    softmax_rows(&mut mixed);

    Ok(mixed
        .row_iter()
        .map(|row| {
            -row.iter()
                .filter(|&&p| p > 0.0)
                .map(|&p| p * p.ln())
                .sum::<f64>()
        })
        .collect())
}

/// Self-entropy of a matrix against itself (query = key = value).
pub fn self_entropy_of(m: &DMatrix<f64>) -> Result<Vec<f64>> {
    self_entropy(m, m, m)
}

/// Stack equal-length rows into a `rows x dim` matrix.
pub fn stack_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<DMatrix<f64>> {
    let dim = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    let mut flat = Vec::with_capacity(rows.len() * dim);
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != dim {
            return Err(GaussError::Validation(format!(
                "ragged rows: row {} has {} features, expected {}",
                i,
                row.len(),
                dim
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(DMatrix::from_row_slice(rows.len(), dim, &flat))
}

/// One row per byte, a single 1.0 in the byte's column.
pub fn one_hot_rows(bytes: &[u8]) -> DMatrix<f64> {
    DMatrix::from_fn(bytes.len(), BYTE_SYMBOLS, |r, c| {
        if bytes[r] as usize == c {
            1.0
        } else {
            0.0
        }
    })
}

fn softmax_rows(m: &mut DMatrix<f64>) {
    for mut row in m.row_iter_mut() {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.apply(|x| *x = (*x - max).exp());
        let sum = row.sum();
        row.apply(|x| *x /= sum);
    }
}

fn check_same_shape(what: &'static str, m: &DMatrix<f64>, want: &DMatrix<f64>) -> Result<()> {
    if m.shape() != want.shape() {
        return Err(GaussError::ShapeMismatch {
            what,
            got_rows: m.nrows(),
            got_cols: m.ncols(),
            want_rows: want.nrows(),
            want_cols: want.ncols(),
        });
    }
    Ok(())
}

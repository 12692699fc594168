use gauss_core::entropy::{one_hot_rows, self_entropy, self_entropy_of};
use gauss_core::GaussError;
use nalgebra::DMatrix;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fixture() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        3,
        4,
        &[
            0.2, 1.5, -0.7, 3.0, //
            2.1, 0.0, 0.4, -1.2, //
            -0.9, 0.8, 1.1, 0.5,
        ],
    )
}

fn permute_rows(m: &DMatrix<f64>, perm: &[usize]) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |r, c| m[(perm[r], c)])
}

#[test]
fn permuting_rows_permutes_output() {
    let m = fixture();
    let base = self_entropy_of(&m).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for _ in 0..6 {
        let mut perm: Vec<usize> = (0..m.nrows()).collect();
        perm.shuffle(&mut rng);

        let p = permute_rows(&m, &perm);
        let got = self_entropy(&p, &p, &p).unwrap();
        for (r, &src) in perm.iter().enumerate() {
            assert!(
                (got[r] - base[src]).abs() < 1e-12,
                "row {} (from {}): {} vs {}",
                r,
                src,
                got[r],
                base[src]
            );
        }
    }
}

#[test]
fn unequal_shapes_are_a_shape_mismatch() {
    let q = fixture();
    let k = DMatrix::from_element(3, 3, 1.0);
    let err = self_entropy(&q, &k, &q).unwrap_err();
    assert!(matches!(err, GaussError::ShapeMismatch { what: "key", .. }));

    let v = DMatrix::from_element(2, 4, 1.0);
    let err = self_entropy(&q, &q, &v).unwrap_err();
    assert!(matches!(err, GaussError::ShapeMismatch { what: "value", .. }));
}

#[test]
fn entropy_is_bounded_by_log_width() {
    let m = one_hot_rows(b"the quick brown fox");
    let e = self_entropy_of(&m).unwrap();
    assert_eq!(e.len(), 19);
    for v in e {
        assert!(v > 0.0 && v <= 256f64.ln() + 1e-12);
    }
}

#[test]
fn scale_changes_the_result() {
    let m = fixture();
    let scaled = &m * 10.0;
    assert_ne!(self_entropy_of(&m).unwrap(), self_entropy_of(&scaled).unwrap());
}

#[test]
fn empty_matrix_gives_empty_output() {
    let m = DMatrix::<f64>::zeros(0, 4);
    assert!(self_entropy_of(&m).unwrap().is_empty());
}

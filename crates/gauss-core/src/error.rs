use thiserror::Error;

pub type Result<T> = std::result::Result<T, GaussError>;

#[derive(Debug, Error)]
pub enum GaussError {
    #[error("insufficient data: need at least 2 points to split, got {len}")]
    InsufficientData { len: usize },

    #[error("shape mismatch: {what} is {got_rows}x{got_cols}, expected {want_rows}x{want_cols}")]
    ShapeMismatch {
        what: &'static str,
        got_rows: usize,
        got_cols: usize,
        want_rows: usize,
        want_cols: usize,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

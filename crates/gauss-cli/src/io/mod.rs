// crates/gauss-cli/src/io/mod.rs

pub mod dataset;
pub mod text;

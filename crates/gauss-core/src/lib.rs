pub mod error;

pub mod config;
pub mod entropy;
pub mod fingerprint;
pub mod spectral;

pub mod cipher;
pub mod factor;
pub mod optimizer;
pub mod partition;
pub mod search;
pub mod stats;

pub use crate::config::RunMode;
pub use crate::error::{GaussError, Result};
pub use crate::partition::{best_split, recursive_partition, Point, PointSet, Split};
pub use crate::search::{run_search, SearchOutcome};

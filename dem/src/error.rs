use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid HGT name {0}")]
    HgtName(PathBuf),

    #[error("invalid HGT file len {0} for {1}")]
    HgtLen(u64, PathBuf),

    #[error("grid of {rows}x{cols} needs {expected} samples, got {actual}")]
    Dimensions {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("pixel size {actual:?} does not match mosaic pixel size {expected:?}")]
    ResolutionMismatch {
        expected: (f64, f64),
        actual: (f64, f64),
    },

    #[error("grid origin {0:?} is not aligned to the mosaic pixel grid")]
    Misaligned((f64, f64)),

    #[error("nothing to merge")]
    EmptyMerge,
}

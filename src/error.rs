//! Tessella-specific errors
//!
//! There are a few linear algebra errors and some related to shard integrity.
use thiserror::Error;

/// An error that Tessella could end up producing.
///
/// There are a few families of errors:
/// - related to _linear algebra_ over GF(2^8)
/// - related to the Reed-Solomon codec itself
/// - related to verifying shards and reconstructed content
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TessellaError {
    #[error("expected rows to be of same length {expected}, found {found} at row {row}")]
    InvalidMatrixElements {
        expected: usize,
        found: usize,
        row: usize,
    },
    /// `{0}` and `{1}` are the shape of the rectangular matrix.
    #[error("matrix is not a square, ({0} x {1})")]
    NonSquareMatrix(usize, usize),
    /// `{0}` is the column where no nonzero pivot could be found.
    #[error("matrix is singular, no nonzero pivot in column {0}")]
    SingularMatrix(usize),
    #[error("matrices don't have compatible shapes: {left:?} and {right:?}")]
    IncompatibleMatrixShapes {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// `{got}` is the actual number of shards and `{needed}` the minimum.
    #[error("expected at least {needed} shards, got {got}")]
    InsufficientShards { needed: usize, got: usize },
    #[error("shards have inconsistent sizes at index {index}: {left} vs {right}")]
    IncompatibleShards {
        index: u32,
        left: usize,
        right: usize,
    },
    /// A shard index outside `0..data_shards + parity_shards`.
    #[error("shard index {index} out of range, codec produces {total} shards")]
    InvalidShardIndex { index: u32, total: u32 },
    /// A supplied shard whose digest does not match its descriptor entry.
    #[error("shard {index} digest does not match its descriptor entry")]
    ShardIntegrity { index: u32 },
    /// The reconstructed content failed the end-to-end digest gate.
    #[error("reconstructed content digest does not match the original")]
    ContentIntegrity,
    #[error("invalid codec configuration: {0}")]
    InvalidConfiguration(String),
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
    /// `{0}` is a custom error message.
    #[error("invalid field operation: {0}")]
    InvalidOperation(String),
}

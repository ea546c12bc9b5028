use thiserror::Error;

/// Errors from the fixed-size record surface.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A record tree was created with a record size of zero bytes.
    #[error("record size must be at least one byte")]
    ZeroRecordSize,

    /// A record slice does not have the tree's record size.
    #[error("record is {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// The tree's record size.
        expected: usize,
        /// Length of the rejected record.
        actual: usize,
    },
}

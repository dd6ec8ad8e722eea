//! Error types for reading workflow definitions.
//!
//! - [`ReadError`]: failures raised while reading raw definition data. They
//!   never abort a load; they become the causes of
//!   [`LoadException`](crate::load::LoadException)s.

pub mod read_error;

pub use read_error::ReadError;

/// Convenience alias for reader-level results.
pub type ReadResult<T> = Result<T, ReadError>;

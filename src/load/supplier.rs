//! Fallible value suppliers.

/// A zero-argument computation that yields a `T` or fails with a cause.
///
/// Any `FnOnce() -> Result<T, E>` is a supplier as long as `E` converts into
/// [`anyhow::Error`]; readers usually return [`ReadError`](crate::ReadError).
pub trait FallibleSupplier<T> {
    fn get(self) -> anyhow::Result<T>;
}

impl<T, E, F> FallibleSupplier<T> for F
where
    F: FnOnce() -> Result<T, E>,
    E: Into<anyhow::Error>,
{
    fn get(self) -> anyhow::Result<T> {
        self().map_err(Into::into)
    }
}

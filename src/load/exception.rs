//! Leaf-level load faults.

use std::fmt;
use std::sync::Arc;

/// One supply failure.
///
/// The cause is shared, so cloning a `LoadException` (which happens whenever
/// an instance carrying it is cloned or re-wrapped) is cheap. Faults that an
/// exception replaced at the same tree position are kept as `suppressed`.
#[derive(Clone)]
pub struct LoadException {
    cause: Arc<anyhow::Error>,
    suppressed: Vec<LoadException>,
}

impl LoadException {
    pub fn new(cause: impl Into<anyhow::Error>) -> Self {
        Self {
            cause: Arc::new(cause.into()),
            suppressed: Vec::new(),
        }
    }

    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }

    /// The cause as a concrete error type, if it is one.
    pub fn downcast_cause<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.cause.downcast_ref::<E>()
    }

    /// Earlier faults recorded at the same position, oldest first.
    pub fn suppressed(&self) -> &[LoadException] {
        &self.suppressed
    }

    pub(crate) fn with_suppressed(mut self, earlier: LoadException) -> Self {
        self.suppressed.push(earlier);
        self
    }
}

impl fmt::Debug for LoadException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadException")
            .field("cause", &format_args!("{:#}", self.cause))
            .field("suppressed", &self.suppressed)
            .finish()
    }
}

impl fmt::Display for LoadException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.cause)
    }
}

impl std::error::Error for LoadException {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&**self.cause)
    }
}

//! The "may carry faults" capability.

use std::sync::Arc;

use super::exception::LoadException;
use super::tree::ExceptionNode;

/// Values that may carry their own exception tree.
///
/// Builders use this to detect whether a supplied child was itself built
/// faultily, and to wrap defaults with a fresh fault. Plain values carry no
/// provenance: their faults live only in the enclosing entity's tree.
pub trait LoadExceptionTreeProvider: Sized {
    fn exception_node(&self) -> Option<&Arc<ExceptionNode>> {
        None
    }

    fn has_exceptions(&self) -> bool {
        self.exception_node().is_some_and(|node| node.has_exceptions())
    }

    /// A copy of `self` whose tree additionally records `fault` at its root.
    fn with_load_exception(self, fault: LoadException) -> Self {
        let _ = fault;
        self
    }
}

macro_rules! plain_values {
    ($($ty:ty),+ $(,)?) => {
        $(impl LoadExceptionTreeProvider for $ty {})+
    };
}

plain_values!(bool, i32, i64, u32, u64, usize, String);

impl<T: LoadExceptionTreeProvider> LoadExceptionTreeProvider for Option<T> {
    fn exception_node(&self) -> Option<&Arc<ExceptionNode>> {
        self.as_ref().and_then(|value| value.exception_node())
    }

    fn with_load_exception(self, fault: LoadException) -> Self {
        self.map(|value| value.with_load_exception(fault))
    }
}

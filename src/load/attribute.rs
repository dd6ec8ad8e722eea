//! Scalar and nested-entity attribute slots.

use std::sync::Arc;

use super::exception::LoadException;
use super::provenance::ExceptionCollector;
use super::provider::LoadExceptionTreeProvider;
use super::supplier::FallibleSupplier;
use super::tree::{ExceptionNode, TreeKey};

/// Pending value of one attribute plus the fault recorded for it.
#[derive(Debug)]
pub struct Attribute<K, T> {
    key: K,
    value: T,
    fault: Option<Arc<ExceptionNode>>,
}

impl<K: TreeKey, T: LoadExceptionTreeProvider> Attribute<K, T> {
    /// A slot holding the schema default until a setter runs.
    pub fn new(key: K, default: T) -> Self {
        Self {
            key,
            value: default,
            fault: None,
        }
    }

    /// Stores `value`, replacing any earlier fault with the value's own tree.
    pub fn set(&mut self, value: T) {
        self.fault = value.exception_node().cloned();
        self.value = value;
    }

    /// Stores the supplied value, or `default` if supply fails.
    ///
    /// A failure records a new fault for this attribute, merged with the
    /// default's own tree when the default is itself faulty. A fault already
    /// recorded here is kept as suppressed by the new one.
    pub fn supply(&mut self, supplier: impl FallibleSupplier<T>, default: T) {
        match supplier.get() {
            Ok(value) => self.set(value),
            Err(cause) => {
                let mut fault = LoadException::new(cause);
                let earlier = self.fault.as_ref().and_then(|node| node.supply_exception());
                if let Some(earlier) = earlier {
                    fault = fault.with_suppressed(earlier.clone());
                }
                tracing::debug!(
                    attribute = %self.key.segment(),
                    error = %fault,
                    "attribute supply failed, using default"
                );
                self.fault = Some(ExceptionNode::merge(default.exception_node(), fault));
                self.value = default;
            }
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Hands the fault to `faults` and yields the final value.
    pub fn finish(self, faults: &mut ExceptionCollector<K>) -> T {
        faults.record(&self.key, self.fault);
        self.value
    }
}

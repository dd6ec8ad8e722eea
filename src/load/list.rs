//! Ordered-list attribute slots.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::exception::LoadException;
use super::provenance::ExceptionCollector;
use super::provider::LoadExceptionTreeProvider;
use super::supplier::FallibleSupplier;
use super::tree::{ExceptionNode, PathSegment, TreeKey};

/// Pending content of one list attribute.
///
/// The built list is the last bulk list followed by every individually added
/// element in append order. Faults of added elements are indexed by the
/// offset they end up at in that built list.
#[derive(Debug)]
pub struct ListAttribute<K, T> {
    key: K,
    bulk: Vec<T>,
    bulk_fault: Option<LoadException>,
    added: Vec<T>,
    added_faults: Vec<(usize, Arc<ExceptionNode>)>,
}

impl<K: TreeKey, T: LoadExceptionTreeProvider> ListAttribute<K, T> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            bulk: Vec::new(),
            bulk_fault: None,
            added: Vec::new(),
            added_faults: Vec::new(),
        }
    }

    /// Replaces the bulk elements. Added elements are untouched.
    pub fn set(&mut self, values: Vec<T>) {
        self.bulk = values;
        self.bulk_fault = None;
    }

    /// Replaces the bulk elements with the supplied list; on failure the bulk
    /// part is empty and the whole list is marked faulty. An earlier bulk
    /// fault is kept as suppressed by the new one.
    pub fn supply(&mut self, supplier: impl FallibleSupplier<Vec<T>>) {
        match supplier.get() {
            Ok(values) => self.set(values),
            Err(cause) => {
                let mut fault = LoadException::new(cause);
                if let Some(earlier) = self.bulk_fault.take() {
                    fault = fault.with_suppressed(earlier);
                }
                tracing::debug!(
                    attribute = %self.key.segment(),
                    error = %fault,
                    "list supply failed, using empty list"
                );
                self.bulk = Vec::new();
                self.bulk_fault = Some(fault);
            }
        }
    }

    pub fn add(&mut self, value: T) {
        if let Some(node) = value.exception_node().filter(|node| node.has_exceptions()) {
            self.added_faults.push((self.added.len(), Arc::clone(node)));
        }
        self.added.push(value);
    }

    /// Appends the supplied element, or a faulty copy of `default`.
    pub fn add_supplied(&mut self, supplier: impl FallibleSupplier<T>, default: T) {
        match supplier.get() {
            Ok(value) => self.add(value),
            Err(cause) => {
                let fault = LoadException::new(cause);
                tracing::debug!(
                    attribute = %self.key.segment(),
                    position = self.added.len(),
                    error = %fault,
                    "list element supply failed, using default"
                );
                let value = default.with_load_exception(fault.clone());
                let node = value
                    .exception_node()
                    .cloned()
                    .unwrap_or_else(|| Arc::new(ExceptionNode::leaf(fault)));
                self.added_faults.push((self.added.len(), node));
                self.added.push(value);
            }
        }
    }

    /// Number of elements the built list will have.
    pub fn len(&self) -> usize {
        self.bulk.len() + self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self, faults: &mut ExceptionCollector<K>) -> Vec<T> {
        let offset = self.bulk.len();
        let mut children: BTreeMap<PathSegment, Arc<ExceptionNode>> = self
            .bulk
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let node = value.exception_node().filter(|node| node.has_exceptions())?;
                Some((PathSegment::Index(index), Arc::clone(node)))
            })
            .collect();
        for (position, node) in self.added_faults {
            children.insert(PathSegment::Index(offset + position), node);
        }
        faults.record(&self.key, ExceptionNode::container(self.bulk_fault, children));

        let mut values = self.bulk;
        values.extend(self.added);
        values
    }
}

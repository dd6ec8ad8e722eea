//! Per-instance fault records.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use super::exception::LoadException;
use super::tree::{ExceptionNode, LoadExceptionTree, PathSegment, TreeKey};

/// The exception tree of one entity instance, keyed by its attribute enum.
///
/// Provenance is metadata, not data: every two provenances compare equal and
/// hash to nothing, so entities deriving `PartialEq`/`Hash` compare values
/// only.
pub struct Provenance<K> {
    tree: Option<LoadExceptionTree<K>>,
}

impl<K> Provenance<K> {
    pub fn tree(&self) -> Option<&LoadExceptionTree<K>> {
        self.tree.as_ref()
    }

    pub fn node(&self) -> Option<&Arc<ExceptionNode>> {
        self.tree.as_ref().map(LoadExceptionTree::node)
    }

    pub fn has_exceptions(&self) -> bool {
        self.tree.as_ref().is_some_and(LoadExceptionTree::has_exceptions)
    }

    /// Adds a root-level fault, keeping everything already recorded.
    pub fn with_exception(self, fault: LoadException) -> Self {
        Self {
            tree: Some(LoadExceptionTree::tree(self.tree.as_ref(), fault)),
        }
    }
}

impl<K: TreeKey> Provenance<K> {
    pub fn exception_tree<C>(&self, key: &K) -> Option<LoadExceptionTree<C>> {
        self.tree.as_ref()?.exception_tree(key)
    }

    pub fn supply_exception(&self, key: &K) -> Option<&LoadException> {
        self.tree.as_ref()?.child_supply_exception(key)
    }
}

impl<K> Default for Provenance<K> {
    fn default() -> Self {
        Self { tree: None }
    }
}

impl<K> Clone for Provenance<K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K> fmt::Debug for Provenance<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tree {
            Some(tree) => write!(f, "Provenance({} faults)", tree.faults().len()),
            None => f.write_str("Provenance(clean)"),
        }
    }
}

impl<K> PartialEq for Provenance<K> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<K> Eq for Provenance<K> {}

impl<K> Hash for Provenance<K> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

/// Gathers attribute trees while an entity is built.
pub struct ExceptionCollector<K> {
    children: BTreeMap<PathSegment, Arc<ExceptionNode>>,
    _key: PhantomData<fn(&K)>,
}

impl<K: TreeKey> ExceptionCollector<K> {
    pub fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            _key: PhantomData,
        }
    }

    /// Records `node` against `key`; empty or absent trees are skipped.
    pub fn record(&mut self, key: &K, node: Option<Arc<ExceptionNode>>) {
        match node {
            Some(node) if node.has_exceptions() => {
                self.children.insert(key.segment(), node);
            }
            _ => {
                self.children.remove(&key.segment());
            }
        }
    }

    pub fn finish(self) -> Provenance<K> {
        let tree = ExceptionNode::container(None, self.children).map(LoadExceptionTree::from_node);
        Provenance { tree }
    }
}

impl<K: TreeKey> Default for ExceptionCollector<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(message: &'static str) -> LoadException {
        LoadException::new(anyhow::anyhow!(message))
    }

    #[test]
    fn test_collector_without_records_is_clean() {
        let provenance = ExceptionCollector::<usize>::new().finish();
        assert!(provenance.tree().is_none());
        assert!(!provenance.has_exceptions());
    }

    #[test]
    fn test_collector_skips_empty_nodes() {
        let mut collector = ExceptionCollector::<usize>::new();
        collector.record(&0, Some(Arc::new(ExceptionNode::default())));
        collector.record(&1, None);
        assert!(collector.finish().tree().is_none());
    }

    #[test]
    fn test_collector_records_leaf() {
        let mut collector = ExceptionCollector::<usize>::new();
        collector.record(&3, Some(Arc::new(ExceptionNode::leaf(fault("x")))));
        let provenance = collector.finish();
        assert!(provenance.has_exceptions());
        assert_eq!(provenance.supply_exception(&3).unwrap().to_string(), "x");
        assert!(provenance.supply_exception(&0).is_none());
    }

    #[test]
    fn test_with_exception_on_clean_provenance() {
        let provenance = Provenance::<usize>::default().with_exception(fault("outer"));
        let tree = provenance.tree().unwrap();
        assert_eq!(tree.supply_exception().unwrap().to_string(), "outer");
    }

    #[test]
    fn test_with_exception_keeps_children() {
        let mut collector = ExceptionCollector::<usize>::new();
        collector.record(&0, Some(Arc::new(ExceptionNode::leaf(fault("inner")))));
        let provenance = collector.finish().with_exception(fault("outer"));
        assert_eq!(provenance.supply_exception(&0).unwrap().to_string(), "inner");
        assert_eq!(
            provenance.tree().unwrap().supply_exception().unwrap().to_string(),
            "outer"
        );
    }

    #[test]
    fn test_provenances_always_equal() {
        let clean = Provenance::<usize>::default();
        let faulty = Provenance::<usize>::default().with_exception(fault("x"));
        assert_eq!(clean, faulty);
    }
}

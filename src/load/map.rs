//! Keyed map attribute slots.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::exception::LoadException;
use super::provenance::ExceptionCollector;
use super::provider::LoadExceptionTreeProvider;
use super::supplier::FallibleSupplier;
use super::tree::{ExceptionNode, PathSegment, TreeKey};

/// Pending content of one map attribute.
///
/// Individually put entries win over bulk entries with the same key; a later
/// put of a key replaces the value of an earlier put. A later failed put
/// keeps the earlier fault of that key as suppressed, a clean put clears it.
#[derive(Debug)]
pub struct MapAttribute<K, M, T> {
    key: K,
    bulk: BTreeMap<M, T>,
    bulk_fault: Option<LoadException>,
    put: BTreeMap<M, T>,
    put_faults: BTreeMap<M, Arc<ExceptionNode>>,
}

impl<K, M, T> MapAttribute<K, M, T>
where
    K: TreeKey,
    M: TreeKey + Ord + Clone,
    T: LoadExceptionTreeProvider,
{
    pub fn new(key: K) -> Self {
        Self {
            key,
            bulk: BTreeMap::new(),
            bulk_fault: None,
            put: BTreeMap::new(),
            put_faults: BTreeMap::new(),
        }
    }

    /// Replaces the bulk entries. Individually put entries are untouched.
    pub fn set(&mut self, entries: BTreeMap<M, T>) {
        self.bulk = entries;
        self.bulk_fault = None;
    }

    pub fn supply(&mut self, supplier: impl FallibleSupplier<BTreeMap<M, T>>) {
        match supplier.get() {
            Ok(entries) => self.set(entries),
            Err(cause) => {
                let mut fault = LoadException::new(cause);
                if let Some(earlier) = self.bulk_fault.take() {
                    fault = fault.with_suppressed(earlier);
                }
                tracing::debug!(
                    attribute = %self.key.segment(),
                    error = %fault,
                    "map supply failed, using empty map"
                );
                self.bulk = BTreeMap::new();
                self.bulk_fault = Some(fault);
            }
        }
    }

    pub fn put(&mut self, key: M, value: T) {
        match value.exception_node().filter(|node| node.has_exceptions()) {
            Some(node) => {
                self.put_faults.insert(key.clone(), Arc::clone(node));
            }
            None => {
                self.put_faults.remove(&key);
            }
        }
        self.put.insert(key, value);
    }

    /// Puts the supplied entry, or a faulty copy of `default`.
    pub fn put_supplied(&mut self, key: M, supplier: impl FallibleSupplier<T>, default: T) {
        match supplier.get() {
            Ok(value) => self.put(key, value),
            Err(cause) => {
                let mut fault = LoadException::new(cause);
                let earlier = self.put_faults.get(&key).and_then(|node| node.supply_exception());
                if let Some(earlier) = earlier {
                    fault = fault.with_suppressed(earlier.clone());
                }
                tracing::debug!(
                    attribute = %self.key.segment(),
                    entry = %key.segment(),
                    error = %fault,
                    "map entry supply failed, using default"
                );
                let value = default.with_load_exception(fault.clone());
                let node = value
                    .exception_node()
                    .cloned()
                    .unwrap_or_else(|| Arc::new(ExceptionNode::leaf(fault)));
                self.put_faults.insert(key.clone(), node);
                self.put.insert(key, value);
            }
        }
    }

    pub fn finish(self, faults: &mut ExceptionCollector<K>) -> BTreeMap<M, T> {
        let mut children: BTreeMap<PathSegment, Arc<ExceptionNode>> = self
            .bulk
            .iter()
            .filter(|(key, _)| !self.put.contains_key(*key))
            .filter_map(|(key, value)| {
                let node = value.exception_node().filter(|node| node.has_exceptions())?;
                Some((key.segment(), Arc::clone(node)))
            })
            .collect();
        for (key, node) in self.put_faults {
            children.insert(key.segment(), node);
        }
        faults.record(&self.key, ExceptionNode::container(self.bulk_fault, children));

        let mut entries = self.bulk;
        entries.extend(self.put);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{LoadExceptionTree, Provenance};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
    #[strum(serialize_all = "snake_case")]
    enum Key {
        Limits,
    }
    crate::attribute_key!(Key);

    type Limits = MapAttribute<Key, String, i32>;

    fn finish(map: Limits) -> (BTreeMap<String, i32>, Provenance<Key>) {
        let mut faults = ExceptionCollector::new();
        let entries = map.finish(&mut faults);
        (entries, faults.finish())
    }

    #[test]
    fn test_put_overrides_bulk() {
        let mut map = Limits::new(Key::Limits);
        map.put("x".into(), 2);
        map.set(BTreeMap::from([("x".to_string(), 1), ("y".to_string(), 3)]));
        let (entries, provenance) = finish(map);
        assert_eq!(entries["x"], 2);
        assert_eq!(entries["y"], 3);
        assert!(!provenance.has_exceptions());
    }

    #[test]
    fn test_failed_put_records_key() {
        let mut map = Limits::new(Key::Limits);
        map.put_supplied("z".into(), || Err::<i32, _>(anyhow::anyhow!("nan")), -1);
        let (entries, provenance) = finish(map);
        assert_eq!(entries["z"], -1);
        let tree: LoadExceptionTree<String> = provenance.exception_tree(&Key::Limits).unwrap();
        assert!(tree.child_supply_exception(&"z".to_string()).is_some());
    }

    #[test]
    fn test_later_put_clears_fault() {
        let mut map = Limits::new(Key::Limits);
        map.put_supplied("z".into(), || Err::<i32, _>(anyhow::anyhow!("nan")), -1);
        map.put("z".into(), 4);
        let (entries, provenance) = finish(map);
        assert_eq!(entries["z"], 4);
        assert!(!provenance.has_exceptions());
    }

    #[test]
    fn test_failed_bulk_supply_is_map_level_fault() {
        let mut map = Limits::new(Key::Limits);
        map.supply(|| Err::<BTreeMap<String, i32>, _>(anyhow::anyhow!("not a map")));
        map.put("a".into(), 1);
        let (entries, provenance) = finish(map);
        assert_eq!(entries.len(), 1);
        let tree: LoadExceptionTree<String> = provenance.exception_tree(&Key::Limits).unwrap();
        assert_eq!(tree.supply_exception().unwrap().to_string(), "not a map");
    }

    #[test]
    fn test_second_failed_put_keeps_first_as_suppressed() {
        let mut map = Limits::new(Key::Limits);
        map.put_supplied("z".into(), || Err::<i32, _>(anyhow::anyhow!("first")), -1);
        map.put_supplied("z".into(), || Err::<i32, _>(anyhow::anyhow!("second")), -2);
        let (entries, provenance) = finish(map);
        assert_eq!(entries["z"], -2);
        let tree: LoadExceptionTree<String> = provenance.exception_tree(&Key::Limits).unwrap();
        let fault = tree.child_supply_exception(&"z".to_string()).unwrap();
        assert_eq!(fault.to_string(), "second");
        assert_eq!(fault.suppressed()[0].to_string(), "first");
    }

    #[test]
    fn test_second_failed_bulk_supply_keeps_first_as_suppressed() {
        let mut map = Limits::new(Key::Limits);
        map.supply(|| Err::<BTreeMap<String, i32>, _>(anyhow::anyhow!("first")));
        map.supply(|| Err::<BTreeMap<String, i32>, _>(anyhow::anyhow!("second")));
        let (_, provenance) = finish(map);
        let tree: LoadExceptionTree<String> = provenance.exception_tree(&Key::Limits).unwrap();
        let fault = tree.supply_exception().unwrap();
        assert_eq!(fault.to_string(), "second");
        assert_eq!(fault.suppressed().len(), 1);
    }
}

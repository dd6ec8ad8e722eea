//! Exception trees: keyed, recursive records of load faults.
//!
//! An [`ExceptionNode`] mirrors one position of the data tree. It holds an
//! optional node-level fault (the position itself could not be supplied) and
//! the non-empty trees of its children, keyed by [`PathSegment`].
//! [`LoadExceptionTree<K>`] is a typed view over a node whose children are
//! addressed by `K` (an attribute enum, a list index or a map key).

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::exception::LoadException;

/// One step from a tree position to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// An entity attribute, by its stable snake_case name.
    Attribute(&'static str),
    /// A list element, by its offset in the built list.
    Index(usize),
    /// A map entry, by its key. Rendered quoted, so `["0"]` never reads as `[0]`.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Attribute(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

/// A typed key that addresses the children of one tree position.
pub trait TreeKey {
    fn segment(&self) -> PathSegment;
}

impl TreeKey for usize {
    fn segment(&self) -> PathSegment {
        PathSegment::Index(*self)
    }
}

impl TreeKey for String {
    fn segment(&self) -> PathSegment {
        PathSegment::Key(self.clone())
    }
}

/// Location of a fault, from the root of the tree it was collected from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPath(Vec<PathSegment>);

impl FaultPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn child(&self, segment: &PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.clone());
        Self(segments)
    }
}

impl fmt::Display for FaultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Attribute(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Untyped exception tree node.
#[derive(Debug, Clone, Default)]
pub struct ExceptionNode {
    supply: Option<LoadException>,
    children: BTreeMap<PathSegment, Arc<ExceptionNode>>,
}

impl ExceptionNode {
    pub fn leaf(fault: LoadException) -> Self {
        Self {
            supply: Some(fault),
            children: BTreeMap::new(),
        }
    }

    /// A container position: an optional whole-container fault plus the
    /// faults of individual elements. `None` when there is nothing to record.
    pub(crate) fn container(
        supply: Option<LoadException>,
        children: BTreeMap<PathSegment, Arc<ExceptionNode>>,
    ) -> Option<Arc<Self>> {
        let node = Self { supply, children };
        (!node.is_empty()).then(|| Arc::new(node))
    }

    /// Combines a pre-existing child tree with a new node-level fault.
    ///
    /// An empty child yields a plain leaf. Otherwise the child's children are
    /// kept and the new fault takes the supply slot; a supply fault already in
    /// that slot is kept as suppressed by the new one.
    pub fn merge(child: Option<&Arc<ExceptionNode>>, fault: LoadException) -> Arc<Self> {
        match child.filter(|node| !node.is_empty()) {
            None => Arc::new(Self::leaf(fault)),
            Some(previous) => {
                let fault = match &previous.supply {
                    Some(earlier) => fault.with_suppressed(earlier.clone()),
                    None => fault,
                };
                Arc::new(Self {
                    supply: Some(fault),
                    children: previous.children.clone(),
                })
            }
        }
    }

    /// True if this position records no fault at any depth.
    pub fn is_empty(&self) -> bool {
        self.supply.is_none() && self.children.values().all(|child| child.is_empty())
    }

    pub fn has_exceptions(&self) -> bool {
        !self.is_empty()
    }

    /// The fault of this position itself, as opposed to its children.
    pub fn supply_exception(&self) -> Option<&LoadException> {
        self.supply.as_ref()
    }

    /// Descends one level. Empty children are treated as absent.
    pub fn child(&self, segment: &PathSegment) -> Option<&Arc<ExceptionNode>> {
        self.children.get(segment).filter(|child| !child.is_empty())
    }

    /// Descends along `path`; an empty path returns this node.
    pub fn lookup(&self, path: &[PathSegment]) -> Option<&ExceptionNode> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment).map(|child| &**child))
    }

    pub fn children(&self) -> impl Iterator<Item = (&PathSegment, &Arc<ExceptionNode>)> {
        self.children.iter().filter(|(_, child)| !child.is_empty())
    }

    /// Every recorded fault below (and at) this node, depth first.
    pub fn faults(&self) -> Vec<(FaultPath, &LoadException)> {
        let mut faults = Vec::new();
        self.collect_faults(FaultPath::default(), &mut faults);
        faults
    }

    fn collect_faults<'a>(&'a self, path: FaultPath, out: &mut Vec<(FaultPath, &'a LoadException)>) {
        if let Some(fault) = &self.supply {
            out.push((path.clone(), fault));
        }
        for (segment, child) in self.children() {
            child.collect_faults(path.child(segment), out);
        }
    }
}

/// Typed view over an [`ExceptionNode`] whose children are keyed by `K`.
pub struct LoadExceptionTree<K> {
    node: Arc<ExceptionNode>,
    _key: PhantomData<fn(&K)>,
}

impl<K> LoadExceptionTree<K> {
    pub fn from_node(node: Arc<ExceptionNode>) -> Self {
        Self {
            node,
            _key: PhantomData,
        }
    }

    pub fn leaf(fault: LoadException) -> Self {
        Self::from_node(Arc::new(ExceptionNode::leaf(fault)))
    }

    /// Merges an existing tree with a new node-level fault; see
    /// [`ExceptionNode::merge`].
    pub fn tree(child: Option<&LoadExceptionTree<K>>, fault: LoadException) -> Self {
        Self::from_node(ExceptionNode::merge(child.map(|tree| &tree.node), fault))
    }

    pub fn node(&self) -> &Arc<ExceptionNode> {
        &self.node
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    pub fn has_exceptions(&self) -> bool {
        self.node.has_exceptions()
    }

    pub fn supply_exception(&self) -> Option<&LoadException> {
        self.node.supply_exception()
    }

    pub fn faults(&self) -> Vec<(FaultPath, &LoadException)> {
        self.node.faults()
    }
}

impl<K: TreeKey> LoadExceptionTree<K> {
    /// The tree recorded for `key`, viewed with the child's own key type.
    pub fn exception_tree<C>(&self, key: &K) -> Option<LoadExceptionTree<C>> {
        self.node
            .child(&key.segment())
            .map(|child| LoadExceptionTree::from_node(Arc::clone(child)))
    }

    /// True if anything was recorded for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.node.child(&key.segment()).is_some()
    }

    /// The node-level fault recorded for `key`.
    pub fn child_supply_exception(&self, key: &K) -> Option<&LoadException> {
        self.node.child(&key.segment())?.supply_exception()
    }

    /// Keys with recorded faults, as path segments.
    pub fn exceptional_segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.node.children().map(|(segment, _)| segment)
    }
}

impl<K> Clone for LoadExceptionTree<K> {
    fn clone(&self) -> Self {
        Self::from_node(Arc::clone(&self.node))
    }
}

impl<K> fmt::Debug for LoadExceptionTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoadExceptionTree").field(&self.node).finish()
    }
}

impl<K> From<LoadException> for LoadExceptionTree<K> {
    fn from(fault: LoadException) -> Self {
        Self::leaf(fault)
    }
}

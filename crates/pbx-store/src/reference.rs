use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphInner, ObjectGraph};
use crate::objects::GraphObject;

/// Prefix of every temporary reference value.
pub const TEMPORARY_PREFIX: &str = "TEMP_";

/// Opaque handle to an object in an [`ObjectGraph`].
///
/// Clones share state: fixing a reference updates every edge holding a
/// clone of it. Equality, hashing, and ordering use the current value only.
/// The link back to the graph is weak, so a reference never keeps its graph
/// alive.
///
/// Because the value changes when the reference is fixed, a reference used
/// as a `HashSet` or `HashMap` key (or in any ordered collection) must not
/// be fixed while it is stored there. Key such collections by
/// [`value`](Self::value) instead.
#[derive(Clone)]
pub struct ObjectReference {
    inner: Arc<ReferenceInner>,
}

struct ReferenceInner {
    state: RwLock<ReferenceState>,
    graph: RwLock<Weak<GraphInner>>,
}

struct ReferenceState {
    value: String,
    temporary: bool,
}

impl ObjectReference {
    /// A new temporary reference with a unique placeholder value.
    pub fn temporary() -> Self {
        let id = uuid::Uuid::now_v7().simple().to_string().to_ascii_uppercase();
        Self::with_state(format!("{TEMPORARY_PREFIX}{id}"), true)
    }

    /// A permanent reference with a known value.
    pub fn permanent(value: impl Into<String>) -> Self {
        Self::with_state(value.into(), false)
    }

    fn with_state(value: String, temporary: bool) -> Self {
        Self {
            inner: Arc::new(ReferenceInner {
                state: RwLock::new(ReferenceState { value, temporary }),
                graph: RwLock::new(Weak::new()),
            }),
        }
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.inner.state.read().value.clone()
    }

    pub fn is_temporary(&self) -> bool {
        self.inner.state.read().temporary
    }

    /// Returns `true` when both handles share state.
    pub fn ptr_eq(&self, other: &ObjectReference) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The graph this reference is attached to.
    pub fn graph(&self) -> GraphResult<ObjectGraph> {
        self.inner
            .graph
            .read()
            .upgrade()
            .map(ObjectGraph::from_inner)
            .ok_or(GraphError::ReleasedGraph)
    }

    /// Returns `true` while the owning graph is alive.
    pub fn is_attached(&self) -> bool {
        self.inner.graph.read().strong_count() > 0
    }

    /// Dereference into a typed copy of the target object.
    pub fn object<T: GraphObject>(&self) -> GraphResult<T> {
        self.graph()?.resolve(self)
    }

    /// Replace the value with a permanent one, re-indexing the owning graph
    /// when attached.
    pub fn fix(&self, value: impl Into<String>) -> GraphResult<()> {
        match self.graph() {
            Ok(graph) => graph.fix(self, value),
            Err(_) => {
                self.set_value(value.into(), false);
                Ok(())
            }
        }
    }

    pub(crate) fn set_value(&self, value: String, temporary: bool) {
        let mut state = self.inner.state.write();
        state.value = value;
        state.temporary = temporary;
    }

    pub(crate) fn mark_temporary(&self) {
        self.inner.state.write().temporary = true;
    }

    pub(crate) fn attach(&self, graph: &Arc<GraphInner>) {
        *self.inner.graph.write() = Arc::downgrade(graph);
    }
}

impl PartialEq for ObjectReference {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.value() == other.value()
    }
}

impl Eq for ObjectReference {}

impl Hash for ObjectReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.state.read().value.hash(state);
    }
}

impl PartialOrd for ObjectReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectReference {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.value().cmp(&other.value())
    }
}

impl fmt::Debug for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectReference({})", self.inner.state.read().value)
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.state.read().value)
    }
}

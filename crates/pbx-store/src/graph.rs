//! The object graph: an arena of project objects keyed by reference value.
//!
//! # Invariants
//!
//! - Each object lives in the bucket of its [`ObjectKind`].
//! - At most one object is stored under a given reference value.
//! - Every stored object's reference is attached to this graph.
//! - Graph equality compares bucket contents, never identity.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use pbx_types::ObjectKind;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::objects::{
    BuildConfiguration, BuildFile, BuildRule, ConfigurationList, ContainerItemProxy,
    CopyFilesPhase, FileReference, GraphObject, LegacyTarget, Project, ProjectObject,
    ReferenceProxy, ShellScriptPhase, Target, TargetDependency, VersionGroup,
};
use crate::reference::ObjectReference;

/// One stored object and the reference it is keyed by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub reference: ObjectReference,
    pub object: ProjectObject,
}

/// Per-kind buckets plus a value index. Read access is handed out through
/// [`ObjectGraph::with_objects`].
#[derive(Clone, Default)]
pub struct ObjectBuckets {
    buckets: BTreeMap<ObjectKind, BTreeMap<String, Entry>>,
    index: HashMap<String, ObjectKind>,
}

impl ObjectBuckets {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// The kind stored under `value`.
    pub fn kind_of(&self, value: &str) -> Option<ObjectKind> {
        self.index.get(value).copied()
    }

    pub fn entry(&self, value: &str) -> Option<&Entry> {
        let kind = self.index.get(value)?;
        self.buckets.get(kind)?.get(value)
    }

    pub fn object(&self, value: &str) -> Option<&ProjectObject> {
        self.entry(value).map(|e| &e.object)
    }

    /// Typed lookup that reports why it failed.
    pub fn resolve<T: GraphObject>(&self, reference: &ObjectReference) -> GraphResult<&T> {
        let value = reference.value();
        let object = self
            .object(&value)
            .ok_or_else(|| GraphError::DanglingReference(value.clone()))?;
        T::from_object(object).ok_or(GraphError::TypeMismatch {
            reference: value,
            expected: T::EXPECTED,
        })
    }

    /// Entries of one kind in reference order.
    pub fn bucket(&self, kind: ObjectKind) -> impl Iterator<Item = &Entry> {
        self.buckets.get(&kind).into_iter().flat_map(|b| b.values())
    }

    /// Kinds with at least one object, in section order.
    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.buckets.keys().copied()
    }

    /// Every entry, bucket by bucket, each bucket in reference order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.values().flat_map(|b| b.values())
    }

    /// Every target of any kind, in bucket order.
    pub fn targets(&self) -> impl Iterator<Item = (&ObjectReference, &Target)> {
        self.iter()
            .filter_map(|e| Target::from_object(&e.object).map(|t| (&e.reference, t)))
    }

    fn insert(&mut self, entry: Entry) -> Option<Entry> {
        let value = entry.reference.value();
        let kind = entry.object.kind();
        let previous = self.remove(&value);
        self.index.insert(value.clone(), kind);
        self.buckets.entry(kind).or_default().insert(value, entry);
        previous
    }

    fn remove(&mut self, value: &str) -> Option<Entry> {
        let kind = self.index.remove(value)?;
        let bucket = self.buckets.get_mut(&kind)?;
        let entry = bucket.remove(value);
        if bucket.is_empty() {
            self.buckets.remove(&kind);
        }
        entry
    }

    fn get_mut(&mut self, value: &str) -> Option<&mut Entry> {
        let kind = self.index.get(value)?;
        self.buckets.get_mut(kind)?.get_mut(value)
    }
}

impl PartialEq for ObjectBuckets {
    fn eq(&self, other: &Self) -> bool {
        self.buckets == other.buckets
    }
}

impl Eq for ObjectBuckets {}

pub(crate) struct GraphInner {
    objects: RwLock<ObjectBuckets>,
}

/// Shared handle to an object graph.
///
/// Cloning the handle does not copy objects. References hold only a weak
/// link, so dropping the last handle releases the graph.
#[derive(Clone)]
pub struct ObjectGraph {
    inner: Arc<GraphInner>,
}

impl ObjectGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GraphInner {
                objects: RwLock::new(ObjectBuckets::default()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<GraphInner>) -> Self {
        Self { inner }
    }

    /// Returns `true` when both handles point at the same graph.
    pub fn ptr_eq(&self, other: &ObjectGraph) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ---- Construction ----

    /// A fresh temporary reference attached to this graph.
    pub fn create(&self) -> ObjectReference {
        let reference = ObjectReference::temporary();
        reference.attach(&self.inner);
        reference
    }

    /// A permanent reference attached to this graph, without an object.
    pub fn reference(&self, value: impl Into<String>) -> ObjectReference {
        let reference = ObjectReference::permanent(value);
        reference.attach(&self.inner);
        reference
    }

    /// Store an object under a new temporary reference.
    pub fn add(&self, object: impl Into<ProjectObject>) -> ObjectReference {
        let reference = self.create();
        self.insert(&reference, object);
        reference
    }

    /// Store an object under an existing reference, replacing whatever was
    /// stored under the same value.
    pub fn insert(
        &self,
        reference: &ObjectReference,
        object: impl Into<ProjectObject>,
    ) -> Option<ProjectObject> {
        reference.attach(&self.inner);
        let entry = Entry {
            reference: reference.clone(),
            object: object.into(),
        };
        self.inner.objects.write().insert(entry).map(|e| e.object)
    }

    /// Remove an object. Edges pointing at it are left dangling.
    pub fn delete(&self, reference: &ObjectReference) -> Option<ProjectObject> {
        self.inner
            .objects
            .write()
            .remove(&reference.value())
            .map(|e| e.object)
    }

    // ---- Lookup ----

    /// Typed copy of the object, or `None` when absent or of another kind.
    pub fn get<T: GraphObject>(&self, reference: &ObjectReference) -> Option<T> {
        self.resolve(reference).ok()
    }

    /// Copy of the object under `value`.
    pub fn get_object(&self, value: &str) -> Option<ProjectObject> {
        self.inner.objects.read().object(value).cloned()
    }

    /// Typed copy of the object, reporting dangling and mismatched edges.
    pub fn resolve<T: GraphObject>(&self, reference: &ObjectReference) -> GraphResult<T> {
        self.inner.objects.read().resolve::<T>(reference).cloned()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.inner.objects.read().contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.objects.read().is_empty()
    }

    /// Kinds with at least one object, in section order.
    pub fn kinds(&self) -> Vec<ObjectKind> {
        self.inner.objects.read().kinds().collect()
    }

    /// References of one kind, in reference order.
    pub fn references_of(&self, kind: ObjectKind) -> Vec<ObjectReference> {
        self.inner
            .objects
            .read()
            .bucket(kind)
            .map(|e| e.reference.clone())
            .collect()
    }

    /// Run `f` against a read view of every bucket. `f` must not call back
    /// into this graph's mutating methods.
    pub fn with_objects<R>(&self, f: impl FnOnce(&ObjectBuckets) -> R) -> R {
        f(&self.inner.objects.read())
    }

    /// Visit every object in bucket order.
    pub fn for_each(&self, mut visitor: impl FnMut(&ObjectReference, &ProjectObject)) {
        for entry in self.inner.objects.read().iter() {
            visitor(&entry.reference, &entry.object);
        }
    }

    /// Targets of any kind with the given name.
    pub fn targets_named(&self, name: &str) -> Vec<ObjectReference> {
        self.with_objects(|objects| {
            objects
                .targets()
                .filter(|(_, t)| t.name == name)
                .map(|(r, _)| r.clone())
                .collect()
        })
    }

    /// Edges that do not resolve, as `(owner, edge)` pairs.
    pub fn dangling_edges(&self) -> Vec<(ObjectReference, ObjectReference)> {
        self.with_objects(|objects| {
            objects
                .iter()
                .flat_map(|e| {
                    e.object
                        .edges()
                        .into_iter()
                        .filter(|edge| !objects.contains(&edge.value()))
                        .map(|edge| (e.reference.clone(), edge))
                        .collect::<Vec<_>>()
                })
                .collect()
        })
    }

    // ---- Mutation ----

    /// Edit one object in place. `f` must not touch this graph.
    pub fn update<T: GraphObject, R>(
        &self,
        reference: &ObjectReference,
        f: impl FnOnce(&mut T) -> R,
    ) -> GraphResult<R> {
        let value = reference.value();
        let mut objects = self.inner.objects.write();
        let entry = objects
            .get_mut(&value)
            .ok_or_else(|| GraphError::DanglingReference(value.clone()))?;
        let typed = T::from_object_mut(&mut entry.object).ok_or(GraphError::TypeMismatch {
            reference: value,
            expected: T::EXPECTED,
        })?;
        Ok(f(typed))
    }

    /// Give a reference its permanent value and re-key its object.
    ///
    /// The stored object's own reference is updated too, so every clone of
    /// it observes the new value.
    pub fn fix(&self, reference: &ObjectReference, value: impl Into<String>) -> GraphResult<()> {
        let value = value.into();
        let old = reference.value();
        let mut objects = self.inner.objects.write();

        if old != value && objects.contains(&value) {
            return Err(GraphError::DuplicateReference(value));
        }

        let entry = objects.remove(&old);
        reference.set_value(value.clone(), false);
        if let Some(entry) = entry {
            if !entry.reference.ptr_eq(reference) {
                entry.reference.set_value(value.clone(), false);
            }
            objects.insert(entry);
        }
        debug!(from = %old, to = %value, "fixed reference");
        Ok(())
    }

    /// Mark every stored reference temporary so the next encode
    /// regenerates all identifiers.
    pub fn invalidate_references(&self) {
        for entry in self.inner.objects.read().iter() {
            entry.reference.mark_temporary();
        }
    }

    /// Stored references still waiting for a permanent value, in bucket
    /// order then reference order.
    pub fn temporary_references(&self) -> Vec<ObjectReference> {
        self.inner
            .objects
            .read()
            .iter()
            .filter(|e| e.reference.is_temporary())
            .map(|e| e.reference.clone())
            .collect()
    }

    /// Values of every stored permanent reference.
    pub fn permanent_values(&self) -> Vec<String> {
        self.inner
            .objects
            .read()
            .iter()
            .filter(|e| !e.reference.is_temporary())
            .map(|e| e.reference.value())
            .collect()
    }
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ObjectGraph {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        // Never hold both read locks: a queued writer on each graph would
        // block two threads comparing in opposite orders.
        let theirs = other.inner.objects.read().clone();
        *self.inner.objects.read() == theirs
    }
}

impl Eq for ObjectGraph {}

impl fmt::Debug for ObjectGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objects = self.inner.objects.read();
        f.debug_struct("ObjectGraph")
            .field("object_count", &objects.len())
            .field("kinds", &objects.kinds().collect::<Vec<_>>())
            .finish()
    }
}

macro_rules! into_project_object {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(impl From<$ty> for ProjectObject {
            fn from(value: $ty) -> Self {
                ProjectObject::$variant(value)
            }
        })+
    };
}

// Only unambiguous shapes convert directly; shared shapes such as `Target`
// and `BuildPhase` must name their variant.
into_project_object! {
    BuildConfiguration => BuildConfiguration,
    BuildFile => BuildFile,
    BuildRule => BuildRule,
    ConfigurationList => ConfigurationList,
    ContainerItemProxy => ContainerItemProxy,
    CopyFilesPhase => CopyFilesBuildPhase,
    FileReference => FileReference,
    LegacyTarget => LegacyTarget,
    Project => Project,
    ReferenceProxy => ReferenceProxy,
    ShellScriptPhase => ShellScriptBuildPhase,
    TargetDependency => TargetDependency,
    VersionGroup => VersionGroup,
}

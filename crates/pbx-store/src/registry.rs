use std::collections::HashMap;

use parking_lot::Mutex;

use crate::graph::ObjectGraph;
use crate::reference::ObjectReference;

/// Decode-time reference registry.
///
/// Every textual reference seen while decoding maps to exactly one shared
/// [`ObjectReference`], whether or not its object has been parsed yet. The
/// get-or-create step is serialized so records can be parsed in parallel.
pub struct ReferenceRegistry {
    graph: ObjectGraph,
    references: Mutex<HashMap<String, ObjectReference>>,
}

impl ReferenceRegistry {
    pub fn new(graph: &ObjectGraph) -> Self {
        Self {
            graph: graph.clone(),
            references: Mutex::new(HashMap::new()),
        }
    }

    /// The shared reference for `value`, created on first sight.
    pub fn get_or_create(&self, value: &str) -> ObjectReference {
        let mut references = self.references.lock();
        if let Some(existing) = references.get(value) {
            return existing.clone();
        }
        let reference = self.graph.reference(value);
        references.insert(value.to_string(), reference.clone());
        reference
    }

    /// Number of distinct values seen so far.
    pub fn len(&self) -> usize {
        self.references.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.lock().is_empty()
    }
}

use std::collections::BTreeMap;

use pbx_types::RawValue;

use crate::error::{GraphError, GraphResult};
use crate::graph::ObjectGraph;
use crate::objects::Project;
use crate::reference::ObjectReference;

/// `archiveVersion` written when none is known.
pub const DEFAULT_ARCHIVE_VERSION: u32 = 1;

/// A whole project document: version header, root object, and graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDocument {
    pub archive_version: u32,
    pub object_version: u32,
    pub classes: BTreeMap<String, RawValue>,
    pub root_object: Option<ObjectReference>,
    pub graph: ObjectGraph,
}

impl ProjectDocument {
    pub fn new(graph: ObjectGraph, root_object: ObjectReference, object_version: u32) -> Self {
        Self {
            archive_version: DEFAULT_ARCHIVE_VERSION,
            object_version,
            classes: BTreeMap::new(),
            root_object: Some(root_object),
            graph,
        }
    }

    /// The root project object.
    pub fn project(&self) -> GraphResult<Project> {
        let root = self
            .root_object
            .as_ref()
            .ok_or_else(|| GraphError::DanglingReference(String::new()))?;
        self.graph.resolve(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{ConfigurationList, Group};

    #[test]
    fn project_resolves_root() {
        let graph = ObjectGraph::new();
        let list = graph.add(ConfigurationList::default());
        let main = graph.add(crate::objects::ProjectObject::Group(Group::default()));
        let root = graph.add(Project::new("App", list, main));
        let doc = ProjectDocument::new(graph, root, 46);
        assert_eq!(doc.project().unwrap().name, "App");
        assert_eq!(doc.archive_version, 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut doc = ProjectDocument::new(ObjectGraph::new(), ObjectReference::permanent("X"), 46);
        assert!(matches!(doc.project(), Err(GraphError::DanglingReference(_))));
        doc.root_object = None;
        assert!(doc.project().is_err());
    }
}

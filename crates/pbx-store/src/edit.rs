//! Editing helpers that keep related objects consistent.

use crate::error::GraphResult;
use crate::graph::ObjectGraph;
use crate::objects::{
    BuildConfiguration, BuildFile, BuildPhase, ConfigurationList, ContainerItemProxy, Group,
    ProxyType, RemoteGlobalId, Target, TargetDependency,
};
use crate::reference::ObjectReference;

impl ObjectGraph {
    /// Append an element to a group's children.
    pub fn add_child(&self, group: &ObjectReference, element: &ObjectReference) -> GraphResult<()> {
        self.update::<Group, _>(group, |g| {
            if !g.children.contains(element) {
                g.children.push(element.clone());
            }
        })
    }

    /// Add `file` to a build phase, reusing the build file that already
    /// lists it.
    pub fn add_build_file(
        &self,
        phase: &ObjectReference,
        file: &ObjectReference,
    ) -> GraphResult<ObjectReference> {
        let existing = self.with_objects(|objects| -> GraphResult<Option<ObjectReference>> {
            let phase = objects.resolve::<BuildPhase>(phase)?;
            Ok(phase
                .files
                .iter()
                .find(|r| {
                    objects
                        .resolve::<BuildFile>(r)
                        .map(|b| b.file.as_ref() == Some(file))
                        .unwrap_or(false)
                })
                .cloned())
        })?;
        if let Some(existing) = existing {
            return Ok(existing);
        }

        let build_file = self.add(BuildFile::new(file.clone()));
        self.update::<BuildPhase, _>(phase, |p| p.files.push(build_file.clone()))?;
        Ok(build_file)
    }

    /// Add a configuration and list it in a configuration list.
    pub fn add_configuration(
        &self,
        list: &ObjectReference,
        configuration: BuildConfiguration,
    ) -> GraphResult<ObjectReference> {
        self.resolve::<ConfigurationList>(list)?;
        let reference = self.add(configuration);
        self.update::<ConfigurationList, _>(list, |l| {
            l.build_configurations.push(reference.clone())
        })?;
        Ok(reference)
    }

    /// Make `target` depend on `dependency`, both owned by `project`.
    ///
    /// Creates the container item proxy and the target dependency.
    pub fn add_target_dependency(
        &self,
        project: &ObjectReference,
        target: &ObjectReference,
        dependency: &ObjectReference,
    ) -> GraphResult<ObjectReference> {
        let dependency_name = self.resolve::<Target>(dependency)?.name;
        self.resolve::<Target>(target)?;

        let proxy = self.add(ContainerItemProxy {
            container_portal: project.clone(),
            proxy_type: Some(ProxyType::NativeTarget),
            remote_global_id: Some(RemoteGlobalId::Reference(dependency.clone())),
            remote_info: Some(dependency_name),
        });
        let target_dependency = self.add(TargetDependency {
            name: None,
            target: Some(dependency.clone()),
            target_proxy: Some(proxy),
        });
        self.update::<Target, _>(target, |t| t.dependencies.push(target_dependency.clone()))?;
        Ok(target_dependency)
    }

    /// The build phase listing `build_file`, if any.
    pub fn build_phase_containing(&self, build_file: &ObjectReference) -> Option<ObjectReference> {
        self.with_objects(|objects| {
            objects
                .iter()
                .find(|e| {
                    e.object
                        .build_phase()
                        .map(|p| p.files.contains(build_file))
                        .unwrap_or(false)
                })
                .map(|e| e.reference.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GraphError;
    use crate::graph::ObjectGraph;
    use crate::objects::*;

    fn sources(graph: &ObjectGraph) -> crate::ObjectReference {
        graph.add(ProjectObject::SourcesBuildPhase(BuildPhase::default()))
    }

    #[test]
    fn add_child_is_idempotent() {
        let graph = ObjectGraph::new();
        let group = graph.add(ProjectObject::Group(Group::default()));
        let file = graph.add(FileReference::new(FileElement::in_group("a.swift")));
        graph.add_child(&group, &file).unwrap();
        graph.add_child(&group, &file).unwrap();
        assert_eq!(group.object::<Group>().unwrap().children, vec![file]);
    }

    #[test]
    fn add_build_file_reuses_existing() {
        let graph = ObjectGraph::new();
        let phase = sources(&graph);
        let file = graph.add(FileReference::new(FileElement::in_group("a.swift")));

        let first = graph.add_build_file(&phase, &file).unwrap();
        let second = graph.add_build_file(&phase, &file).unwrap();
        assert_eq!(first, second);
        assert_eq!(phase.object::<BuildPhase>().unwrap().files.len(), 1);
        assert_eq!(graph.build_phase_containing(&first), Some(phase));
    }

    #[test]
    fn add_build_file_to_non_phase_fails() {
        let graph = ObjectGraph::new();
        let group = graph.add(ProjectObject::Group(Group::default()));
        let file = graph.add(FileReference::default());
        let err = graph.add_build_file(&group, &file).unwrap_err();
        assert!(matches!(err, GraphError::TypeMismatch { .. }));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn add_configuration_lists_it() {
        let graph = ObjectGraph::new();
        let list = graph.add(ConfigurationList::default());
        let debug = graph
            .add_configuration(&list, BuildConfiguration::new("Debug"))
            .unwrap();
        let list = list.object::<ConfigurationList>().unwrap();
        assert_eq!(list.build_configurations, vec![debug]);
    }

    #[test]
    fn add_target_dependency_wires_proxy() {
        let graph = ObjectGraph::new();
        let list = graph.add(ConfigurationList::default());
        let main = graph.add(ProjectObject::Group(Group::default()));
        let project = graph.add(Project::new("P", list, main));
        let app = graph.add(ProjectObject::NativeTarget(Target::new("App")));
        let lib = graph.add(ProjectObject::NativeTarget(Target::new("Lib")));

        let dep = graph.add_target_dependency(&project, &app, &lib).unwrap();
        let dep_obj = dep.object::<TargetDependency>().unwrap();
        assert_eq!(dep_obj.target.as_ref(), Some(&lib));

        let proxy = dep_obj.target_proxy.unwrap().object::<ContainerItemProxy>().unwrap();
        assert_eq!(proxy.container_portal, project);
        assert_eq!(proxy.proxy_type, Some(ProxyType::NativeTarget));
        assert_eq!(proxy.remote_info.as_deref(), Some("Lib"));
        assert_eq!(app.object::<Target>().unwrap().dependencies, vec![dep]);
    }

    #[test]
    fn add_target_dependency_requires_targets() {
        let graph = ObjectGraph::new();
        let project = graph.create();
        let app = graph.add(ProjectObject::NativeTarget(Target::new("App")));
        let missing = graph.create();
        let err = graph.add_target_dependency(&project, &app, &missing).unwrap_err();
        assert_eq!(err, GraphError::DanglingReference(missing.value()));
    }
}

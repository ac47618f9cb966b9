//! Temporary-to-permanent reference fixing.
//!
//! Walks the graph from the root project and derives each object's context
//! from its position: the project, then targets, the navigator tree, project
//! references, per-target configurations, build phases and their files,
//! build rules, dependencies, and finally the project's configuration list.
//! Anything still temporary afterwards is fixed in bucket order.

use std::collections::HashSet;

use pbx_refs::ReferenceGenerator;
use pbx_store::objects::{ConfigurationList, Project, Target};
use pbx_store::{ObjectGraph, ObjectReference, ProjectObject};
use tracing::info;

use crate::error::EncodeResult;

type Context = Vec<String>;

fn extend(ctx: &[String], parts: &[&str]) -> Context {
    let mut out = ctx.to_vec();
    out.extend(parts.iter().map(|p| p.to_string()));
    out
}

pub(crate) struct ReferenceFixer<'a> {
    graph: &'a ObjectGraph,
    generator: &'a mut ReferenceGenerator,
    visited_groups: HashSet<String>,
    fixed: usize,
}

impl<'a> ReferenceFixer<'a> {
    pub fn new(graph: &'a ObjectGraph, generator: &'a mut ReferenceGenerator) -> Self {
        Self {
            graph,
            generator,
            visited_groups: HashSet::new(),
            fixed: 0,
        }
    }

    /// Fix every stored temporary reference. Returns how many were fixed.
    pub fn run(mut self, root: &ObjectReference) -> EncodeResult<usize> {
        if self.graph.temporary_references().is_empty() {
            return Ok(0);
        }
        self.generator.reset();
        self.generator.reserve_all(self.graph.permanent_values());

        if let Some(project) = self.graph.get::<Project>(root) {
            self.visit_project(root, &project)?;
        }
        for reference in self.graph.temporary_references() {
            if let Some(object) = self.graph.get_object(&reference.value()) {
                let label = object.display_name().unwrap_or_default().to_string();
                self.fix(&reference, &[object.isa().to_string(), label])?;
            }
        }

        info!(fixed = self.fixed, "fixed temporary references");
        Ok(self.fixed)
    }

    fn fix(&mut self, reference: &ObjectReference, ctx: &[String]) -> EncodeResult<()> {
        if !reference.is_temporary() {
            return Ok(());
        }
        let Some(object) = self.graph.get_object(&reference.value()) else {
            return Ok(());
        };
        let value = self.generator.generate(object.kind(), &ctx.join("-"))?;
        self.graph.fix(reference, value)?;
        self.fixed += 1;
        Ok(())
    }

    /// Fix `reference` with `ctx` extended by its isa and label.
    fn fix_labelled(&mut self, reference: &ObjectReference, ctx: &[String]) -> EncodeResult<Context> {
        let object = self.graph.get_object(&reference.value());
        let (isa, label) = match &object {
            Some(o) => (o.isa(), o.display_name().unwrap_or_default()),
            None => ("", ""),
        };
        let ctx = extend(ctx, &[isa, label]);
        self.fix(reference, &ctx)?;
        Ok(ctx)
    }

    fn visit_project(&mut self, root: &ObjectReference, project: &Project) -> EncodeResult<()> {
        let ctx = vec!["PBXProject".to_string(), project.name.clone()];
        self.fix(root, &ctx)?;

        for target in &project.targets {
            self.fix_labelled(target, &ctx)?;
        }
        self.visit_group(&project.main_group, &ctx)?;
        if let Some(products) = &project.product_ref_group {
            self.visit_group(products, &ctx)?;
        }
        for reference in &project.project_references {
            self.fix_labelled(&reference.project_ref, &ctx)?;
            self.visit_group(&reference.product_group, &ctx)?;
        }
        for target in &project.targets {
            self.visit_target(target, &ctx)?;
        }
        self.visit_configuration_list(&project.build_configuration_list, &ctx)
    }

    fn visit_group(&mut self, reference: &ObjectReference, parent: &[String]) -> EncodeResult<()> {
        let ctx = self.fix_labelled(reference, parent)?;
        if !self.visited_groups.insert(reference.value()) {
            return Ok(());
        }
        let Some(object) = self.graph.get_object(&reference.value()) else {
            return Ok(());
        };
        let children = match &object {
            ProjectObject::Group(g) | ProjectObject::VariantGroup(g) => g.children.clone(),
            ProjectObject::VersionGroup(v) => v.group.children.clone(),
            _ => return Ok(()),
        };
        for child in &children {
            let is_group = self
                .graph
                .with_objects(|o| o.kind_of(&child.value()))
                .map(|k| k.is_group())
                .unwrap_or(false);
            if is_group {
                self.visit_group(child, &ctx)?;
            } else {
                self.fix_labelled(child, &ctx)?;
            }
        }
        Ok(())
    }

    fn visit_target(&mut self, reference: &ObjectReference, parent: &[String]) -> EncodeResult<()> {
        let Some(target) = self.graph.get::<Target>(reference) else {
            return Ok(());
        };
        let isa = self
            .graph
            .with_objects(|o| o.kind_of(&reference.value()))
            .map(|k| k.isa())
            .unwrap_or_default();
        let ctx = extend(parent, &[isa, target.name.as_str()]);

        if let Some(list) = &target.build_configuration_list {
            self.visit_configuration_list(list, &ctx)?;
        }
        for phase in &target.build_phases {
            let phase_ctx = self.fix_labelled(phase, &ctx)?;
            let files = self
                .graph
                .get_object(&phase.value())
                .and_then(|o| o.build_phase().map(|p| p.files.clone()))
                .unwrap_or_default();
            for build_file in &files {
                let file_value = self
                    .graph
                    .get_object(&build_file.value())
                    .and_then(|o| match o {
                        ProjectObject::BuildFile(b) => b.file.map(|f| f.value()),
                        _ => None,
                    })
                    .unwrap_or_default();
                self.fix(build_file, &extend(&phase_ctx, &["PBXBuildFile", file_value.as_str()]))?;
            }
        }
        for rule in &target.build_rules {
            self.fix_labelled(rule, &ctx)?;
        }
        for dependency in &target.dependencies {
            self.visit_dependency(dependency, &ctx)?;
        }
        if let Some(product) = &target.product_reference {
            self.fix_labelled(product, &ctx)?;
        }
        Ok(())
    }

    fn visit_dependency(&mut self, reference: &ObjectReference, parent: &[String]) -> EncodeResult<()> {
        let Some(ProjectObject::TargetDependency(dependency)) =
            self.graph.get_object(&reference.value())
        else {
            return Ok(());
        };
        let target_value = dependency.target.map(|t| t.value()).unwrap_or_default();
        let ctx = extend(parent, &["PBXTargetDependency", target_value.as_str()]);
        self.fix(reference, &ctx)?;

        if let Some(proxy) = &dependency.target_proxy {
            let remote = match self.graph.get_object(&proxy.value()) {
                Some(ProjectObject::ContainerItemProxy(p)) => {
                    p.remote_global_id.map(|r| r.value()).unwrap_or_default()
                }
                _ => String::new(),
            };
            self.fix(proxy, &extend(&ctx, &["PBXContainerItemProxy", remote.as_str()]))?;
        }
        Ok(())
    }

    fn visit_configuration_list(
        &mut self,
        reference: &ObjectReference,
        parent: &[String],
    ) -> EncodeResult<()> {
        let ctx = extend(parent, &["XCConfigurationList"]);
        self.fix(reference, &ctx)?;
        let Some(list) = self.graph.get::<ConfigurationList>(reference) else {
            return Ok(());
        };
        for configuration in &list.build_configurations {
            self.fix_labelled(configuration, &ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_refs::IDENTIFIER_LEN;
    use pbx_store::objects::*;

    fn is_permanent_id(value: &str) -> bool {
        value.len() == IDENTIFIER_LEN
            && value[..2].chars().all(|c| c.is_ascii_uppercase())
            && value[2..].chars().all(|c| matches!(c, '0'..='9' | 'A'..='F'))
    }

    struct Sample {
        graph: ObjectGraph,
        root: ObjectReference,
        file: ObjectReference,
        build_file: ObjectReference,
    }

    fn sample() -> Sample {
        let graph = ObjectGraph::new();
        let file = graph.add(FileReference::new(FileElement::in_group("main.swift")));
        let mut main = Group::new(FileElement {
            source_tree: Some(SourceTree::Group),
            ..Default::default()
        });
        main.children.push(file.clone());
        let main = graph.add(ProjectObject::Group(main));

        let build_file = graph.add(BuildFile::new(file.clone()));
        let phase = graph.add(ProjectObject::SourcesBuildPhase(BuildPhase {
            files: vec![build_file.clone()],
            ..Default::default()
        }));
        let debug = graph.add(BuildConfiguration::new("Debug"));
        let target_list = graph.add(ConfigurationList {
            build_configurations: vec![debug],
            ..Default::default()
        });
        let mut target = Target::new("App");
        target.build_phases.push(phase);
        target.build_configuration_list = Some(target_list);
        let target = graph.add(ProjectObject::NativeTarget(target));

        let project_debug = graph.add(BuildConfiguration::new("Debug"));
        let project_list = graph.add(ConfigurationList {
            build_configurations: vec![project_debug],
            ..Default::default()
        });
        let mut project = Project::new("App", project_list, main);
        project.targets.push(target);
        let root = graph.add(project);
        Sample {
            graph,
            root,
            file,
            build_file,
        }
    }

    #[test]
    fn fixes_every_temporary_reference() {
        let s = sample();
        let mut gen = ReferenceGenerator::new();
        let fixed = ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();
        assert_eq!(fixed, s.graph.len());
        assert!(s.graph.temporary_references().is_empty());
        s.graph.for_each(|r, _| assert!(is_permanent_id(&r.value()), "{r}"));
        assert!(s.root.value().starts_with("PR"));
        assert!(s.file.value().starts_with("FR"));
        assert!(s.build_file.value().starts_with("BF"));
    }

    #[test]
    fn edges_observe_fixed_values() {
        let s = sample();
        let mut gen = ReferenceGenerator::new();
        ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();
        let build_file: BuildFile = s.build_file.object().unwrap();
        assert_eq!(build_file.file.unwrap().value(), s.file.value());
        assert!(s.graph.dangling_edges().is_empty());
    }

    #[test]
    fn identical_graphs_get_identical_ids() {
        let a = sample();
        let b = sample();
        ReferenceFixer::new(&a.graph, &mut ReferenceGenerator::new()).run(&a.root).unwrap();
        ReferenceFixer::new(&b.graph, &mut ReferenceGenerator::new()).run(&b.root).unwrap();
        assert_eq!(a.root.value(), b.root.value());
        assert_eq!(a.build_file.value(), b.build_file.value());
        assert_eq!(a.graph, b.graph);
    }

    #[test]
    fn second_run_changes_nothing() {
        let s = sample();
        let mut gen = ReferenceGenerator::new();
        ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();
        let before = s.file.value();
        let fixed = ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();
        assert_eq!(fixed, 0);
        assert_eq!(s.file.value(), before);
    }

    #[test]
    fn new_objects_avoid_existing_ids() {
        let s = sample();
        let mut gen = ReferenceGenerator::new();
        ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();

        // Same path and parent as the existing file: same body, next suffix.
        let twin = s.graph.add(FileReference::new(FileElement::in_group("main.swift")));
        let main = s.graph.resolve::<Project>(&s.root).unwrap().main_group;
        s.graph.add_child(&main, &twin).unwrap();
        ReferenceFixer::new(&s.graph, &mut gen).run(&s.root).unwrap();

        assert_ne!(twin.value(), s.file.value());
        assert_eq!(twin.value()[..22], s.file.value()[..22]);
        assert!(twin.value().ends_with("02"));
    }

    #[test]
    fn unreachable_objects_are_swept() {
        let s = sample();
        let orphan = s.graph.add(BuildRule {
            compiler_spec: "com.apple.compilers.proxy.script".into(),
            file_type: "pattern.proxy".into(),
            ..Default::default()
        });
        ReferenceFixer::new(&s.graph, &mut ReferenceGenerator::new()).run(&s.root).unwrap();
        assert!(!orphan.is_temporary());
        assert!(orphan.value().starts_with("BR"));
    }
}

//! Project object variants.
//!
//! [`ProjectObject`] is the closed sum of everything a graph can store. Each
//! variant maps to exactly one [`ObjectKind`] and therefore to one bucket.
//! Variants that share a shape share a struct: all seven build phases carry a
//! [`BuildPhase`], all three targets a [`Target`].
//!
//! [`GraphObject`] gives typed access: `graph.resolve::<Target>(&r)` accepts
//! any target variant, while `graph.resolve::<LegacyTarget>(&r)` accepts only
//! legacy targets.

pub mod config;
pub mod element;
pub mod phase;
pub mod project;
pub mod target;

use pbx_types::ObjectKind;

use crate::reference::ObjectReference;

pub use config::{BuildConfiguration, BuildSettings, ConfigurationList};
pub use element::{FileElement, FileReference, Group, ReferenceProxy, SourceTree, VersionGroup};
pub use phase::{
    BuildFile, BuildPhase, BuildRule, CopyFilesPhase, ShellScriptPhase, DEFAULT_BUILD_ACTION_MASK,
};
pub use project::{Project, ProjectReference, TARGET_ATTRIBUTES_KEY};
pub use target::{
    ContainerItemProxy, LegacyTarget, ProxyType, RemoteGlobalId, Target, TargetDependency,
};

/// Every object a graph can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectObject {
    AggregateTarget(Target),
    BuildFile(BuildFile),
    BuildRule(BuildRule),
    ContainerItemProxy(ContainerItemProxy),
    CopyFilesBuildPhase(CopyFilesPhase),
    FileReference(FileReference),
    FrameworksBuildPhase(BuildPhase),
    Group(Group),
    HeadersBuildPhase(BuildPhase),
    LegacyTarget(LegacyTarget),
    NativeTarget(Target),
    Project(Project),
    ReferenceProxy(ReferenceProxy),
    ResourcesBuildPhase(BuildPhase),
    RezBuildPhase(BuildPhase),
    ShellScriptBuildPhase(ShellScriptPhase),
    SourcesBuildPhase(BuildPhase),
    TargetDependency(TargetDependency),
    VariantGroup(Group),
    BuildConfiguration(BuildConfiguration),
    ConfigurationList(ConfigurationList),
    VersionGroup(VersionGroup),
}

impl ProjectObject {
    /// The bucket this object lives in.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::AggregateTarget(_) => ObjectKind::AggregateTarget,
            Self::BuildFile(_) => ObjectKind::BuildFile,
            Self::BuildRule(_) => ObjectKind::BuildRule,
            Self::ContainerItemProxy(_) => ObjectKind::ContainerItemProxy,
            Self::CopyFilesBuildPhase(_) => ObjectKind::CopyFilesBuildPhase,
            Self::FileReference(_) => ObjectKind::FileReference,
            Self::FrameworksBuildPhase(_) => ObjectKind::FrameworksBuildPhase,
            Self::Group(_) => ObjectKind::Group,
            Self::HeadersBuildPhase(_) => ObjectKind::HeadersBuildPhase,
            Self::LegacyTarget(_) => ObjectKind::LegacyTarget,
            Self::NativeTarget(_) => ObjectKind::NativeTarget,
            Self::Project(_) => ObjectKind::Project,
            Self::ReferenceProxy(_) => ObjectKind::ReferenceProxy,
            Self::ResourcesBuildPhase(_) => ObjectKind::ResourcesBuildPhase,
            Self::RezBuildPhase(_) => ObjectKind::RezBuildPhase,
            Self::ShellScriptBuildPhase(_) => ObjectKind::ShellScriptBuildPhase,
            Self::SourcesBuildPhase(_) => ObjectKind::SourcesBuildPhase,
            Self::TargetDependency(_) => ObjectKind::TargetDependency,
            Self::VariantGroup(_) => ObjectKind::VariantGroup,
            Self::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Self::ConfigurationList(_) => ObjectKind::ConfigurationList,
            Self::VersionGroup(_) => ObjectKind::VersionGroup,
        }
    }

    pub fn isa(&self) -> &'static str {
        self.kind().isa()
    }

    /// Shared file element attributes, for elements only.
    pub fn file_element(&self) -> Option<&FileElement> {
        match self {
            Self::FileReference(f) => Some(&f.element),
            Self::Group(g) | Self::VariantGroup(g) => Some(&g.element),
            Self::VersionGroup(v) => Some(&v.group.element),
            Self::ReferenceProxy(p) => Some(&p.element),
            _ => None,
        }
    }

    /// `name ?? path` for file elements.
    pub fn file_name(&self) -> Option<&str> {
        self.file_element().and_then(FileElement::file_name)
    }

    /// Shared build phase fields, for phases only.
    pub fn build_phase(&self) -> Option<&BuildPhase> {
        BuildPhase::from_object(self)
    }

    /// The label Xcode shows for a build phase.
    pub fn build_phase_name(&self) -> Option<&str> {
        match self {
            Self::SourcesBuildPhase(_) => Some("Sources"),
            Self::FrameworksBuildPhase(_) => Some("Frameworks"),
            Self::ResourcesBuildPhase(_) => Some("Resources"),
            Self::HeadersBuildPhase(_) => Some("Headers"),
            Self::RezBuildPhase(_) => Some("Rez"),
            Self::CopyFilesBuildPhase(p) => Some(p.name.as_deref().unwrap_or("CopyFiles")),
            Self::ShellScriptBuildPhase(p) => Some(p.name.as_deref().unwrap_or("ShellScript")),
            _ => None,
        }
    }

    /// Shared target fields, for targets only.
    pub fn target(&self) -> Option<&Target> {
        Target::from_object(self)
    }

    /// A short human label: file name, target or configuration name, or
    /// build phase name.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::AggregateTarget(t) | Self::NativeTarget(t) => Some(&t.name),
            Self::LegacyTarget(t) => Some(&t.target.name),
            Self::BuildConfiguration(c) => Some(&c.name),
            Self::Project(p) => Some(&p.name),
            Self::BuildRule(r) => r.name.as_deref(),
            Self::TargetDependency(d) => d.name.as_deref(),
            Self::ContainerItemProxy(p) => p.remote_info.as_deref(),
            other => other.file_name().or_else(|| other.build_phase_name()),
        }
    }

    /// Every outgoing edge, in field order.
    pub fn edges(&self) -> Vec<ObjectReference> {
        let mut out = Vec::new();
        match self {
            Self::AggregateTarget(t) | Self::NativeTarget(t) => push_target_edges(t, &mut out),
            Self::LegacyTarget(t) => push_target_edges(&t.target, &mut out),
            Self::BuildFile(b) => out.extend(b.file.iter().cloned()),
            Self::BuildRule(_) => {}
            Self::ContainerItemProxy(p) => {
                out.push(p.container_portal.clone());
                if let Some(RemoteGlobalId::Reference(r)) = &p.remote_global_id {
                    out.push(r.clone());
                }
            }
            Self::CopyFilesBuildPhase(p) => out.extend(p.phase.files.iter().cloned()),
            Self::ShellScriptBuildPhase(p) => out.extend(p.phase.files.iter().cloned()),
            Self::FrameworksBuildPhase(p)
            | Self::HeadersBuildPhase(p)
            | Self::ResourcesBuildPhase(p)
            | Self::RezBuildPhase(p)
            | Self::SourcesBuildPhase(p) => out.extend(p.files.iter().cloned()),
            Self::FileReference(_) => {}
            Self::Group(g) | Self::VariantGroup(g) => out.extend(g.children.iter().cloned()),
            Self::VersionGroup(v) => {
                out.extend(v.group.children.iter().cloned());
                out.extend(v.current_version.iter().cloned());
            }
            Self::Project(p) => {
                out.push(p.build_configuration_list.clone());
                out.push(p.main_group.clone());
                out.extend(p.product_ref_group.iter().cloned());
                for reference in &p.project_references {
                    out.push(reference.product_group.clone());
                    out.push(reference.project_ref.clone());
                }
                out.extend(p.targets.iter().cloned());
                out.extend(p.target_attributes.iter().map(|(r, _)| r.clone()));
            }
            Self::ReferenceProxy(p) => out.extend(p.remote_ref.iter().cloned()),
            Self::TargetDependency(d) => {
                out.extend(d.target.iter().cloned());
                out.extend(d.target_proxy.iter().cloned());
            }
            Self::BuildConfiguration(c) => out.extend(c.base_configuration.iter().cloned()),
            Self::ConfigurationList(l) => out.extend(l.build_configurations.iter().cloned()),
        }
        out
    }
}

fn push_target_edges(target: &Target, out: &mut Vec<ObjectReference>) {
    out.extend(target.build_configuration_list.iter().cloned());
    out.extend(target.build_phases.iter().cloned());
    out.extend(target.build_rules.iter().cloned());
    out.extend(target.dependencies.iter().cloned());
    out.extend(target.product_reference.iter().cloned());
}

/// Typed view into a [`ProjectObject`].
pub trait GraphObject: Clone + Sized {
    /// Name used in type-mismatch errors.
    const EXPECTED: &'static str;

    fn from_object(object: &ProjectObject) -> Option<&Self>;

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self>;
}

impl GraphObject for ProjectObject {
    const EXPECTED: &'static str = "object";

    fn from_object(object: &ProjectObject) -> Option<&Self> {
        Some(object)
    }

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
        Some(object)
    }
}

macro_rules! graph_object {
    ($ty:ty, $expected:literal, [$($variant:ident),+]) => {
        impl GraphObject for $ty {
            const EXPECTED: &'static str = $expected;

            fn from_object(object: &ProjectObject) -> Option<&Self> {
                match object {
                    $(ProjectObject::$variant(inner) => Some(inner),)+
                    _ => None,
                }
            }

            fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
                match object {
                    $(ProjectObject::$variant(inner) => Some(inner),)+
                    _ => None,
                }
            }
        }
    };
}

graph_object!(BuildFile, "PBXBuildFile", [BuildFile]);
graph_object!(BuildRule, "PBXBuildRule", [BuildRule]);
graph_object!(ContainerItemProxy, "PBXContainerItemProxy", [ContainerItemProxy]);
graph_object!(CopyFilesPhase, "PBXCopyFilesBuildPhase", [CopyFilesBuildPhase]);
graph_object!(FileReference, "PBXFileReference", [FileReference]);
graph_object!(LegacyTarget, "PBXLegacyTarget", [LegacyTarget]);
graph_object!(Project, "PBXProject", [Project]);
graph_object!(ReferenceProxy, "PBXReferenceProxy", [ReferenceProxy]);
graph_object!(ShellScriptPhase, "PBXShellScriptBuildPhase", [ShellScriptBuildPhase]);
graph_object!(TargetDependency, "PBXTargetDependency", [TargetDependency]);
graph_object!(BuildConfiguration, "XCBuildConfiguration", [BuildConfiguration]);
graph_object!(ConfigurationList, "XCConfigurationList", [ConfigurationList]);
graph_object!(VersionGroup, "XCVersionGroup", [VersionGroup]);

impl GraphObject for Target {
    const EXPECTED: &'static str = "target";

    fn from_object(object: &ProjectObject) -> Option<&Self> {
        match object {
            ProjectObject::AggregateTarget(t) | ProjectObject::NativeTarget(t) => Some(t),
            ProjectObject::LegacyTarget(t) => Some(&t.target),
            _ => None,
        }
    }

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
        match object {
            ProjectObject::AggregateTarget(t) | ProjectObject::NativeTarget(t) => Some(t),
            ProjectObject::LegacyTarget(t) => Some(&mut t.target),
            _ => None,
        }
    }
}

impl GraphObject for BuildPhase {
    const EXPECTED: &'static str = "build phase";

    fn from_object(object: &ProjectObject) -> Option<&Self> {
        match object {
            ProjectObject::FrameworksBuildPhase(p)
            | ProjectObject::HeadersBuildPhase(p)
            | ProjectObject::ResourcesBuildPhase(p)
            | ProjectObject::RezBuildPhase(p)
            | ProjectObject::SourcesBuildPhase(p) => Some(p),
            ProjectObject::CopyFilesBuildPhase(p) => Some(&p.phase),
            ProjectObject::ShellScriptBuildPhase(p) => Some(&p.phase),
            _ => None,
        }
    }

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
        match object {
            ProjectObject::FrameworksBuildPhase(p)
            | ProjectObject::HeadersBuildPhase(p)
            | ProjectObject::ResourcesBuildPhase(p)
            | ProjectObject::RezBuildPhase(p)
            | ProjectObject::SourcesBuildPhase(p) => Some(p),
            ProjectObject::CopyFilesBuildPhase(p) => Some(&mut p.phase),
            ProjectObject::ShellScriptBuildPhase(p) => Some(&mut p.phase),
            _ => None,
        }
    }
}

impl GraphObject for Group {
    const EXPECTED: &'static str = "group";

    fn from_object(object: &ProjectObject) -> Option<&Self> {
        match object {
            ProjectObject::Group(g) | ProjectObject::VariantGroup(g) => Some(g),
            ProjectObject::VersionGroup(v) => Some(&v.group),
            _ => None,
        }
    }

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
        match object {
            ProjectObject::Group(g) | ProjectObject::VariantGroup(g) => Some(g),
            ProjectObject::VersionGroup(v) => Some(&mut v.group),
            _ => None,
        }
    }
}

impl GraphObject for FileElement {
    const EXPECTED: &'static str = "file element";

    fn from_object(object: &ProjectObject) -> Option<&Self> {
        object.file_element()
    }

    fn from_object_mut(object: &mut ProjectObject) -> Option<&mut Self> {
        match object {
            ProjectObject::FileReference(f) => Some(&mut f.element),
            ProjectObject::Group(g) | ProjectObject::VariantGroup(g) => Some(&mut g.element),
            ProjectObject::VersionGroup(v) => Some(&mut v.group.element),
            ProjectObject::ReferenceProxy(p) => Some(&mut p.element),
            _ => None,
        }
    }
}

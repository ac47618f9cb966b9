use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The `isa` discriminator of every object variant a project graph can hold.
///
/// Declaration order is the order sections appear in an encoded document,
/// which is also the iteration order of graph buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    AggregateTarget,
    BuildFile,
    BuildRule,
    ContainerItemProxy,
    CopyFilesBuildPhase,
    FileReference,
    FrameworksBuildPhase,
    Group,
    HeadersBuildPhase,
    LegacyTarget,
    NativeTarget,
    Project,
    ReferenceProxy,
    ResourcesBuildPhase,
    RezBuildPhase,
    ShellScriptBuildPhase,
    SourcesBuildPhase,
    TargetDependency,
    VariantGroup,
    BuildConfiguration,
    ConfigurationList,
    VersionGroup,
}

impl ObjectKind {
    /// Every kind, in section order.
    pub const ALL: [ObjectKind; 22] = [
        Self::AggregateTarget,
        Self::BuildFile,
        Self::BuildRule,
        Self::ContainerItemProxy,
        Self::CopyFilesBuildPhase,
        Self::FileReference,
        Self::FrameworksBuildPhase,
        Self::Group,
        Self::HeadersBuildPhase,
        Self::LegacyTarget,
        Self::NativeTarget,
        Self::Project,
        Self::ReferenceProxy,
        Self::ResourcesBuildPhase,
        Self::RezBuildPhase,
        Self::ShellScriptBuildPhase,
        Self::SourcesBuildPhase,
        Self::TargetDependency,
        Self::VariantGroup,
        Self::BuildConfiguration,
        Self::ConfigurationList,
        Self::VersionGroup,
    ];

    /// The `isa` string written to and read from documents.
    pub fn isa(&self) -> &'static str {
        match self {
            Self::AggregateTarget => "PBXAggregateTarget",
            Self::BuildFile => "PBXBuildFile",
            Self::BuildRule => "PBXBuildRule",
            Self::ContainerItemProxy => "PBXContainerItemProxy",
            Self::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            Self::FileReference => "PBXFileReference",
            Self::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Self::Group => "PBXGroup",
            Self::HeadersBuildPhase => "PBXHeadersBuildPhase",
            Self::LegacyTarget => "PBXLegacyTarget",
            Self::NativeTarget => "PBXNativeTarget",
            Self::Project => "PBXProject",
            Self::ReferenceProxy => "PBXReferenceProxy",
            Self::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            Self::RezBuildPhase => "PBXRezBuildPhase",
            Self::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            Self::SourcesBuildPhase => "PBXSourcesBuildPhase",
            Self::TargetDependency => "PBXTargetDependency",
            Self::VariantGroup => "PBXVariantGroup",
            Self::BuildConfiguration => "XCBuildConfiguration",
            Self::ConfigurationList => "XCConfigurationList",
            Self::VersionGroup => "XCVersionGroup",
        }
    }

    /// Look up a kind by its `isa` string.
    pub fn from_isa(isa: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.isa() == isa)
    }

    /// Returns `true` for the three target kinds.
    pub fn is_target(&self) -> bool {
        matches!(
            self,
            Self::NativeTarget | Self::AggregateTarget | Self::LegacyTarget
        )
    }

    /// Returns `true` for the seven build phase kinds.
    pub fn is_build_phase(&self) -> bool {
        matches!(
            self,
            Self::CopyFilesBuildPhase
                | Self::FrameworksBuildPhase
                | Self::HeadersBuildPhase
                | Self::ResourcesBuildPhase
                | Self::RezBuildPhase
                | Self::ShellScriptBuildPhase
                | Self::SourcesBuildPhase
        )
    }

    /// Returns `true` for kinds that can sit in a group's `children`.
    pub fn is_file_element(&self) -> bool {
        matches!(
            self,
            Self::FileReference
                | Self::Group
                | Self::VariantGroup
                | Self::VersionGroup
                | Self::ReferenceProxy
        )
    }

    /// Returns `true` for the group-like kinds.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group | Self::VariantGroup | Self::VersionGroup)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.isa())
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_isa(s).ok_or_else(|| TypeError::UnknownIsa(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn isa_roundtrip_for_every_kind() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_isa(kind.isa()), Some(kind));
            assert_eq!(kind.isa().parse::<ObjectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn all_is_sorted_and_unique() {
        let unique: HashSet<_> = ObjectKind::ALL.iter().collect();
        assert_eq!(unique.len(), ObjectKind::ALL.len());
        assert!(ObjectKind::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn section_order_is_alphabetical_by_isa() {
        let isas: Vec<_> = ObjectKind::ALL.iter().map(|k| k.isa()).collect();
        let mut sorted = isas.clone();
        sorted.sort();
        assert_eq!(isas, sorted);
    }

    #[test]
    fn unknown_isa_is_rejected() {
        assert_eq!(ObjectKind::from_isa("PBXNope"), None);
        assert_eq!(
            "PBXNope".parse::<ObjectKind>(),
            Err(TypeError::UnknownIsa("PBXNope".into()))
        );
    }

    #[test]
    fn classification() {
        assert!(ObjectKind::LegacyTarget.is_target());
        assert!(!ObjectKind::Project.is_target());
        assert!(ObjectKind::RezBuildPhase.is_build_phase());
        assert!(ObjectKind::ReferenceProxy.is_file_element());
        assert!(!ObjectKind::BuildFile.is_file_element());
        assert!(ObjectKind::VersionGroup.is_group());
    }

    #[test]
    fn display_is_isa() {
        assert_eq!(format!("{}", ObjectKind::BuildConfiguration), "XCBuildConfiguration");
    }
}

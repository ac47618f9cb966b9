use pbx_types::ObjectKind;

/// The 2-letter prefix every generated reference of `kind` starts with.
pub fn reference_prefix(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::AggregateTarget => "AT",
        ObjectKind::BuildFile => "BF",
        ObjectKind::BuildRule => "BR",
        ObjectKind::ContainerItemProxy => "CP",
        ObjectKind::CopyFilesBuildPhase => "CF",
        ObjectKind::FileReference => "FR",
        ObjectKind::FrameworksBuildPhase => "FB",
        ObjectKind::Group => "GR",
        ObjectKind::HeadersBuildPhase => "HB",
        ObjectKind::LegacyTarget => "LT",
        ObjectKind::NativeTarget => "NT",
        ObjectKind::Project => "PR",
        ObjectKind::ReferenceProxy => "RP",
        ObjectKind::ResourcesBuildPhase => "RB",
        ObjectKind::RezBuildPhase => "RZ",
        ObjectKind::ShellScriptBuildPhase => "SS",
        ObjectKind::SourcesBuildPhase => "SB",
        ObjectKind::TargetDependency => "TD",
        ObjectKind::VariantGroup => "VG",
        ObjectKind::BuildConfiguration => "BC",
        ObjectKind::ConfigurationList => "CL",
        ObjectKind::VersionGroup => "XV",
    }
}

//! Parsed values to object graph.
//!
//! Records are independent, so they are parsed in parallel. Every textual
//! reference goes through one [`ReferenceRegistry`], which makes forward
//! references work and gives every edge to the same value a shared
//! [`ObjectReference`]. Any malformed record aborts the whole decode.

use std::collections::BTreeMap;

use pbx_store::objects::{
    BuildConfiguration, BuildFile, BuildPhase, BuildRule, ConfigurationList, ContainerItemProxy,
    CopyFilesPhase, FileElement, FileReference, Group, LegacyTarget, Project, ProjectReference,
    ProxyType, ReferenceProxy, RemoteGlobalId, ShellScriptPhase, SourceTree, Target,
    TargetDependency, VersionGroup, DEFAULT_BUILD_ACTION_MASK, TARGET_ATTRIBUTES_KEY,
};
use pbx_store::{
    ObjectGraph, ProjectDocument, ProjectObject, ReferenceRegistry, DEFAULT_ARCHIVE_VERSION,
};
use pbx_types::{ObjectKind, RawValue};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{DecodeError, DecodeResult};
use crate::fields::{DecodeContext, RecordFields};

const ROOT: &str = "<root>";

/// Builds a [`ProjectDocument`] from parser output.
#[derive(Clone, Debug, Default)]
pub struct ProjectDecoder {
    project_name: String,
}

impl ProjectDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The project's name is not stored in the document; it comes from the
    /// bundle's file name and shows up in configuration list comments.
    pub fn with_project_name(name: impl Into<String>) -> Self {
        Self {
            project_name: name.into(),
        }
    }

    pub fn decode(&self, root: &RawValue) -> DecodeResult<ProjectDocument> {
        let root = root.as_dictionary().ok_or_else(|| DecodeError::WrongType {
            reference: ROOT.into(),
            field: ROOT.into(),
        })?;
        let graph = ObjectGraph::new();
        let registry = ReferenceRegistry::new(&graph);
        let empty = BTreeMap::new();
        let header_ctx = DecodeContext {
            registry: &registry,
            objects: &empty,
            project_name: &self.project_name,
        };
        let header = RecordFields::new(ROOT, root, &header_ctx);

        let archive_version = header.u32_or("archiveVersion", DEFAULT_ARCHIVE_VERSION)?;
        let object_version = header.u32_or("objectVersion", 0)?;
        let classes = header.opt_dictionary("classes")?.unwrap_or_default();
        let root_value = header.string("rootObject")?;
        let objects = header.dictionary_ref("objects")?;

        let ctx = DecodeContext {
            registry: &registry,
            objects,
            project_name: &self.project_name,
        };
        let parsed = objects
            .par_iter()
            .map(|(value, record)| parse_record(value, record, &ctx).map(|o| (value, o)))
            .collect::<DecodeResult<Vec<_>>>()?;

        for (value, object) in parsed {
            graph.insert(&registry.get_or_create(value), object);
        }
        debug!(references = registry.len(), "resolved references");

        let root_object = registry.get_or_create(&root_value);
        let root_kind = graph.with_objects(|o| o.kind_of(&root_value));
        if root_kind != Some(ObjectKind::Project) {
            return Err(DecodeError::RootObjectNotProject(root_value));
        }

        info!(objects = graph.len(), object_version, "decoded project");
        Ok(ProjectDocument {
            archive_version,
            object_version,
            classes,
            root_object: Some(root_object),
            graph,
        })
    }
}

fn parse_record(
    value: &str,
    record: &RawValue,
    ctx: &DecodeContext<'_>,
) -> DecodeResult<ProjectObject> {
    let record = record.as_dictionary().ok_or_else(|| DecodeError::WrongType {
        reference: value.to_string(),
        field: "isa".into(),
    })?;
    let isa = record
        .get("isa")
        .ok_or_else(|| DecodeError::MissingDiscriminator {
            reference: value.to_string(),
        })?
        .as_str()
        .ok_or_else(|| DecodeError::WrongType {
            reference: value.to_string(),
            field: "isa".into(),
        })?;
    let kind = ObjectKind::from_isa(isa).ok_or_else(|| DecodeError::UnknownVariant(isa.into()))?;
    parse_object(kind, &RecordFields::new(value, record, ctx))
}

/// The single `isa` dispatch point. Every [`ObjectKind`] has an arm.
pub(crate) fn parse_object(kind: ObjectKind, f: &RecordFields<'_>) -> DecodeResult<ProjectObject> {
    Ok(match kind {
        ObjectKind::AggregateTarget => ProjectObject::AggregateTarget(target(f)?),
        ObjectKind::BuildFile => ProjectObject::BuildFile(BuildFile {
            file: f.opt_reference("fileRef")?,
            settings: f.opt_dictionary("settings")?,
        }),
        ObjectKind::BuildRule => ProjectObject::BuildRule(build_rule(f)?),
        ObjectKind::ContainerItemProxy => ProjectObject::ContainerItemProxy(container_proxy(f)?),
        ObjectKind::CopyFilesBuildPhase => ProjectObject::CopyFilesBuildPhase(CopyFilesPhase {
            phase: build_phase(f)?,
            name: f.opt_string("name")?,
            dst_path: f.opt_string("dstPath")?,
            dst_subfolder_spec: f.opt_u32("dstSubfolderSpec")?,
        }),
        ObjectKind::FileReference => ProjectObject::FileReference(FileReference {
            element: file_element(f)?,
            file_encoding: f.opt_u32("fileEncoding")?,
            explicit_file_type: f.opt_string("explicitFileType")?,
            last_known_file_type: f.opt_string("lastKnownFileType")?,
            line_ending: f.opt_u32("lineEnding")?,
            language_specification_identifier: f.opt_string("xcLanguageSpecificationIdentifier")?,
        }),
        ObjectKind::FrameworksBuildPhase => ProjectObject::FrameworksBuildPhase(build_phase(f)?),
        ObjectKind::Group => ProjectObject::Group(group(f)?),
        ObjectKind::HeadersBuildPhase => ProjectObject::HeadersBuildPhase(build_phase(f)?),
        ObjectKind::LegacyTarget => ProjectObject::LegacyTarget(LegacyTarget {
            target: target(f)?,
            build_tool_path: f.opt_string("buildToolPath")?,
            build_arguments_string: f.opt_string("buildArgumentsString")?,
            pass_build_settings_in_environment: f.bool("passBuildSettingsInEnvironment")?,
            build_working_directory: f.opt_string("buildWorkingDirectory")?,
        }),
        ObjectKind::NativeTarget => {
            let mut t = target(f)?;
            t.product_install_path = f.opt_string("productInstallPath")?;
            ProjectObject::NativeTarget(t)
        }
        ObjectKind::Project => ProjectObject::Project(project(f)?),
        ObjectKind::ReferenceProxy => ProjectObject::ReferenceProxy(ReferenceProxy {
            element: file_element(f)?,
            file_type: f.opt_string("fileType")?,
            remote_ref: f.opt_reference("remoteRef")?,
        }),
        ObjectKind::ResourcesBuildPhase => ProjectObject::ResourcesBuildPhase(build_phase(f)?),
        ObjectKind::RezBuildPhase => ProjectObject::RezBuildPhase(build_phase(f)?),
        ObjectKind::ShellScriptBuildPhase => {
            ProjectObject::ShellScriptBuildPhase(ShellScriptPhase {
                phase: build_phase(f)?,
                name: f.opt_string("name")?,
                input_paths: f.strings("inputPaths")?,
                output_paths: f.strings("outputPaths")?,
                shell_path: f
                    .opt_string("shellPath")?
                    .unwrap_or_else(|| "/bin/sh".to_string()),
                shell_script: f.opt_string("shellScript")?,
                show_env_vars_in_log: f.opt_bool("showEnvVarsInLog")?,
            })
        }
        ObjectKind::SourcesBuildPhase => ProjectObject::SourcesBuildPhase(build_phase(f)?),
        ObjectKind::TargetDependency => ProjectObject::TargetDependency(TargetDependency {
            name: f.opt_string("name")?,
            target: f.opt_reference("target")?,
            target_proxy: f.opt_reference("targetProxy")?,
        }),
        ObjectKind::VariantGroup => ProjectObject::VariantGroup(group(f)?),
        ObjectKind::BuildConfiguration => ProjectObject::BuildConfiguration(BuildConfiguration {
            name: f.string("name")?,
            build_settings: f.dictionary("buildSettings")?,
            base_configuration: f.opt_reference("baseConfigurationReference")?,
        }),
        ObjectKind::ConfigurationList => ProjectObject::ConfigurationList(ConfigurationList {
            build_configurations: f.required_references("buildConfigurations")?,
            default_configuration_is_visible: f.bool("defaultConfigurationIsVisible")?,
            default_configuration_name: f.opt_string("defaultConfigurationName")?,
        }),
        ObjectKind::VersionGroup => ProjectObject::VersionGroup(VersionGroup {
            group: group(f)?,
            current_version: f.opt_reference("currentVersion")?,
            version_group_type: f.opt_string("versionGroupType")?,
        }),
    })
}

fn file_element(f: &RecordFields<'_>) -> DecodeResult<FileElement> {
    Ok(FileElement {
        source_tree: f.opt_string("sourceTree")?.map(|s| SourceTree::parse(&s)),
        name: f.opt_string("name")?,
        path: f.opt_string("path")?,
        include_in_index: f.opt_bool("includeInIndex")?,
        uses_tabs: f.opt_bool("usesTabs")?,
        indent_width: f.opt_u32("indentWidth")?,
        tab_width: f.opt_u32("tabWidth")?,
        wraps_lines: f.opt_bool("wrapsLines")?,
    })
}

fn group(f: &RecordFields<'_>) -> DecodeResult<Group> {
    Ok(Group {
        element: file_element(f)?,
        children: f.references("children")?,
    })
}

fn build_phase(f: &RecordFields<'_>) -> DecodeResult<BuildPhase> {
    Ok(BuildPhase {
        build_action_mask: f.u32_or("buildActionMask", DEFAULT_BUILD_ACTION_MASK)?,
        files: f.references("files")?,
        input_file_list_paths: f.opt_strings("inputFileListPaths")?,
        output_file_list_paths: f.opt_strings("outputFileListPaths")?,
        run_only_for_deployment_postprocessing: f.bool("runOnlyForDeploymentPostprocessing")?,
    })
}

fn target(f: &RecordFields<'_>) -> DecodeResult<Target> {
    Ok(Target {
        name: f.string("name")?,
        build_configuration_list: f.opt_reference("buildConfigurationList")?,
        build_phases: f.references("buildPhases")?,
        build_rules: f.references("buildRules")?,
        dependencies: f.references("dependencies")?,
        product_name: f.opt_string("productName")?,
        product_reference: f.opt_reference("productReference")?,
        product_type: f.opt_string("productType")?,
        product_install_path: None,
    })
}

fn build_rule(f: &RecordFields<'_>) -> DecodeResult<BuildRule> {
    Ok(BuildRule {
        name: f.opt_string("name")?,
        compiler_spec: f.string("compilerSpec")?,
        file_patterns: f.opt_string("filePatterns")?,
        file_type: f.string("fileType")?,
        is_editable: f.bool("isEditable")?,
        output_files: f.strings("outputFiles")?,
        output_files_compiler_flags: f.opt_strings("outputFilesCompilerFlags")?,
        script: f.opt_string("script")?,
        run_once_per_architecture: f.opt_bool("runOncePerArchitecture")?,
    })
}

fn container_proxy(f: &RecordFields<'_>) -> DecodeResult<ContainerItemProxy> {
    // Remote ids name objects in this document only for proxies to local
    // targets; anything else stays an opaque string.
    let remote_global_id = f.opt_string("remoteGlobalIDString")?.map(|value| {
        if f.is_local(&value) {
            RemoteGlobalId::Reference(f.registry_reference(&value))
        } else {
            RemoteGlobalId::String(value)
        }
    });
    Ok(ContainerItemProxy {
        container_portal: f.reference("containerPortal")?,
        proxy_type: f.opt_u32("proxyType")?.map(ProxyType::from_code),
        remote_global_id,
        remote_info: f.opt_string("remoteInfo")?,
    })
}

fn project(f: &RecordFields<'_>) -> DecodeResult<Project> {
    let mut attributes = f.opt_dictionary("attributes")?.unwrap_or_default();
    let mut target_attributes = Vec::new();
    if let Some(raw) = attributes.remove(TARGET_ATTRIBUTES_KEY) {
        let per_target = raw
            .as_dictionary()
            .ok_or_else(|| f.wrong_nested("attributes", TARGET_ATTRIBUTES_KEY))?;
        for (value, attrs) in per_target {
            let attrs = attrs
                .as_dictionary()
                .ok_or_else(|| f.wrong_nested(TARGET_ATTRIBUTES_KEY, value))?;
            if !f.is_local(value) {
                warn!(target = %value, "target attributes for unknown object");
            }
            target_attributes.push((f.registry_reference(value), attrs.clone()));
        }
    }

    let project_references = match f.opt_raw_array("projectReferences")? {
        None => Vec::new(),
        Some(items) => items
            .iter()
            .map(|item| {
                let product_group = item
                    .get("ProductGroup")
                    .and_then(RawValue::as_str)
                    .ok_or_else(|| f.wrong_nested("projectReferences", "ProductGroup"))?;
                let project_ref = item
                    .get("ProjectRef")
                    .and_then(RawValue::as_str)
                    .ok_or_else(|| f.wrong_nested("projectReferences", "ProjectRef"))?;
                Ok(ProjectReference {
                    product_group: f.registry_reference(product_group),
                    project_ref: f.registry_reference(project_ref),
                })
            })
            .collect::<DecodeResult<Vec<_>>>()?,
    };

    Ok(Project {
        name: f.project_name().to_string(),
        build_configuration_list: f.reference("buildConfigurationList")?,
        compatibility_version: f.string("compatibilityVersion")?,
        development_region: f.opt_string("developmentRegion")?,
        has_scanned_for_encodings: f.bool("hasScannedForEncodings")?,
        known_regions: f.strings("knownRegions")?,
        main_group: f.reference("mainGroup")?,
        product_ref_group: f.opt_reference("productRefGroup")?,
        project_dir_path: f.opt_string("projectDirPath")?.unwrap_or_default(),
        project_references,
        project_roots: project_roots(f)?,
        targets: f.references("targets")?,
        attributes,
        target_attributes,
    })
}

fn project_roots(f: &RecordFields<'_>) -> DecodeResult<Vec<String>> {
    if let Some(roots) = f.opt_strings("projectRoots")? {
        return Ok(roots);
    }
    Ok(f.opt_string("projectRoot")?
        .filter(|root| !root.is_empty())
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_store::GraphError;

    fn s(v: &str) -> RawValue {
        RawValue::from(v)
    }

    fn dict(entries: &[(&str, RawValue)]) -> RawValue {
        RawValue::Dictionary(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn refs(values: &[&str]) -> RawValue {
        RawValue::Array(values.iter().map(|v| s(v)).collect())
    }

    fn document(objects: Vec<(&str, RawValue)>, root: &str) -> RawValue {
        dict(&[
            ("archiveVersion", s("1")),
            ("classes", dict(&[])),
            ("objectVersion", s("46")),
            ("objects", dict(&objects)),
            ("rootObject", s(root)),
        ])
    }

    fn minimal_objects() -> Vec<(&'static str, RawValue)> {
        vec![
            (
                "PROJECT",
                dict(&[
                    ("isa", s("PBXProject")),
                    ("buildConfigurationList", s("LIST")),
                    ("compatibilityVersion", s("Xcode 3.2")),
                    ("mainGroup", s("MAIN")),
                    ("targets", refs(&["TARGET"])),
                ]),
            ),
            (
                "LIST",
                dict(&[
                    ("isa", s("XCConfigurationList")),
                    ("buildConfigurations", refs(&["DEBUG"])),
                ]),
            ),
            (
                "DEBUG",
                dict(&[
                    ("isa", s("XCBuildConfiguration")),
                    ("name", s("Debug")),
                    ("buildSettings", dict(&[("SDKROOT", s("iphoneos"))])),
                ]),
            ),
            (
                "MAIN",
                dict(&[
                    ("isa", s("PBXGroup")),
                    ("children", refs(&["FILE"])),
                    ("sourceTree", s("<group>")),
                ]),
            ),
            (
                "FILE",
                dict(&[
                    ("isa", s("PBXFileReference")),
                    ("path", s("main.swift")),
                    ("sourceTree", s("<group>")),
                    ("lastKnownFileType", s("sourcecode.swift")),
                ]),
            ),
            (
                "TARGET",
                dict(&[
                    ("isa", s("PBXNativeTarget")),
                    ("name", s("App")),
                    ("buildPhases", refs(&["SOURCES"])),
                    ("productInstallPath", s("/Applications")),
                ]),
            ),
            (
                "SOURCES",
                dict(&[
                    ("isa", s("PBXSourcesBuildPhase")),
                    ("buildActionMask", s("2147483647")),
                    ("files", refs(&["BUILD"])),
                    ("runOnlyForDeploymentPostprocessing", s("0")),
                ]),
            ),
            (
                "BUILD",
                dict(&[("isa", s("PBXBuildFile")), ("fileRef", s("FILE"))]),
            ),
        ]
    }

    // -----------------------------------------------------------------------
    // Happy path
    // -----------------------------------------------------------------------

    #[test]
    fn decodes_minimal_project() {
        let doc = ProjectDecoder::with_project_name("App")
            .decode(&document(minimal_objects(), "PROJECT"))
            .unwrap();
        assert_eq!(doc.archive_version, 1);
        assert_eq!(doc.object_version, 46);
        assert_eq!(doc.graph.len(), 8);

        let project = doc.project().unwrap();
        assert_eq!(project.name, "App");
        assert_eq!(project.targets.len(), 1);

        let target: Target = project.targets[0].object().unwrap();
        assert_eq!(target.name, "App");
        assert_eq!(target.product_install_path.as_deref(), Some("/Applications"));

        let phase: BuildPhase = target.build_phases[0].object().unwrap();
        let build_file: BuildFile = phase.files[0].object().unwrap();
        let file: FileReference = build_file.file.unwrap().object().unwrap();
        assert_eq!(file.element.source_tree, Some(SourceTree::Group));
        assert_eq!(file.last_known_file_type.as_deref(), Some("sourcecode.swift"));
    }

    #[test]
    fn edges_to_the_same_value_share_one_reference() {
        let doc = ProjectDecoder::new()
            .decode(&document(minimal_objects(), "PROJECT"))
            .unwrap();
        let group: Group = doc.project().unwrap().main_group.object().unwrap();
        let build_file = doc
            .graph
            .get_object("BUILD")
            .and_then(|o| match o {
                ProjectObject::BuildFile(b) => b.file,
                _ => None,
            })
            .unwrap();
        assert!(group.children[0].ptr_eq(&build_file));
        assert!(doc.graph.temporary_references().is_empty());
    }

    #[test]
    fn header_defaults() {
        let raw = dict(&[
            ("objects", dict(&minimal_objects())),
            ("rootObject", s("PROJECT")),
        ]);
        let doc = ProjectDecoder::new().decode(&raw).unwrap();
        assert_eq!(doc.archive_version, 1);
        assert_eq!(doc.object_version, 0);
        assert!(doc.classes.is_empty());
    }

    #[test]
    fn integer_input_is_accepted() {
        let mut objects = minimal_objects();
        objects.push((
            "COPY",
            dict(&[
                ("isa", s("PBXCopyFilesBuildPhase")),
                ("dstSubfolderSpec", RawValue::Integer(10)),
                ("runOnlyForDeploymentPostprocessing", RawValue::Integer(1)),
            ]),
        ));
        let mut raw = document(objects, "PROJECT");
        if let RawValue::Dictionary(map) = &mut raw {
            map.insert("objectVersion".into(), RawValue::Integer(56));
        }
        let doc = ProjectDecoder::new().decode(&raw).unwrap();
        assert_eq!(doc.object_version, 56);
        let copy: CopyFilesPhase = doc.graph.reference("COPY").object().unwrap();
        assert_eq!(copy.dst_subfolder_spec, Some(10));
        assert!(copy.phase.run_only_for_deployment_postprocessing);
        assert_eq!(copy.phase.build_action_mask, DEFAULT_BUILD_ACTION_MASK);
    }

    #[test]
    fn dangling_edges_survive_decode() {
        let mut objects = minimal_objects();
        objects.retain(|(k, _)| *k != "FILE");
        let doc = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap();
        let build_file: BuildFile = doc.graph.reference("BUILD").object().unwrap();
        let err = build_file.file.unwrap().object::<FileReference>().unwrap_err();
        assert_eq!(err, GraphError::DanglingReference("FILE".into()));
    }

    #[test]
    fn proxy_remote_ids_split_local_and_foreign() {
        let mut objects = minimal_objects();
        objects.push((
            "LOCAL_PROXY",
            dict(&[
                ("isa", s("PBXContainerItemProxy")),
                ("containerPortal", s("PROJECT")),
                ("proxyType", s("1")),
                ("remoteGlobalIDString", s("TARGET")),
                ("remoteInfo", s("App")),
            ]),
        ));
        objects.push((
            "REMOTE_PROXY",
            dict(&[
                ("isa", s("PBXContainerItemProxy")),
                ("containerPortal", s("FILE")),
                ("proxyType", s("2")),
                ("remoteGlobalIDString", s("ELSEWHERE")),
            ]),
        ));
        let doc = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap();
        let local: ContainerItemProxy = doc.graph.reference("LOCAL_PROXY").object().unwrap();
        assert!(matches!(local.remote_global_id, Some(RemoteGlobalId::Reference(_))));
        assert_eq!(local.proxy_type, Some(ProxyType::NativeTarget));
        let remote: ContainerItemProxy = doc.graph.reference("REMOTE_PROXY").object().unwrap();
        assert_eq!(remote.remote_global_id, Some(RemoteGlobalId::String("ELSEWHERE".into())));
    }

    #[test]
    fn target_attributes_are_keyed_by_reference() {
        let mut objects = minimal_objects();
        if let RawValue::Dictionary(project) = &mut objects[0].1 {
            project.insert(
                "attributes".into(),
                dict(&[
                    ("LastUpgradeCheck", s("1500")),
                    (
                        "TargetAttributes",
                        dict(&[("TARGET", dict(&[("CreatedOnToolsVersion", s("15.0"))]))]),
                    ),
                ]),
            );
        }
        let doc = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap();
        let project = doc.project().unwrap();
        assert_eq!(project.attributes.len(), 1);
        let target = doc.graph.reference("TARGET");
        let attrs = project.attributes_for(&target).unwrap();
        assert_eq!(attrs.get("CreatedOnToolsVersion"), Some(&s("15.0")));
    }

    #[test]
    fn project_roots_read_from_either_key() {
        let decode_with = |key: &str, value: RawValue| {
            let mut objects = minimal_objects();
            if let RawValue::Dictionary(project) = &mut objects[0].1 {
                project.insert(key.into(), value);
            }
            let doc = ProjectDecoder::new()
                .decode(&document(objects, "PROJECT"))
                .unwrap();
            doc.project().unwrap().project_roots
        };
        assert_eq!(decode_with("projectRoots", refs(&["a", "b"])), ["a", "b"]);
        assert_eq!(decode_with("projectRoot", s("src")), ["src"]);
        assert!(decode_with("projectRoot", s("")).is_empty());
    }

    #[test]
    fn integers_in_free_form_bags_are_stored_as_text() {
        let mut objects = minimal_objects();
        if let RawValue::Dictionary(project) = &mut objects[0].1 {
            project.insert(
                "attributes".into(),
                dict(&[
                    ("LastUpgradeCheck", RawValue::from(1500)),
                    (
                        "TargetAttributes",
                        dict(&[("TARGET", dict(&[("DevelopmentTeam", RawValue::from(42))]))]),
                    ),
                ]),
            );
        }
        let doc = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap();
        let project = doc.project().unwrap();
        assert_eq!(project.attributes.get("LastUpgradeCheck"), Some(&s("1500")));
        let attrs = project.attributes_for(&doc.graph.reference("TARGET")).unwrap();
        assert_eq!(attrs.get("DevelopmentTeam"), Some(&s("42")));
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[test]
    fn missing_isa() {
        let mut objects = minimal_objects();
        objects.push(("BAD", dict(&[("name", s("x"))])));
        let err = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap_err();
        assert_eq!(err, DecodeError::MissingDiscriminator { reference: "BAD".into() });
    }

    #[test]
    fn unknown_isa() {
        let mut objects = minimal_objects();
        objects.push(("BAD", dict(&[("isa", s("PBXMystery"))])));
        let err = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap_err();
        assert_eq!(err, DecodeError::UnknownVariant("PBXMystery".into()));
    }

    #[test]
    fn missing_required_field() {
        let mut objects = minimal_objects();
        objects.push(("BAD", dict(&[("isa", s("PBXNativeTarget"))])));
        let err = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                reference: "BAD".into(),
                field: "name".into()
            }
        );
    }

    #[test]
    fn wrong_field_type() {
        let mut objects = minimal_objects();
        objects.push((
            "BAD",
            dict(&[("isa", s("PBXGroup")), ("children", s("not-a-list"))]),
        ));
        let err = ProjectDecoder::new()
            .decode(&document(objects, "PROJECT"))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::WrongType {
                reference: "BAD".into(),
                field: "children".into()
            }
        );
    }

    #[test]
    fn missing_root_object_field() {
        let raw = dict(&[("objects", dict(&minimal_objects()))]);
        let err = ProjectDecoder::new().decode(&raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                reference: ROOT.into(),
                field: "rootObject".into()
            }
        );
    }

    #[test]
    fn root_must_be_a_project() {
        let err = ProjectDecoder::new()
            .decode(&document(minimal_objects(), "MAIN"))
            .unwrap_err();
        assert_eq!(err, DecodeError::RootObjectNotProject("MAIN".into()));
        let err = ProjectDecoder::new()
            .decode(&document(minimal_objects(), "NOWHERE"))
            .unwrap_err();
        assert_eq!(err, DecodeError::RootObjectNotProject("NOWHERE".into()));
    }

    #[test]
    fn non_dictionary_root() {
        let err = ProjectDecoder::new().decode(&s("nope")).unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { .. }));
    }

    #[test]
    fn every_kind_has_a_parser() {
        let graph = ObjectGraph::new();
        let registry = ReferenceRegistry::new(&graph);
        let objects = BTreeMap::new();
        let ctx = DecodeContext {
            registry: &registry,
            objects: &objects,
            project_name: "",
        };
        let record: BTreeMap<String, RawValue> = [
            ("name", s("N")),
            ("compilerSpec", s("c")),
            ("fileType", s("f")),
            ("containerPortal", s("P")),
            ("buildSettings", dict(&[])),
            ("buildConfigurations", refs(&[])),
            ("buildConfigurationList", s("L")),
            ("compatibilityVersion", s("Xcode 3.2")),
            ("mainGroup", s("G")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        for kind in ObjectKind::ALL {
            let fields = RecordFields::new("R", &record, &ctx);
            let object = parse_object(kind, &fields).unwrap();
            assert_eq!(object.kind(), kind);
        }
    }
}

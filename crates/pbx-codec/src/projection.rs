//! Projects stored objects into `(key, value)` plist pairs.
//!
//! Projection reads the whole graph to attach comments, such as a build
//! file's `a.swift in Sources`, and applies the ordering policy from
//! [`OutputSettings`]. It never writes to the graph.

use std::collections::{BTreeMap, HashMap};

use pbx_store::objects::{
    BuildPhase, ConfigurationList, FileElement, Group, Project, Target, TARGET_ATTRIBUTES_KEY,
};
use pbx_store::{Entry, GraphResult, ObjectBuckets, ObjectReference, ProjectObject};
use pbx_types::{CommentedString, ObjectKind, PlistDictionary, PlistValue, RawValue};

use crate::settings::{
    BuildPhaseFileSortOrder, FileListSortOrder, NavigatorSortOrder, OutputSettings,
};

const NULL_FILE_NAME: &str = "(null)";
const PROJECT_OBJECT: &str = "Project object";

/// A projected section entry.
pub(crate) type Projected = (CommentedString, PlistValue);

/// Whether entries of `kind` are written across several lines.
pub(crate) fn is_multiline(kind: ObjectKind) -> bool {
    !matches!(kind, ObjectKind::BuildFile | ObjectKind::FileReference)
}

fn list_comment(isa: &str, owner: &str) -> String {
    format!("Build configuration list for {isa} \"{owner}\"")
}

fn flag(value: bool) -> PlistValue {
    PlistValue::string(if value { "1" } else { "0" })
}

fn number(value: u32) -> PlistValue {
    PlistValue::string(value.to_string())
}

fn reference(r: &ObjectReference, comment: Option<String>) -> PlistValue {
    PlistValue::String(CommentedString::with_optional_comment(r.value(), comment))
}

fn raw_dictionary(bag: &BTreeMap<String, RawValue>) -> PlistValue {
    PlistValue::Dictionary(
        bag.iter()
            .map(|(k, v)| (CommentedString::new(k.as_str()), PlistValue::from(v)))
            .collect(),
    )
}

/// Graph-wide lookups shared by every projection of one encode.
pub(crate) struct EncodeContext<'a> {
    objects: &'a ObjectBuckets,
    settings: &'a OutputSettings,
    phase_names: HashMap<String, &'a str>,
    list_owners: HashMap<String, String>,
}

impl<'a> EncodeContext<'a> {
    pub fn new(objects: &'a ObjectBuckets, settings: &'a OutputSettings) -> Self {
        let mut phase_names = HashMap::new();
        let mut list_owners = HashMap::new();
        for entry in objects.iter() {
            let object = &entry.object;
            if let (Some(phase), Some(name)) = (object.build_phase(), object.build_phase_name()) {
                for file in &phase.files {
                    phase_names.entry(file.value()).or_insert(name);
                }
            }
            if let ProjectObject::Project(project) = object {
                list_owners.insert(
                    project.build_configuration_list.value(),
                    list_comment(object.isa(), &project.name),
                );
            } else if let Some(target) = object.target() {
                if let Some(list) = &target.build_configuration_list {
                    list_owners.insert(list.value(), list_comment(object.isa(), &target.name));
                }
            }
        }
        Self {
            objects,
            settings,
            phase_names,
            list_owners,
        }
    }

    // ---- Lookups ----

    fn object(&self, r: &ObjectReference) -> Option<&'a ProjectObject> {
        self.objects.object(&r.value())
    }

    fn file_name(&self, r: &ObjectReference) -> Option<String> {
        self.object(r).and_then(|o| o.file_name()).map(str::to_string)
    }

    /// File name of a required file element edge. Dangling or mistyped
    /// edges are errors.
    fn strict_file_name(&self, r: &ObjectReference) -> GraphResult<Option<String>> {
        Ok(self
            .objects
            .resolve::<FileElement>(r)?
            .file_name()
            .map(str::to_string))
    }

    fn path_or_value(&self, r: &ObjectReference) -> String {
        self.object(r)
            .and_then(|o| o.file_element())
            .and_then(|e| e.path.clone())
            .unwrap_or_else(|| r.value())
    }

    fn build_file_name(&self, build_file: &ObjectReference) -> Option<String> {
        match self.object(build_file) {
            Some(ProjectObject::BuildFile(b)) => b.file.as_ref().and_then(|f| self.file_name(f)),
            _ => None,
        }
    }

    fn build_file_path(&self, build_file: &ObjectReference) -> String {
        match self.object(build_file) {
            Some(ProjectObject::BuildFile(b)) => b
                .file
                .as_ref()
                .and_then(|f| self.object(f))
                .and_then(|o| o.file_element())
                .and_then(|e| e.path.clone())
                .unwrap_or_else(|| build_file.value()),
            _ => build_file.value(),
        }
    }

    fn display_name(&self, r: &ObjectReference) -> Option<String> {
        self.object(r).and_then(|o| o.display_name()).map(str::to_string)
    }

    // ---- Ordering ----

    /// Entries of one section in listing order.
    pub fn section(&self, kind: ObjectKind) -> Vec<&'a Entry> {
        let mut entries: Vec<&'a Entry> = self.objects.bucket(kind).collect();
        if self.settings.file_list_order == FileListSortOrder::ByFilename {
            match kind {
                ObjectKind::FileReference => {
                    entries.sort_by_cached_key(|e| self.path_or_value(&e.reference))
                }
                ObjectKind::BuildFile => {
                    entries.sort_by_cached_key(|e| self.build_file_path(&e.reference))
                }
                _ => {}
            }
        }
        entries
    }

    fn ordered_children(&self, children: &[ObjectReference]) -> Vec<ObjectReference> {
        let mut children = children.to_vec();
        match self.settings.navigator_order {
            NavigatorSortOrder::Unsorted => {}
            NavigatorSortOrder::ByFilename => {
                children.sort_by_cached_key(|c| self.path_or_value(c))
            }
            NavigatorSortOrder::ByFilenameGroupsFirst => children.sort_by_cached_key(|c| {
                let is_group = self
                    .objects
                    .kind_of(&c.value())
                    .map(|k| k.is_group())
                    .unwrap_or(false);
                (!is_group, self.path_or_value(c))
            }),
        }
        children
    }

    fn ordered_files(&self, files: &[ObjectReference]) -> Vec<ObjectReference> {
        let mut files = files.to_vec();
        if self.settings.build_phase_file_order == BuildPhaseFileSortOrder::ByFilename {
            files.sort_by_cached_key(|f| self.build_file_path(f));
        }
        files
    }

    // ---- Projection ----

    /// Project one stored object into its section entry.
    pub fn project(&self, entry: &Entry) -> GraphResult<Projected> {
        let object = &entry.object;
        let mut d = PlistDictionary::new();
        d.insert("isa", PlistValue::string(object.isa()));

        let comment = match object {
            ProjectObject::AggregateTarget(t) => {
                self.target(&mut d, object.isa(), t, false);
                Some(t.name.clone())
            }
            ProjectObject::NativeTarget(t) => {
                self.target(&mut d, object.isa(), t, true);
                d.insert_opt(
                    "productInstallPath",
                    t.product_install_path.as_deref().map(PlistValue::string),
                );
                Some(t.name.clone())
            }
            ProjectObject::LegacyTarget(t) => {
                self.target(&mut d, object.isa(), &t.target, false);
                d.insert_opt(
                    "buildArgumentsString",
                    t.build_arguments_string.as_deref().map(PlistValue::string),
                );
                d.insert_opt("buildToolPath", t.build_tool_path.as_deref().map(PlistValue::string));
                d.insert_opt(
                    "buildWorkingDirectory",
                    t.build_working_directory.as_deref().map(PlistValue::string),
                );
                d.insert(
                    "passBuildSettingsInEnvironment",
                    flag(t.pass_build_settings_in_environment),
                );
                Some(t.target.name.clone())
            }
            ProjectObject::BuildFile(b) => {
                let file_name = match &b.file {
                    Some(file) => {
                        let name = self.strict_file_name(file)?;
                        d.insert("fileRef", reference(file, name.clone()));
                        name
                    }
                    None => None,
                };
                d.insert_opt("settings", b.settings.as_ref().map(raw_dictionary));
                self.phase_names.get(&entry.reference.value()).map(|phase| {
                    format!("{} in {phase}", file_name.as_deref().unwrap_or(NULL_FILE_NAME))
                })
            }
            ProjectObject::BuildRule(r) => {
                d.insert("compilerSpec", PlistValue::string(r.compiler_spec.as_str()));
                d.insert_opt("filePatterns", r.file_patterns.as_deref().map(PlistValue::string));
                d.insert("fileType", PlistValue::string(r.file_type.as_str()));
                d.insert("isEditable", flag(r.is_editable));
                d.insert_opt("name", r.name.as_deref().map(PlistValue::string));
                d.insert("outputFiles", PlistValue::strings(r.output_files.iter().cloned()));
                d.insert_opt(
                    "outputFilesCompilerFlags",
                    r.output_files_compiler_flags
                        .as_ref()
                        .map(|f| PlistValue::strings(f.iter().cloned())),
                );
                d.insert_opt("runOncePerArchitecture", r.run_once_per_architecture.map(flag));
                d.insert_opt("script", r.script.as_deref().map(PlistValue::string));
                Some(object.isa().to_string())
            }
            ProjectObject::ContainerItemProxy(p) => {
                let portal = match self.object(&p.container_portal) {
                    Some(ProjectObject::Project(_)) => Some(PROJECT_OBJECT.to_string()),
                    Some(other) => other.file_name().map(str::to_string),
                    None => None,
                };
                d.insert("containerPortal", reference(&p.container_portal, portal));
                d.insert_opt("proxyType", p.proxy_type.as_ref().map(|t| number(t.code())));
                d.insert_opt(
                    "remoteGlobalIDString",
                    p.remote_global_id.as_ref().map(|id| PlistValue::string(id.value())),
                );
                d.insert_opt("remoteInfo", p.remote_info.as_deref().map(PlistValue::string));
                Some(object.isa().to_string())
            }
            ProjectObject::CopyFilesBuildPhase(p) => {
                let name = object.build_phase_name().unwrap_or_default();
                self.build_phase(&mut d, &p.phase, name);
                d.insert_opt("dstPath", p.dst_path.as_deref().map(PlistValue::string));
                d.insert_opt("dstSubfolderSpec", p.dst_subfolder_spec.map(number));
                d.insert_opt("name", p.name.as_deref().map(PlistValue::string));
                Some(name.to_string())
            }
            ProjectObject::FileReference(f) => {
                self.file_element(&mut d, &f.element);
                d.insert_opt(
                    "explicitFileType",
                    f.explicit_file_type.as_deref().map(PlistValue::string),
                );
                d.insert_opt("fileEncoding", f.file_encoding.map(number));
                d.insert_opt(
                    "lastKnownFileType",
                    f.last_known_file_type.as_deref().map(PlistValue::string),
                );
                d.insert_opt("lineEnding", f.line_ending.map(number));
                d.insert_opt(
                    "xcLanguageSpecificationIdentifier",
                    f.language_specification_identifier
                        .as_deref()
                        .map(PlistValue::string),
                );
                f.element.file_name().map(str::to_string)
            }
            ProjectObject::FrameworksBuildPhase(p)
            | ProjectObject::HeadersBuildPhase(p)
            | ProjectObject::ResourcesBuildPhase(p)
            | ProjectObject::RezBuildPhase(p)
            | ProjectObject::SourcesBuildPhase(p) => {
                let name = object.build_phase_name().unwrap_or_default();
                self.build_phase(&mut d, p, name);
                Some(name.to_string())
            }
            ProjectObject::Group(g) | ProjectObject::VariantGroup(g) => {
                self.group(&mut d, g)?;
                g.element.file_name().map(str::to_string)
            }
            ProjectObject::VersionGroup(v) => {
                self.group(&mut d, &v.group)?;
                d.insert_opt(
                    "currentVersion",
                    v.current_version
                        .as_ref()
                        .map(|c| reference(c, self.file_name(c))),
                );
                d.insert_opt(
                    "versionGroupType",
                    v.version_group_type.as_deref().map(PlistValue::string),
                );
                v.group
                    .element
                    .path
                    .as_deref()
                    .and_then(|p| p.rsplit('/').next())
                    .map(str::to_string)
            }
            ProjectObject::Project(p) => {
                self.project_fields(&mut d, p);
                Some(PROJECT_OBJECT.to_string())
            }
            ProjectObject::ReferenceProxy(p) => {
                self.file_element(&mut d, &p.element);
                d.insert_opt("fileType", p.file_type.as_deref().map(PlistValue::string));
                d.insert_opt(
                    "remoteRef",
                    p.remote_ref
                        .as_ref()
                        .map(|r| reference(r, Some(ObjectKind::ContainerItemProxy.isa().into()))),
                );
                p.element.path.clone()
            }
            ProjectObject::ShellScriptBuildPhase(p) => {
                let name = object.build_phase_name().unwrap_or_default();
                self.build_phase(&mut d, &p.phase, name);
                d.insert("inputPaths", PlistValue::strings(p.input_paths.iter().cloned()));
                d.insert_opt("name", p.name.as_deref().map(PlistValue::string));
                d.insert("outputPaths", PlistValue::strings(p.output_paths.iter().cloned()));
                d.insert("shellPath", PlistValue::string(p.shell_path.as_str()));
                d.insert_opt("shellScript", p.shell_script.as_deref().map(PlistValue::string));
                d.insert_opt("showEnvVarsInLog", p.show_env_vars_in_log.map(flag));
                Some(name.to_string())
            }
            ProjectObject::TargetDependency(t) => {
                d.insert_opt("name", t.name.as_deref().map(PlistValue::string));
                d.insert_opt(
                    "target",
                    t.target.as_ref().map(|r| reference(r, self.display_name(r))),
                );
                d.insert_opt(
                    "targetProxy",
                    t.target_proxy
                        .as_ref()
                        .map(|r| reference(r, Some(ObjectKind::ContainerItemProxy.isa().into()))),
                );
                Some(object.isa().to_string())
            }
            ProjectObject::BuildConfiguration(c) => {
                d.insert_opt(
                    "baseConfigurationReference",
                    c.base_configuration
                        .as_ref()
                        .map(|r| reference(r, self.file_name(r))),
                );
                d.insert("buildSettings", raw_dictionary(&c.build_settings));
                d.insert("name", PlistValue::string(c.name.as_str()));
                Some(c.name.clone())
            }
            ProjectObject::ConfigurationList(l) => {
                self.configuration_list(&mut d, l);
                self.list_owners.get(&entry.reference.value()).cloned()
            }
        };

        let key = CommentedString::with_optional_comment(entry.reference.value(), comment);
        Ok((key, PlistValue::Dictionary(d)))
    }

    fn file_element(&self, d: &mut PlistDictionary, e: &FileElement) {
        d.insert_opt("includeInIndex", e.include_in_index.map(flag));
        d.insert_opt("indentWidth", e.indent_width.map(number));
        d.insert_opt("name", e.name.as_deref().map(PlistValue::string));
        d.insert_opt("path", e.path.as_deref().map(PlistValue::string));
        d.insert_opt(
            "sourceTree",
            e.source_tree.as_ref().map(|t| PlistValue::string(t.as_str())),
        );
        d.insert_opt("tabWidth", e.tab_width.map(number));
        d.insert_opt("usesTabs", e.uses_tabs.map(flag));
        d.insert_opt("wrapsLines", e.wraps_lines.map(flag));
    }

    fn group(&self, d: &mut PlistDictionary, g: &Group) -> GraphResult<()> {
        self.file_element(d, &g.element);
        let children = self
            .ordered_children(&g.children)
            .iter()
            .map(|c| Ok(reference(c, self.strict_file_name(c)?)))
            .collect::<GraphResult<Vec<_>>>()?;
        d.insert("children", PlistValue::Array(children));
        Ok(())
    }

    fn build_phase(&self, d: &mut PlistDictionary, p: &BuildPhase, phase_name: &str) {
        d.insert("buildActionMask", number(p.build_action_mask));
        let files = self
            .ordered_files(&p.files)
            .iter()
            .map(|f| {
                let name = self.build_file_name(f);
                let comment = format!(
                    "{} in {phase_name}",
                    name.as_deref().unwrap_or(NULL_FILE_NAME)
                );
                reference(f, Some(comment))
            })
            .collect();
        d.insert("files", PlistValue::Array(files));
        d.insert_opt(
            "inputFileListPaths",
            p.input_file_list_paths
                .as_ref()
                .map(|paths| PlistValue::strings(paths.iter().cloned())),
        );
        d.insert_opt(
            "outputFileListPaths",
            p.output_file_list_paths
                .as_ref()
                .map(|paths| PlistValue::strings(paths.iter().cloned())),
        );
        d.insert(
            "runOnlyForDeploymentPostprocessing",
            flag(p.run_only_for_deployment_postprocessing),
        );
    }

    fn target(&self, d: &mut PlistDictionary, isa: &str, t: &Target, always_rules: bool) {
        d.insert_opt(
            "buildConfigurationList",
            t.build_configuration_list
                .as_ref()
                .map(|l| reference(l, Some(list_comment(isa, &t.name)))),
        );
        let phases = t
            .build_phases
            .iter()
            .map(|p| {
                let name = self
                    .object(p)
                    .and_then(|o| o.build_phase_name())
                    .map(str::to_string);
                reference(p, name)
            })
            .collect();
        d.insert("buildPhases", PlistValue::Array(phases));
        if always_rules || !t.build_rules.is_empty() {
            let rules = t
                .build_rules
                .iter()
                .map(|r| reference(r, Some(ObjectKind::BuildRule.isa().into())))
                .collect();
            d.insert("buildRules", PlistValue::Array(rules));
        }
        let dependencies = t
            .dependencies
            .iter()
            .map(|r| reference(r, Some(ObjectKind::TargetDependency.isa().into())))
            .collect();
        d.insert("dependencies", PlistValue::Array(dependencies));
        d.insert("name", PlistValue::string(t.name.as_str()));
        d.insert_opt("productName", t.product_name.as_deref().map(PlistValue::string));
        d.insert_opt(
            "productReference",
            t.product_reference
                .as_ref()
                .map(|r| reference(r, self.file_name(r))),
        );
        d.insert_opt("productType", t.product_type.as_deref().map(PlistValue::string));
    }

    fn configuration_list(&self, d: &mut PlistDictionary, l: &ConfigurationList) {
        let configurations = l
            .build_configurations
            .iter()
            .map(|c| reference(c, self.display_name(c)))
            .collect();
        d.insert("buildConfigurations", PlistValue::Array(configurations));
        d.insert(
            "defaultConfigurationIsVisible",
            flag(l.default_configuration_is_visible),
        );
        d.insert_opt(
            "defaultConfigurationName",
            l.default_configuration_name
                .as_deref()
                .map(PlistValue::string),
        );
    }

    fn project_fields(&self, d: &mut PlistDictionary, p: &Project) {
        let mut attributes: PlistDictionary = p
            .attributes
            .iter()
            .map(|(k, v)| (CommentedString::new(k.as_str()), PlistValue::from(v)))
            .collect();
        if !p.target_attributes.is_empty() {
            let per_target = p
                .target_attributes
                .iter()
                .map(|(target, attrs)| (CommentedString::new(target.value()), raw_dictionary(attrs)))
                .collect();
            attributes.insert(TARGET_ATTRIBUTES_KEY, PlistValue::Dictionary(per_target));
        }
        d.insert("attributes", PlistValue::Dictionary(attributes));
        d.insert(
            "buildConfigurationList",
            reference(
                &p.build_configuration_list,
                Some(list_comment(ObjectKind::Project.isa(), &p.name)),
            ),
        );
        d.insert(
            "compatibilityVersion",
            PlistValue::string(p.compatibility_version.as_str()),
        );
        d.insert_opt(
            "developmentRegion",
            p.development_region.as_deref().map(PlistValue::string),
        );
        d.insert("hasScannedForEncodings", flag(p.has_scanned_for_encodings));
        if !p.known_regions.is_empty() {
            d.insert("knownRegions", PlistValue::strings(p.known_regions.iter().cloned()));
        }
        d.insert(
            "mainGroup",
            reference(&p.main_group, self.file_name(&p.main_group)),
        );
        d.insert_opt(
            "productRefGroup",
            p.product_ref_group
                .as_ref()
                .map(|r| reference(r, self.file_name(r))),
        );
        d.insert("projectDirPath", PlistValue::string(p.project_dir_path.as_str()));
        if !p.project_references.is_empty() {
            let references = p
                .project_references
                .iter()
                .map(|r| {
                    let mut entry = PlistDictionary::new();
                    entry.insert(
                        "ProductGroup",
                        reference(&r.product_group, self.file_name(&r.product_group)),
                    );
                    entry.insert(
                        "ProjectRef",
                        reference(&r.project_ref, self.file_name(&r.project_ref)),
                    );
                    PlistValue::Dictionary(entry)
                })
                .collect();
            d.insert("projectReferences", PlistValue::Array(references));
        }
        match p.project_roots.as_slice() {
            [] => d.insert("projectRoot", PlistValue::string("")),
            [root] => d.insert("projectRoot", PlistValue::string(root.as_str())),
            roots => d.insert("projectRoots", PlistValue::strings(roots)),
        };
        let targets = p
            .targets
            .iter()
            .map(|t| reference(t, self.display_name(t)))
            .collect();
        d.insert("targets", PlistValue::Array(targets));
    }
}

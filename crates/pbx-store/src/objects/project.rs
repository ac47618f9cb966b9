use std::collections::BTreeMap;

use pbx_types::RawValue;

use crate::reference::ObjectReference;

/// Key under `attributes` holding per-target attribute dictionaries.
pub const TARGET_ATTRIBUTES_KEY: &str = "TargetAttributes";

/// An external project this one references, with its products group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectReference {
    pub product_group: ObjectReference,
    pub project_ref: ObjectReference,
}

/// The root object of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Taken from the project bundle's file name; never written.
    pub name: String,
    pub build_configuration_list: ObjectReference,
    pub compatibility_version: String,
    pub development_region: Option<String>,
    pub has_scanned_for_encodings: bool,
    pub known_regions: Vec<String>,
    pub main_group: ObjectReference,
    pub product_ref_group: Option<ObjectReference>,
    pub project_dir_path: String,
    pub project_references: Vec<ProjectReference>,
    /// Written as `projectRoots` when there is more than one, otherwise as a
    /// single `projectRoot`.
    pub project_roots: Vec<String>,
    pub targets: Vec<ObjectReference>,
    /// Free-form attributes, excluding target attributes.
    pub attributes: BTreeMap<String, RawValue>,
    pub target_attributes: Vec<(ObjectReference, BTreeMap<String, RawValue>)>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        build_configuration_list: ObjectReference,
        main_group: ObjectReference,
    ) -> Self {
        Self {
            name: name.into(),
            build_configuration_list,
            compatibility_version: "Xcode 3.2".to_string(),
            development_region: None,
            has_scanned_for_encodings: false,
            known_regions: Vec::new(),
            main_group,
            product_ref_group: None,
            project_dir_path: String::new(),
            project_references: Vec::new(),
            project_roots: Vec::new(),
            targets: Vec::new(),
            attributes: BTreeMap::new(),
            target_attributes: Vec::new(),
        }
    }

    /// Attributes recorded for one target.
    pub fn attributes_for(&self, target: &ObjectReference) -> Option<&BTreeMap<String, RawValue>> {
        self.target_attributes
            .iter()
            .find(|(r, _)| r == target)
            .map(|(_, attrs)| attrs)
    }
}

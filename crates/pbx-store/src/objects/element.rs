//! File elements: things that can appear in a group's `children`.

use crate::reference::ObjectReference;

/// Where an element's `path` is rooted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceTree {
    None,
    Absolute,
    Group,
    SourceRoot,
    BuildProductsDir,
    SdkRoot,
    DeveloperDir,
    Custom(String),
}

impl SourceTree {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Absolute => "<absolute>",
            Self::Group => "<group>",
            Self::SourceRoot => "SOURCE_ROOT",
            Self::BuildProductsDir => "BUILT_PRODUCTS_DIR",
            Self::SdkRoot => "SDKROOT",
            Self::DeveloperDir => "DEVELOPER_DIR",
            Self::Custom(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "" => Self::None,
            "<absolute>" => Self::Absolute,
            "<group>" => Self::Group,
            "SOURCE_ROOT" => Self::SourceRoot,
            "BUILT_PRODUCTS_DIR" => Self::BuildProductsDir,
            "SDKROOT" => Self::SdkRoot,
            "DEVELOPER_DIR" => Self::DeveloperDir,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Attributes shared by every file element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileElement {
    pub source_tree: Option<SourceTree>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub include_in_index: Option<bool>,
    pub uses_tabs: Option<bool>,
    pub indent_width: Option<u32>,
    pub tab_width: Option<u32>,
    pub wraps_lines: Option<bool>,
}

impl FileElement {
    /// Element rooted in its parent group.
    pub fn in_group(path: impl Into<String>) -> Self {
        Self {
            source_tree: Some(SourceTree::Group),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// The name shown in the navigator: `name`, falling back to `path`.
    pub fn file_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReference {
    pub element: FileElement,
    pub file_encoding: Option<u32>,
    pub explicit_file_type: Option<String>,
    pub last_known_file_type: Option<String>,
    pub line_ending: Option<u32>,
    pub language_specification_identifier: Option<String>,
}

impl FileReference {
    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            ..Default::default()
        }
    }

    pub fn with_last_known_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.last_known_file_type = Some(file_type.into());
        self
    }
}

/// A group, or a variant group (localized resources).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub element: FileElement,
    pub children: Vec<ObjectReference>,
}

impl Group {
    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }
}

/// A versioned group such as a Core Data model bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionGroup {
    pub group: Group,
    pub current_version: Option<ObjectReference>,
    pub version_group_type: Option<String>,
}

/// A product of another project, surfaced in this project's navigator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceProxy {
    pub element: FileElement,
    pub file_type: Option<String>,
    pub remote_ref: Option<ObjectReference>,
}

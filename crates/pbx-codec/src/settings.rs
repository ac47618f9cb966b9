//! Presentation settings for encoding.
//!
//! None of these alter graph content; they only change the order in which
//! objects and edge lists are written.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Order of entries in the PBXBuildFile and PBXFileReference sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileListSortOrder {
    #[default]
    ByReference,
    ByFilename,
}

/// Order of a group's `children`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigatorSortOrder {
    #[default]
    Unsorted,
    ByFilename,
    ByFilenameGroupsFirst,
}

/// Order of a build phase's `files`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhaseFileSortOrder {
    #[default]
    Unsorted,
    ByFilename,
}

/// Ordering policy applied while projecting the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub file_list_order: FileListSortOrder,
    pub navigator_order: NavigatorSortOrder,
    pub build_phase_file_order: BuildPhaseFileSortOrder,
}

impl OutputSettings {
    /// Matches what Xcode writes: reference order, lists untouched.
    pub fn xcode() -> Self {
        Self::default()
    }

    /// Filename ordering everywhere, groups ahead of files.
    pub fn sorted() -> Self {
        Self {
            file_list_order: FileListSortOrder::ByFilename,
            navigator_order: NavigatorSortOrder::ByFilenameGroupsFirst,
            build_phase_file_order: BuildPhaseFileSortOrder::ByFilename,
        }
    }

    /// Load from TOML; omitted keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }
}

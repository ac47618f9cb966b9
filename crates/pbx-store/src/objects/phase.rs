//! Build phases, the build files they list, and build rules.

use std::collections::BTreeMap;

use pbx_types::RawValue;

use crate::reference::ObjectReference;

/// `buildActionMask` written by default.
pub const DEFAULT_BUILD_ACTION_MASK: u32 = 2_147_483_647;

/// Fields shared by every build phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPhase {
    pub build_action_mask: u32,
    pub files: Vec<ObjectReference>,
    pub input_file_list_paths: Option<Vec<String>>,
    pub output_file_list_paths: Option<Vec<String>>,
    pub run_only_for_deployment_postprocessing: bool,
}

impl Default for BuildPhase {
    fn default() -> Self {
        Self {
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files: Vec::new(),
            input_file_list_paths: None,
            output_file_list_paths: None,
            run_only_for_deployment_postprocessing: false,
        }
    }
}

/// Copies files into a destination inside the product.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyFilesPhase {
    pub phase: BuildPhase,
    pub name: Option<String>,
    pub dst_path: Option<String>,
    pub dst_subfolder_spec: Option<u32>,
}

/// Runs a shell script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellScriptPhase {
    pub phase: BuildPhase,
    pub name: Option<String>,
    pub input_paths: Vec<String>,
    pub output_paths: Vec<String>,
    pub shell_path: String,
    pub shell_script: Option<String>,
    pub show_env_vars_in_log: Option<bool>,
}

impl Default for ShellScriptPhase {
    fn default() -> Self {
        Self {
            phase: BuildPhase::default(),
            name: None,
            input_paths: Vec::new(),
            output_paths: Vec::new(),
            shell_path: "/bin/sh".to_string(),
            shell_script: None,
            show_env_vars_in_log: None,
        }
    }
}

/// One file's membership in a build phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildFile {
    pub file: Option<ObjectReference>,
    pub settings: Option<BTreeMap<String, RawValue>>,
}

impl BuildFile {
    pub fn new(file: ObjectReference) -> Self {
        Self {
            file: Some(file),
            settings: None,
        }
    }
}

/// A custom compiler or script invocation for matching files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildRule {
    pub name: Option<String>,
    pub compiler_spec: String,
    pub file_patterns: Option<String>,
    pub file_type: String,
    pub is_editable: bool,
    pub output_files: Vec<String>,
    pub output_files_compiler_flags: Option<Vec<String>>,
    pub script: Option<String>,
    pub run_once_per_architecture: Option<bool>,
}

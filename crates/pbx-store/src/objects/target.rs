//! Targets and the objects that wire them together.

use crate::reference::ObjectReference;

/// Fields shared by native, aggregate, and legacy targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub build_configuration_list: Option<ObjectReference>,
    pub build_phases: Vec<ObjectReference>,
    pub build_rules: Vec<ObjectReference>,
    pub dependencies: Vec<ObjectReference>,
    pub product_name: Option<String>,
    pub product_reference: Option<ObjectReference>,
    pub product_type: Option<String>,
    /// Only written for native targets.
    pub product_install_path: Option<String>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A target driven by an external build tool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyTarget {
    pub target: Target,
    pub build_tool_path: Option<String>,
    pub build_arguments_string: Option<String>,
    pub pass_build_settings_in_environment: bool,
    pub build_working_directory: Option<String>,
}

/// What a container item proxy points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProxyType {
    NativeTarget,
    Reference,
    Other(u32),
}

impl ProxyType {
    pub fn code(&self) -> u32 {
        match self {
            Self::NativeTarget => 1,
            Self::Reference => 2,
            Self::Other(code) => *code,
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::NativeTarget,
            2 => Self::Reference,
            other => Self::Other(other),
        }
    }
}

/// The remote side of a proxy: an object in this graph, or an opaque id
/// living in another project file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteGlobalId {
    Reference(ObjectReference),
    String(String),
}

impl RemoteGlobalId {
    pub fn value(&self) -> String {
        match self {
            Self::Reference(r) => r.value(),
            Self::String(s) => s.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerItemProxy {
    pub container_portal: ObjectReference,
    pub proxy_type: Option<ProxyType>,
    pub remote_global_id: Option<RemoteGlobalId>,
    pub remote_info: Option<String>,
}

impl ContainerItemProxy {
    pub fn new(container_portal: ObjectReference) -> Self {
        Self {
            container_portal,
            proxy_type: None,
            remote_global_id: None,
            remote_info: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetDependency {
    pub name: Option<String>,
    pub target: Option<ObjectReference>,
    pub target_proxy: Option<ObjectReference>,
}

use std::collections::BTreeMap;

use pbx_types::RawValue;

use crate::reference::ObjectReference;

/// Build settings as a free-form bag.
pub type BuildSettings = BTreeMap<String, RawValue>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub name: String,
    pub build_settings: BuildSettings,
    pub base_configuration: Option<ObjectReference>,
}

impl BuildConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.build_settings.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigurationList {
    pub build_configurations: Vec<ObjectReference>,
    pub default_configuration_is_visible: bool,
    pub default_configuration_name: Option<String>,
}

//! Graph to text.

use pbx_refs::ReferenceGenerator;
use pbx_store::{ObjectBuckets, ProjectDocument};
use pbx_types::ObjectKind;
use tracing::info;

use crate::error::{EncodeError, EncodeResult};
use crate::fixer::ReferenceFixer;
use crate::projection::{is_multiline, EncodeContext};
use crate::settings::OutputSettings;
use crate::writer::PlistWriter;

/// Sections in the order they are written. Every kind the graph can store
/// must appear here.
pub const SECTIONS: [ObjectKind; 22] = [
    ObjectKind::AggregateTarget,
    ObjectKind::BuildFile,
    ObjectKind::BuildRule,
    ObjectKind::ContainerItemProxy,
    ObjectKind::CopyFilesBuildPhase,
    ObjectKind::FileReference,
    ObjectKind::FrameworksBuildPhase,
    ObjectKind::Group,
    ObjectKind::HeadersBuildPhase,
    ObjectKind::LegacyTarget,
    ObjectKind::NativeTarget,
    ObjectKind::Project,
    ObjectKind::ReferenceProxy,
    ObjectKind::ResourcesBuildPhase,
    ObjectKind::RezBuildPhase,
    ObjectKind::ShellScriptBuildPhase,
    ObjectKind::SourcesBuildPhase,
    ObjectKind::TargetDependency,
    ObjectKind::VariantGroup,
    ObjectKind::BuildConfiguration,
    ObjectKind::ConfigurationList,
    ObjectKind::VersionGroup,
];

/// Renders a [`ProjectDocument`] to pbxproj text.
///
/// The encoder owns its [`ReferenceGenerator`]; each encode resets it before
/// fixing temporary references, so independent encoders never interfere.
#[derive(Debug, Default)]
pub struct ProjectEncoder {
    settings: OutputSettings,
    generator: ReferenceGenerator,
}

impl ProjectEncoder {
    pub fn new(settings: OutputSettings) -> Self {
        Self {
            settings,
            generator: ReferenceGenerator::new(),
        }
    }

    pub fn settings(&self) -> &OutputSettings {
        &self.settings
    }

    /// Fix temporary references, then render. Either the whole text is
    /// produced or an error is returned.
    pub fn encode(&mut self, document: &ProjectDocument) -> EncodeResult<String> {
        let root = document
            .root_object
            .as_ref()
            .ok_or(EncodeError::MissingRootObject)?;
        ReferenceFixer::new(&document.graph, &mut self.generator).run(root)?;

        let root_value = root.value();
        let text = document
            .graph
            .with_objects(|objects| self.render(document, &root_value, objects))?;
        info!(
            objects = document.graph.len(),
            bytes = text.len(),
            "encoded project"
        );
        Ok(text)
    }

    fn render(
        &self,
        document: &ProjectDocument,
        root: &str,
        objects: &ObjectBuckets,
    ) -> EncodeResult<String> {
        if let Some(kind) = objects.kinds().find(|k| !SECTIONS.contains(k)) {
            return Err(EncodeError::UnregisteredSection(kind.isa().to_string()));
        }

        let ctx = EncodeContext::new(objects, &self.settings);
        let mut writer = PlistWriter::new();
        writer.begin_document(document.archive_version, document.object_version);
        for kind in SECTIONS {
            let entries = ctx.section(kind);
            if entries.is_empty() {
                continue;
            }
            writer.begin_section(kind.isa());
            for entry in entries {
                let (key, value) = ctx.project(entry)?;
                writer.entry(&key, &value, is_multiline(kind));
            }
            writer.end_section(kind.isa());
        }
        Ok(writer.end_document(root))
    }
}

use pbx_store::ProjectDocument;
use pbx_types::RawValue;

use crate::decoder::ProjectDecoder;
use crate::encoder::ProjectEncoder;
use crate::error::{DecodeResult, EncodeResult};
use crate::settings::OutputSettings;

/// Decoder and encoder configured together.
#[derive(Debug, Default)]
pub struct ProjectCodec {
    decoder: ProjectDecoder,
    encoder: ProjectEncoder,
}

impl ProjectCodec {
    /// `project_name` is the name the file is saved under, without the
    /// `.xcodeproj` extension. It appears in configuration list comments.
    pub fn new(project_name: impl Into<String>, settings: OutputSettings) -> Self {
        Self {
            decoder: ProjectDecoder::with_project_name(project_name),
            encoder: ProjectEncoder::new(settings),
        }
    }

    /// Decode parsed plist values.
    pub fn decode(&self, root: &RawValue) -> DecodeResult<ProjectDocument> {
        self.decoder.decode(root)
    }

    /// Decode the JSON form of a project.
    pub fn decode_json(&self, json: serde_json::Value) -> DecodeResult<ProjectDocument> {
        let root = RawValue::try_from(json)?;
        self.decoder.decode(&root)
    }

    /// Fix temporary references and render the document.
    pub fn encode(&mut self, document: &ProjectDocument) -> EncodeResult<String> {
        self.encoder.encode(document)
    }
}

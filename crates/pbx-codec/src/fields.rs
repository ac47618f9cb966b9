//! Typed field access for one decoded record.

use std::collections::BTreeMap;

use pbx_store::{ObjectReference, ReferenceRegistry};
use pbx_types::RawValue;

use crate::error::{DecodeError, DecodeResult};

/// Shared state for every record of one decode.
pub(crate) struct DecodeContext<'a> {
    pub registry: &'a ReferenceRegistry,
    pub objects: &'a BTreeMap<String, RawValue>,
    pub project_name: &'a str,
}

/// One record's fields, with errors naming the record and field.
pub(crate) struct RecordFields<'a> {
    reference: &'a str,
    record: &'a BTreeMap<String, RawValue>,
    ctx: &'a DecodeContext<'a>,
}

impl<'a> RecordFields<'a> {
    pub fn new(
        reference: &'a str,
        record: &'a BTreeMap<String, RawValue>,
        ctx: &'a DecodeContext<'a>,
    ) -> Self {
        Self {
            reference,
            record,
            ctx,
        }
    }

    pub fn project_name(&self) -> &str {
        self.ctx.project_name
    }

    fn missing(&self, field: &str) -> DecodeError {
        DecodeError::MissingField {
            reference: self.reference.to_string(),
            field: field.to_string(),
        }
    }

    fn wrong(&self, field: &str) -> DecodeError {
        DecodeError::WrongType {
            reference: self.reference.to_string(),
            field: field.to_string(),
        }
    }

    fn raw(&self, field: &str) -> Option<&'a RawValue> {
        self.record.get(field)
    }

    // ---- Scalars ----

    pub fn string(&self, field: &str) -> DecodeResult<String> {
        self.opt_string(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_string(&self, field: &str) -> DecodeResult<Option<String>> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v.to_scalar_string().map(Some).ok_or_else(|| self.wrong(field)),
        }
    }

    pub fn opt_u32(&self, field: &str) -> DecodeResult<Option<u32>> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v
                .as_integer()
                .and_then(|i| u32::try_from(i).ok())
                .map(Some)
                .ok_or_else(|| self.wrong(field)),
        }
    }

    pub fn u32_or(&self, field: &str, default: u32) -> DecodeResult<u32> {
        Ok(self.opt_u32(field)?.unwrap_or(default))
    }

    /// Booleans are written as `0`/`1`; `YES`/`NO` and `true`/`false` are
    /// accepted as well.
    pub fn opt_bool(&self, field: &str) -> DecodeResult<Option<bool>> {
        let Some(v) = self.raw(field) else {
            return Ok(None);
        };
        let text = v.to_scalar_string().ok_or_else(|| self.wrong(field))?;
        match text.as_str() {
            "1" | "YES" | "true" => Ok(Some(true)),
            "0" | "NO" | "false" => Ok(Some(false)),
            _ => Err(self.wrong(field)),
        }
    }

    pub fn bool(&self, field: &str) -> DecodeResult<bool> {
        Ok(self.opt_bool(field)?.unwrap_or(false))
    }

    // ---- Lists and bags ----

    pub fn opt_strings(&self, field: &str) -> DecodeResult<Option<Vec<String>>> {
        let Some(v) = self.raw(field) else {
            return Ok(None);
        };
        let items = v.as_array().ok_or_else(|| self.wrong(field))?;
        items
            .iter()
            .map(|item| item.to_scalar_string().ok_or_else(|| self.wrong(field)))
            .collect::<DecodeResult<Vec<_>>>()
            .map(Some)
    }

    pub fn opt_raw_array(&self, field: &str) -> DecodeResult<Option<&'a [RawValue]>> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v.as_array().map(Some).ok_or_else(|| self.wrong(field)),
        }
    }

    pub fn strings(&self, field: &str) -> DecodeResult<Vec<String>> {
        Ok(self.opt_strings(field)?.unwrap_or_default())
    }

    /// Free-form dictionary, kept in text form so it survives a round trip
    /// through rendered output.
    pub fn opt_dictionary(&self, field: &str) -> DecodeResult<Option<BTreeMap<String, RawValue>>> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v
                .as_dictionary()
                .map(|map| {
                    map.iter()
                        .map(|(k, v)| (k.clone(), v.clone().into_text_form()))
                        .collect()
                })
                .map(Some)
                .ok_or_else(|| self.wrong(field)),
        }
    }

    pub fn dictionary(&self, field: &str) -> DecodeResult<BTreeMap<String, RawValue>> {
        self.opt_dictionary(field)?.ok_or_else(|| self.missing(field))
    }

    /// Borrowed required dictionary.
    pub fn dictionary_ref(&self, field: &str) -> DecodeResult<&'a BTreeMap<String, RawValue>> {
        self.raw(field)
            .ok_or_else(|| self.missing(field))?
            .as_dictionary()
            .ok_or_else(|| self.wrong(field))
    }

    // ---- References ----

    pub fn reference(&self, field: &str) -> DecodeResult<ObjectReference> {
        self.opt_reference(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_reference(&self, field: &str) -> DecodeResult<Option<ObjectReference>> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(|s| Some(self.ctx.registry.get_or_create(s)))
                .ok_or_else(|| self.wrong(field)),
        }
    }

    pub fn references(&self, field: &str) -> DecodeResult<Vec<ObjectReference>> {
        let Some(v) = self.raw(field) else {
            return Ok(Vec::new());
        };
        let items = v.as_array().ok_or_else(|| self.wrong(field))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| self.ctx.registry.get_or_create(s))
                    .ok_or_else(|| self.wrong(field))
            })
            .collect()
    }

    pub fn required_references(&self, field: &str) -> DecodeResult<Vec<ObjectReference>> {
        if self.raw(field).is_none() {
            return Err(self.missing(field));
        }
        self.references(field)
    }

    /// Resolve a value through the shared registry.
    pub fn registry_reference(&self, value: &str) -> ObjectReference {
        self.ctx.registry.get_or_create(value)
    }

    /// Returns `true` when `value` names a record of this document.
    pub fn is_local(&self, value: &str) -> bool {
        self.ctx.objects.contains_key(value)
    }

    /// Error for a nested field, named `field.key`.
    pub fn wrong_nested(&self, field: &str, key: &str) -> DecodeError {
        self.wrong(&format!("{field}.{key}"))
    }
}

//! Text renderer for the pbxproj grammar.
//!
//! The writer tracks an indent level and a multiline flag. In single-line
//! mode every newline becomes a space and indentation is dropped, which is
//! how compact entries such as build files are written.

use pbx_types::{CommentedString, PlistDictionary, PlistValue};

/// First line of every project file.
pub const UTF8_MARKER: &str = "// !$*UTF8*$!";

/// Comment attached to the `rootObject` value.
pub const ROOT_OBJECT_COMMENT: &str = "Project object";

pub(crate) struct PlistWriter {
    out: String,
    indent: usize,
    multiline: bool,
}

impl PlistWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            multiline: true,
        }
    }

    /// Header marker, the opening brace and every top-level key up to the
    /// opening of `objects`.
    pub fn begin_document(&mut self, archive_version: u32, object_version: u32) {
        self.out.push_str(UTF8_MARKER);
        self.newline();
        self.open('{');
        self.entry(
            &CommentedString::new("archiveVersion"),
            &PlistValue::string(archive_version.to_string()),
            true,
        );
        self.entry(
            &CommentedString::new("classes"),
            &PlistValue::Dictionary(PlistDictionary::new()),
            true,
        );
        self.entry(
            &CommentedString::new("objectVersion"),
            &PlistValue::string(object_version.to_string()),
            true,
        );
        self.tabs();
        self.out.push_str("objects = {");
        self.indent += 1;
        self.newline();
    }

    pub fn begin_section(&mut self, isa: &str) {
        self.newline();
        self.out.push_str("/* Begin ");
        self.out.push_str(isa);
        self.out.push_str(" section */");
        self.newline();
    }

    pub fn end_section(&mut self, isa: &str) {
        self.out.push_str("/* End ");
        self.out.push_str(isa);
        self.out.push_str(" section */");
        self.newline();
    }

    /// Closes `objects`, writes `rootObject` and the final brace.
    pub fn end_document(mut self, root_object: &str) -> String {
        self.indent -= 1;
        self.tabs();
        self.out.push_str("};");
        self.newline();
        self.entry(
            &CommentedString::new("rootObject"),
            &PlistValue::commented(root_object, ROOT_OBJECT_COMMENT),
            true,
        );
        self.close('}');
        self.newline();
        self.out
    }

    /// `key = value;` at the current indent. `multiline` applies to the
    /// value only; the trailing newline follows the enclosing mode.
    pub fn entry(&mut self, key: &CommentedString, value: &PlistValue, multiline: bool) {
        self.tabs();
        let outer = self.multiline;
        self.multiline = multiline;
        self.commented(key);
        self.out.push_str(" = ");
        self.value(value);
        self.out.push(';');
        self.multiline = outer;
        self.newline();
    }

    fn value(&mut self, value: &PlistValue) {
        match value {
            PlistValue::String(s) => self.commented(s),
            PlistValue::Array(items) => {
                self.open('(');
                for item in items {
                    self.tabs();
                    self.value(item);
                    self.out.push(',');
                    self.newline();
                }
                self.close(')');
            }
            PlistValue::Dictionary(dict) => {
                self.open('{');
                for (key, value) in dict.iter_rendered() {
                    self.entry(key, value, self.multiline);
                }
                self.close('}');
            }
        }
    }

    fn commented(&mut self, s: &CommentedString) {
        self.out.push_str(&s.valid_string());
        if let Some(comment) = &s.comment {
            self.out.push_str(" /* ");
            // A `*/` inside the comment would close it early.
            self.out.push_str(&comment.replace("*/", "* /"));
            self.out.push_str(" */");
        }
    }

    fn open(&mut self, bracket: char) {
        self.out.push(bracket);
        if self.multiline {
            self.newline();
        }
        self.indent += 1;
    }

    fn close(&mut self, bracket: char) {
        self.indent -= 1;
        self.tabs();
        self.out.push(bracket);
    }

    fn newline(&mut self) {
        self.out.push(if self.multiline { '\n' } else { ' ' });
    }

    fn tabs(&mut self) {
        if self.multiline {
            for _ in 0..self.indent {
                self.out.push('\t');
            }
        }
    }
}

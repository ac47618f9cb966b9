use std::fmt;

/// A string with an optional comment rendered as `/* comment */` after it.
///
/// The comment is decoration only. Dictionaries keyed by `CommentedString`
/// (see [`PlistDictionary`](crate::PlistDictionary)) dedupe on `string`.
/// Comments are written unescaped, except that a `*/` inside one is broken
/// up as `* /` so it cannot end the comment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentedString {
    pub string: String,
    pub comment: Option<String>,
}

impl CommentedString {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            comment: None,
        }
    }

    pub fn with_comment(string: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            comment: Some(comment.into()),
        }
    }

    /// Attach a comment only when one is present.
    pub fn with_optional_comment(string: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            string: string.into(),
            comment,
        }
    }

    /// The string as it must appear in the document: bare when safe,
    /// otherwise quoted and escaped.
    pub fn valid_string(&self) -> String {
        match self.string.as_str() {
            "" => "\"\"".to_string(),
            "true" => "YES".to_string(),
            "false" => "NO".to_string(),
            s if needs_quotes(s) => quote(s),
            s => s.to_string(),
        }
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/')
}

fn needs_quotes(s: &str) -> bool {
    !s.chars().all(is_bare_char) || s.contains("___") || s.contains("//")
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for CommentedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.valid_string())?;
        if let Some(comment) = &self.comment {
            write!(f, " /* {comment} */")?;
        }
        Ok(())
    }
}

impl From<&str> for CommentedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CommentedString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid(s: &str) -> String {
        CommentedString::new(s).valid_string()
    }

    // -----------------------------------------------------------------------
    // Escaping table
    // -----------------------------------------------------------------------

    #[test]
    fn empty_string_is_quoted() {
        assert_eq!(valid(""), "\"\"");
    }

    #[test]
    fn booleans_become_yes_no() {
        assert_eq!(valid("true"), "YES");
        assert_eq!(valid("false"), "NO");
        assert_eq!(valid("True"), "True");
    }

    #[test]
    fn safe_strings_stay_bare() {
        assert_eq!(valid("a_a"), "a_a");
        assert_eq!(valid("Sources/main.swift"), "Sources/main.swift");
        assert_eq!(valid("$(SRCROOT)"), "\"$(SRCROOT)\"");
        assert_eq!(valid("$SRCROOT"), "$SRCROOT");
        assert_eq!(valid("1.0"), "1.0");
    }

    #[test]
    fn unsafe_characters_force_quotes() {
        assert_eq!(valid("a a"), "\"a a\"");
        assert_eq!(valid("<group>"), "\"<group>\"");
        assert_eq!(valid("a-b"), "\"a-b\"");
    }

    #[test]
    fn double_slash_and_triple_underscore_force_quotes() {
        assert_eq!(valid("abc//def"), "\"abc//def\"");
        assert_eq!(valid("http//x"), "\"http//x\"");
        assert_eq!(valid("a___b"), "\"a___b\"");
        assert_eq!(valid("a__b"), "a__b");
    }

    #[test]
    fn escapes_inside_quotes() {
        assert_eq!(valid("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(valid("a\\b"), "\"a\\\\b\"");
        assert_eq!(valid("a\tb"), "\"a\\tb\"");
        assert_eq!(valid("line1\nline2"), "\"line1\\nline2\"");
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    #[test]
    fn display_appends_comment() {
        let s = CommentedString::with_comment("ABC", "main.swift");
        assert_eq!(s.to_string(), "ABC /* main.swift */");
        assert_eq!(CommentedString::new("x y").to_string(), "\"x y\"");
    }

    #[test]
    fn optional_comment() {
        assert_eq!(
            CommentedString::with_optional_comment("a", None),
            CommentedString::new("a")
        );
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn bare_output_only_uses_safe_chars(s in "[ -~\t\n]{0,24}") {
            let out = valid(&s);
            if !out.starts_with('"') {
                prop_assert!(out.chars().all(is_bare_char));
                prop_assert!(!out.contains("//"));
                prop_assert!(!out.contains("___"));
            }
        }

        #[test]
        fn quoted_output_has_no_raw_control_chars(s in "[ -~\t\n]{0,24}") {
            let out = valid(&s);
            prop_assert!(!out.contains('\n'));
            prop_assert!(!out.contains('\t'));
        }
    }
}

//! Minimal reader for the text this crate writes. Test-only.
//!
//! Handles `//` and `/* */` comments, quoted strings with the four escapes
//! the writer emits, bare words, dictionaries and arrays. Every scalar comes
//! back as [`RawValue::String`].

use std::collections::BTreeMap;

use pbx_types::RawValue;

pub(crate) fn parse(text: &str) -> Result<RawValue, String> {
    let mut reader = Reader {
        chars: text.chars().collect(),
        pos: 0,
    };
    let value = reader.value()?;
    reader.skip_trivia();
    if reader.pos != reader.chars.len() {
        return Err(format!("trailing input at {}", reader.pos));
    }
    Ok(value)
}

struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => self.pos += 1,
                (Some('/'), Some('/')) => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.pos += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    while self.pos < self.chars.len()
                        && !(self.peek() == Some('*') && self.peek_at(1) == Some('/'))
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.chars.len());
                }
                _ => return,
            }
        }
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        self.skip_trivia();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!("expected '{c}' at {}, found {:?}", self.pos, self.peek()))
        }
    }

    fn value(&mut self) -> Result<RawValue, String> {
        self.skip_trivia();
        match self.peek() {
            Some('{') => self.dictionary(),
            Some('(') => self.array(),
            Some('"') => self.quoted().map(RawValue::String),
            Some(_) => self.bare().map(RawValue::String),
            None => Err("unexpected end of input".into()),
        }
    }

    fn dictionary(&mut self) -> Result<RawValue, String> {
        self.expect('{')?;
        let mut entries = BTreeMap::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(RawValue::Dictionary(entries));
            }
            let key = match self.value()? {
                RawValue::String(key) => key,
                other => return Err(format!("non-string key {other:?}")),
            };
            self.expect('=')?;
            let value = self.value()?;
            self.expect(';')?;
            entries.insert(key, value);
        }
    }

    fn array(&mut self) -> Result<RawValue, String> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(')') {
                self.pos += 1;
                return Ok(RawValue::Array(items));
            }
            items.push(self.value()?);
            self.skip_trivia();
            if self.peek() == Some(',') {
                self.pos += 1;
            }
        }
    }

    fn quoted(&mut self) -> Result<String, String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err("unterminated string".into()),
                Some('"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    let escaped = match self.peek_at(1) {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some(c) => c,
                        None => return Err("dangling escape".into()),
                    };
                    out.push(escaped);
                    self.pos += 2;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn bare(&mut self) -> Result<String, String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || "{}();,=\"".contains(c) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(format!("unexpected {:?} at {start}", self.peek()));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nested_values_and_comments() {
        let text = "// !$*UTF8*$!\n{\n\ta = (\n\t\tX /* x */,\n\t\t\"b c\",\n\t);\n\tb = {k = \"q\\\"\\n\"; };\n}\n";
        let value = parse(text).unwrap();
        assert_eq!(
            value.get("a").and_then(RawValue::as_array).map(|a| a.len()),
            Some(2)
        );
        assert_eq!(value.get("b").and_then(|b| b.get("k")).and_then(RawValue::as_str), Some("q\"\n"));
    }

    #[test]
    fn rejects_unterminated_input() {
        assert!(parse("{ a = b;").is_err());
        assert!(parse("\"open").is_err());
    }
}

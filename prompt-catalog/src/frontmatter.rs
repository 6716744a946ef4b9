//! Frontmatter parsing for prompt documents
//!
//! Only a flat subset of YAML is understood: `key: value` scalars and
//! `key:` followed by `- item` lists. Anything else in the block is ignored
//! rather than rejected, so a sloppy document still compiles.
//!
//! # Format
//! ```markdown
//! ---
//! description: "Helps debug frontend code"
//! category:
//!   - Development
//! ---
//!
//! # Helper
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Leading `---` block followed by the document body.
static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n(.*)\z").expect("frontmatter pattern is valid")
});

/// A single value extracted from a frontmatter block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    /// `true` / `false`, case-insensitive
    Bool(bool),
    /// A value made only of ASCII digits
    Integer(i64),
    /// Any other scalar
    String(String),
    /// Items collected from `- item` lines under a bare key
    List(Vec<String>),
}

impl FrontmatterValue {
    /// String slice if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Items if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontmatterValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value as plain text, lists joined with `", "`
    pub fn to_text(&self) -> String {
        match self {
            FrontmatterValue::Bool(b) => b.to_string(),
            FrontmatterValue::Integer(n) => n.to_string(),
            FrontmatterValue::String(s) => s.clone(),
            FrontmatterValue::List(items) => items.join(", "),
        }
    }
}

/// Ordered key/value mapping parsed from a frontmatter block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(IndexMap<String, FrontmatterValue>);

impl Frontmatter {
    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.0.get(key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no metadata was found
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys and values in document order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontmatterValue)> {
        self.0.iter()
    }
}

/// Parsed frontmatter and the document text it came from
#[derive(Debug, Clone)]
pub struct FrontmatterResult {
    /// Parsed metadata, empty when the document has no leading block
    pub metadata: Frontmatter,
    /// Full document text with the metadata block re-assembled in front of the body
    pub content: String,
}

/// Parse the leading frontmatter block of a document
///
/// A document without a block is not an error: the metadata is empty and the
/// text is returned unchanged. When a block is present the content is
/// re-assembled as `---\n<block>\n---\n\n<body>` and trimmed.
pub fn parse_frontmatter(content: &str) -> FrontmatterResult {
    let Some(caps) = FRONTMATTER_RE.captures(content) else {
        return FrontmatterResult {
            metadata: Frontmatter::default(),
            content: content.to_string(),
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    FrontmatterResult {
        metadata: parse_block(block),
        content: format!("---\n{block}\n---\n\n{body}").trim().to_string(),
    }
}

/// Return the raw text between the leading `---` delimiters, if any
///
/// Unlike [`parse_frontmatter`] the closing delimiter does not need a
/// trailing newline, which matches how catalog prompts are inspected.
pub fn frontmatter_block(content: &str) -> Option<&str> {
    static BLOCK_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)\A---\s*\n(.*?)\n---").expect("block pattern is valid"));
    BLOCK_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse the text between the delimiters into a [`Frontmatter`] mapping
pub fn parse_block(block: &str) -> Frontmatter {
    let mut parser = BlockParser::default();
    for line in block.split('\n') {
        parser.feed(line);
    }
    parser.finish()
}

/// What a top-level key has collected from the lines below it
#[derive(Debug)]
enum Pending {
    /// Opened by a top-level `key:` line, waiting for the next line
    Unset,
    /// Resolved from a continuation line
    Scalar(String),
    /// Resolved from `- item` lines
    Items(Vec<String>),
}

#[derive(Debug, Default)]
struct BlockParser {
    /// Values assigned directly on `key: value` lines
    scalars: IndexMap<String, FrontmatterValue>,
    /// Values resolved from the lines following a top-level key
    nested: IndexMap<String, Pending>,
    current: Option<String>,
}

impl BlockParser {
    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            self.push_item(strip_quotes(item.trim()));
            return;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                let key = key.trim().to_string();
                let value = value.trim();
                if let Some(parsed) = parse_scalar(value) {
                    self.scalars.insert(key.clone(), parsed);
                }
                if line.starts_with(' ') {
                    self.resolve(strip_quotes(value));
                } else {
                    self.nested.insert(key.clone(), Pending::Unset);
                    self.current = Some(key);
                }
            }
            None => self.resolve(strip_quotes(trimmed)),
        }
    }

    fn push_item(&mut self, item: &str) {
        let Some(state) = self.current_state() else {
            return;
        };
        match state {
            Pending::Unset => *state = Pending::Items(vec![item.to_string()]),
            Pending::Items(items) => items.push(item.to_string()),
            Pending::Scalar(_) => {}
        }
    }

    fn resolve(&mut self, value: &str) {
        if let Some(state) = self.current_state() {
            if matches!(state, Pending::Unset) {
                *state = Pending::Scalar(value.to_string());
            }
        }
    }

    fn current_state(&mut self) -> Option<&mut Pending> {
        let key = self.current.as_ref()?;
        self.nested.get_mut(key)
    }

    fn finish(self) -> Frontmatter {
        let mut fields = self.scalars;
        for (key, state) in self.nested {
            match state {
                Pending::Scalar(value) => {
                    fields.insert(key, FrontmatterValue::String(value));
                }
                Pending::Items(items) => {
                    fields.insert(key, FrontmatterValue::List(items));
                }
                Pending::Unset => {}
            }
        }
        Frontmatter(fields)
    }
}

/// Interpret the text after `key:`
fn parse_scalar(value: &str) -> Option<FrontmatterValue> {
    if value.is_empty() {
        return None;
    }
    if let Some(inner) = strip_quote_pair(value, '"').or_else(|| strip_quote_pair(value, '\'')) {
        return Some(FrontmatterValue::String(inner.to_string()));
    }
    if value.eq_ignore_ascii_case("true") {
        return Some(FrontmatterValue::Bool(true));
    }
    if value.eq_ignore_ascii_case("false") {
        return Some(FrontmatterValue::Bool(false));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = value.parse::<i64>() {
            return Some(FrontmatterValue::Integer(n));
        }
    }
    let value = match value.split_once('#') {
        Some((before, _)) => before.trim(),
        None => value,
    };
    Some(FrontmatterValue::String(value.to_string()))
}

fn strip_quote_pair(value: &str, quote: char) -> Option<&str> {
    if value.starts_with(quote) && value.ends_with(quote) {
        let inner = &value[quote.len_utf8()..];
        Some(inner.strip_suffix(quote).unwrap_or(inner))
    } else {
        None
    }
}

/// Strip any run of surrounding double quotes, then single quotes
fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}

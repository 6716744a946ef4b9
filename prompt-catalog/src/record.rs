//! The prompt record and the normalizer that builds one from a document

use crate::classifier::Classifier;
use crate::frontmatter::{parse_frontmatter, Frontmatter, FrontmatterValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Group used when a prompt declares none
pub const DEFAULT_GROUP: &str = "General";

/// Field names of a catalog record, in serialization order
pub const RECORD_FIELDS: [&str; 6] = ["id", "name", "description", "emoji", "group", "prompt"];

/// One entry of a prompt catalog
///
/// Field order here is the serialization order of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Decimal position in the catalog, starting at "1"
    pub id: String,
    /// Stable identifier, the document's file stem
    pub name: String,
    /// Free-text description, possibly empty
    pub description: String,
    /// Representative symbol
    pub emoji: String,
    /// Categories, never empty
    pub group: Vec<String>,
    /// Full document text including its frontmatter block
    pub prompt: String,
}

impl PromptRecord {
    /// Build a record from document text and the path it was read from
    ///
    /// The id is left empty; ids are assigned once the whole collection is
    /// known, see [`assign_ids`].
    pub fn from_document(text: &str, path: &Path, classifier: &Classifier) -> Self {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = parse_frontmatter(text);
        Self::from_parts(&parsed.metadata, parsed.content, name, classifier)
    }

    /// Build a record from already parsed metadata
    pub fn from_parts(
        metadata: &Frontmatter,
        content: String,
        name: String,
        classifier: &Classifier,
    ) -> Self {
        let description = metadata
            .get("description")
            .map(FrontmatterValue::to_text)
            .unwrap_or_default();
        let group = normalize_group(metadata.get("category").or_else(|| metadata.get("group")));
        let emoji = metadata
            .get("emoji")
            .map(FrontmatterValue::to_text)
            .filter(|emoji| !emoji.is_empty())
            .unwrap_or_else(|| classifier.classify(&description, &name).to_string());

        Self {
            id: String::new(),
            name,
            description,
            emoji,
            group,
            prompt: content,
        }
    }
}

/// Normalize a `category`/`group` frontmatter value into a group list
///
/// A string becomes a singleton and a list keeps its non-empty items. Anything
/// else, including a list with no usable items, falls back to `["General"]`.
pub fn normalize_group(value: Option<&FrontmatterValue>) -> Vec<String> {
    let group: Vec<String> = match value {
        Some(FrontmatterValue::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(FrontmatterValue::List(items)) => {
            items.iter().filter(|item| !item.is_empty()).cloned().collect()
        }
        _ => Vec::new(),
    };

    if group.is_empty() {
        vec![DEFAULT_GROUP.to_string()]
    } else {
        group
    }
}

/// Assign dense sequential ids `"1".."N"` in collection order
pub fn assign_ids(records: &mut [PromptRecord]) {
    for (index, record) in records.iter_mut().enumerate() {
        record.id = (index + 1).to_string();
    }
}

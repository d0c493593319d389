// src/record.rs
//! Bibliographic records as the extractors see them.
//!
//! A `Record` is a flat list of datafields, each addressed by a tag and
//! holding subfields addressed by a code. Only `datafield`/`subfield`
//! elements are kept; leader and controlfields are never queried.
//!
//! Lookups follow the feed's own semantics: the *first* field with a tag,
//! then the *first* subfield with a code on that field. A later field with
//! the same tag is never consulted by `value`.

use crate::core::xml::{self, Element, XmlError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    pub code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    pub tag: String,
    pub subfields: Vec<Subfield>,
}

impl DataField {
    pub fn new(tag: &str, subfields: &[(&str, &str)]) -> Self {
        Self {
            tag: s!(tag),
            subfields: subfields
                .iter()
                .map(|(code, value)| Subfield { code: s!(*code), value: s!(*value) })
                .collect(),
        }
    }

    /// First subfield with `code`, if any.
    pub fn subfield(&self, code: &str) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    pub fn has_subfield(&self, code: &str) -> bool {
        self.subfields.iter().any(|sf| sf.code == code)
    }

    fn from_element(el: &Element) -> Self {
        Self {
            tag: s!(el.attr("tag").unwrap_or_default()),
            subfields: el
                .elements_named("subfield")
                .map(|sf| Subfield {
                    code: s!(sf.attr("code").unwrap_or_default()),
                    value: sf.text(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<DataField>,
}

impl Record {
    pub fn new(fields: Vec<DataField>) -> Self {
        Self { fields }
    }

    pub fn from_element(el: &Element) -> Self {
        Self {
            fields: el.elements_named("datafield").map(DataField::from_element).collect(),
        }
    }

    /// First field with `tag`.
    pub fn field(&self, tag: &str) -> Option<&DataField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Every field with `tag`, in document order.
    pub fn fields<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DataField> + 'a {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Subfield `code` of the first field tagged `tag`.
    pub fn value(&self, tag: &str, code: &str) -> Option<&str> {
        self.field(tag)?.subfield(code)
    }
}

/// Parse one yearly MARCXML document into its records.
///
/// The feed wraps records in a `<collection>`; a bare `<record>` root is
/// accepted as a one-record document. Other children of the root are ignored.
pub fn parse_collection(doc: &str) -> Result<Vec<Record>, XmlError> {
    let root = xml::parse(doc)?;
    if root.local_name() == "record" {
        return Ok(vec![Record::from_element(&root)]);
    }
    Ok(root.elements_named("record").map(Record::from_element).collect())
}

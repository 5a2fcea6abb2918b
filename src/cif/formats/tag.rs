//! XML-like tag serialization
//!
//! Serializes a document to an XML-like format that directly reflects its
//! structure.
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <block name="example">
//!     <pair tag="_title"><value quoted="single">A test</value></pair>
//!     <loop>
//!       <field>_a</field>
//!       <field>_b</field>
//!       <row><value>1</value><value>2</value></row>
//!     </loop>
//!   </block>
//! </document>
//! ```

use crate::cif::ast::{DataBlock, Document, Item, Loop, Quoting, Value};

use super::registry::{FormatError, Formatter};

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }

    fn description(&self) -> &str {
        "XML-like tree of blocks, loops and rows"
    }
}

pub fn serialize_document(doc: &Document) -> String {
    let mut result = String::new();
    result.push_str("<document>\n");
    for block in &doc.blocks {
        serialize_block(block, 1, &mut result);
    }
    result.push_str("</document>");
    result
}

fn serialize_block(block: &DataBlock, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    match &block.name {
        Some(name) => output.push_str(&format!(
            "{}<block name=\"{}\">\n",
            indent,
            escape_xml(name)
        )),
        None => output.push_str(&format!("{}<block>\n", indent)),
    }
    for item in &block.items {
        serialize_item(item, indent_level + 1, output);
    }
    output.push_str(&format!("{}</block>\n", indent));
}

fn serialize_item(item: &Item, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);

    match item {
        Item::Pair { tag, value } => {
            output.push_str(&format!(
                "{}<pair tag=\"{}\">{}</pair>\n",
                indent,
                escape_xml(tag),
                serialize_value(value)
            ));
        }
        Item::Loop(lp) => serialize_loop(lp, indent_level, output),
        Item::SaveFrame { name, items } => {
            output.push_str(&format!(
                "{}<save-frame name=\"{}\">\n",
                indent,
                escape_xml(name)
            ));
            for child in items {
                serialize_item(child, indent_level + 1, output);
            }
            output.push_str(&format!("{}</save-frame>\n", indent));
        }
    }
}

fn serialize_loop(lp: &Loop, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    let inner = "  ".repeat(indent_level + 1);

    output.push_str(&format!("{}<loop>\n", indent));
    for field in &lp.fields {
        output.push_str(&format!("{}<field>{}</field>\n", inner, escape_xml(field)));
    }
    for row in &lp.rows {
        let values: String = row.iter().map(serialize_value).collect();
        output.push_str(&format!("{}<row>{}</row>\n", inner, values));
    }
    output.push_str(&format!("{}</loop>\n", indent));
}

fn serialize_value(value: &Value) -> String {
    let text = escape_xml(value.as_str());
    match value.quoting {
        Quoting::Bare => format!("<value>{}</value>", text),
        Quoting::SingleQuoted => format!("<value quoted=\"single\">{}</value>", text),
        Quoting::DoubleQuoted => format!("<value quoted=\"double\">{}</value>", text),
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! Document structure
//!
//! A document is a sequence of data blocks. Each block holds, in source order,
//! tag-value pairs, loops and save frames.

use serde::Serialize;

use super::loop_block::Loop;
use super::value::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub blocks: Vec<DataBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataBlock {
    /// Name after `data_`; `None` for content that precedes any header
    pub name: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Item {
    Pair { tag: String, value: Value },
    Loop(Loop),
    SaveFrame { name: String, items: Vec<Item> },
}

impl Document {
    pub fn new(blocks: Vec<DataBlock>) -> Self {
        Self { blocks }
    }

    /// Find a data block by name (ASCII case-insensitive)
    pub fn block(&self, name: &str) -> Option<&DataBlock> {
        self.blocks.iter().find(|block| {
            block
                .name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// All loops in the document, including those inside save frames
    pub fn loops(&self) -> Vec<&Loop> {
        self.blocks.iter().flat_map(DataBlock::loops).collect()
    }
}

impl DataBlock {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    /// Value of a top-level tag-value pair
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.items.iter().find_map(|item| match item {
            Item::Pair { tag: t, value } if t.eq_ignore_ascii_case(tag) => Some(value),
            _ => None,
        })
    }

    /// Loops of this block in source order, including those inside save frames
    pub fn loops(&self) -> Vec<&Loop> {
        let mut found = Vec::new();
        collect_loops(&self.items, &mut found);
        found
    }

    /// The first loop whose header contains `field`
    pub fn loop_with_field(&self, field: &str) -> Option<&Loop> {
        self.loops()
            .into_iter()
            .find(|lp| !lp.field_indices(field).is_empty())
    }
}

fn collect_loops<'a>(items: &'a [Item], found: &mut Vec<&'a Loop>) {
    for item in items {
        match item {
            Item::Loop(lp) => found.push(lp),
            Item::SaveFrame { items, .. } => collect_loops(items, found),
            Item::Pair { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> DataBlock {
        DataBlock {
            name: Some("test".to_string()),
            items: vec![
                Item::Pair {
                    tag: "_cell.length_a".to_string(),
                    value: Value::bare("5.4"),
                },
                Item::Loop(Loop::new(vec!["_a".to_string()], vec![])),
                Item::SaveFrame {
                    name: "frame".to_string(),
                    items: vec![Item::Loop(Loop::new(vec!["_b".to_string()], vec![]))],
                },
            ],
        }
    }

    #[test]
    fn test_get_pair() {
        let block = block();
        assert_eq!(block.get("_CELL.length_a"), Some(&Value::bare("5.4")));
        assert_eq!(block.get("_missing"), None);
    }

    #[test]
    fn test_loops_descend_into_save_frames() {
        let block = block();
        assert_eq!(block.loops().len(), 2);
        assert_eq!(block.loop_with_field("_b").unwrap().fields, vec!["_b"]);
    }

    #[test]
    fn test_block_lookup() {
        let doc = Document::new(vec![DataBlock::new(None), block()]);
        assert!(doc.block("TEST").is_some());
        assert!(doc.block("other").is_none());
        assert_eq!(doc.loops().len(), 2);
    }
}

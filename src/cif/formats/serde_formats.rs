//! JSON and YAML output through serde

use crate::cif::ast::Document;

use super::registry::{FormatError, Formatter};

pub struct JsonFormatter {
    pub pretty: bool,
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Document as JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Document as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cif::ast::{DataBlock, Item, Loop, Value};

    fn doc() -> Document {
        Document::new(vec![DataBlock {
            name: Some("d".to_string()),
            items: vec![
                Item::Pair {
                    tag: "_t".to_string(),
                    value: Value::bare("1"),
                },
                Item::Loop(Loop::new(
                    vec!["_a".to_string()],
                    vec![vec![Value::bare("2")]],
                )),
            ],
        }])
    }

    #[test]
    fn test_compact_json() {
        let json = JsonFormatter { pretty: false }.serialize(&doc()).unwrap();
        assert_eq!(
            json,
            r#"{"blocks":[{"name":"d","items":[{"kind":"pair","tag":"_t","value":{"text":"1","quoting":"bare"}},{"kind":"loop","fields":["_a"],"rows":[[{"text":"2","quoting":"bare"}]]}]}]}"#
        );
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let json = JsonFormatter { pretty: true }.serialize(&doc()).unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blocks"][0]["items"][1]["fields"][0], "_a");
    }

    #[test]
    fn test_yaml() {
        let yaml = YamlFormatter.serialize(&doc()).unwrap();
        assert!(yaml.contains("name: d"));
        assert!(yaml.contains("kind: loop"));
        assert!(yaml.contains("- _a"));
    }
}

use crate::semantic::Node;
use crate::utility::{attribute, ends_with_unescaped_quote, int_attribute, split_property, unescape_newlines};

/// Builds a node from its `[node ...]` header. Missing attributes read as
/// empty strings or zero.
pub fn start_node(line: &str) -> Node {
    Node {
        name: attribute(line, "name").unwrap_or_default().to_string(),
        node_type: attribute(line, "type").unwrap_or_default().to_string(),
        parent_ref: attribute(line, "parent").unwrap_or_default().to_string(),
        index: int_attribute(line, "index"),
        ..Node::default()
    }
}

/// Stores a single-line `key = value`. Returns the key, or `None` for lines
/// without `=`.
pub fn add_property<'a>(node: &mut Node, line: &'a str) -> Option<&'a str> {
    let (key, value) = split_property(line)?;

    let starts = value.starts_with('"');
    let ends = ends_with_unescaped_quote(value);
    let value = match (starts, ends) {
        (true, false) => &value[1..],
        (false, true) => &value[..value.len() - 1],
        _ => value,
    };

    set_property(node, key, value);
    Some(key)
}

/// Stores an already delimited value, converting escaped newlines.
pub fn set_property(node: &mut Node, key: &str, value: &str) {
    let value = unescape_newlines(value);
    if key == "script" {
        node.script = Some(value.clone());
    }
    node.properties.insert(key.to_string(), value);
}

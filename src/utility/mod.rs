use std::sync::LazyLock;

use regex::Regex;

// `key="value"` or bare `key=value` inside a section header.
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b([A-Za-z_][A-Za-z0-9_]*)=(?:"([^"]*)"|([^\s\]"]+))"#).unwrap());

/// Value of the first `name=` attribute on `line`, quoted or bare.
pub fn attribute<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE_RE
        .captures_iter(line)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
}

/// Like [`attribute`] but empty values count as absent.
pub fn non_empty_attribute<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    attribute(line, name).filter(|value| !value.is_empty())
}

/// Integer attribute. Missing or malformed values read as zero.
pub fn int_attribute(line: &str, name: &str) -> i64 {
    attribute(line, name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Turns escaped `\n` sequences into real newlines.
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// True when `value` ends with a `"` that is not escaped by a backslash.
pub fn ends_with_unescaped_quote(value: &str) -> bool {
    let Some(body) = value.strip_suffix('"') else {
        return false;
    };
    let backslashes = body.bytes().rev().take_while(|&b| b == b'\\').count();
    backslashes % 2 == 0
}

/// A value that opens a quote without closing it on the same line.
pub fn opens_multiline(value: &str) -> bool {
    match value.strip_prefix('"') {
        Some(rest) => !ends_with_unescaped_quote(rest),
        None => false,
    }
}

/// Splits `key = value` on the first `=`, trimming both sides.
pub fn split_property(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

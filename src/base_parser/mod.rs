use crate::semantic::ResourceKind;
use crate::utility::{ends_with_unescaped_quote, opens_multiline, split_property};
use crate::{ParseError, Result};


/// One logical line of a scene file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// `[gd_scene ...]`
    Header(String),
    /// `[ext_resource ...]` or `[sub_resource ...]`
    Resource(ResourceKind, String),
    /// `[node ...]`
    NodeStart(String),
    /// Any other bracketed section (`[connection ...]`, `[editable ...]`...).
    OtherSection(String),
    /// A single-line `key = value`, trimmed.
    Property(String),
    /// A quoted value that spanned several physical lines, quotes removed.
    MultilineValue { key: String, value: String },
}

/// A multiline value still open when the input ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedValue {
    pub key: String,
    pub text: String,
    pub opened_at: usize,
}

#[derive(Debug)]
enum State {
    Normal,
    Multiline {
        key: String,
        text: String,
        opened_at: usize,
    },
}

/// Classifies physical lines one at a time and joins quoted values that span
/// several of them. Nothing inside an open quote is ever treated as a section.
#[derive(Debug)]
pub struct LineClassifier {
    state: State,
    max_line_bytes: usize,
    line_number: usize,
}

impl LineClassifier {
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            state: State::Normal,
            max_line_bytes,
            line_number: 0,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn in_multiline(&self) -> bool {
        matches!(self.state, State::Multiline { .. })
    }

    /// Feeds one physical line, without its terminator.
    pub fn classify(&mut self, raw: &str) -> Result<Option<LineEvent>> {
        self.line_number += 1;
        self.check_capacity(raw.len())?;

        if let State::Multiline { key, text, .. } = &mut self.state {
            let trimmed = raw.trim_end();
            if ends_with_unescaped_quote(trimmed) {
                text.push_str(&trimmed[..trimmed.len() - 1]);
                let key = std::mem::take(key);
                let value = std::mem::take(text);
                self.state = State::Normal;
                self.check_capacity(value.len())?;
                return Ok(Some(LineEvent::MultilineValue { key, value }));
            }
            text.push_str(raw);
            text.push('\n');
            let len = text.len();
            self.check_capacity(len)?;
            return Ok(None);
        }

        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            return Ok(None);
        }

        if line.starts_with('[') {
            let event = match section_name(line) {
                "gd_scene" => LineEvent::Header(line.to_string()),
                "ext_resource" => LineEvent::Resource(ResourceKind::External, line.to_string()),
                "sub_resource" => LineEvent::Resource(ResourceKind::Embedded, line.to_string()),
                "node" => LineEvent::NodeStart(line.to_string()),
                _ => LineEvent::OtherSection(line.to_string()),
            };
            return Ok(Some(event));
        }

        if let Some((key, value)) = split_property(line) {
            if opens_multiline(value) {
                let mut text = String::with_capacity(value.len());
                text.push_str(&value[1..]);
                text.push('\n');
                self.state = State::Multiline {
                    key: key.to_string(),
                    text,
                    opened_at: self.line_number,
                };
                return Ok(None);
            }
        }

        Ok(Some(LineEvent::Property(line.to_string())))
    }

    /// Ends the input. Returns the value that was still being accumulated,
    /// which is never committed.
    pub fn finish(self) -> Option<UnterminatedValue> {
        match self.state {
            State::Normal => None,
            State::Multiline {
                key,
                text,
                opened_at,
            } => Some(UnterminatedValue {
                key,
                text,
                opened_at,
            }),
        }
    }

    fn check_capacity(&self, len: usize) -> Result<()> {
        if len > self.max_line_bytes {
            return Err(ParseError::LineTooLong {
                line: self.line_number,
                len,
                max: self.max_line_bytes,
            });
        }
        Ok(())
    }
}

/// `node` for `[node name="A"]`, `gd_scene` for `[gd_scene]`.
pub fn section_name(line: &str) -> &str {
    let inner = line.trim_start_matches('[');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == ']')
        .unwrap_or(inner.len());
    &inner[..end]
}

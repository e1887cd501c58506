use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

pub mod base_parser;
pub mod config;
pub mod parsers;
pub mod query;
pub mod resolver;
pub mod semantic;
pub mod tree;
pub mod utility;

pub use config::{ConfigError, ParseConfig};
pub use parsers::LogObserver;
pub use query::{find_by_path, path_from_root};
pub use resolver::resolve_resource_reference;
pub use semantic::{
    Node, NodeId, NoopObserver, ParentMatch, ParseEvent, ParseObserver, Resource, ResourceKind,
    Scene,
};

use base_parser::{LineClassifier, LineEvent};
use parsers::{ResourceRegistry, add_property, set_property, start_node};
use utility::int_attribute;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line} is {len} bytes long, the limit is {max}")]
    LineTooLong { line: usize, len: usize, max: usize },
}

/// Parses Godot text scenes into a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct TscnParser {
    config: ParseConfig,
}

impl TscnParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn parse_str(&self, input: &str) -> Result<Scene> {
        self.parse_reader(input.as_bytes())
    }

    pub fn parse_file(&self, path: &Path) -> Result<Scene> {
        self.parse_file_observed(path, &mut NoopObserver)
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Scene> {
        self.parse_reader_observed(reader, &mut NoopObserver)
    }

    pub fn parse_str_observed<O: ParseObserver + ?Sized>(&self, input: &str, observer: &mut O) -> Result<Scene> {
        self.parse_reader_observed(input.as_bytes(), observer)
    }

    pub fn parse_file_observed<O: ParseObserver + ?Sized>(&self, path: &Path, observer: &mut O) -> Result<Scene> {
        let file = File::open(path)?;
        self.parse_reader_observed(BufReader::new(file), observer)
    }

    /// Reads the whole input, then links the declared nodes into a tree.
    /// Only unreadable input and over-long lines are errors; anything
    /// malformed degrades to defaults.
    pub fn parse_reader_observed<R: BufRead, O: ParseObserver + ?Sized>(
        &self,
        mut reader: R,
        observer: &mut O,
    ) -> Result<Scene> {
        let max = self.config.max_line_bytes;
        let mut classifier = LineClassifier::new(max);
        let mut registry = ResourceRegistry::new();
        let mut scene = Scene::default();
        let mut nodes: Vec<Node> = Vec::new();
        let mut in_node = false;
        let mut buf = Vec::new();

        while read_line(&mut reader, &mut buf, max, classifier.line_number() + 1)? {
            let line = std::str::from_utf8(&buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            observer.on_event(&ParseEvent::Line {
                number: classifier.line_number() + 1,
                text: line,
            });

            let Some(event) = classifier.classify(line)? else {
                continue;
            };

            match event {
                LineEvent::Header(header) => {
                    scene.load_steps = int_attribute(&header, "load_steps");
                    scene.format = int_attribute(&header, "format");
                    observer.on_event(&ParseEvent::Header {
                        load_steps: scene.load_steps,
                        format: scene.format,
                    });
                    in_node = false;
                }
                LineEvent::Resource(kind, declaration) => {
                    match registry.register(kind, &declaration) {
                        Some(resource) => observer.on_event(&ParseEvent::ResourceRegistered { kind, key: &resource.id }),
                        None => observer.on_event(&ParseEvent::ResourceDropped {
                            kind,
                            line: &declaration,
                        }),
                    }
                    in_node = false;
                }
                LineEvent::NodeStart(header) => {
                    let node = start_node(&header);
                    observer.on_event(&ParseEvent::NodeStarted {
                        name: &node.name,
                        node_type: &node.node_type,
                        parent_ref: &node.parent_ref,
                    });
                    nodes.push(node);
                    in_node = true;
                }
                LineEvent::OtherSection(_) => in_node = false,
                LineEvent::Property(property) => {
                    if let Some(node) = nodes.last_mut().filter(|_| in_node) {
                        if let Some(key) = add_property(node, &property) {
                            observer.on_event(&ParseEvent::PropertySet { node: &node.name, key });
                        }
                    }
                }
                LineEvent::MultilineValue { key, value } => {
                    if let Some(node) = nodes.last_mut().filter(|_| in_node) {
                        set_property(node, &key, &value);
                        observer.on_event(&ParseEvent::PropertySet { node: &node.name, key: &key });
                    }
                }
            }
        }

        if let Some(pending) = classifier.finish() {
            observer.on_event(&ParseEvent::MultilineDiscarded {
                key: &pending.key,
                bytes: pending.text.len(),
            });
        }

        scene.root = tree::assemble(&mut nodes, observer);
        scene.nodes = nodes;
        let (ext_resources, sub_resources, declarations) = registry.into_parts();
        scene.ext_resources = ext_resources;
        scene.sub_resources = sub_resources;
        scene.resource_declarations = declarations;

        observer.on_event(&ParseEvent::Finished {
            nodes: scene.nodes.len(),
        });
        Ok(scene)
    }
}

/// Parses a whole scene with the default configuration.
pub fn parse<R: BufRead>(reader: R) -> Result<Scene> {
    TscnParser::new().parse_reader(reader)
}

/// Reads one physical line into `buf` without its terminator. Never buffers
/// more than a couple of bytes past `max`.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, max: usize, number: usize) -> Result<bool> {
    buf.clear();
    let limit = u64::try_from(max.saturating_add(2)).unwrap_or(u64::MAX);
    let read = reader.by_ref().take(limit).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(false);
    }

    let terminated = buf.last() == Some(&b'\n');
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    if buf.len() > max {
        return Err(ParseError::LineTooLong {
            line: number,
            len: buf.len(),
            max,
        });
    }
    Ok(true)
}

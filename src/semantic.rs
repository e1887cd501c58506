use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// ----------------- Ids -----------------

/// Index of a node in [`Scene::nodes`], which is declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ----------------- Node -----------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Node {
    /// `name` attribute exactly as written.
    pub name: String,
    /// `type` attribute, empty when the node is an instance or has none.
    pub node_type: String,
    /// `parent` attribute: `""` is the implicit root, `"."` the root itself,
    /// anything else a name or slash path that may not match a canonical path.
    pub parent_ref: String,
    /// `index` attribute. Advisory only, never used for tree shape.
    pub index: i64,
    /// Set once during assembly.
    pub path: String,
    pub script: Option<String>,
    pub properties: HashMap<String, String>,
    pub children: Vec<NodeId>,
    /// The node this one got attached to. `None` only for the root.
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn is_root_declaration(&self) -> bool {
        self.parent_ref.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.node_type)?;
        if !self.children.is_empty() {
            write!(f, " ({} children)", self.children.len())?;
        }
        Ok(())
    }
}

// ----------------- Resources -----------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    /// `[ext_resource]`, content lives in another file.
    External,
    /// `[sub_resource]`, content is described inline.
    Embedded,
}

impl ResourceKind {
    /// Name of the call-like token that references this kind in a value.
    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::External => "ExtResource",
            ResourceKind::Embedded => "SubResource",
        }
    }

    pub fn section(self) -> &'static str {
        match self {
            ResourceKind::External => "ext_resource",
            ResourceKind::Embedded => "sub_resource",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub kind: ResourceKind,
    /// Key other sections use to reference this resource.
    pub id: String,
    pub resource_type: String,
    /// Only meaningful for external resources.
    pub path: Option<String>,
    pub uid: Option<String>,
}

// ----------------- Scene -----------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    pub format: i64,
    pub load_steps: i64,
    /// Every node in declaration order.
    pub nodes: Vec<Node>,
    pub root: Option<NodeId>,
    pub ext_resources: HashMap<String, Resource>,
    pub sub_resources: HashMap<String, Resource>,
    /// Raw resource header lines in input order, dropped ones included.
    pub resource_declarations: Vec<String>,
}

impl Scene {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| self.node(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id).children.iter().map(|&child| self.node(child))
    }

    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|parent| self.node(parent))
    }

    pub fn id_of(&self, node: &Node) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|candidate| std::ptr::eq(candidate, node))
            .map(NodeId)
    }

    pub fn find_by_path(&self, query: &str) -> Option<&Node> {
        crate::query::find_by_path(self, query)
    }

    pub fn path_from_root(&self, target: NodeId) -> Vec<&Node> {
        crate::query::path_from_root(self, target)
    }

    /// Resolved script path, or the raw `script` value when it does not
    /// reference a known resource.
    pub fn resolved_script(&self, node: &Node) -> Option<String> {
        let script = node.script.as_deref()?;
        Some(crate::resolver::resolve_resource_reference(script, self).unwrap_or_else(|| script.to_string()))
    }

    pub fn resolved_property(&self, node: &Node, key: &str) -> Option<String> {
        let value = node.property(key)?;
        Some(crate::resolver::resolve_resource_reference(value, self).unwrap_or_else(|| value.to_string()))
    }
}

// ----------------- Observers -----------------

/// Tier of the parent lookup that placed a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentMatch {
    /// `parent="."`
    Root,
    ExactPath,
    Name,
    LastComponent,
    PathSuffix,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent<'a> {
    Line { number: usize, text: &'a str },
    Header { load_steps: i64, format: i64 },
    ResourceRegistered { kind: ResourceKind, key: &'a str },
    ResourceDropped { kind: ResourceKind, line: &'a str },
    NodeStarted { name: &'a str, node_type: &'a str, parent_ref: &'a str },
    PropertySet { node: &'a str, key: &'a str },
    MultilineDiscarded { key: &'a str, bytes: usize },
    RootDesignated { name: &'a str },
    ParentResolved { node: &'a str, parent_path: &'a str, via: ParentMatch },
    AttachedToRoot { node: &'a str, parent_ref: &'a str },
    Finished { nodes: usize },
}

/// Receives diagnostics while a scene is parsed and assembled.
pub trait ParseObserver {
    fn on_event(&mut self, event: &ParseEvent<'_>);
}

impl<F: FnMut(&ParseEvent<'_>)> ParseObserver for F {
    fn on_event(&mut self, event: &ParseEvent<'_>) {
        self(event)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {
    fn on_event(&mut self, _event: &ParseEvent<'_>) {}
}

use indexmap::IndexMap;

use crate::semantic::{Node, NodeId, ParentMatch, ParseEvent, ParseObserver};

/// Canonical path -> node, in the order paths were assigned.
pub type PathIndex = IndexMap<String, NodeId>;

/// Links `nodes` into a tree in one forward pass and returns the root.
///
/// Each node's `parent` reference is resolved only against nodes that come
/// before it. A reference that resolves to nothing attaches the node to the
/// root, so every node ends up somewhere. The first node with an empty
/// reference becomes the root; if there is none, the first node that finds no
/// parent does.
pub fn assemble<O: ParseObserver + ?Sized>(nodes: &mut [Node], observer: &mut O) -> Option<NodeId> {
    let mut root: Option<NodeId> = None;
    let mut index = PathIndex::new();

    for i in 0..nodes.len() {
        let id = NodeId(i);
        let (processed, rest) = nodes.split_at_mut(i);
        let node = &mut rest[0];

        let found = match (node.parent_ref.as_str(), root) {
            ("", _) => None,
            (".", Some(root_id)) => Some((root_id, ParentMatch::Root)),
            (parent_ref, _) => find_parent(parent_ref, &index, processed),
        };

        match (found, root) {
            (Some((parent_id, via)), _) => {
                let parent = &mut processed[parent_id.0];
                parent.children.push(id);
                node.path = format!("{}/{}", parent.path, node.name);
                node.parent = Some(parent_id);
                observer.on_event(&ParseEvent::ParentResolved {
                    node: &node.name,
                    parent_path: &parent.path,
                    via,
                });
            }
            (None, Some(root_id)) => {
                let parent = &mut processed[root_id.0];
                parent.children.push(id);
                node.path = format!("{}/{}", parent.path, node.name);
                node.parent = Some(root_id);
                observer.on_event(&ParseEvent::AttachedToRoot {
                    node: &node.name,
                    parent_ref: &node.parent_ref,
                });
            }
            (None, None) => {
                node.path = node.name.clone();
                root = Some(id);
                observer.on_event(&ParseEvent::RootDesignated { name: &node.name });
            }
        }

        index.insert(node.path.clone(), id);
    }

    root
}

/// Looks for the node a `parent` reference points at, trying in order: an
/// exact canonical path, the first node declared with that name, the first
/// node named like the reference's last path component, and finally any
/// assigned path ending in `/<reference>`.
pub fn find_parent(parent_ref: &str, index: &PathIndex, processed: &[Node]) -> Option<(NodeId, ParentMatch)> {
    if let Some(&id) = index.get(parent_ref) {
        return Some((id, ParentMatch::ExactPath));
    }

    if let Some(id) = first_named(processed, parent_ref) {
        return Some((id, ParentMatch::Name));
    }

    if let Some((_, last)) = parent_ref.rsplit_once('/') {
        if let Some(id) = first_named(processed, last) {
            return Some((id, ParentMatch::LastComponent));
        }
    }

    let suffix = format!("/{parent_ref}");
    index
        .iter()
        .find(|(path, _)| path.ends_with(&suffix))
        .map(|(_, &id)| (id, ParentMatch::PathSuffix))
}

fn first_named(processed: &[Node], name: &str) -> Option<NodeId> {
    processed.iter().position(|node| node.name == name).map(NodeId)
}

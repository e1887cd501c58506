use crate::semantic::{Node, NodeId, Scene};

/// Finds the node best matching `query`.
///
/// Tiers, each scanned in declaration order, first hit wins:
/// exact canonical path or declared name, then a path ending in `/<query>`,
/// then a path containing `query` anywhere.
pub fn find_by_path<'a>(scene: &'a Scene, query: &str) -> Option<&'a Node> {
    find_id_by_path(scene, query).map(|id| scene.node(id))
}

pub fn find_id_by_path(scene: &Scene, query: &str) -> Option<NodeId> {
    let nodes = &scene.nodes;

    if let Some(i) = nodes.iter().position(|n| n.path == query || n.name == query) {
        return Some(NodeId(i));
    }

    let suffix = format!("/{query}");
    if let Some(i) = nodes.iter().position(|n| n.path.ends_with(&suffix)) {
        return Some(NodeId(i));
    }

    nodes.iter().position(|n| n.path.contains(query)).map(NodeId)
}

/// Nodes from the root down to `target`, both included. Empty when `target`
/// cannot be reached from the root.
pub fn path_from_root(scene: &Scene, target: NodeId) -> Vec<&Node> {
    let mut trail = Vec::new();
    if let Some(root) = scene.root {
        if descend(scene, root, target, &mut trail) {
            return trail.into_iter().map(|id| scene.node(id)).collect();
        }
    }
    Vec::new()
}

fn descend(scene: &Scene, current: NodeId, target: NodeId, trail: &mut Vec<NodeId>) -> bool {
    trail.push(current);
    if current == target {
        return true;
    }
    for &child in &scene.node(current).children {
        if descend(scene, child, target, trail) {
            return true;
        }
    }
    trail.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TscnParser;

    const SCENE: &str = r#"[gd_scene format=3]

[node name="Main" type="Node"]

[node name="A" type="Node2D" parent="."]

[node name="X" type="Node2D" parent="."]

[node name="B" type="Sprite2D" parent="A"]

[node name="B" type="Sprite2D" parent="X"]

[node name="Label" type="Label" parent="X/B"]
"#;

    fn scene() -> Scene {
        TscnParser::new().parse_str(SCENE).unwrap()
    }

    #[test]
    fn test_exact_tier_returns_first_declared() {
        let scene = scene();
        assert_eq!(find_by_path(&scene, "B").map(|n| n.path.as_str()), Some("Main/A/B"));
        assert_eq!(find_by_path(&scene, "Main/X/B").map(|n| n.path.as_str()), Some("Main/X/B"));
    }

    #[test]
    fn test_suffix_then_substring() {
        let scene = scene();
        assert_eq!(find_by_path(&scene, "X/B").map(|n| n.path.as_str()), Some("Main/X/B"));
        assert_eq!(find_by_path(&scene, "A/").map(|n| n.path.as_str()), Some("Main/A/B"));
        assert_eq!(find_by_path(&scene, "Lab").map(|n| n.name.as_str()), Some("Label"));
        assert!(find_by_path(&scene, "Nothing").is_none());
    }

    #[test]
    fn test_trail_from_root() {
        let scene = scene();
        let target = find_id_by_path(&scene, "Label").unwrap();
        let names: Vec<&str> = path_from_root(&scene, target).iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Main", "A", "B", "Label"]);
    }

    #[test]
    fn test_root_trail_is_just_the_root() {
        let scene = scene();
        let trail = path_from_root(&scene, scene.root.unwrap());
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].name, "Main");
    }

    #[test]
    fn test_unreachable_target_gives_empty_trail() {
        let scene = scene();
        assert!(path_from_root(&scene, NodeId(42)).is_empty());
        assert!(path_from_root(&Scene::default(), NodeId(0)).is_empty());
    }
}

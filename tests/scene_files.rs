use std::path::{Path, PathBuf};

use tscn_tree::{LogObserver, ParseConfig, ParseError, ResourceKind, Scene, TscnParser};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn main_scene() -> Scene {
    TscnParser::new()
        .parse_file(&fixture("main.tscn"))
        .expect("fixture parses")
}

fn names<'a>(scene: &'a Scene, path: &str) -> Vec<&'a str> {
    let node = scene.find_by_path(path).expect("node exists");
    node.children.iter().map(|&id| scene.node(id).name.as_str()).collect()
}

#[test]
fn test_header_and_counts() {
    let scene = main_scene();
    assert_eq!(scene.load_steps, 8);
    assert_eq!(scene.format, 3);
    assert_eq!(scene.nodes.len(), 11);
    assert_eq!(scene.resource_declarations.len(), 7);
    assert_eq!(scene.ext_resources.len(), 5);
    assert_eq!(scene.sub_resources.len(), 2);
}

#[test]
fn test_tree_shape() {
    let scene = main_scene();
    assert_eq!(scene.root_node().map(|n| n.name.as_str()), Some("Main"));
    assert_eq!(
        names(&scene, "Main"),
        ["ColorRect", "Player", "MobTimer", "StartPosition", "MobPath", "HUD", "Music"]
    );
    assert_eq!(names(&scene, "MobPath"), ["MobSpawnLocation"]);
    assert_eq!(names(&scene, "HUD"), ["Message", "StartButton"]);
    assert_eq!(
        scene.find_by_path("StartButton").map(|n| n.path.as_str()),
        Some("Main/HUD/StartButton")
    );
}

#[test]
fn test_node_details() {
    let scene = main_scene();
    let player = scene.find_by_path("Player").unwrap();
    assert_eq!(player.node_type, "");
    assert_eq!(scene.find_by_path("HUD/StartButton").unwrap().index, 1);

    let message = scene.find_by_path("Main/HUD/Message").unwrap();
    assert_eq!(message.property("text"), Some("Dodge the\nCreeps!"));
    assert_eq!(message.property("horizontal_alignment"), Some("1"));
    assert_eq!(
        scene.resolved_property(message, "theme_override_fonts/font").as_deref(),
        Some("res://fonts/Xolonium-Regular.ttf")
    );
}

#[test]
fn test_sub_resource_bodies_do_not_create_nodes() {
    let scene = main_scene();
    assert!(scene.find_by_path("NotARealNode").is_none());
    assert!(scene.nodes.iter().all(|n| n.property("point_count").is_none()));
}

#[test]
fn test_scripts_resolve() {
    let scene = main_scene();
    let main = scene.root_node().unwrap();
    assert_eq!(scene.resolved_script(main).as_deref(), Some("res://main.gd"));
    let hud = scene.find_by_path("HUD").unwrap();
    assert_eq!(scene.resolved_script(hud).as_deref(), Some("SubResource(GDScript)"));
    assert_eq!(scene.resolved_script(scene.find_by_path("Music").unwrap()), None);
}

#[test]
fn test_resource_without_id_is_keyed_by_uid() {
    let scene = main_scene();
    let music = &scene.ext_resources["uid://dnk7ghe1vmxrv"];
    assert_eq!(music.kind, ResourceKind::External);
    assert_eq!(music.resource_type, "AudioStream");
    assert_eq!(music.path.as_deref(), Some("res://art/House In a Forest Loop.ogg"));
}

#[test]
fn test_path_from_root_to_a_leaf() {
    let scene = main_scene();
    let target = scene
        .ids()
        .find(|&id| scene.node(id).name == "MobSpawnLocation")
        .unwrap();
    let trail: Vec<&str> = scene.path_from_root(target).iter().map(|n| n.name.as_str()).collect();
    assert_eq!(trail, ["Main", "MobPath", "MobSpawnLocation"]);
}

#[test]
fn test_serializes_to_json() {
    let scene = main_scene();
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["root"], 0);
    assert_eq!(json["nodes"][0]["name"], "Main");
    assert_eq!(json["nodes"][1]["parent"], 0);
    assert_eq!(json["ext_resources"]["1_x7kbi"]["path"], "res://main.gd");
    assert_eq!(json["sub_resources"]["Curve2D_1"]["kind"], "Embedded");
}

#[test]
fn test_observed_parse_matches_plain_parse() {
    let plain = main_scene();
    let observed = TscnParser::new()
        .parse_file_observed(&fixture("main.tscn"), &mut LogObserver)
        .unwrap();
    assert_eq!(plain.nodes, observed.nodes);
}

#[test]
fn test_tight_line_limit_rejects_the_file() {
    let parser = TscnParser::with_config(ParseConfig::default().with_max_line_bytes(40));
    let err = parser.parse_file(&fixture("main.tscn")).unwrap_err();
    assert!(matches!(err, ParseError::LineTooLong { line: 1, .. }));
}

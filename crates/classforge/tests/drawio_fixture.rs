//! End-to-end tests against a diagram saved by diagrams.net

use std::path::PathBuf;

use classforge::prelude::*;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shapes.drawio")
}

fn model() -> ClassDatabase {
    let nodes = DrawioLoader::new().load_file(fixture()).unwrap();
    Orchestrator::new().analyze(&nodes)
}

#[test]
fn test_fixture_classes() {
    let model = model();
    let summary: Vec<_> = model.classes().map(|c| (c.name.as_str(), c.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("Shape", ConstructKind::AbstractClass),
            ("Drawable", ConstructKind::Interface),
            ("Color", ConstructKind::Enum),
            ("Point", ConstructKind::Record),
            ("Circle", ConstructKind::Class),
            ("Square", ConstructKind::Class),
        ]
    );
}

#[test]
fn test_fixture_members() {
    let model = model();

    let shape = model.get_class("shape").unwrap();
    let fields: Vec<_> = shape.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["name"]);
    assert!(shape.methods[0].is_abstract);
    assert!(!shape.methods[1].is_abstract);

    let drawable = model.get_class("drawable").unwrap();
    assert_eq!(drawable.methods[0].visibility, Visibility::Public);
    assert!(drawable.methods[0].is_abstract);
    assert_eq!(drawable.methods[1].visibility, Visibility::Default);

    let point = model.get_class("point").unwrap();
    assert!(point.fields[2].is_static);
    assert!(point.fields[2].is_final);
}

#[test]
fn test_fixture_relationships() {
    let model = model();

    let circle = model.get_class("circle").unwrap();
    assert_eq!(circle.superclass.as_deref(), Some("Shape"));
    assert_eq!(circle.interfaces, vec!["Drawable"]);

    // Dashed arrow to an abstract class is inheritance; arrow to an enum is dropped
    let square = model.get_class("square").unwrap();
    assert_eq!(square.superclass.as_deref(), Some("Shape"));
    assert!(square.interfaces.is_empty());

    let point = model.get_class("point").unwrap();
    assert!(point.superclass.is_none());
    assert!(point.interfaces.is_empty());
}

#[test]
fn test_fixture_hierarchy() {
    let model = model();

    let circle = model.get_class("circle").unwrap();
    let methods: Vec<_> = circle
        .methods
        .iter()
        .map(|m| (m.name.as_str(), m.is_override))
        .collect();
    assert_eq!(
        methods,
        vec![("describe", false), ("area", true), ("draw", true)]
    );

    let square = model.get_class("square").unwrap();
    let names: Vec<_> = square.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["area"]);
}

#[test]
fn test_fixture_java_output() {
    let orchestrator = Orchestrator::new();
    let artifacts = orchestrator.generate(&model()).unwrap();
    assert_eq!(artifacts.len(), 6);

    let circle = artifacts.iter().find(|a| a.class_name == "Circle").unwrap();
    assert!(circle
        .content
        .contains("public class Circle extends Shape implements Drawable {"));
    assert!(circle.content.contains("    public double getRadius() {\n"));
    assert!(circle.content.contains("    public void setRadius(double radius) {\n"));
    assert!(!circle.content.contains("getters/setters"));
    assert!(circle.content.contains("    @Override\n    public void draw(Canvas canvas) {\n"));

    let color = artifacts.iter().find(|a| a.class_name == "Color").unwrap();
    assert!(color.content.contains("    RED, GREEN;\n"));
    assert!(color.content.contains("    private String hex;\n"));

    let point = artifacts.iter().find(|a| a.class_name == "Point").unwrap();
    assert!(point.content.contains("public record Point(int x, int y) {\n"));
    assert!(point.content.contains("    public static final Point ORIGIN = null;\n"));

    let drawable = artifacts.iter().find(|a| a.class_name == "Drawable").unwrap();
    assert!(drawable.content.contains("    void draw(Canvas canvas);\n"));
    assert!(drawable.content.contains("    default void hide();\n"));
}

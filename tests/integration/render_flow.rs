use crate::common::TestProject;

/// Template + one value file, strict mode, no host properties.
#[test]
fn test_basic_render_end_to_end() {
    let project = TestProject::new();
    project.write("t.j2", "Hello {{ name }}, files: {{ items | join(', ') }}");
    project.write("v.json", r#"{"name": "World", "items": ["a", "b"]}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out/greeting.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read("out/greeting.txt"), "Hello World, files: a, b");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Rendered 1 resource(s)."));
}

/// Later value files override earlier ones, key by key.
#[test]
fn test_value_file_merge_order() {
    let project = TestProject::new();
    project.write("t.j2", "{{ env }}:{{ region }}");
    project.write("base.json", r#"{"env": "dev", "region": "local"}"#);
    project.write("prod.json", r#"{"env": "prod"}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["base.json", "prod.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    assert!(project.run(&[]).status.success());
    assert_eq!(project.read("out.txt"), "prod:local");
}

/// Structured values stay traversable inside the template.
#[test]
fn test_structured_values_traversable() {
    let project = TestProject::new();
    project.write("t.j2", "{{ servers[1].host }}:{{ servers[1].port }}");
    project.write(
        "v.json",
        r#"{"servers": [{"host": "a", "port": 1}, {"host": "b", "port": 2}]}"#,
    );
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    assert!(project.run(&[]).status.success());
    assert_eq!(project.read("out.txt"), "b:2");
}

/// Host properties are flattened and merged before value files.
#[test]
fn test_host_properties_flattened_and_overridable() {
    let project = TestProject::new();
    project.write(
        "host.json",
        r#"{"project": {"name": "demo", "version": "1.2.3"}, "env": "host"}"#,
    );
    project.write("t.j2", "{{ project.name }}-{{ project.version }} ({{ env }})");
    project.write("v.json", r#"{"env": "prod"}"#);
    project.write_manifest(
        r#"
        host-properties = "host.json"

        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        "#,
    );

    let output = project.run(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read("out.txt"), "demo-1.2.3 (prod)");
}

/// Includes resolve through the dependency directory chain, in order.
#[test]
fn test_include_through_dependency_dirs() {
    let project = TestProject::new();
    project.write("partials/header.j2", "== {{ title }} ==");
    project.write("t.j2", "{% include 'header.j2' %}\nbody");
    project.write("v.json", r#"{"title": "Config"}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        dependency-dirs = ["partials"]
        "#,
    );

    let output = project.run(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read("out.txt"), "== Config ==\nbody");
}

/// Bundled resources ship inside the binary and are includable by name.
#[test]
fn test_bundled_resource_include() {
    let project = TestProject::new();
    project.write("t.j2", "{% include 'builtin/generated-header.txt' %}payload");
    project.write("v.json", "{}");
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    assert!(project.run(&[]).status.success());
    let rendered = project.read("out.txt");
    assert!(rendered.contains("Generated by jinjagen"));
    assert!(rendered.ends_with("payload"));
}

/// Several resources render sequentially in manifest order.
#[test]
fn test_multiple_resources_in_order() {
    let project = TestProject::new();
    project.write("a.j2", "A={{ v }}");
    project.write("b.j2", "B={{ v }}");
    project.write("v.json", r#"{"v": "1"}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "a.j2"
        values = ["v.json"]
        output = "a.txt"
        include-host-properties = false

        [[resource]]
        template = "b.j2"
        values = ["v.json"]
        output = "b.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(output.status.success());
    assert_eq!(project.read("a.txt"), "A=1");
    assert_eq!(project.read("b.txt"), "B=1");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Rendered 2 resource(s)."));
}

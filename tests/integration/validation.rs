use crate::common::TestProject;

#[test]
fn test_empty_resource_set_rejected() {
    let project = TestProject::new();
    project.write_manifest("overwrite-output = false\n");

    let output = project.run(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 1 resource"), "stderr: {stderr}");
}

#[test]
fn test_missing_template_rejected() {
    let project = TestProject::new();
    project.write("v.json", "{}");
    project.write_manifest(
        r#"
        [[resource]]
        template = "absent.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!project.exists("out.txt"));
}

#[test]
fn test_no_data_source_rejected() {
    let project = TestProject::new();
    project.write("t.j2", "static");
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("'values' must be defined"),
    );
}

/// Existing output without --overwrite fails before any rendering occurs.
#[test]
fn test_overwrite_policy() {
    let project = TestProject::new();
    project.write("t.j2", "{{ v }}");
    project.write("v.json", r#"{"v": "new"}"#);
    project.write("out.txt", "old content");
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Overwriting output files has been disabled")
    );
    assert_eq!(project.read("out.txt"), "old content");

    // Same run with --overwrite replaces the full content
    let output = project.run(&["--overwrite"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read("out.txt"), "new");
}

#[test]
fn test_dotted_value_key_rejected() {
    let project = TestProject::new();
    project.write("t.j2", "x");
    project.write("v.json", r#"{"bad.key": "value"}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot contain chars in [.]"));
}

#[test]
fn test_malformed_value_file_rejected() {
    let project = TestProject::new();
    project.write("t.j2", "x");
    project.write("v.json", "{broken");
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON"));
}

/// Strict mode aggregates every unresolved reference into one error.
#[test]
fn test_strict_mode_reports_all_missing() {
    let project = TestProject::new();
    project.write("t.j2", "{{ alpha }} {{ beta }}");
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

    let output = project.run(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("undefined variable 'alpha'"), "stderr: {stderr}");
    assert!(stderr.contains("undefined variable 'beta'"), "stderr: {stderr}");
    assert!(!project.exists("out.txt"));
}

/// Strict mode also catches references that only go missing inside an
/// included template.
#[test]
fn test_strict_mode_reports_missing_in_included_template() {
    let project = TestProject::new();
    project.write("t.j2", "[{% include 'p.j2' %}]");
    project.write("partials/p.j2", "{{ totally_missing }}");
    project.write("v.json", "{}");
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
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("undefined"), "stderr: {stderr}");
    assert!(!project.exists("out.txt"));
}

/// The same template renders (partially empty) under --lenient.
#[test]
fn test_lenient_mode_accepts_missing() {
    let project = TestProject::new();
    project.write("t.j2", "<{{ alpha }}>");
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

    let output = project.run(&["--lenient"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read("out.txt"), "<>");
}

#[test]
fn test_missing_dependency_dir_rejected() {
    let project = TestProject::new();
    project.write("t.j2", "x");
    project.write("v.json", "{}");
    project.write_manifest(
        r#"
        [[resource]]
        template = "t.j2"
        values = ["v.json"]
        output = "out.txt"
        include-host-properties = false
        dependency-dirs = ["no-such-dir"]
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

/// The run halts at the first failing resource; later ones never run.
#[test]
fn test_fail_fast_across_resources() {
    let project = TestProject::new();
    project.write("good.j2", "ok={{ v }}");
    project.write("v.json", r#"{"v": "1"}"#);
    project.write_manifest(
        r#"
        [[resource]]
        template = "good.j2"
        values = ["v.json"]
        output = "first.txt"
        include-host-properties = false

        [[resource]]
        template = "missing.j2"
        values = ["v.json"]
        output = "second.txt"
        include-host-properties = false

        [[resource]]
        template = "good.j2"
        values = ["v.json"]
        output = "third.txt"
        include-host-properties = false
        "#,
    );

    let output = project.run(&[]);
    assert!(!output.status.success());
    // The first output keeps its content; nothing after the failure exists
    assert_eq!(project.read("first.txt"), "ok=1");
    assert!(!project.exists("second.txt"));
    assert!(!project.exists("third.txt"));
}

//! Report templates: Tera strings, function templates, and builtins.

use anyhow::anyhow;
use oss_notice::config::{Options, parse_config};
use oss_notice::core::NoticeError;
use oss_notice::plugin::Dependency;
use oss_notice::templating::{BuiltinTemplate, ReportTemplate};
use oss_notice::test_utils::PackageFixture;
use std::sync::{Arc, Mutex};

use crate::common::TestProject;

fn two_dependency_project() -> (TestProject, Vec<std::path::PathBuf>) {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![
        project
            .add_module(
                "a",
                PackageFixture::new("A", "1.0.0")
                    .license("MIT")
                    .license_file("LICENSE.md", "A license text")
                    .field("author", serde_json::json!({"name": "Ann", "email": "ann@example.com"})),
            )
            .unwrap(),
        project
            .add_module(
                "b",
                PackageFixture::new("B", "2.0.0")
                    .license("Apache-2.0")
                    .field("repository", serde_json::json!({"type": "git", "url": "https://example.com/b.git"})),
            )
            .unwrap(),
    ];
    (project, files)
}

#[tokio::test]
async fn test_string_template_renders_once_over_whole_list() {
    let (project, files) = two_dependency_project();
    let template = r#"[{% for dep in dependencies %}"{{ dep.name }}@{{ dep.version }}"{% if not loop.last %},{% endif %}{% endfor %}]"#;

    project
        .build(Options::default().with_template(ReportTemplate::text(template)), &files)
        .await
        .unwrap();

    let report = project.read("dist/dependencies.txt").unwrap();
    let parsed: Vec<String> = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed, vec!["A@1.0.0", "B@2.0.0"]);
}

#[tokio::test]
async fn test_string_template_sees_root_and_license_texts() {
    let (project, files) = two_dependency_project();
    let template = "{{ root.name }}|{{ root.license_text }}\n{% for dep in dependencies %}{{ dep.name }}:{{ dep.license_text }}:{{ dep.author }}:{{ dep.repository }}\n{% endfor %}";

    project
        .build(Options::default().with_template(ReportTemplate::text(template)), &files)
        .await
        .unwrap();

    assert_eq!(
        project.read("dist/dependencies.txt").unwrap(),
        "root|Root license for root\nA:A license text:Ann <ann@example.com>:\nB::https://example.com/b.git\n"
    );
}

#[tokio::test]
async fn test_function_template_receives_filtered_list_and_root() {
    let (project, files) = two_dependency_project();
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let calls = Arc::clone(&seen);

    let template = ReportTemplate::function(move |deps: &[Dependency], root: &Dependency| {
        calls.lock().unwrap().push(root.manifest.name.clone());
        Ok(deps.iter().map(|d| d.manifest.name.as_str()).collect::<Vec<_>>().join(","))
    });
    project.build(Options::default().with_template(template), &files).await.unwrap();

    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "A,B");
    assert_eq!(*seen.lock().unwrap(), vec!["root".to_string()]);
}

#[tokio::test]
async fn test_function_template_empty_output_writes_nothing() {
    let (project, files) = two_dependency_project();

    let template = ReportTemplate::function(|_, _| Ok(String::new()));
    let (_, outcome) = project.build(Options::default().with_template(template), &files).await.unwrap();

    assert!(!outcome.written);
    assert!(!project.exists("dist/dependencies.txt"));
}

#[tokio::test]
async fn test_function_template_error_is_reported() {
    let (project, files) = two_dependency_project();

    let template = ReportTemplate::function(|_, _| Err(anyhow!("license audit failed")));
    let err = project.build(Options::default().with_template(template), &files).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<NoticeError>(), Some(NoticeError::TemplateFunction { .. })));
    assert!(format!("{err:#}").contains("license audit failed"));
    assert!(!project.exists("dist/dependencies.txt"));
}

#[tokio::test]
async fn test_unknown_report_variable_fails_with_suggestion() {
    let (project, files) = two_dependency_project();
    let template = "{% for dep in dependencies %}{{ dep.licence }}{% endfor %}";

    let err = project
        .build(Options::default().with_template(ReportTemplate::text(template)), &files)
        .await
        .unwrap_err();

    match err.downcast_ref::<NoticeError>() {
        Some(NoticeError::TemplateRender {
            template,
            ..
        }) => assert_eq!(template, "report"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!project.exists("dist/dependencies.txt"));
}

#[tokio::test]
async fn test_json_builtin_from_options_file() {
    let (project, files) = two_dependency_project();
    let options_path = project
        .write(
            "oss-notice.toml",
            "[third_party.output]\nfile = \"licenses.json\"\ntemplate = { builtin = \"json\" }\n",
        )
        .unwrap();
    let options: Options = parse_config(&options_path).unwrap();

    project.build(options, &files).await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&project.read("dist/licenses.json").unwrap()).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "A");
    assert_eq!(entries[0]["licenseText"], "A license text");
    assert_eq!(entries[0]["author"], "Ann <ann@example.com>");
    assert!(entries[0].get("repository").is_none());
    assert_eq!(entries[1]["repository"], "https://example.com/b.git");
    assert_eq!(entries[1]["licenseText"], "");
}

#[tokio::test]
async fn test_builtin_on_empty_build_writes_nothing() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let entry = project.path().join("src/index.js");

    for builtin in [BuiltinTemplate::Lines, BuiltinTemplate::Json] {
        let (_, outcome) = project
            .build(Options::default().with_template(builtin.into()), std::slice::from_ref(&entry))
            .await
            .unwrap();
        assert!(!outcome.written, "{builtin} wrote an empty report");
    }
}

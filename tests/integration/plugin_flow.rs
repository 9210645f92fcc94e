//! Full builds through the plugin hooks against packages on disk.

use oss_notice::config::Options;
use oss_notice::plugin::{BuildOptions, LicensePlugin};
use oss_notice::test_utils::PackageFixture;
use oss_notice::utils::OsFileSystem;
use oss_notice::version::VersionOrdering;
use std::sync::Arc;

use crate::common::TestProject;

#[tokio::test]
async fn test_default_build_writes_lines_report() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let lodash = project
        .add_module("lodash", PackageFixture::new("lodash", "4.17.21").license("MIT"))
        .unwrap();
    let entry = project.path().join("src/index.js");

    let (build, outcome) = project.build(Options::default(), &[entry, lodash]).await.unwrap();

    assert_eq!(build.banner.as_deref(), Some("/*! root v1.0.0 | MIT */"));
    assert!(outcome.written);
    assert_eq!(outcome.dependency_count, 1);
    assert_eq!(outcome.path, project.path().join("dist/dependencies.txt"));
    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "lodash:4.17.21 -- MIT\n");
}

#[tokio::test]
async fn test_self_package_never_reported() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let mut files = Vec::new();
    for i in 0..5 {
        files.push(project.write(&format!("src/module{i}.js"), "").unwrap());
    }
    files.push(project.add_module("react", PackageFixture::new("react", "18.2.0").license("MIT")).unwrap());

    let (_, outcome) = project.build(Options::default(), &files).await.unwrap();

    let report = project.read("dist/dependencies.txt").unwrap();
    assert_eq!(outcome.dependency_count, 1);
    assert!(!report.contains("root"), "self package leaked into report: {report}");
}

#[tokio::test]
async fn test_private_packages_follow_include_private() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![
        project.add_module("internal", PackageFixture::new("internal", "0.1.0").private()).unwrap(),
        project.add_module("public", PackageFixture::new("public", "1.0.0").license("ISC")).unwrap(),
    ];

    project.build(Options::default(), &files).await.unwrap();
    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "public:1.0.0 -- ISC\n");

    project.build(Options::default().with_include_private(true), &files).await.unwrap();
    assert_eq!(
        project.read("dist/dependencies.txt").unwrap(),
        "internal:0.1.0 -- \npublic:1.0.0 -- ISC\n"
    );
}

#[tokio::test]
async fn test_duplicate_versions_keep_lexically_greatest() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![
        project.add_module("dup", PackageFixture::new("dup", "10.0.0").license("MIT")).unwrap(),
        project
            .add_module("a/node_modules/dup", PackageFixture::new("dup", "9.0.0").license("MIT"))
            .unwrap(),
    ];

    project.build(Options::default(), &files).await.unwrap();
    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "dup:9.0.0 -- MIT\n");

    project
        .build(Options::default().with_version_ordering(VersionOrdering::Semver), &files)
        .await
        .unwrap();
    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "dup:10.0.0 -- MIT\n");
}

#[tokio::test]
async fn test_relative_output_resolves_against_outdir() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![project.add_module("ms", PackageFixture::new("ms", "2.1.3").license("MIT")).unwrap()];

    let options = Options::default().with_output_file("legal/THIRD_PARTY.txt");
    let (_, outcome) = project.build(options, &files).await.unwrap();

    assert_eq!(outcome.path, project.path().join("dist/legal/THIRD_PARTY.txt"));
    assert!(project.exists("dist/legal/THIRD_PARTY.txt"));
    assert!(!project.exists("legal/THIRD_PARTY.txt"));
}

#[tokio::test]
async fn test_absolute_output_ignores_outdir() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![project.add_module("ms", PackageFixture::new("ms", "2.1.3")).unwrap()];
    let target = project.path().join("out/notices.txt");

    let (_, outcome) = project.build(Options::default().with_output_file(&target), &files).await.unwrap();

    assert_eq!(outcome.path, target);
    assert!(target.exists());
}

#[tokio::test]
async fn test_files_outside_packages_are_ignored() {
    let project = TestProject::empty().unwrap();
    let loose = project.write("scratch/loose.js", "").unwrap();

    let (build, outcome) = project.build(Options::default(), &[loose]).await.unwrap();

    assert_eq!(build.banner.as_deref(), Some("/*!  v |  */"));
    assert!(!outcome.written);
    assert!(!project.exists("dist/dependencies.txt"));
}

#[tokio::test]
async fn test_nameless_nested_manifest_is_not_reported() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let files = vec![
        project.add_module("uuid", PackageFixture::new("uuid", "9.0.1").license("MIT")).unwrap(),
        project
            .add_module("uuid/dist/esm", PackageFixture::unnamed("").field("type", serde_json::json!("module")))
            .unwrap(),
    ];

    let (_, outcome) = project.build(Options::default(), &files).await.unwrap();

    assert_eq!(outcome.dependency_count, 1);
    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "uuid:9.0.1 -- MIT\n");
}

#[tokio::test]
async fn test_malformed_dependency_manifest_fails_observation() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let broken = project.write("node_modules/broken/package.json", "{ not json").unwrap();
    let file = broken.with_file_name("index.js");
    std::fs::write(&file, "").unwrap();

    let plugin = LicensePlugin::new(Options::default(), Arc::new(OsFileSystem));
    let mut build = BuildOptions::new(project.path());
    let session = plugin.setup(&mut build).unwrap();

    let err = session.on_load(&file).await.unwrap_err();
    assert!(format!("{err:#}").contains("package.json"), "unexpected error: {err:#}");
}

#[tokio::test]
async fn test_aborted_build_writes_nothing() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let file = project.add_module("ms", PackageFixture::new("ms", "2.1.3")).unwrap();

    let plugin = LicensePlugin::new(Options::default(), Arc::new(OsFileSystem));
    let mut build = BuildOptions::new(project.path()).with_outdir("dist");
    let session = plugin.setup(&mut build).unwrap();
    session.on_load(&file).await.unwrap();
    drop(session);

    assert!(!project.exists("dist"));
}

#[tokio::test]
async fn test_plugin_reused_across_builds_starts_fresh() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    let first = project.add_module("first", PackageFixture::new("first", "1.0.0").license("MIT")).unwrap();
    let second = project.add_module("second", PackageFixture::new("second", "1.0.0").license("MIT")).unwrap();

    let plugin = LicensePlugin::new(Options::default(), Arc::new(OsFileSystem));

    let mut build = BuildOptions::new(project.path()).with_outdir("dist");
    let session = plugin.setup(&mut build).unwrap();
    session.on_load(&first).await.unwrap();
    session.on_end(&build).await.unwrap();

    let mut build = BuildOptions::new(project.path()).with_outdir("dist");
    let session = plugin.setup(&mut build).unwrap();
    session.on_load(&second).await.unwrap();
    session.on_end(&build).await.unwrap();

    assert_eq!(project.read("dist/dependencies.txt").unwrap(), "second:1.0.0 -- MIT\n");
}

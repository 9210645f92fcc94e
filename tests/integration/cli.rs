//! The `oss-notice` binary.

use assert_cmd::Command;
use oss_notice::test_utils::PackageFixture;
use predicates::prelude::*;

use crate::common::TestProject;

fn oss_notice(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("oss-notice").unwrap();
    cmd.current_dir(project.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_report_over_node_modules() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    project.add_module("lodash", PackageFixture::new("lodash", "4.17.21").license("MIT")).unwrap();
    project.add_module("react", PackageFixture::new("react", "18.2.0").license("MIT")).unwrap();

    oss_notice(&project)
        .args(["report", "src", "node_modules", "--outdir", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 third-party package(s)"));

    assert_eq!(
        project.read("dist/dependencies.txt").unwrap(),
        "lodash:4.17.21 -- MIT\nreact:18.2.0 -- MIT\n"
    );
}

#[test]
fn test_report_flags_override_options_file() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    project.add_module("secret", PackageFixture::new("secret", "1.0.0").private()).unwrap();
    project.add_module("dup", PackageFixture::new("dup", "10.0.0").license("MIT")).unwrap();
    project.add_module("x/node_modules/dup", PackageFixture::new("dup", "9.0.0").license("MIT")).unwrap();
    project.write("oss-notice.toml", "[third_party.output]\nfile = \"from-options.txt\"\n").unwrap();

    oss_notice(&project)
        .args([
            "report",
            "node_modules",
            "--include-private",
            "--version-ordering",
            "semver",
            "--output",
            "NOTICES.txt",
            "-j",
            "2",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(project.read("NOTICES.txt").unwrap(), "dup:10.0.0 -- MIT\nsecret:1.0.0 -- \n");
    assert!(!project.exists("from-options.txt"));
}

#[test]
fn test_report_with_nothing_to_report() {
    let project = TestProject::new("root", "1.0.0").unwrap();

    oss_notice(&project)
        .args(["report", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to report"));

    assert!(!project.exists("dependencies.txt"));
}

#[test]
fn test_report_missing_input_fails() {
    let project = TestProject::new("root", "1.0.0").unwrap();

    oss_notice(&project)
        .args(["report", "does/not/exist.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_report_bad_template_fails() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    project.add_module("ms", PackageFixture::new("ms", "2.1.3")).unwrap();
    project
        .write("custom.toml", "[third_party.output]\ntemplate = \"{{ dependencies | length }\"\n")
        .unwrap();

    oss_notice(&project)
        .args(["report", "node_modules", "--options", "custom.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("report template"));

    assert!(!project.exists("dependencies.txt"));
}

#[test]
fn test_unknown_option_key_is_rejected() {
    let project = TestProject::new("root", "1.0.0").unwrap();
    project.write("oss-notice.toml", "baner = \"typo\"\n").unwrap();

    oss_notice(&project).args(["banner"]).assert().failure();
}

#[test]
fn test_banner_command() {
    let project = TestProject::new("root", "1.0.0").unwrap();

    oss_notice(&project)
        .args(["banner"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/*! root v1.0.0 | MIT */\n"));
}

#[test]
fn test_banner_from_nested_working_dir() {
    let project = TestProject::new("root", "1.0.0").unwrap();

    oss_notice(&project)
        .args(["banner", "--working-dir", "src", "--prepend", "'use strict';"])
        .assert()
        .success()
        .stdout(predicate::str::diff("'use strict';\n/*! root v1.0.0 | MIT */\n"));
}

#[test]
fn test_help_lists_commands() {
    let project = TestProject::empty().unwrap();

    oss_notice(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report").and(predicate::str::contains("banner")));
}

//! CLI integration tests for recipe.
//!
//! These tests run the `recipe` binary against a recipe manifest in a
//! temporary directory. Platform flags are always given explicitly so the
//! results do not depend on the compilers installed on the test machine.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const RECIPE: &str = r#"
[package]
name = "oatpp"
description = "Modern Web Framework for C++"
homepage = "https://github.com/oatpp/oatpp"
license = "Apache-2.0"
topics = ["oatpp", "web-framework"]

[options]
shared = false
fPIC = true

[sources."1.2.0"]
url = "https://github.com/oatpp/oatpp/archive/1.2.0.tar.gz"

[sources."1.2.5"]
url = "https://github.com/oatpp/oatpp/archive/1.2.5.tar.gz"
sha256 = "b6ee4fe8c4c4ee8a6bd3cf8bff1e5b4e70c3c4dfc8e8c4e5f56f6e0a2d0b7f31"
"#;

const LINUX_GCC9: &[&str] = &["--os", "Linux", "--compiler", "gcc", "--compiler-version", "9"];
const WINDOWS_MSVC: &[&str] = &[
    "--os",
    "Windows",
    "--compiler",
    "msvc",
    "--compiler-version",
    "16",
];

/// Get the recipe binary command, isolated from the user's global config.
fn recipe(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("recipe").unwrap();
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

/// Temporary project directory containing a Recipe.toml.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Recipe.toml"), RECIPE).unwrap();
    tmp
}

// ============================================================================
// recipe check
// ============================================================================

#[test]
fn test_check_linux_static() {
    let tmp = project();

    recipe(tmp.path())
        .arg("check")
        .args(LINUX_GCC9)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("oatpp 1.2.5 can be built"))
        .stdout(predicate::str::contains("shared=False fPIC=True"))
        .stdout(predicate::str::contains("-DOATPP_BUILD_TESTS=OFF"))
        .stdout(predicate::str::contains("-DCMAKE_WINDOWS_EXPORT_ALL_SYMBOLS=ON"));
}

#[test]
fn test_check_windows_drops_fpic() {
    let tmp = project();

    recipe(tmp.path())
        .arg("check")
        .args(WINDOWS_MSVC)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(fPIC removed)"))
        .stdout(predicate::str::contains("CMAKE_POSITION_INDEPENDENT_CODE").not());
}

#[test]
fn test_check_rejects_windows_shared() {
    let tmp = project();

    recipe(tmp.path())
        .arg("check")
        .args(WINDOWS_MSVC)
        .args(["-o", "shared=True"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("shared build unsupported"));
}

#[test]
fn test_check_rejects_old_gcc() {
    let tmp = project();

    recipe(tmp.path())
        .args(["check", "--os", "Linux", "--compiler", "gcc", "--compiler-version", "4.8"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("compiler too old"));
}

#[test]
fn test_check_rejects_old_standard() {
    let tmp = project();

    recipe(tmp.path())
        .arg("check")
        .args(LINUX_GCC9)
        .args(["--cppstd", "98"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimum language standard not met"));
}

#[test]
fn test_check_rejects_unknown_option() {
    let tmp = project();

    recipe(tmp.path())
        .arg("check")
        .args(LINUX_GCC9)
        .args(["-o", "with_ssl=True"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("with_ssl"));
}

#[test]
fn test_check_requires_compiler_version() {
    let tmp = project();

    recipe(tmp.path())
        .args(["check", "--compiler", "gcc"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be given together"));
}

#[test]
fn test_missing_recipe() {
    let tmp = TempDir::new().unwrap();

    recipe(tmp.path())
        .arg("check")
        .args(LINUX_GCC9)
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read recipe"));
}

// ============================================================================
// recipe describe
// ============================================================================

#[test]
fn test_describe_linux_json() {
    let tmp = project();

    let output = recipe(tmp.path())
        .arg("describe")
        .args(LINUX_GCC9)
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "oatpp");
    assert_eq!(json["version"], "1.2.5");

    let components = json["components"].as_array().unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0]["id"], "core");
    assert_eq!(components[0]["system_libs"][0], "pthread");
    assert_eq!(components[0]["include_dirs"][0], "include/oatpp-1.2.5/oatpp");
    assert_eq!(components[1]["id"], "test-support");
    assert_eq!(components[1]["requires"][0], "core");
}

#[test]
fn test_describe_windows_system_libs() {
    let tmp = project();

    recipe(tmp.path())
        .arg("describe")
        .args(WINDOWS_MSVC)
        .args(["--pkg-version", "1.2.0"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ws2_32"))
        .stdout(predicate::str::contains("wsock32"))
        .stdout(predicate::str::contains("lib/oatpp-1.2.0"))
        .stdout(predicate::str::contains("pthread").not());
}

#[test]
fn test_describe_component_link_line() {
    let tmp = project();

    recipe(tmp.path())
        .arg("describe")
        .args(LINUX_GCC9)
        .args(["--component", "test-support"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("components:  test-support core"))
        .stdout(predicate::str::contains("libs:        oatpp-test oatpp"))
        .stdout(predicate::str::contains("system_libs: pthread"));
}

// ============================================================================
// recipe create
// ============================================================================

#[test]
fn test_create_rejects_before_fetch() {
    let tmp = project();

    recipe(tmp.path())
        .arg("create")
        .args(WINDOWS_MSVC)
        .args(["-o", "shared=True"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("shared build unsupported"));

    assert!(!tmp.path().join(".recipe/work").exists());
}

// ============================================================================
// recipe probe / completions
// ============================================================================

#[test]
fn test_probe_missing_tool() {
    let tmp = TempDir::new().unwrap();

    recipe(tmp.path())
        .args(["probe", "definitely-not-a-build-tool"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("definitely-not-a-build-tool: not found"))
        .stdout(predicate::str::contains("generator: (platform default)"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    recipe(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recipe"));
}

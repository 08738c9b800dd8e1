//! Test fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::platform::{Compiler, CppStandard, OperatingSystem, PlatformDescriptor};
use crate::core::recipe::Recipe;

/// Linux, gcc 9, C++17.
pub fn linux_gcc9() -> PlatformDescriptor {
    PlatformDescriptor::new(OperatingSystem::Linux, Compiler::Gcc, "9".parse().unwrap())
        .with_arch("x86_64")
        .with_cppstd(CppStandard::Cpp17)
}

/// Windows, Visual Studio 16.
pub fn windows_msvc() -> PlatformDescriptor {
    PlatformDescriptor::new(
        OperatingSystem::Windows,
        Compiler::VisualStudio,
        "16".parse().unwrap(),
    )
    .with_arch("x86_64")
}

/// Write an unpacked source tree (`<root>/<name>-<version>`) with a license
/// and a CMakeLists.txt, and return its path.
pub fn write_source_tree(root: &Path, name: &str, version: &str) -> PathBuf {
    let dir = root.join(format!("{}-{}", name, version));
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("LICENSE"), "Apache License\nVersion 2.0\n").unwrap();
    fs::write(
        dir.join("CMakeLists.txt"),
        format!("cmake_minimum_required(VERSION 3.10)\nproject({} VERSION {})\n", name, version),
    )
    .unwrap();
    fs::write(dir.join("src").join("Environment.hpp"), "#pragma once\n").unwrap();
    dir
}

/// Recipe whose single version points at a local directory.
pub fn local_recipe(name: &str, version: &str, source_dir: &Path) -> Recipe {
    let content = format!(
        r#"[package]
name = "{name}"
license = "Apache-2.0"

[options]
shared = false
fPIC = true

[sources."{version}"]
url = "{url}"
"#,
        url = source_dir.display().to_string().replace('\\', "/"),
    );
    Recipe::parse(&content, Path::new("Recipe.toml")).unwrap()
}

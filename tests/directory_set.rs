// tests/directory_set.rs
mod common;
use crate::common::{init_tracing, Project};

use std::collections::HashSet;
use std::path::PathBuf;

use gowatch::errors::GowatchError;
use gowatch::fs::mock::MockFileSystem;
use gowatch::fs::RealFileSystem;
use gowatch::watch::{diff, discover, DirectorySet};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn discover_lists_root_and_all_subdirectories_depth_first() -> TestResult {
    init_tracing();
    let project = Project::new();
    project.mkdir("a/x");
    project.mkdir("b");

    let dirs = discover(&RealFileSystem, project.root())?;

    assert_eq!(
        dirs,
        vec![
            project.root().to_path_buf(),
            project.path("a"),
            project.path("a/x"),
            project.path("b"),
            project.path("pkg"),
        ]
    );
    Ok(())
}

#[test]
fn discover_on_mock_fs_ignores_files() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/main.go", b"package main");
    fs.add_file("/proj/pkg/util/strings.go", b"package util");
    fs.add_dir("/proj/cmd");

    let dirs = discover(&fs, &PathBuf::from("/proj"))?;

    let expected: Vec<PathBuf> = ["/proj", "/proj/cmd", "/proj/pkg", "/proj/pkg/util"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(dirs, expected);
    Ok(())
}

#[test]
fn traversal_error_aborts_discovery() {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/main.go", b"package main");
    fs.add_dir("/proj/secret");
    fs.deny("/proj/secret");

    let result = discover(&fs, &PathBuf::from("/proj"));
    assert!(result.is_err(), "expected permission error, got {result:?}");
}

#[test]
fn discover_rejects_a_root_that_is_not_a_directory() {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/main.go", b"package main");

    let result = discover(&fs, &PathBuf::from("/proj/main.go"));
    assert!(matches!(result, Err(GowatchError::ConfigError(_))));
}

#[test]
fn diff_reports_only_new_directories() -> TestResult {
    let project = Project::new();
    let known: HashSet<PathBuf> = discover(&RealFileSystem, project.root())?.into_iter().collect();

    let (fresh, exists) = diff(&RealFileSystem, project.root(), &known)?;
    assert!(!exists);
    assert!(fresh.is_empty());

    project.mkdir("internal/db");
    let (fresh, exists) = diff(&RealFileSystem, project.root(), &known)?;
    assert!(exists);
    assert_eq!(fresh, vec![project.path("internal"), project.path("internal/db")]);
    Ok(())
}

#[test]
fn directory_set_reports_each_directory_once() -> TestResult {
    let project = Project::new();
    let mut set = DirectorySet::new(project.root());

    let first = set.refresh(&RealFileSystem)?;
    assert_eq!(first, vec![project.root().to_path_buf(), project.path("pkg")]);
    assert!(set.refresh(&RealFileSystem)?.is_empty());

    let api = project.mkdir("api");
    assert_eq!(set.refresh(&RealFileSystem)?, vec![api.clone()]);
    assert!(set.refresh(&RealFileSystem)?.is_empty());

    let order: Vec<PathBuf> = set.iter().map(PathBuf::from).collect();
    assert_eq!(order, vec![project.root().to_path_buf(), project.path("pkg"), api]);
    Ok(())
}

#[test]
fn recreated_directory_is_reported_again() -> TestResult {
    let project = Project::new();
    let mut set = DirectorySet::new(project.root());
    set.refresh(&RealFileSystem)?;

    let pkg = project.path("pkg");
    std::fs::remove_dir_all(&pkg)?;
    assert!(set.refresh(&RealFileSystem)?.is_empty());
    assert!(!set.contains(&pkg));
    assert_eq!(set.len(), 1);

    project.mkdir("pkg");
    assert_eq!(set.refresh(&RealFileSystem)?, vec![pkg.clone()]);
    assert!(set.contains(&pkg));
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() -> TestResult {
    let project = Project::new();
    std::os::unix::fs::symlink(project.root(), project.path("pkg/loop"))?;

    let dirs = discover(&RealFileSystem, project.root())?;
    assert_eq!(dirs, vec![project.root().to_path_buf(), project.path("pkg")]);
    Ok(())
}

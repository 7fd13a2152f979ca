// tests/commands.rs
mod common;
use crate::common::Project;

use gowatch::exec::command::{build_args, describe};
use gowatch_test_utils::builders::WatchConfigBuilder;

#[test]
fn go_build_writes_to_the_launched_binary() {
    let project = Project::new();
    let cfg = WatchConfigBuilder::new(project.root())
        .binary("server")
        .build_flag("-race")
        .build();

    let artifact = project.path("server").display().to_string();
    assert_eq!(build_args(&cfg), vec!["build", "-o", artifact.as_str(), "-race"]);
    assert_eq!(describe(&cfg), format!("go build -o {artifact} -race"));
}

#[test]
fn default_binary_name_is_also_passed_to_go_build() {
    let project = Project::new();
    let cfg = WatchConfigBuilder::new(project.root()).build();

    let args = build_args(&cfg);
    assert_eq!(args[..2], ["build", "-o"]);
    assert_eq!(args[2], cfg.artifact().display().to_string());
}

#[test]
fn explicit_output_flag_is_left_alone() {
    let project = Project::new();
    let cfg = WatchConfigBuilder::new(project.root())
        .build_flag("-o")
        .build_flag("bin/app")
        .build();
    assert_eq!(build_args(&cfg), vec!["build", "-o", "bin/app"]);

    let cfg = WatchConfigBuilder::new(project.root())
        .build_flag("-o=bin/app")
        .build();
    assert_eq!(build_args(&cfg), vec!["build", "-o=bin/app"]);
}

#[test]
fn custom_build_commands_get_only_their_flags() {
    let project = Project::new();
    let cfg = WatchConfigBuilder::new(project.root())
        .build_command(&["make", "app"])
        .build_flag("V=1")
        .build();
    assert_eq!(build_args(&cfg), vec!["app", "V=1"]);
    assert_eq!(describe(&cfg), "make app V=1");
}

// tests/config_loading.rs
mod common;
use crate::common::Project;

use std::fs;

use clap::Parser;
use tracing::Level;

use gowatch::cli::{CliArgs, LogLevel};
use gowatch::config::{load_from_path, merge_cli, resolve, ConfigFile, RawWatchConfig, WatchConfig};
use gowatch::errors::GowatchError;
use gowatch::logging::resolve_level;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn args(project: &Project, extra: &[&str]) -> CliArgs {
    let config = project.path(".gowatch.toml");
    let dir = project.root().display().to_string();
    let mut argv = vec![
        "gowatch".to_string(),
        "-c".to_string(),
        config.display().to_string(),
        "-d".to_string(),
        dir,
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    CliArgs::parse_from(argv)
}

#[test]
fn missing_config_file_yields_defaults() -> TestResult {
    let project = Project::new();
    let file = load_from_path(project.path("nope.toml"))?;
    assert!(file.build_flags.is_empty());
    assert!(file.ignore.is_empty());
    assert!(file.binary.is_none());
    assert!(!file.skip_format_noise);
    Ok(())
}

#[test]
fn config_file_is_parsed() -> TestResult {
    let project = Project::new();
    fs::write(
        project.path(".gowatch.toml"),
        r#"
build_flags = ["-race"]
run_flags = ["--port", "8080"]
ignore = ["*_test.go"]
skip_format_noise = true
binary = "server"
"#,
    )?;

    let cfg = resolve(&args(&project, &[]))?;
    assert_eq!(cfg.root(), project.root());
    assert_eq!(cfg.build_flags(), ["-race"]);
    assert_eq!(cfg.run_flags(), ["--port", "8080"]);
    assert_eq!(cfg.ignore(), ["*_test.go"]);
    assert!(cfg.skip_format_noise());
    assert!(!cfg.verbose());
    assert_eq!(cfg.artifact(), project.path("server"));
    assert_eq!(cfg.build_command(), ["go", "build"]);
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let project = Project::new();
    fs::write(project.path(".gowatch.toml"), "buildflags = [\"-race\"]\n")?;

    let result = resolve(&args(&project, &[]));
    assert!(matches!(result, Err(GowatchError::TomlError(_))), "{result:?}");
    Ok(())
}

#[test]
fn cli_flags_override_file_values() -> TestResult {
    let project = Project::new();
    let file = ConfigFile {
        build_flags: vec!["-race".into()],
        run_flags: vec!["from-file".into()],
        ignore: vec!["vendor/**".into()],
        ..ConfigFile::default()
    };

    let raw = merge_cli(
        file.clone(),
        &args(&project, &["--build-flags=-v, -x", "-i", "*_test.go,,gen/*.go"]),
    )?;
    assert_eq!(raw.build_flags, vec!["-v", "-x"]);
    assert_eq!(raw.ignore, vec!["*_test.go", "gen/*.go"]);
    assert_eq!(raw.run_flags, vec!["from-file"]);

    let raw = merge_cli(file.clone(), &args(&project, &["--", "serve", "--debug"]))?;
    assert_eq!(raw.run_flags, vec!["serve", "--debug"]);

    let raw = merge_cli(
        file,
        &args(&project, &["--run-flags", "a,b", "--", "ignored"]),
    )?;
    assert_eq!(raw.run_flags, vec!["a", "b"]);
    Ok(())
}

#[test]
fn boolean_flags_only_switch_on() -> TestResult {
    let project = Project::new();
    let file = ConfigFile {
        verbose: true,
        ..ConfigFile::default()
    };

    let raw = merge_cli(file, &args(&project, &["--skip-format-noise"]))?;
    assert!(raw.verbose);
    assert!(raw.skip_format_noise);

    let raw = merge_cli(ConfigFile::default(), &args(&project, &["-V"]))?;
    assert!(raw.verbose);
    assert!(!raw.skip_format_noise);
    Ok(())
}

#[test]
fn dot_dir_resolves_to_current_directory() -> TestResult {
    let argv = CliArgs::parse_from(["gowatch", "-c", "/nonexistent/.gowatch.toml"]);
    let raw = merge_cli(ConfigFile::default(), &argv)?;
    assert_eq!(raw.dir, std::env::current_dir()?);
    Ok(())
}

#[test]
fn file_dir_applies_unless_overridden() -> TestResult {
    let project = Project::new();
    let file = ConfigFile {
        dir: Some(project.path("pkg").display().to_string()),
        ..ConfigFile::default()
    };

    let argv = CliArgs::parse_from(["gowatch"]);
    let raw = merge_cli(file.clone(), &argv)?;
    assert_eq!(raw.dir, project.path("pkg"));

    let raw = merge_cli(file, &args(&project, &[]))?;
    assert_eq!(raw.dir, project.root());
    Ok(())
}

#[test]
fn binary_defaults_to_directory_name() -> TestResult {
    let project = Project::new();
    let cfg = WatchConfig::try_from(RawWatchConfig::new(project.root()))?;
    let name = project.root().file_name().expect("tempdir has a name");
    assert_eq!(cfg.artifact(), project.root().join(name));

    // Trailing separators are tolerated.
    let with_slash = format!("{}/", project.root().display());
    let cfg = WatchConfig::try_from(RawWatchConfig::new(with_slash))?;
    assert_eq!(cfg.artifact(), project.root().join(name));
    Ok(())
}

#[test]
fn absolute_binary_is_kept() -> TestResult {
    let project = Project::new();
    let mut raw = RawWatchConfig::new(project.root());
    raw.binary = Some("/opt/bin/server".into());
    let cfg = WatchConfig::try_from(raw)?;
    assert_eq!(cfg.artifact(), std::path::Path::new("/opt/bin/server"));
    Ok(())
}

#[test]
fn invalid_configs_are_rejected() {
    let project = Project::new();

    let raw = RawWatchConfig::new(project.path("does-not-exist"));
    assert!(matches!(WatchConfig::try_from(raw), Err(GowatchError::ConfigError(_))));

    let raw = RawWatchConfig::new(project.path("main.go"));
    assert!(matches!(WatchConfig::try_from(raw), Err(GowatchError::ConfigError(_))));

    let mut raw = RawWatchConfig::new(project.root());
    raw.build_command = Vec::new();
    assert!(matches!(WatchConfig::try_from(raw), Err(GowatchError::ConfigError(_))));

    let mut raw = RawWatchConfig::new(project.root());
    raw.ignore = vec!["*.go".into(), "[oops".into()];
    assert!(matches!(
        WatchConfig::try_from(raw),
        Err(GowatchError::IgnorePattern { .. })
    ));
}

#[test]
fn log_level_priority() {
    assert_eq!(resolve_level(Some(LogLevel::Warn), true, Some("trace")), Level::WARN);
    assert_eq!(resolve_level(None, true, Some("error")), Level::DEBUG);
    assert_eq!(resolve_level(None, false, Some("trace")), Level::TRACE);
    assert_eq!(resolve_level(None, false, Some("WARNING")), Level::WARN);
    assert_eq!(resolve_level(None, false, Some("loud")), Level::INFO);
    assert_eq!(resolve_level(None, false, None), Level::INFO);
}

#[test]
fn recoverability() {
    assert!(GowatchError::CompileFailed("x".into()).is_recoverable());
    assert!(!GowatchError::NotificationChannel("x".into()).is_recoverable());
    assert!(!GowatchError::ConfigError("x".into()).is_recoverable());
}

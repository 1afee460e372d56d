use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use framediff::cli::CliArgs;
use framediff::config::{load_and_validate, load_or_default, ConfigFile};
use framediff::errors::FramediffError;
use framediff::{apply_overrides, build_extractor};

#[test]
fn test_full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[ffmpeg]
program = "ffmpeg6"
search_path = "/opt/ffmpeg/bin"
forward_stderr = false

[extract]
timeout_secs = 90
temp_dir = "/var/tmp"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.ffmpeg.program, "ffmpeg6");
    assert_eq!(cfg.ffmpeg.search_path.as_deref(), Some("/opt/ffmpeg/bin"));
    assert!(!cfg.ffmpeg.forward_stderr);
    assert_eq!(cfg.extract.timeout(), Some(Duration::from_secs(90)));
    assert_eq!(
        cfg.extract.temp_dir.as_deref(),
        Some(std::path::Path::new("/var/tmp"))
    );
}

#[test]
fn test_empty_config_uses_defaults() {
    let file = NamedTempFile::new().unwrap();
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.ffmpeg.program, "ffmpeg");
    assert!(cfg.ffmpeg.forward_stderr);
    assert!(cfg.ffmpeg.search_path.is_none());
    assert!(cfg.extract.timeout().is_none());
}

#[test]
fn test_zero_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[extract]\ntimeout_secs = 0\n").unwrap();

    match load_and_validate(file.path()) {
        Err(FramediffError::ConfigError(msg)) => assert!(msg.contains("timeout_secs")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_key_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[ffmpeg]\nprogramme = \"ffmpeg\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(FramediffError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_explicit_missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match load_or_default(Some(&missing)) {
        Err(FramediffError::IoError(_)) => {}
        Err(e) => panic!("Expected IoError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_cli_flags_override_config() {
    let args = CliArgs::parse_from([
        "framediff",
        "--ffmpeg",
        "/usr/local/bin/ffmpeg",
        "--timeout",
        "12",
        "--quiet",
        "--format",
        "json",
        "video.mp4",
    ]);

    let mut cfg = ConfigFile::default();
    apply_overrides(&mut cfg, &args);

    assert_eq!(args.input, "video.mp4");
    assert_eq!(cfg.ffmpeg.program, "/usr/local/bin/ffmpeg");
    assert!(!cfg.ffmpeg.forward_stderr);
    assert_eq!(cfg.extract.timeout_secs, Some(12));
}

#[test]
fn test_unresolvable_program_is_resolution_error() {
    let mut cfg = ConfigFile::default();
    cfg.ffmpeg.program = "framediff-no-such-ffmpeg".to_string();

    match build_extractor(&cfg) {
        Err(FramediffError::Resolution(err)) => {
            assert_eq!(err.name, "framediff-no-such-ffmpeg");
        }
        Err(e) => panic!("Expected Resolution error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_huge_timeout_flag_means_no_deadline() {
    let args = CliArgs::parse_from(["framediff", "--timeout", "18446744073709551615", "in.mp4"]);

    let mut cfg = ConfigFile::default();
    apply_overrides(&mut cfg, &args);
    framediff::config::validate_config(&cfg).unwrap();

    let timeout = cfg.extract.timeout().unwrap();
    let ctx = framediff::RunContext::with_timeout(timeout);
    assert!(ctx.deadline().is_none());
    assert!(ctx.check().is_none());
}

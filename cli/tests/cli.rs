//! Runs the built binary and checks its exit codes and console output.

use std::process::{Command, Output};

fn glyphids(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glyphids"))
        .args(args)
        .env("GLYPHIDS_PAUSE", "0")
        .env("GLYPHIDS_SYSTEM_FONTS", "0")
        .env_remove("GLYPHIDS_FONT_DIRS")
        .env_remove("GLYPHIDS_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn no_arguments() {
    let output = glyphids(&[]);
    assert_eq!(Some(1), output.status.code());
    assert!(stderr(&output).contains("Usage:"));
}

#[test]
fn unknown_flag() {
    let output = glyphids(&["-z", "-f", "Arial", "input.txt"]);
    assert_eq!(Some(2), output.status.code());
    assert!(stderr(&output).contains("Invalid parameter specified in '-z'."));
}

#[test]
fn missing_input_file_argument() {
    let output = glyphids(&["-f", "Arial"]);
    assert_eq!(Some(3), output.status.code());
}

#[test]
fn font_name_too_long() {
    let name = "A".repeat(32);
    let output = glyphids(&["-f", name.as_str(), "input.txt"]);
    assert_eq!(Some(4), output.status.code());
    assert!(output.stdout.is_empty());
}

#[test]
fn nonexistent_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let output = glyphids(&["-f", "Arial", missing.to_str().unwrap()]);
    assert_eq!(Some(5), output.status.code());
    assert!(stderr(&output).contains("Could not open input file"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Selected text face"));
}

#[test]
fn no_fonts_anywhere() {
    let input = tempfile::NamedTempFile::new().unwrap();
    let output = glyphids(&["-l", "", "-f", "Arial", input.path().to_str().unwrap()]);
    assert_eq!(Some(6), output.status.code());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("0 fonts loaded.\n"));
}

#[test]
fn failed_font_loads_are_not_reported() {
    let input = tempfile::NamedTempFile::new().unwrap();
    let input = input.path().to_str().unwrap();
    let list = format!("/nope.ttf,{input}");
    let output = glyphids(&["-l", list.as_str(), "-f", "Arial", input]);

    assert!(String::from_utf8_lossy(&output.stdout).starts_with("0 fonts loaded.\n"));
    // Only the resolution failure itself, no per-file diagnostics
    assert_eq!(
        "Font resolution failed: no fonts are available\n",
        stderr(&output)
    );
}

#[test]
fn resolves_bold_face_from_font_dir() {
    let fonts = concat!(env!("CARGO_MANIFEST_DIR"), "/../fontdir/testdata");
    let input = tempfile::NamedTempFile::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_glyphids"))
        .args(["-b", "-f", "DejaVu Sans"])
        .arg(input.path())
        .env("GLYPHIDS_PAUSE", "0")
        .env("GLYPHIDS_SYSTEM_FONTS", "0")
        .env("GLYPHIDS_FONT_DIRS", fonts)
        .env_remove("GLYPHIDS_LOG")
        .output()
        .unwrap();

    assert_eq!(Some(0), output.status.code(), "{}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Selected text face: DejaVu Sans\n"), "{stdout}");
    assert!(stdout.ends_with("Glyph ids: ffff 0056 0057\n"), "{stdout}");
    assert!(output.stderr.is_empty());
}

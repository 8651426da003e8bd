// derush-cli/tests/scan_integration.rs
//
// End-to-end scan and render against a scripted ffprobe stand-in. Kept in its
// own test binary with a single test so no other test forks while the script
// is being written.

#![cfg(unix)]

use assert_cmd::Command;
use std::error::Error;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const FAKE_FFPROBE: &str = r#"#!/bin/sh
for last in "$@"; do :; done
case "$*" in
  *format_tags=timecode*)
    case "$last" in
      *A001.MXF) echo "01:00:00:00" ;;
      *) ;;
    esac ;;
  *format=duration*)
    case "$last" in
      *C003.MXF) echo "boom" >&2; exit 1 ;;
      *) echo "10.000000" ;;
    esac ;;
esac
exit 0
"#;

fn install_fake_ffprobe(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("ffprobe");
    std::fs::write(&path, FAKE_FFPROBE)?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

#[test]
fn test_scan_then_render() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let ffprobe = install_fake_ffprobe(dir.path())?;
    let video_dir = dir.path().join("VIDEO");
    std::fs::create_dir(&video_dir)?;
    for name in ["A001.MXF", "B002.MXF", "C003.MXF", "skipped.mov"] {
        std::fs::write(video_dir.join(name), "dummy content")?;
    }
    let sheet = dir.path().join("derush_sheet.csv");
    let pdf = dir.path().join("derush_sheet.pdf");

    Command::cargo_bin("derush")?
        .arg("scan")
        .arg("--input")
        .arg(&video_dir)
        .arg("--output")
        .arg(&sheet)
        .arg("--ffprobe")
        .arg(&ffprobe)
        .assert()
        .success();

    let text = std::fs::read_to_string(&sheet)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "FICHIER,TC IN,TC OUT,DURÉE,CONTENU IMAGE,CONTENU SON,OBSERVATIONS,CHOIX",
            "A001.MXF,01:00:00:00,01:00:09:24,00:00:10,,,,",
            "B002.MXF,00:00:00:00,00:00:00:00,00:00:10,,,,",
            "C003.MXF,00:00:00:00,00:00:00:00,00:00:00,,,,",
        ]
    );

    Command::cargo_bin("derush")?
        .arg("render")
        .arg("--input")
        .arg(&sheet)
        .arg("--output")
        .arg(&pdf)
        .assert()
        .success();

    assert!(std::fs::read(&pdf)?.starts_with(b"%PDF"));
    Ok(())
}

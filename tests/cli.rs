use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn fontpack() -> Command {
    Command::new(env!("CARGO_BIN_EXE_FontPack"))
}

#[test]
fn help_and_version_exit_zero() {
    let out = fontpack().arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--no-woff2"));

    let out = fontpack().arg("-v").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_one_without_processing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output");
    let out = fontpack()
        .arg("--bogus")
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn unreadable_fonts_still_complete_the_batch() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fonts");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("Broken.ttf"), b"not really a font").unwrap();

    let out = fontpack()
        .args(["--builtin-dump", "--no-woff2", "-d"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stdout));

    let manifest = fs::read_to_string(output.join("README.md")).unwrap();
    assert!(manifest.contains("- Fonts processed: 0\n- Fonts failed: 1\n"));
    assert!(output.join("fonts.css").is_file());

    let log = fs::read_to_string(output.join("build.log")).unwrap();
    assert!(log.contains("[ERROR] Failed to extract metadata from Broken.ttf"));
    assert!(!log.contains('\x1b'));
}

#[test]
fn existing_output_without_force_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fonts");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    fs::write(input.join("A.ttf"), b"x").unwrap();
    fs::write(output.join("keep.txt"), b"keep").unwrap();

    let out = fontpack()
        .args(["--builtin-dump", "--no-woff2", "-d"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("[ERROR]"));
    assert_eq!(fs::read_dir(&output).unwrap().count(), 1);
}

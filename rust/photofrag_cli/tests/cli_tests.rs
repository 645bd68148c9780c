use std::process::Command;

fn photofrag() -> Command {
    Command::new(env!("CARGO_BIN_EXE_photofrag"))
}

#[test]
fn test_write_template_then_compute_needs_scans() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("config.json");

    let status = photofrag()
        .args(["write-template", "--output-path"])
        .arg(&template)
        .status()
        .unwrap();
    assert!(status.success());
    let contents = std::fs::read_to_string(&template).unwrap();
    assert!(contents.contains("fragment_windows"));

    // The template points to a scan directory that does not exist.
    let output = photofrag()
        .args(["compute", "--config"])
        .arg(&template)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_compute_without_windows_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = photofrag()
        .args(["compute", "--scan-dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parent window"), "{}", stderr);
}

#[test]
fn test_compute_on_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = photofrag()
        .args(["compute", "--parent", "202.5,203.5", "--fragments", "(50.5,51.5)", "--scan-dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NoInputFiles"), "{}", stderr);
}

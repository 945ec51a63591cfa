use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn build_config() -> NamedTempFile {
    let studio = r#"<studio>
  <rig>
    <radius>5</radius>
    <color>255 255 255</color>
    <intensity>1</intensity>
    <distance>10</distance>
    <decay>2</decay>
    <points>4</points>
  </rig>
</studio>
"#;
    let mut tmp = NamedTempFile::new().expect("temp config");
    tmp.write_all(studio.as_bytes()).expect("write config");
    tmp
}

#[test]
fn cli_prints_rig_and_material_summary() {
    let config = build_config();
    let mut cmd = Command::cargo_bin("studio-rig").expect("binary exists");
    cmd.arg(config.path());
    cmd.assert()
        .success()
        .stdout(contains("Loaded studio rig with 14 lights (14 vertices)"))
        .stdout(contains(" - studio-light-0 pos=(0.00, 5.00, 0.00)"))
        .stdout(contains("diffuse"))
        .stdout(contains("normalmap"))
        .stdout(contains("ambientLightColor"));
}

#[test]
fn cli_show_debug_walks_the_state_machine() {
    let config = build_config();
    let mut cmd = Command::cargo_bin("studio-rig").expect("binary exists");
    cmd.arg(config.path()).arg("--show-debug");
    cmd.assert()
        .success()
        .stdout(contains("Children before show: 14"))
        .stdout(contains("Children after show: 15"))
        .stdout(contains("Debug pivot holds 15 meshes"))
        .stdout(contains("Children after hide: 14"));
}

#[test]
fn cli_rejects_unknown_flags() {
    let config = build_config();
    let mut cmd = Command::cargo_bin("studio-rig").expect("binary exists");
    cmd.arg(config.path()).arg("--frobnicate");
    cmd.assert().failure().stderr(contains("Unknown argument"));
}

#[test]
fn cli_reports_missing_config_file() {
    let mut cmd = Command::cargo_bin("studio-rig").expect("binary exists");
    cmd.arg("does-not-exist.xml");
    cmd.assert().failure().stderr(contains("failed to read"));
}

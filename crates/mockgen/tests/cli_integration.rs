use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn mockgen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mockgen"));
    // Keep the build-setting fallbacks out of the resolution chain.
    cmd.env_remove("PROJECT_FILE_PATH")
        .env_remove("SRCROOT")
        .env_remove("TARGET_NAME")
        .env_remove("RUST_LOG");
    cmd
}

fn make_project(dir: &Path) -> PathBuf {
    let project = dir.join("App.xcodeproj");
    fs::create_dir_all(&project).expect("failed to create project bundle");
    project
}

fn assert_success(out: &Output, what: &str) {
    assert!(
        out.status.success(),
        "{what} failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
}

fn assert_failure(out: &Output, what: &str, needle: &str) {
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success(), "{what} unexpectedly succeeded");
    assert!(
        stderr.contains(needle),
        "{what}: expected stderr to contain {needle:?}:\n{stderr}"
    );
}

#[test]
fn help_works() {
    let out = mockgen()
        .arg("--help")
        .output()
        .expect("failed to run mockgen --help");
    assert_success(&out, "mockgen --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("generate") && stdout.contains("metagenerate"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn command_help_lists_declared_options() {
    let out = mockgen()
        .args(["generate", "--help"])
        .output()
        .expect("failed to run mockgen generate --help");
    assert_success(&out, "mockgen generate --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--project <path>"), "{stdout}");
    assert!(stdout.contains("--targets <value>..."), "{stdout}");
    assert!(
        stdout.contains("[possible values: DEBUG, RELEASE, TEST]"),
        "{stdout}"
    );
}

#[test]
fn generate_prints_resolved_config() {
    let dir = tempfile::tempdir().unwrap();
    let project = make_project(dir.path());

    let out = mockgen()
        .arg("generate")
        .arg("--project")
        .arg(&project)
        .args(["--target", "App", "--targets", "Core,Net", "--quiet"])
        .output()
        .expect("failed to run mockgen generate");
    assert_success(&out, "mockgen generate");

    let config: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(config["project_path"], project.to_str().unwrap());
    assert_eq!(config["source_root"], dir.path().to_str().unwrap());
    assert_eq!(config["targets"], serde_json::json!(["App", "Core", "Net"]));
    assert_eq!(config["outputs"], serde_json::Value::Null);
}

#[test]
fn generate_reads_build_environment() {
    let dir = tempfile::tempdir().unwrap();
    let project = make_project(dir.path());

    let out = mockgen()
        .arg("generate")
        .env("PROJECT_FILE_PATH", &project)
        .env("TARGET_NAME", "AppTests")
        .output()
        .expect("failed to run mockgen generate");
    assert_success(&out, "mockgen generate (env)");

    let config: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(config["targets"], serde_json::json!(["AppTests"]));
}

#[test]
fn generate_without_targets_fails() {
    let dir = tempfile::tempdir().unwrap();
    let project = make_project(dir.path());

    let out = mockgen()
        .arg("generate")
        .arg("--project")
        .arg(&project)
        .output()
        .expect("failed to run mockgen generate");
    assert_failure(
        &out,
        "mockgen generate (no targets)",
        "--targets <list of target names>",
    );
}

#[test]
fn verbose_and_quiet_conflict() {
    let out = mockgen()
        .args(["metagenerate", "--verbose", "--quiet"])
        .output()
        .expect("failed to run mockgen metagenerate");
    assert_failure(
        &out,
        "mockgen metagenerate --verbose --quiet",
        "Cannot specify both --verbose and --quiet",
    );
}

#[test]
fn metagenerate_rejects_non_positive_count() {
    let dir = tempfile::tempdir().unwrap();

    let out = mockgen()
        .arg("metagenerate")
        .arg("--output")
        .arg(dir.path())
        .args(["--count", "-2"])
        .output()
        .expect("failed to run mockgen metagenerate");
    assert_failure(&out, "mockgen metagenerate --count -2", "Not a positive number");
}

#[test]
fn unknown_option_fails() {
    let out = mockgen()
        .args(["uninstall", "--nope"])
        .output()
        .expect("failed to run mockgen uninstall");
    assert_failure(&out, "mockgen uninstall --nope", "unknown flag: --nope");
}

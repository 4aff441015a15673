//! Integration tests for the kubeforge binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary rooted at `dir`, isolated from the user's config and without gofmt.
fn kubeforge(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("kubeforge");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env("KUBEFORGE__FORMATTER__ENABLED", "false")
        .env_remove("RUST_LOG");
    cmd
}

fn init(dir: &Path, version: &str) {
    kubeforge(dir)
        .args([
            "init",
            "--domain",
            "example.com",
            "--repo",
            "example.com/fleet",
            "--project-version",
            version,
        ])
        .assert()
        .success();
}

const FRIGATE: [&str; 8] = [
    "--group",
    "ship",
    "--version",
    "v1beta1",
    "--kind",
    "Frigate",
    "--resource",
    "--controller",
];

fn create_frigate(dir: &Path) -> assert_cmd::assert::Assert {
    kubeforge(dir)
        .args(["create", "api"])
        .args(FRIGATE)
        .assert()
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("edit"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_color_accepts_any_value() {
    let temp = TempDir::new().unwrap();
    for value in ["1", "true", "0", ""] {
        kubeforge(temp.path())
            .env("NO_COLOR", value)
            .args(["config", "get", "defaults.domain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("my.domain\n"));
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_writes_project_layout() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    let project = read(temp.path(), "PROJECT");
    assert!(project.contains("version: '4'") || project.contains("version: \"4\""));
    assert!(project.contains("repo: example.com/fleet"));
    assert!(temp.path().join("cmd/main.go").exists());
    assert!(temp.path().join("config/manager/manager.yaml").exists());
    assert!(read(temp.path(), "go.mod").starts_with("module example.com/fleet"));
}

#[test]
fn init_twice_is_a_conflict() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");

    kubeforge(temp.path())
        .args(["init", "--repo", "example.com/fleet"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("PROJECT already exists"));
}

#[test]
fn init_rejects_layout_one() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["init", "--repo", "example.com/fleet", "--project-version", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not supported"));

    assert!(!temp.path().join("PROJECT").exists());
}

#[test]
fn init_discovers_repo_from_go_mod() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), "module example.com/found\n\ngo 1.22\n").unwrap();

    kubeforge(temp.path())
        .args(["init", "--domain", "example.com"])
        .assert()
        .success();

    assert!(read(temp.path(), "PROJECT").contains("repo: example.com/found"));
}

#[test]
fn init_without_repo_or_go_mod_fails() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("repo"));
}

#[test]
fn project_dir_flag_targets_another_directory() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["-C", "fleet", "init", "--repo", "example.com/fleet"])
        .assert()
        .success();

    assert!(temp.path().join("fleet/PROJECT").exists());
    assert!(read(temp.path(), "fleet/PROJECT").contains("projectName: fleet"));
}

// ── create api ────────────────────────────────────────────────────────────────

#[test]
fn create_api_requires_a_project() {
    let temp = TempDir::new().unwrap();
    create_frigate(temp.path())
        .code(3)
        .stderr(predicate::str::contains("kubeforge init"));
}

#[test]
fn create_api_scaffolds_and_records_resource() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");
    create_frigate(temp.path()).success();

    assert!(temp.path().join("api/v1beta1/frigate_types.go").exists());
    assert!(temp.path().join("controllers/frigate_controller.go").exists());

    let main = read(temp.path(), "main.go");
    assert!(main.contains("utilruntime.Must(shipv1beta1.AddToScheme(scheme))"));

    let project = read(temp.path(), "PROJECT");
    assert!(project.contains("kind: Frigate"));
    assert!(project.contains("controller: true"));
}

#[test]
fn create_api_twice_needs_force() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");
    create_frigate(temp.path()).success();

    create_frigate(temp.path())
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    kubeforge(temp.path())
        .args(["create", "api"])
        .args(FRIGATE)
        .arg("--force")
        .assert()
        .success();

    let main = read(temp.path(), "main.go");
    assert_eq!(main.matches("FrigateReconciler{").count(), 1);
}

#[test]
fn controller_can_be_added_to_an_existing_api() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");

    let ship = ["--group", "ship", "--version", "v1beta1", "--kind", "Frigate"];
    kubeforge(temp.path())
        .args(["create", "api"])
        .args(ship)
        .args(["--resource", "--controller=false"])
        .assert()
        .success();

    kubeforge(temp.path())
        .args(["create", "api"])
        .args(ship)
        .args(["--resource=false", "--controller"])
        .assert()
        .success();

    let main = read(temp.path(), "main.go");
    assert_eq!(main.matches("FrigateReconciler{").count(), 1);
    assert_eq!(main.matches("shipv1beta1.AddToScheme(scheme)").count(), 1);
    assert!(read(temp.path(), "controllers/suite_test.go").contains("shipv1beta1.AddToScheme(scheme.Scheme)"));

    let project = read(temp.path(), "PROJECT");
    assert!(project.contains("controller: true"));
    assert_eq!(project.matches("kind: Frigate").count(), 1);

    kubeforge(temp.path())
        .args(["create", "api"])
        .args(ship)
        .args(["--resource=false", "--controller", "--force"])
        .assert()
        .success();
    let main = read(temp.path(), "main.go");
    assert_eq!(main.matches("FrigateReconciler{").count(), 1);
}

#[test]
fn second_group_needs_multigroup() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");
    create_frigate(temp.path()).success();

    let crew = [
        "create", "api", "--group", "crew", "--version", "v1beta1", "--kind", "FirstMate",
        "--resource", "--controller",
    ];
    kubeforge(temp.path())
        .args(crew)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("multiple groups are not allowed"));
    assert!(!temp.path().join("api/v1beta1/firstmate_types.go").exists());

    kubeforge(temp.path())
        .args(["edit", "--multigroup"])
        .assert()
        .success();
    kubeforge(temp.path()).args(crew).assert().success();
    assert!(temp.path().join("apis/crew/v1beta1/firstmate_types.go").exists());
}

#[test]
fn invalid_group_is_reported_before_writing() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    kubeforge(temp.path())
        .args([
            "create", "api", "--group", "Crew", "--version", "v1", "--kind", "FirstMate",
            "--resource", "--controller",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("DNS-1123"));

    assert!(!temp.path().join("api").exists());
}

#[test]
fn nothing_to_generate_is_rejected() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    kubeforge(temp.path())
        .args([
            "create",
            "api",
            "--group",
            "ship",
            "--version",
            "v1",
            "--kind",
            "Frigate",
            "--resource=false",
            "--controller=false",
        ])
        .assert()
        .code(2);
}

#[test]
fn json_summary_lists_created_files() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    let assert = kubeforge(temp.path())
        .args(["--output-format", "json", "create", "api"])
        .args(FRIGATE)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["command"], "create api");
    let created = report["created"].as_array().unwrap();
    assert!(
        created
            .iter()
            .any(|p| p == "internal/controller/frigate_controller.go")
    );
    assert!(report["updated"].as_array().unwrap().iter().any(|p| p == "cmd/main.go"));
}

// ── create webhook ────────────────────────────────────────────────────────────

#[test]
fn create_webhook_records_flags() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");
    create_frigate(temp.path()).success();

    kubeforge(temp.path())
        .args([
            "create",
            "webhook",
            "--group",
            "ship",
            "--version",
            "v1beta1",
            "--kind",
            "Frigate",
            "--defaulting",
        ])
        .assert()
        .success();

    assert!(read(temp.path(), "api/v1beta1/frigate_webhook.go").contains("webhook.Defaulter"));
    assert!(read(temp.path(), "PROJECT").contains("defaulting: true"));
    assert!(read(temp.path(), "main.go").contains("SetupWebhookWithManager(mgr)"));
}

#[test]
fn webhook_reuses_recorded_plural_and_scope() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    kubeforge(temp.path())
        .args(["create", "api"])
        .args(FRIGATE)
        .args(["--plural", "frigatez", "--namespaced=false"])
        .assert()
        .success();
    let project = read(temp.path(), "PROJECT");
    assert!(project.contains("plural: frigatez"));

    kubeforge(temp.path())
        .args([
            "create",
            "webhook",
            "--group",
            "ship",
            "--version",
            "v1beta1",
            "--kind",
            "Frigate",
            "--defaulting",
        ])
        .assert()
        .success();

    let webhook = read(temp.path(), "internal/webhook/v1beta1/frigate_webhook.go");
    assert!(webhook.contains("resources=frigatez"));
    assert!(!webhook.contains("resources=frigates,"));
}

#[test]
fn webhook_needs_a_kind_of_webhook() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "4");

    kubeforge(temp.path())
        .args([
            "create", "webhook", "--group", "ship", "--version", "v1", "--kind", "Frigate",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--programmatic-validation"));
}

// ── edit / config ─────────────────────────────────────────────────────────────

#[test]
fn edit_toggles_multigroup() {
    let temp = TempDir::new().unwrap();
    init(temp.path(), "3");

    kubeforge(temp.path())
        .args(["edit", "--multigroup"])
        .assert()
        .success();
    assert!(read(temp.path(), "PROJECT").contains("multigroup: true"));

    kubeforge(temp.path())
        .args(["edit", "--multigroup=false"])
        .assert()
        .success();
    assert!(!read(temp.path(), "PROJECT").contains("multigroup"));
}

#[test]
fn config_reads_environment_overrides() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["config", "get", "formatter.command"])
        .env("KUBEFORGE__FORMATTER__COMMAND", "goimports")
        .assert()
        .success()
        .stdout(predicate::str::diff("goimports\n"));
}

#[test]
fn config_reads_explicit_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("kubeforge.toml");
    fs::write(&file, "[defaults]\ndomain = \"fleet.io\"\n").unwrap();

    kubeforge(temp.path())
        .args(["--config"])
        .arg(&file)
        .args(["config", "get", "defaults.domain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("fleet.io\n"));
}

#[test]
fn missing_config_file_exits_with_config_code() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn unknown_config_key() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

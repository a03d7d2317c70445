use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("retail-agents").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retail customer-service agents"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("retail-agents").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_chat_rejects_unknown_scenario() {
    let mut cmd = Command::cargo_bin("retail-agents").unwrap();
    cmd.args(["chat", "--prompt", "hi", "--scenario", "warehouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scenario: warehouse"));
}

#[test]
fn test_cli_schema_requires_database_url() {
    let mut cmd = Command::cargo_bin("retail-agents").unwrap();
    cmd.arg("schema")
        .env_remove("DATABASE_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

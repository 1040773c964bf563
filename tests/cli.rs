use assert_cmd::Command;
use predicates::prelude::*;

fn toynbee_cmd() -> Command {
    Command::cargo_bin("toynbee-tiles").unwrap()
}

#[test]
fn no_projects_exits_with_usage_error() {
    toynbee_cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "at least one PROJECT must be provided",
        ));
}

#[test]
fn no_projects_wins_over_bad_template() {
    toynbee_cmd()
        .args(["--template", "{{ unclosed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one PROJECT"));
}

#[test]
fn help_exits_zero_and_lists_endpoints() {
    toynbee_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: toynbee-tiles"))
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--open"))
        .stdout(predicate::str::contains("https://{app}-green-r2.example.com"));
}

#[test]
fn short_help_exits_zero() {
    toynbee_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT"));
}

#[test]
fn version_exits_zero() {
    toynbee_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("toynbee-tiles "));
}

#[test]
fn unknown_flag_exits_one() {
    toynbee_cmd()
        .args(["--bogus", "app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn invalid_template_is_fatal_before_fetching() {
    toynbee_cmd()
        .args(["--template", "{{ unclosed", "app"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid template"))
        .stderr(predicate::str::contains("failed to get info").not());
}

use assert_cmd::Command;
use predicates::prelude::*;

fn search_ytmusic() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("search_ytmusic"));
    cmd.env_remove("YTMUSIC_FILTER").env_remove("DEBUG");
    cmd
}

#[test]
fn missing_query_prints_usage_and_exits_1() {
    search_ytmusic()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: search_ytmusic <query> [limit]"));
}

#[test]
fn non_numeric_limit_fails_before_searching() {
    search_ytmusic()
        .args(["jazz", "abc"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid digit"));
}

#[test]
fn unknown_filter_is_rejected() {
    search_ytmusic()
        .args(["jazz", "--filter", "tracks"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("tracks"));
}

#[test]
fn unreachable_backend_fails_without_output() {
    search_ytmusic()
        .args(["jazz", "--timeout", "2"])
        .env("YTMUSIC_BASE_URL", "http://127.0.0.1:9/youtubei/v1/")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn hyphen_leading_query_reaches_the_search() {
    // Exit 1 from the unreachable backend, not clap's exit 2
    search_ytmusic()
        .args(["-Hyphen Song - Artist", "--timeout", "2"])
        .env("YTMUSIC_BASE_URL", "http://127.0.0.1:9/youtubei/v1/")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error:"));
}

use std::path::Path;
use std::process::Command;

fn msgident_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_msgident"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd
}

#[test]
fn resolve_then_check_passes() {
    let snapshot = Path::new("tests/fixtures/basic/messages.resolved");
    let _ = std::fs::remove_file(snapshot);

    let resolve = msgident_cmd("basic").arg("resolve").output().unwrap();
    assert!(
        resolve.status.success(),
        "resolve failed: {}",
        String::from_utf8_lossy(&resolve.stderr)
    );
    assert!(snapshot.exists(), "snapshot not created");

    let written = std::fs::read_to_string(snapshot).unwrap();
    assert!(written.contains("[Incoming]"), "missing section header");
    assert!(written.contains("ChatMessage=1342"), "missing resolved id");

    let check = msgident_cmd("basic").arg("check").output().unwrap();
    assert!(
        check.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&check.stderr)
    );
}

#[test]
fn ambiguous_hash_fails_check() {
    let check = msgident_cmd("ambiguous").arg("check").output().unwrap();
    assert_eq!(check.status.code(), Some(1), "expected exit code 1");

    let stdout = String::from_utf8_lossy(&check.stdout);
    assert!(
        stdout.contains("UNRESOLVED  Incoming/WalkTarget"),
        "missing unresolved report: {stdout}"
    );
}

#[test]
fn lookup_prints_resolved_id() {
    let out = msgident_cmd("basic")
        .args(["lookup", "Incoming", "ChatMessage"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("ChatMessage = 1342"));
}

#[test]
fn whois_reverses_by_id_and_by_hash() {
    let by_id = msgident_cmd("basic")
        .args(["whois", "Incoming", "1342"])
        .output()
        .unwrap();
    assert!(by_id.status.success());
    assert!(String::from_utf8_lossy(&by_id.stdout).contains("1342 = ChatMessage"));

    let by_hash = msgident_cmd("basic")
        .args(["whois", "Incoming", "9d2c0af3"])
        .output()
        .unwrap();
    assert!(by_hash.status.success());
    assert!(String::from_utf8_lossy(&by_hash.stdout).contains("9d2c0af3 = ChatMessage"));
}

#[test]
fn names_filter_narrows_listing() {
    let out = msgident_cmd("basic")
        .args(["names", "Incoming", "--filter", "^Chat"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("ChatMessage=1342"));
    assert!(!stdout.contains("Ping"));
}

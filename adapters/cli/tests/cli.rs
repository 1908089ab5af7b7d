use std::process::Command;

fn delve(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_delve"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("delve binary runs");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn stats_only_prints_summary_without_map() {
    let (success, stdout, stderr) = delve(&["--seed", "3", "--stats-only"]);

    assert!(success, "delve failed: {stderr}");
    assert!(stdout.contains("seed:    3"));
    assert!(stdout.contains("floors:"));
    assert!(!stdout.contains('@'));
}

#[test]
fn map_marks_player_and_roamers() {
    let (success, stdout, stderr) = delve(&["--seed", "3", "--roamers", "2"]);

    assert!(success, "delve failed: {stderr}");
    let (_, map) = stdout.split_once("\n\n").expect("map follows the summary");
    assert_eq!(map.matches('@').count(), 1);
    assert_eq!(map.matches('r').count(), 2);
}

#[test]
fn same_seed_prints_same_level() {
    let (_, first, _) = delve(&["--seed", "11"]);
    let (_, second, _) = delve(&["--seed", "11"]);

    assert_eq!(first, second);
}

#[test]
fn malformed_walk_is_rejected() {
    let (success, _, stderr) = delve(&["--walk", "nowhere"]);

    assert!(!success);
    assert!(stderr.contains("expected `x,y`"));
}

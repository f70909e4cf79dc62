use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use leaderboard::config::Config;
use leaderboard::exclude::ExclusionSet;
use leaderboard::pipeline;
use leaderboard::report::intensity;
use leaderboard::store::{self, SnapshotFormat};
use tempfile::TempDir;

fn write_page(dir: &Path, name: &str, rows: &[(u64, &str, &str, &str)]) -> PathBuf {
    let mut text = String::from("Status,Name,Position,Date Registered,Posts\n");
    for (id, member, position, posts) in rows {
        text.push_str(&format!(
            "index.php?action=pm;sa=send;u={id},\"{member}\",{position},2019-05-05,\"{posts}\"\n"
        ));
    }
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn config(dir: &TempDir, snapshot: &str, pages: [PathBuf; 2]) -> Config {
    let snapshot_path = dir.path().join(snapshot);
    Config {
        pages,
        format: SnapshotFormat::for_path(&snapshot_path),
        snapshot_path,
        exclusions: ExclusionSet::default(),
        footer: None,
        topic: Some(5364),
        output: None,
        simulate: false,
    }
}

fn body(report: &str) -> Vec<&str> {
    report
        .lines()
        .skip_while(|l| *l != "[code]")
        .skip(1)
        .take_while(|l| *l != "[/code]")
        .collect()
}

#[test]
fn two_runs_compare_against_each_other() {
    let dir = TempDir::new().unwrap();

    let january = [
        write_page(dir.path(), "jan1.csv", &[
            (1, "Alice", "Global Moderator", "1,500"),
            (42, "Answer", "Full Member", "150"),
        ]),
        write_page(dir.path(), "jan2.csv", &[(7, "Bob", "Jr. Member", "90")]),
    ];

    let first = pipeline::run(
        &config(&dir, "board.json", january),
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    )
    .unwrap();

    for line in body(&first.report) {
        assert!(line.ends_with("(N/A)"), "{line}");
        assert!(line.contains(intensity::NO_DATA), "{line}");
    }

    let february = [
        write_page(dir.path(), "feb1.csv", &[
            (1, "Alice", "Global Moderator", "1,510"),
            (7, "Bob", "Jr. Member", "400"),
        ]),
        write_page(dir.path(), "feb2.csv", &[
            (42, "Answer", "Full Member", "170"),
            (99, "Newcomer", "Newbie", "5"),
        ]),
    ];

    let second = pipeline::run(
        &config(&dir, "board.json", february),
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
    )
    .unwrap();

    let lines = body(&second.report);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("MOD   = "), "{}", lines[0]);
    assert!(lines[0].ends_with("1510 (10)"), "{}", lines[0]);
    assert!(lines[1].starts_with("MEM  ↑1 "), "{}", lines[1]);
    assert!(lines[1].ends_with("400 (310)"), "{}", lines[1]);
    assert!(lines[2].starts_with("MEM  ↓1 "), "{}", lines[2]);
    assert!(lines[2].ends_with("170 (20)"), "{}", lines[2]);
    assert!(lines[3].starts_with("OTH NEW "), "{}", lines[3]);
    assert!(lines[3].ends_with("5 (N/A)"), "{}", lines[3]);

    let stored = store::open(&dir.path().join("board.json"), SnapshotFormat::Json)
        .load()
        .unwrap()
        .unwrap();
    let ids: Vec<u64> = stored.entries.iter().map(|e| e.identity).collect();
    assert_eq!(ids, vec![1, 7, 42, 99]);
    assert_eq!(stored.entries[2].count_delta, Some(20));
}

#[test]
fn simulate_leaves_snapshot_untouched() {
    let dir = TempDir::new().unwrap();
    let pages = [
        write_page(dir.path(), "p1.csv", &[(1, "Alice", "Member", "10")]),
        write_page(dir.path(), "p2.csv", &[]),
    ];

    let mut cfg = config(&dir, "board.csv", pages);
    cfg.simulate = true;
    pipeline::run(&cfg, Utc::now()).unwrap();

    assert!(!dir.path().join("board.csv").exists());
}

#[test]
fn sqlite_snapshot_and_footer() {
    let dir = TempDir::new().unwrap();
    let pages = [
        write_page(dir.path(), "p1.csv", &[(3, "Cat", "Retired Staff", "77")]),
        write_page(dir.path(), "p2.csv", &[]),
    ];

    let mut cfg = config(&dir, "board.db", pages);
    cfg.footer = Some("[i]Excluded members are listed in the first post.[/i]".into());
    let out = pipeline::run(&cfg, Utc::now()).unwrap();

    assert!(out.report.ends_with("[/code]\n\n[i]Excluded members are listed in the first post.[/i]"));
    assert!(body(&out.report)[0].starts_with("RET NEW "));

    let stored = store::open(&dir.path().join("board.db"), SnapshotFormat::Sqlite)
        .load()
        .unwrap()
        .unwrap();
    assert_eq!(stored.entries[0].count, Some(77));
}

#[test]
fn broken_page_aborts_without_saving() {
    let dir = TempDir::new().unwrap();
    let good = write_page(dir.path(), "p1.csv", &[(1, "Alice", "Member", "10")]);
    let bad = dir.path().join("p2.csv");
    std::fs::write(&bad, "Status,Name,Position,Posts\nnot-a-link,Bob,Member,5\n").unwrap();

    let cfg = config(&dir, "board.json", [good, bad]);
    assert!(pipeline::run(&cfg, Utc::now()).is_err());
    assert!(!dir.path().join("board.json").exists());
}

#[test]
fn excluded_members_never_stored() {
    let dir = TempDir::new().unwrap();
    let pages = [
        write_page(dir.path(), "p1.csv", &[(1, "Bot", "Member", "99999"), (2, "Human", "Member", "10")]),
        write_page(dir.path(), "p2.csv", &[]),
    ];

    let mut cfg = config(&dir, "board.json", pages);
    cfg.exclusions = ExclusionSet::parse("1\n");
    let out = pipeline::run(&cfg, Utc::now()).unwrap();

    assert!(!out.report.contains("Bot"));
    assert_eq!(out.snapshot.len(), 1);
    assert_eq!(out.snapshot.entries[0].identity, 2);
}

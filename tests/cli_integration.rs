// End-to-end tests of the quotescan binary
// WHY: Flags only exist in main.rs, so they are checked by running the built binary

use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXAMPLE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/example.txt");

fn run_quotescan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quotescan"))
        .args(args)
        .output()
        .expect("Failed to run quotescan")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "quotescan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_demo_sections_and_word_search() {
    let stdout = stdout_of(&run_quotescan(&["--word", "Fuck", "--no-progress", EXAMPLE_PATH]));

    assert!(stdout.contains(&format!("== {EXAMPLE_PATH}")));
    assert!(stdout.contains(
        "Case insensitive search for \"Fuck\":\n\"Fuck,\"\n“What the fuck were you thinking?”\n\"FUCK\"\n"
    ));
    assert!(stdout.contains("Case sensitive search for \"Fuck\":\n\"Fuck,\"\n\nRemove quotes:"));
    assert!(stdout.contains("Remove quotes:\n [...]  she said,  [...]  He shrugged and said  [...] .\n"));
    assert!(stdout.contains(
        "Remove non-quotes:\n\"Fuck,\" [...] \"I told you not to touch that.\" [...] \"fine\"\n"
    ));
}

#[test]
fn test_removal_first_line_versus_whole_text() {
    let first_line = stdout_of(&run_quotescan(&["--no-progress", EXAMPLE_PATH]));
    let whole_text = stdout_of(&run_quotescan(&["--whole-text", "--no-progress", EXAMPLE_PATH]));

    // Unquoted narration from line 2 only survives removal when the whole text is used
    assert!(!first_line.contains("asked the guard"));
    assert!(whole_text.contains("asked the guard"));

    assert!(whole_text.contains(
        "\"fine\" [...] “What the fuck were you thinking?” [...] \"nothing\" [...] \"Danger: high voltage\" [...] \"FUCK\"\n"
    ));
    assert!(!first_line.contains("\"fine\" [...] “What"));
}

#[test]
fn test_located_output_lines() {
    let stdout = stdout_of(&run_quotescan(&["--word", "fuck", "--located", "--no-progress", EXAMPLE_PATH]));

    assert!(stdout.contains("0\t\"Fuck,\"\t(1,1,1,8)\n"));
    assert!(stdout.contains("1\t“What the fuck were you thinking?”\t(2,1,2,35)\n"));
    assert!(stdout.contains("2\t\"FUCK\"\t(4,24,4,30)\n"));
}

#[test]
fn test_stats_output_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let stats_file = temp_dir.path().join("run_stats.json");
    let missing = temp_dir.path().join("missing.txt");

    let output = run_quotescan(&[
        "--word",
        "Fuck",
        "--no-progress",
        "--stats-out",
        stats_file.to_str().unwrap(),
        EXAMPLE_PATH,
        missing.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Unreadable files are skipped without --fail-fast");
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 2 files could not be read"));

    let json_content = std::fs::read_to_string(&stats_file).expect("Failed to read stats file");
    let stats: Value = serde_json::from_str(&json_content).expect("Failed to parse JSON");

    assert_eq!(stats["word"], "Fuck");
    assert_eq!(stats["files_processed"], 1);
    assert_eq!(stats["files_failed"], 1);
    assert_eq!(stats["total_quotes_found"], 7);
    assert_eq!(stats["total_word_matches"], 3);

    let reports = stats["file_reports"].as_array().expect("file_reports should be an array");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["word_matches_case_sensitive"], 1);
    assert_eq!(reports[1]["status"], "failed");
}

#[test]
fn test_fail_fast_on_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.txt");

    let output = run_quotescan(&["--fail-fast", "--no-progress", missing.to_str().unwrap(), EXAMPLE_PATH]);

    assert!(!output.status.success(), "Missing file must abort the run with --fail-fast");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
    assert!(output.stdout.is_empty(), "No file should be scanned after the failure");
}

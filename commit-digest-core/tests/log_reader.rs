use std::fs::File;
use std::io::Write;

use commit_digest_core::contract::LogReader;
use commit_digest_core::log_reader::{FileLogReader, GitLogReader};
use tempfile::tempdir;

#[tokio::test]
async fn test_file_log_reader_splits_lines() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("log.txt");
    {
        let mut f = File::create(&path).unwrap();
        write!(f, "commit 1\r\ndiff --git a/x.rs b/x.rs\n+foo\n").unwrap();
    }

    let lines = FileLogReader::new(&path).read_lines().await.unwrap();

    assert_eq!(lines, vec!["commit 1", "diff --git a/x.rs b/x.rs", "+foo"]);
}

#[tokio::test]
async fn test_file_log_reader_decodes_invalid_utf8_lossily() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("log.bin");
    std::fs::write(&path, b"commit 1\n+\xff\n").unwrap();

    let lines = FileLogReader::new(&path).read_lines().await.unwrap();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "+\u{FFFD}");
}

#[tokio::test]
async fn test_file_log_reader_missing_file_errors() {
    let tmp = tempdir().unwrap();
    let reader = FileLogReader::new(tmp.path().join("missing.txt"));

    assert!(reader.read_lines().await.is_err());
}

#[tokio::test]
async fn test_git_log_reader_errors_outside_repository() {
    let tmp = tempdir().unwrap();
    let reader = GitLogReader::new(tmp.path().join("not-a-repo"), "2022-01-01");

    assert!(reader.read_lines().await.is_err());
}

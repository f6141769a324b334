//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub fn run_git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(repo)
        .status()
        .expect("Failed to invoke git");
    assert!(status.success(), "git command failed: {:?}", args);
}

pub fn git_rev_parse(repo: &Path, rev: &str) -> String {
    let output = Command::new("git")
        .args(["rev-parse", rev])
        .current_dir(repo)
        .output()
        .expect("Failed to run git rev-parse");
    assert!(output.status.success(), "git rev-parse failed");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialise an empty repository with a committer identity.
pub fn init_empty_repo(repo: &Path) {
    std::fs::create_dir_all(repo).expect("Failed to create repo dir");
    run_git(repo, &["init"]);
    run_git(repo, &["checkout", "-b", "main"]);
    run_git(repo, &["config", "user.email", "test@example.com"]);
    run_git(repo, &["config", "user.name", "Test User"]);
    run_git(repo, &["config", "commit.gpgsign", "false"]);
}

/// Initialise a repository with `src/a.py` committed.
pub fn init_test_repo(repo: &Path) {
    init_empty_repo(repo);
    std::fs::create_dir_all(repo.join("src")).expect("Failed to create src dir");
    std::fs::write(repo.join("src/a.py"), "import os\n\nx = 1\ny = 2\nz = 3\n")
        .expect("Failed to write a.py");
    run_git(repo, &["add", "."]);
    run_git(repo, &["commit", "-m", "init"]);
}

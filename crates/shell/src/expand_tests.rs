// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for wildcard expansion.

use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::error::RunnerError;

fn create_test_files(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            if parent != dir {
                fs::create_dir_all(parent).unwrap();
            }
        }
        File::create(path).unwrap();
    }
}

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn expands_sorted_matches() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["z.txt", "a.txt", "m.txt", "c.rs"]);

    let result = expand_stage(&tokens(&["ls", "*.txt"]), dir.path()).unwrap();

    assert_eq!(result, vec!["ls", "a.txt", "m.txt", "z.txt"]);
}

#[test]
fn question_mark_matches_single_character() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["a1.txt", "a2.txt", "abc.txt"]);

    let result = expand_stage(&tokens(&["ls", "a?.txt"]), dir.path()).unwrap();

    assert_eq!(result, vec!["ls", "a1.txt", "a2.txt"]);
}

#[test]
fn zero_matches_remove_the_token() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["a.txt"]);

    let result = expand_stage(&tokens(&["ls", "*.xyz"]), dir.path()).unwrap();

    // No empty-string token is left behind.
    assert_eq!(result, vec!["ls"]);
}

#[test]
fn plain_tokens_pass_through() {
    let dir = TempDir::new().unwrap();

    let result = expand_stage(&tokens(&["echo", "hello", "world"]), dir.path()).unwrap();

    assert_eq!(result, vec!["echo", "hello", "world"]);
}

#[yare::parameterized(
    sed = { "sed" },
    grep = { "grep" },
    egrep = { "egrep" },
)]
fn pattern_tools_keep_their_patterns(program: &str) {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["a.txt", "b.txt"]);

    let stage = tokens(&[program, "-c", "foo?", "*.txt"]);
    let result = expand_stage(&stage, dir.path()).unwrap();

    assert_eq!(result, stage);
}

#[test]
fn wildcard_program_token_expands_too() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["run.sh"]);

    let result = expand_stage(&tokens(&["*.sh"]), dir.path()).unwrap();

    assert_eq!(result, vec!["run.sh"]);
}

#[test]
fn hidden_files_need_a_dotted_pattern() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["visible.txt", ".hidden.txt"]);

    let result = expand_stage(&tokens(&["ls", "*.txt"]), dir.path()).unwrap();
    assert_eq!(result, vec!["ls", "visible.txt"]);

    let result = expand_stage(&tokens(&["ls", ".*.txt"]), dir.path()).unwrap();
    assert_eq!(result, vec!["ls", ".hidden.txt"]);
}

#[test]
fn subdirectory_patterns_stay_relative() {
    let dir = TempDir::new().unwrap();
    create_test_files(dir.path(), &["subdir/file1.txt", "subdir/file2.txt"]);

    let result = expand_stage(&tokens(&["ls", "subdir/*.txt"]), dir.path()).unwrap();

    assert_eq!(result, vec!["ls", "subdir/file1.txt", "subdir/file2.txt"]);
}

#[test]
fn invalid_pattern_is_an_error() {
    let dir = TempDir::new().unwrap();

    let result = expand_stage(&tokens(&["ls", "[abc*"]), dir.path());

    match result {
        Err(RunnerError::GlobPattern { pattern, .. }) => assert_eq!(pattern, "[abc*"),
        other => panic!("expected GlobPattern error, got: {other:?}"),
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wildcard expansion for pipeline stages.
//!
//! Tokens containing `*` or `?` are expanded against the filesystem unless
//! the stage's program consumes patterns itself (`sed`, `grep`, `egrep`), in
//! which case every token passes through untouched. Zero matches expand to
//! zero tokens, never to an empty-string token.

use std::path::Path;

use crate::error::RunnerError;

/// Tools that apply their own pattern matching; their tokens are never
/// glob-expanded.
const PATTERN_TOOLS: [&str; 3] = ["sed", "grep", "egrep"];

pub(crate) fn stage_consumes_patterns(program: Option<&str>) -> bool {
    program.is_some_and(|p| PATTERN_TOOLS.contains(&p))
}

/// Expand every wildcard token of one stage against the filesystem.
pub(crate) fn expand_stage(tokens: &[String], cwd: &Path) -> Result<Vec<String>, RunnerError> {
    if stage_consumes_patterns(tokens.first().map(String::as_str)) {
        return Ok(tokens.to_vec());
    }
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.contains('*') || token.contains('?') {
            expanded.extend(expand_token(token, cwd)?);
        } else {
            expanded.push(token.clone());
        }
    }
    Ok(expanded)
}

/// Expand one glob pattern, returning lexicographically sorted matches.
///
/// Relative patterns resolve against `cwd` and results are reported relative
/// to it. Hidden files match only when the pattern's filename component
/// starts with a dot.
fn expand_token(pattern: &str, cwd: &Path) -> Result<Vec<String>, RunnerError> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        cwd.join(pattern).to_string_lossy().into_owned()
    };

    let include_hidden = Path::new(pattern)
        .file_name()
        .and_then(|f| f.to_str())
        .map(|f| f.starts_with('.'))
        .unwrap_or(false);

    let paths = glob::glob(&full_pattern).map_err(|e| RunnerError::GlobPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let mut matches: Vec<String> = paths
        .filter_map(|result| result.ok())
        .filter_map(|path| {
            let relative = match path.strip_prefix(cwd) {
                Ok(rel) => rel.to_string_lossy().into_owned(),
                Err(_) => path.to_string_lossy().into_owned(),
            };
            if !include_hidden {
                if let Some(filename) = Path::new(&relative).file_name() {
                    if filename.to_string_lossy().starts_with('.') {
                        return None;
                    }
                }
            }
            Some(relative)
        })
        .collect();

    matches.sort();
    Ok(matches)
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;

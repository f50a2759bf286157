// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit-status tolerance.
//!
//! Some tools signal ordinary conditions through non-zero exit statuses
//! (`grep` exits 1 on no match). The policy maps a command-prefix to the one
//! non-zero status that prefix is allowed to return.

use serde::{Deserialize, Serialize};

/// Table of command-prefix → tolerated non-zero exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TolerancePolicy {
    entries: Vec<(String, i32)>,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            entries: vec![("grep".to_string(), 1)],
        }
    }
}

impl TolerancePolicy {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a tolerated prefix/status pair.
    #[must_use]
    pub fn tolerate(mut self, prefix: impl Into<String>, exit_code: i32) -> Self {
        self.entries.push((prefix.into(), exit_code));
        self
    }

    /// A status is acceptable iff it is zero, or some entry's key is a
    /// prefix of the full command text and its value equals the status.
    pub fn is_acceptable(&self, cmd: &str, exit_code: i32) -> bool {
        exit_code == 0
            || self
                .entries
                .iter()
                .any(|(prefix, code)| cmd.starts_with(prefix.as_str()) && *code == exit_code)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

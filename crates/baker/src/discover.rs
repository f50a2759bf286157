// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the external baking tool.
//!
//! The designer application that ships the baker registers itself with the
//! OS metadata index, so discovery is a metadata query piped through a pair
//! of filters, followed by a walk of the installation bundle for the baker
//! executable. Implemented for macOS only.

use std::path::{Path, PathBuf};

use shapeshift_shell::ShellRunner;
use walkdir::WalkDir;

use crate::error::{fail, BakeError};

/// Metadata query that surfaces the designer installation root.
const DESIGNER_QUERY: &str = concat!(
    r#"mdfind "kMDItemKind == 'Application'""#,
    r#" | grep "Adobe Substance 3D Designer""#,
    " | grep ^/Applications",
);

/// Basename of the baking executable inside the designer bundle.
const BAKER_EXECUTABLE: &str = "sbsbaker";

/// Locate the baker executable, fatal on any miss.
pub async fn discover_baker(runner: &ShellRunner) -> Result<PathBuf, BakeError> {
    if !cfg!(target_os = "macos") {
        return fail(BakeError::UnsupportedPlatform);
    }
    let output = runner.run_capturing(DESIGNER_QUERY).await?;
    let designer_path = output.stdout.trim();
    if designer_path.is_empty() || !Path::new(designer_path).exists() {
        return fail(BakeError::DesignerNotFound {
            output: designer_path.to_string(),
        });
    }
    tracing::debug!(target: "shapeshift", %designer_path, "designer installation located");

    match find_tool_executable(Path::new(designer_path), BAKER_EXECUTABLE) {
        Some(path) => {
            tracing::debug!(target: "shapeshift", path = %path.display(), "baker executable located");
            Ok(path)
        }
        None => fail(BakeError::ToolNotFound {
            searched: PathBuf::from(designer_path),
        }),
    }
}

/// First file named `name` anywhere under `root`.
pub(crate) fn find_tool_executable(root: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name().to_str() == Some(name))
        .map(|entry| entry.into_path())
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;

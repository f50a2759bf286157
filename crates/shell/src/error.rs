// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for command lexing and execution.

use crate::span::Span;
use thiserror::Error;

/// Errors that can occur while tokenizing a command string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated single quote at position {}", span.start)]
    UnterminatedSingleQuote {
        /// Source location span for the error.
        span: Span,
    },

    #[error("unterminated double quote at position {}", span.start)]
    UnterminatedDoubleQuote {
        /// Source location span for the error.
        span: Span,
    },

    #[error("trailing backslash at position {}", span.start)]
    TrailingBackslash {
        /// Source location span for the error.
        span: Span,
    },
}

impl LexError {
    /// Get the span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            Self::UnterminatedSingleQuote { span } => *span,
            Self::UnterminatedDoubleQuote { span } => *span,
            Self::TrailingBackslash { span } => *span,
        }
    }
}

/// Errors that can occur while executing a command.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A pipeline stage had no tokens left after expansion.
    #[error("empty command")]
    EmptyCommand,

    #[error(transparent)]
    Lex(#[from] LexError),

    /// Wildcard token did not form a valid pattern.
    #[error("invalid glob pattern `{pattern}`: {message}")]
    GlobPattern { pattern: String, message: String },

    /// Command not found or could not be spawned.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-zero exit status not covered by the tolerance policy.
    #[error("command `{command}` failed with exit code {exit_code}")]
    Rejected { command: String, exit_code: i32 },

    /// Caller-initiated interrupt; the child was terminated before this
    /// error was returned.
    #[error("command `{command}` interrupted")]
    Interrupted { command: String },
}

/// Log at error severity and fail in one step.
pub(crate) fn fail<T>(err: RunnerError) -> Result<T, RunnerError> {
    tracing::error!(target: "shapeshift", error = %err, "shell command failed");
    Err(err)
}

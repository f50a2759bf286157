// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed command pipelines.

use crate::error::LexError;
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// One program invocation within a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    /// Program name followed by its arguments, quoting already resolved.
    pub tokens: Vec<String>,
}

impl Stage {
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An ordered chain of stages; stdout of stage *i* feeds stdin of stage
/// *i+1*. A command without `|` is a single-stage pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// Parse a free-text command into its stages.
    pub fn parse(input: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut stages = vec![Stage::default()];
        for token in tokens {
            match token.kind {
                TokenKind::Pipe => stages.push(Stage::default()),
                TokenKind::Word(word) => {
                    if let Some(stage) = stages.last_mut() {
                        stage.tokens.push(word);
                    }
                }
            }
        }
        Ok(Self { stages })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

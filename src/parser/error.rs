use thiserror::Error;

use crate::error_codes::{
    LD_GRM_001_BLOCK_NOT_CLOSED, LD_GRM_002_MALFORMED_PREFIX, LD_GRM_003_SYNTAX,
};

/// A metadata block that does not follow the grammar.
///
/// Line numbers are 1-based. For block extraction they count from the start
/// of the file; inside `parse` they count from the start of the block text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("metadata block not closed: start marker at line {line} has no end marker")]
    BlockNotClosed { line: usize },

    #[error("line {line}: malformed prefix declaration: {text}")]
    MalformedPrefix { line: usize, text: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl GrammarError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        GrammarError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            GrammarError::BlockNotClosed { line }
            | GrammarError::MalformedPrefix { line, .. }
            | GrammarError::Syntax { line, .. } => Some(*line),
        }
    }

    /// Shift a block-relative line number to a file-relative one.
    pub(crate) fn offset_lines(self, by: usize) -> Self {
        match self {
            GrammarError::BlockNotClosed { line } => GrammarError::BlockNotClosed { line },
            GrammarError::MalformedPrefix { line, text } => GrammarError::MalformedPrefix {
                line: line + by,
                text,
            },
            GrammarError::Syntax { line, message } => GrammarError::Syntax {
                line: line + by,
                message,
            },
        }
    }

    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            GrammarError::BlockNotClosed { .. } => LD_GRM_001_BLOCK_NOT_CLOSED,
            GrammarError::MalformedPrefix { .. } => LD_GRM_002_MALFORMED_PREFIX,
            GrammarError::Syntax { .. } => LD_GRM_003_SYNTAX,
        }
    }
}

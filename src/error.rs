use thiserror::Error;

use super::*;

/// An internal failure of the Markdown converter.
///
/// These never come from malformed input; any docstring is valid. They
/// indicate a bug in the state machine and abort the conversion of the one
/// docstring that triggered it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConvertError {
    /// A state handler neither consumed a line nor changed the parser state.
    #[error("docstring parser made no progress in state {state} at line {line}")]
    NoProgress {
        /// State the parser was stuck in.
        state: ParserState,
        /// Zero-based index of the line it was stuck on.
        line: usize,
    },
    /// A block tried to return to its enclosing state, but there was none.
    #[error("docstring parser left state {state} at line {line} with an empty state stack")]
    EmptyStateStack {
        /// State that tried to pop.
        state: ParserState,
        /// Zero-based index of the current line.
        line: usize,
    },
}

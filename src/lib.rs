//! Turn Python-style docstrings into something a hover popup can show.
//! [docstring_md] reads docstrings written loosely in [reStructuredText]
//! conventions and produces either plain text or [CommonMark] Markdown.
//!
//! [docstring_md]: index.html
//! [reStructuredText]: https://docutils.sourceforge.io/rst.html
//! [CommonMark]: https://spec.commonmark.org/
//!
//! # Getting Started
//!
//! ````rust
//! use docstring_md::{to_markdown, to_plaintext};
//!
//! let docstring = "Compute the thing.
//!
//!     Example::
//!
//!         >>> compute(some_value)
//!         42
//!     ";
//!
//! let markdown = "Compute the thing.
//!
//! Example:
//!
//! ```
//! >>> compute(some_value)
//! 42
//! ```";
//!
//! assert_eq!(to_markdown(docstring), markdown);
//! assert!(to_plaintext(docstring).starts_with("Compute the thing.\n\nExample::"));
//! ````
//!
//! # Using [`DocstringConverter`] as a builder
//!
//! The converter lets you tweak the few knobs there are.
//!
//! ```rust
//! use docstring_md::DocstringConverter;
//!
//! let converter = DocstringConverter::default().tab_width(4);
//! assert_eq!(converter.to_plaintext("a\n\tb\n\t\tc"), "a\nb\n    c");
//! ```

use std::borrow::Cow;
use std::fmt;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

mod buffer;
mod builder;
mod config;
mod error;
mod escape;
mod lines;
mod parser;
mod patterns;
mod plaintext;

use crate::{buffer::OutputBuffer, lines::LineSequence};
pub use crate::{
    builder::DocstringConverter, config::Config, error::ConvertError, parser::ParserState,
};

/// Convert a docstring to a plaintext, human readable form.
///
/// Common leading indentation is removed (the first line is exempt, like
/// Python's `inspect.cleandoc`) and runs of blank lines are collapsed.
///
/// ```rust
/// # use docstring_md::to_plaintext;
/// assert_eq!(to_plaintext("Summary.\n\n\n\n    Details.  "), "Summary.\n\nDetails.");
/// assert_eq!(to_plaintext(" \t\n "), "");
/// ```
pub fn to_plaintext(docstring: &str) -> String {
    DocstringConverter::default().to_plaintext(docstring)
}

/// Convert a docstring to Markdown suitable for a tooltip.
///
/// Never fails. See [`try_to_markdown`] for a variant that reports internal
/// parser errors instead of falling back to plain text.
///
/// ```rust
/// # use docstring_md::to_markdown;
/// assert_eq!(to_markdown("Use ``snake_case`` for a_b."), "Use `snake_case` for a\\_b.");
/// ```
pub fn to_markdown(docstring: &str) -> String {
    DocstringConverter::default().to_markdown(docstring)
}

/// Convert a docstring to Markdown, reporting internal parser errors.
///
/// ```rust
/// # use docstring_md::try_to_markdown;
/// assert_eq!(try_to_markdown(".. class:: Foo(bar)")?, "```\nFoo(bar)\n```");
/// # Ok::<(), docstring_md::ConvertError>(())
/// ```
pub fn try_to_markdown(docstring: &str) -> Result<String, ConvertError> {
    DocstringConverter::default().try_to_markdown(docstring)
}

/// Check if a line is empty or consists of whitespace only.
fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Count the leading whitespace characters of a line.
fn count_leading_spaces(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop the first `amount` characters of a line, or everything if it is shorter.
fn strip_indent(line: &str, amount: usize) -> &str {
    match line.char_indices().nth(amount) {
        Some((index, _)) => &line[index..],
        None => "",
    }
}

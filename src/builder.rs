use crate::{parser::DocstringParser, plaintext::render_plaintext};

use super::*;

/// Converts docstrings to plaintext or Markdown.
///
/// ```rust
/// # use docstring_md::DocstringConverter;
/// let converter = DocstringConverter::default().separate_field_lists(false);
/// let markdown = converter.to_markdown("Add.\n:param a: first\n:param b: second");
/// assert_eq!(markdown, "Add.\n:param a: first\n:param b: second");
/// ```
#[derive(Clone, Debug, Default)]
pub struct DocstringConverter {
    config: Config,
}

impl DocstringConverter {
    /// Build a converter with the given [`Config`].
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Set how many spaces a tab expands to. Defaults to 8.
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.config.tab_width = tab_width;
        self
    }

    /// Set whether `:param x:`-style field lines each start a new paragraph.
    /// Defaults to `true`.
    pub fn separate_field_lists(mut self, separate_field_lists: bool) -> Self {
        self.config.separate_field_lists = separate_field_lists;
        self
    }

    /// Get the [`Config`] this converter uses.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a docstring to plain text. See [`crate::to_plaintext`].
    pub fn to_plaintext(&self, docstring: &str) -> String {
        let lines = LineSequence::new(docstring, self.config.tab_width);
        if lines.is_empty() {
            return String::new();
        }
        render_plaintext(&lines)
    }

    /// Convert a docstring to Markdown. See [`crate::to_markdown`].
    ///
    /// Should the parser fail internally, the error is logged and the
    /// plaintext rendition is returned instead.
    pub fn to_markdown(&self, docstring: &str) -> String {
        match self.try_to_markdown(docstring) {
            Ok(markdown) => markdown,
            Err(error) => self.recover(docstring, &error),
        }
    }

    /// Log a failed Markdown conversion and render the docstring as plain text.
    fn recover(&self, docstring: &str, error: &ConvertError) -> String {
        tracing::error!(%error, "docstring conversion failed, falling back to plaintext");
        self.to_plaintext(docstring)
    }

    /// Convert a docstring to Markdown. See [`crate::try_to_markdown`].
    pub fn try_to_markdown(&self, docstring: &str) -> Result<String, ConvertError> {
        let lines = LineSequence::new(docstring, self.config.tab_width);
        if lines.is_empty() {
            return Ok(String::new());
        }
        DocstringParser::new(&lines, &self.config).convert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_conversion_falls_back_to_plaintext() {
        let converter = DocstringConverter::default();
        let error = ConvertError::NoProgress {
            state: ParserState::Directive,
            line: 1,
        };
        assert_eq!(
            converter.recover("Use a_b::\n\n    code", &error),
            "Use a_b::\n\ncode"
        );
    }
}

use crate::{escape::escape_markdown, patterns};

use super::*;

/// Fence that opens and closes Markdown code blocks.
const FENCE: &str = "```";

/// The states the Markdown converter moves through while reading lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParserState {
    /// Ordinary prose. The initial state.
    Text,
    /// A run of blank lines.
    Empty,
    /// Inside a triple backtick code block taken over from the docstring.
    BacktickBlock,
    /// Inside a block of `>>> ` interactive examples.
    Doctest,
    /// Inside the indented literal block following a `::` paragraph.
    LiteralBlock,
    /// A literal block whose only line is not indented.
    LiteralBlockSingleLine,
    /// On a `.. name::` directive header.
    Directive,
    /// Inside the indented body of a directive.
    DirectiveBlock,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Converts the lines of one docstring to Markdown.
///
/// A fresh parser is built for every conversion and consumed by it.
pub(crate) struct DocstringParser<'a> {
    config: &'a Config,
    lines: &'a LineSequence,
    /// Index of the current line.
    line_num: usize,
    state: ParserState,
    /// States to return to when the current block ends.
    state_stack: Vec<ParserState>,
    /// Lines indented at least this much belong to the current block.
    block_indent: usize,
    /// Added to the indentation of lines in a directive on the first line,
    /// since the first line was dedented separately from the rest.
    indent_shift: usize,
    inside_inline_code: bool,
    /// Render the body of the current directive as text instead of dropping it.
    append_directive_block: bool,
    output: OutputBuffer,
}

impl<'a> DocstringParser<'a> {
    pub(crate) fn new(lines: &'a LineSequence, config: &'a Config) -> Self {
        Self {
            config,
            lines,
            line_num: 0,
            state: ParserState::Text,
            state_stack: Vec::new(),
            block_indent: 0,
            indent_shift: 0,
            inside_inline_code: false,
            append_directive_block: false,
            output: OutputBuffer::with_capacity(lines.iter().map(|line| line.len() + 1).sum()),
        }
    }

    /// Run the state machine over every line and return the Markdown.
    pub(crate) fn convert(mut self) -> Result<String, ConvertError> {
        while let Some(line) = self.current_line() {
            let before = (self.state, self.line_num);
            tracing::trace!(state = %self.state, line_num = self.line_num, line, "dispatch");

            match self.state {
                ParserState::Text => self.parse_text(line),
                ParserState::Empty => self.parse_empty(line),
                ParserState::BacktickBlock => self.parse_backtick_block(line)?,
                ParserState::Doctest => self.parse_doctest(line)?,
                ParserState::LiteralBlock => self.parse_literal_block(line)?,
                ParserState::LiteralBlockSingleLine => self.parse_literal_block_single_line(line)?,
                ParserState::Directive => self.parse_directive(line)?,
                ParserState::DirectiveBlock => self.parse_directive_block(line)?,
            }

            // Either the state or the line number must change.
            if (self.state, self.line_num) == before {
                return Err(ConvertError::NoProgress {
                    state: self.state,
                    line: self.line_num,
                });
            }
        }

        // Close out any outstanding code blocks.
        match self.state {
            ParserState::BacktickBlock | ParserState::Doctest | ParserState::LiteralBlock => {
                tracing::debug!(state = %self.state, "closing unterminated code block");
                self.output.trim_and_append_line(FENCE, false);
            }
            _ if self.inside_inline_code => {
                tracing::debug!("closing unterminated inline code");
                self.output.trim_and_append_line("`", true);
            }
            _ => {}
        }

        Ok(self.output.into_trimmed())
    }

    fn current_line(&self) -> Option<&'a str> {
        self.lines.get(self.line_num)
    }

    fn eat_line(&mut self) {
        self.line_num += 1;
    }

    /// Get the part of a line right of the current block indentation.
    fn within_block(&self, line: &'a str) -> &'a str {
        strip_indent(line, self.block_indent.saturating_sub(self.indent_shift))
    }

    fn is_outside_block(&self, line: &str) -> bool {
        count_leading_spaces(line) + self.indent_shift < self.block_indent
    }

    /// Indentation of the next non-blank line after the current one.
    fn next_block_indent(&self) -> Option<usize> {
        self.lines
            .iter()
            .skip(self.line_num + 1)
            .find(|line| !is_blank(line))
            .map(count_leading_spaces)
    }

    fn push_state(&mut self, next: ParserState) {
        tracing::debug!(from = %self.state, to = %next, line_num = self.line_num, "push");
        self.state_stack.push(self.state);
        self.state = next;
    }

    fn pop_state(&mut self) -> Result<(), ConvertError> {
        let previous = self
            .state_stack
            .pop()
            .ok_or(ConvertError::EmptyStateStack {
                state: self.state,
                line: self.line_num,
            })?;
        tracing::debug!(from = %self.state, to = %previous, line_num = self.line_num, "pop");
        self.state = previous;

        if self.state == ParserState::Text {
            // Terminate inline code when leaving a block.
            self.inside_inline_code = false;
        }
        Ok(())
    }

    fn parse_text(&mut self, line: &'a str) {
        if is_blank(line) {
            self.state = ParserState::Empty;
            return;
        }

        if self.begin_backtick_block(line)
            || self.begin_literal_block(line)
            || self.begin_doctest(line)
            || self.begin_directive(line)
        {
            return;
        }

        // TODO: Parse Google and NumPy style sections as lists.
        self.append_text_line(line);
        self.eat_line();
    }

    fn parse_empty(&mut self, line: &'a str) {
        if is_blank(line) {
            self.output.append_blank_line();
            self.eat_line();
            return;
        }

        self.state = ParserState::Text;
    }

    fn begin_min_indent_code_block(&mut self, state: ParserState, line: &'a str) {
        self.output.append_line(FENCE);
        self.push_state(state);
        self.block_indent = count_leading_spaces(line);
        self.indent_shift = 0;
    }

    fn begin_backtick_block(&mut self, line: &'a str) -> bool {
        if !patterns::is_backtick_fence(line) {
            return false;
        }

        self.output.append_line(line);
        self.push_state(ParserState::BacktickBlock);
        self.eat_line();
        true
    }

    fn parse_backtick_block(&mut self, line: &'a str) -> Result<(), ConvertError> {
        if patterns::is_backtick_fence(line) {
            self.output.append_line(line);
            self.output.append_blank_line();
            self.pop_state()?;
        } else if line.is_empty() {
            // Keep blank lines in code as they are.
            self.output.append("\n");
        } else {
            self.output.append_line(line);
        }

        self.eat_line();
        Ok(())
    }

    fn begin_doctest(&mut self, line: &'a str) -> bool {
        if !patterns::is_doctest(line) {
            return false;
        }

        self.begin_min_indent_code_block(ParserState::Doctest, line);
        let content = patterns::strip_doctest_prompt(self.within_block(line));
        self.output.append_line(content);
        self.eat_line();
        true
    }

    fn parse_doctest(&mut self, line: &'a str) -> Result<(), ConvertError> {
        if self.is_outside_block(line) || is_blank(line) {
            self.output.trim_and_append_line(FENCE, false);
            self.output.append_blank_line();
            return self.pop_state();
        }

        let content = patterns::strip_doctest_prompt(self.within_block(line));
        self.output.append_line(content);
        self.eat_line();
        Ok(())
    }

    fn begin_literal_block(&mut self, line: &'a str) -> bool {
        // The previous line must be empty.
        let Some(previous) = self.line_num.checked_sub(1) else {
            return false;
        };
        if !self.lines.get(previous).is_some_and(is_blank) {
            return false;
        }

        // And the paragraph before it must end with `::`.
        // Lines are already right-trimmed, so nothing can follow the marker.
        let introduced = (0..previous)
            .rev()
            .filter_map(|index| self.lines.get(index))
            .find(|line| !is_blank(line))
            .is_some_and(|line| line.ends_with("::"));
        if !introduced {
            return false;
        }

        // Special case: allow one-liners at the same indent level.
        if count_leading_spaces(line) == 0 {
            self.output.append_line(FENCE);
            self.push_state(ParserState::LiteralBlockSingleLine);
            return true;
        }

        self.begin_min_indent_code_block(ParserState::LiteralBlock, line);
        true
    }

    fn parse_literal_block(&mut self, line: &'a str) -> Result<(), ConvertError> {
        // Unlike doctests, only the first non-blank dedented line ends the block.
        if is_blank(line) {
            self.output.append_blank_line();
            self.eat_line();
            return Ok(());
        }

        if self.is_outside_block(line) {
            self.output.trim_and_append_line(FENCE, false);
            self.output.append_blank_line();
            return self.pop_state();
        }

        let content = self.within_block(line);
        self.output.append_line(content);
        self.eat_line();
        Ok(())
    }

    fn parse_literal_block_single_line(&mut self, line: &'a str) -> Result<(), ConvertError> {
        self.output.append_line(line);
        self.output.append_line(FENCE);
        self.output.append_blank_line();
        self.pop_state()?;
        self.eat_line();
        Ok(())
    }

    fn begin_directive(&mut self, line: &'a str) -> bool {
        if !patterns::is_directive_start(line) {
            return false;
        }

        self.push_state(ParserState::Directive);
        self.indent_shift = match self.line_num {
            0 => self.lines.first_line_shift(),
            _ => 0,
        };
        self.block_indent = self
            .next_block_indent()
            .map_or(0, |indent| indent + self.indent_shift);
        self.append_directive_block = false;
        true
    }

    fn parse_directive(&mut self, line: &'a str) -> Result<(), ConvertError> {
        if let Some(directive) = patterns::parse_directive(line) {
            tracing::trace!(kind = directive.kind, "directive");
            if directive.kind == "class" {
                self.append_directive_block = true;
                self.output.append_blank_line();
                self.output.append_line(FENCE);
                self.output.append_line(directive.content);
                self.output.append_line(FENCE);
                self.output.append_blank_line();
            }
        }

        if self.block_indent == 0 {
            // A one-liner directive, so pop back.
            self.pop_state()?;
        } else {
            self.state = ParserState::DirectiveBlock;
        }

        self.eat_line();
        Ok(())
    }

    fn parse_directive_block(&mut self, line: &'a str) -> Result<(), ConvertError> {
        if !is_blank(line) && self.is_outside_block(line) {
            return self.pop_state();
        }

        if self.append_directive_block {
            // Render the body like top-level text rather than parsing it recursively.
            if is_blank(line) {
                self.output.append_blank_line();
            } else {
                let content = self.within_block(line);
                self.append_text_line(content);
            }
        }

        self.eat_line();
        Ok(())
    }

    /// Write a line of prose, escaping Markdown outside of inline code.
    fn append_text_line(&mut self, line: &str) {
        let line = patterns::preprocess_text_line(line);
        if is_blank(&line) {
            self.output.append_blank_line();
            return;
        }

        // Put field lists like `:param x:` into their own paragraphs.
        if self.config.separate_field_lists
            && !self.inside_inline_code
            && patterns::is_field_list(&line)
        {
            self.output.append_blank_line();
        }

        let parts = line.split('`').collect_vec();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.inside_inline_code = !self.inside_inline_code;
                self.output.append("`");
            }

            if self.inside_inline_code {
                self.output.append(part);
            } else {
                self.append_prose(part, i == 0, parts.len() == 1);
            }
        }

        // Definitely not blank, so skip the deduplication in `append_line`.
        self.output.append("\n");
    }

    fn append_prose(&mut self, part: &str, is_first: bool, is_whole_line: bool) {
        let solid;
        let mut part = part;

        if is_whole_line {
            // Separator lines which contain random spaces.
            if let Some(separator) = patterns::normalize_separator(part) {
                solid = separator;
                part = &solid;
            }

            // `~~~` would start a code block in Markdown.
            // TODO: Follow RST's heading precedence, which depends on the
            // order underline styles first appear in, not on the line itself.
            if let Some(header) = patterns::rewrite_fence_like_header(part) {
                self.output.append(&header);
                return;
            }
        }

        // Don't escape asterisk bullet points.
        if is_first {
            if let Some((marker, rest)) = patterns::split_leading_asterisk(part) {
                self.output.append(marker);
                part = rest;
            }
        }

        self.output.append(&escape_markdown(part));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popping_without_an_open_block_is_an_error() {
        let lines = LineSequence::new("text", 8);
        let config = Config::default();
        let mut parser = DocstringParser::new(&lines, &config);
        assert_eq!(
            parser.pop_state(),
            Err(ConvertError::EmptyStateStack {
                state: ParserState::Text,
                line: 0,
            })
        );
    }

    #[test]
    fn inline_code_survives_entering_a_block() {
        let lines = LineSequence::new("a `b\n.. note::\n   c", 8);
        let config = Config::default();
        let mut parser = DocstringParser::new(&lines, &config);
        parser.append_text_line("a `b");
        parser.eat_line();
        assert!(parser.inside_inline_code);
        parser.push_state(ParserState::Directive);
        assert!(parser.inside_inline_code);
        parser.pop_state().unwrap();
        assert!(!parser.inside_inline_code);
    }
}

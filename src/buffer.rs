use super::*;

/// The buffer the parser writes Markdown into.
///
/// Remembers whether the last thing written was a blank line so that runs of
/// blank lines collapse into one. [`OutputBuffer::append`] and
/// [`OutputBuffer::append_line`] are the only ways to write into it.
#[derive(Debug)]
pub(crate) struct OutputBuffer {
    buffer: String,
    /// Set after a blank line was written, and initially so that the output
    /// never starts with a blank line.
    skip_blank_line: bool,
}

impl OutputBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            skip_blank_line: true,
        }
    }

    /// Append text as is, without any blank line deduplication.
    pub(crate) fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.skip_blank_line = false;
    }

    /// Append a full line. Blank lines are dropped if the previous line was blank.
    pub(crate) fn append_line(&mut self, line: &str) {
        if !is_blank(line) {
            self.buffer.push_str(line);
            self.buffer.push('\n');
            self.skip_blank_line = false;
        } else if !self.skip_blank_line {
            self.buffer.push('\n');
            self.skip_blank_line = true;
        }
    }

    /// Append a blank line, subject to deduplication.
    pub(crate) fn append_blank_line(&mut self) {
        self.append_line("");
    }

    /// Drop trailing whitespace, then start a new line holding `line`.
    ///
    /// With `same_line`, `line` is glued to the end of the trimmed output instead.
    pub(crate) fn trim_and_append_line(&mut self, line: &str, same_line: bool) {
        let trimmed_len = self.buffer.trim_end().len();
        self.buffer.truncate(trimmed_len);
        self.skip_blank_line = false;

        if !same_line {
            self.append_blank_line();
        }
        self.append_line(line);
    }

    /// Check if nothing has been written yet.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the buffer and return its content without surrounding whitespace.
    pub(crate) fn into_trimmed(self) -> String {
        let Self { mut buffer, .. } = self;
        let end = buffer.trim_end().len();
        buffer.truncate(end);
        let start = buffer.len() - buffer.trim_start().len();
        buffer.drain(..start);
        buffer
    }
}

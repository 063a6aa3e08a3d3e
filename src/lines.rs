use super::*;

/// The lines of a docstring after tab expansion, right-trimming, and dedent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LineSequence {
    lines: Vec<String>,
    /// How much further right the other lines sat, relative to the first line,
    /// before each was dedented on its own.
    first_line_shift: usize,
}

impl LineSequence {
    /// Split a docstring into normalized lines, the way `inspect.cleandoc` does.
    ///
    /// The first line sits right after the opening quotes, so it takes no
    /// part in computing the common indentation and is only left-trimmed.
    pub(crate) fn new(docstring: &str, tab_width: usize) -> Self {
        if is_blank(docstring) {
            return Self::default();
        }

        let tab = " ".repeat(tab_width);
        let expanded = docstring.replace('\t', &tab);
        let mut lines = expanded.lines().map(str::trim_end);

        let raw_first = lines.next().unwrap_or_default();
        let first = raw_first.trim_start();
        let rest = lines.collect::<Vec<_>>();
        let amount = common_indent(&rest);
        let first_line_shift = amount.saturating_sub(count_leading_spaces(raw_first));
        tracing::trace!(amount, first_line_shift, lines = rest.len() + 1, "dedent");

        let lines = std::iter::once(first)
            .chain(rest.into_iter().map(|line| strip_indent(line, amount)))
            .map(str::to_owned)
            .collect();
        Self {
            lines,
            first_line_shift,
        }
    }

    /// Get the line at `index`, or [`None`] past either end.
    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Indentation the lines after the first one lost in excess of the first line's.
    ///
    /// A directive on the first line measures its body with this, so in
    /// `".. note::\n   text"` the body stays inside the directive. The cost is
    /// that a directive opening an indented docstring, like
    /// `".. deprecated:: 1.0\n    Use bar.\n\n    Returns x."`, owns every
    /// following line, and a non-`class` directive then hides all of them.
    pub(crate) fn first_line_shift(&self) -> usize {
        self.first_line_shift
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Smallest indentation among the non-blank lines, or 0 if there are none.
fn common_indent(lines: &[&str]) -> usize {
    lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| count_leading_spaces(line))
        .min()
        .unwrap_or(0)
}

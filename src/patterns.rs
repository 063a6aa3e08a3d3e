//! Line classification rules.
//!
//! Links to the relevant parts of the reStructuredText reference:
//! - [literal blocks](http://docutils.sourceforge.net/docs/ref/rst/restructuredtext.html#literal-blocks)
//! - [interpreted text](http://docutils.sourceforge.net/docs/ref/rst/restructuredtext.html#interpreted-text)
//! - [directives](http://docutils.sourceforge.net/docs/ref/rst/restructuredtext.html#directives)
//! - [sections](http://docutils.sourceforge.net/docs/ref/rst/restructuredtext.html#sections)

use super::*;

macro_rules! regex {
    ($name:ident, $pattern:literal) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($pattern).unwrap());
    };
}

regex!(RE_DOCTEST, r"^ *>>> ");
regex!(RE_DOCTEST_PROMPT, r"^(?:>>>|\.\.\.)(?: |$)");
regex!(
    RE_FIELD_LIST,
    r"^\s*:(param|arg|type|return|rtype|raise|except|var|ivar|cvar|copyright|license)"
);
regex!(RE_LITERAL_BLOCK_EMPTY, r"^\s*::$");
regex!(RE_LITERAL_BLOCK_SPACED, r"\s+::$");
regex!(RE_LITERAL_BLOCK_ATTACHED, r"(\S)\s*::$");
regex!(RE_ROLE_BEFORE, r":[\w\-+:.]+:`");
regex!(RE_ROLE_AFTER, r"`:[\w\-+:.]+:");
regex!(RE_DIRECTIVE, r"^\s*\.\.\s+(\w+)::\s*(.*)$");
regex!(RE_DIRECTIVE_START, r"^\s*\.\. ");
regex!(RE_TILDE_HEADER, r"^\s*~~~+$");
regex!(RE_PLUS_HEADER, r"^\s*\+\+\++$");
regex!(RE_LEADING_ASTERISK, r"^(\s+\* )(.*)$");

/// Separator lines made of several runs of one character, split by whitespace.
static POTENTIAL_HEADERS: Lazy<[(Regex, char); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"^\s*=+(\s+=+)+$").unwrap(), '='),
        (Regex::new(r"^\s*-+(\s+-+)+$").unwrap(), '-'),
        (Regex::new(r"^\s*~+(\s+~+)+$").unwrap(), '~'),
        (Regex::new(r"^\s*\++(\s+\++)+$").unwrap(), '+'),
    ]
});

/// Check if a line begins with a triple backtick code fence.
pub(crate) fn is_backtick_fence(line: &str) -> bool {
    line.starts_with("```")
}

/// Check if a line starts with an interactive `>>> ` prompt.
pub(crate) fn is_doctest(line: &str) -> bool {
    RE_DOCTEST.is_match(line)
}

/// Strip a `>>> ` or `... ` prompt from the start of a doctest line.
pub(crate) fn strip_doctest_prompt(line: &str) -> &str {
    match RE_DOCTEST_PROMPT.find(line) {
        Some(prompt) => &line[prompt.end()..],
        None => line,
    }
}

/// Check if a line starts with a field list marker such as `:param`.
pub(crate) fn is_field_list(line: &str) -> bool {
    RE_FIELD_LIST.is_match(line)
}

/// Check if a line starts an explicit markup block, `.. `.
pub(crate) fn is_directive_start(line: &str) -> bool {
    RE_DIRECTIVE_START.is_match(line)
}

/// A `.. kind:: content` directive header.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Directive<'a> {
    pub(crate) kind: &'a str,
    pub(crate) content: &'a str,
}

/// Parse a line as a directive header.
pub(crate) fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let captures = RE_DIRECTIVE.captures(line)?;
    Some(Directive {
        kind: captures.get(1)?.as_str(),
        content: captures.get(2)?.as_str(),
    })
}

/// Rewrite the RST markup of a prose line that Markdown has no use for.
///
/// A trailing literal block marker `::` is dropped or reduced to `:`,
/// interpreted text roles lose their role, and doubled backticks are halved.
pub(crate) fn preprocess_text_line(line: &str) -> String {
    if RE_LITERAL_BLOCK_EMPTY.is_match(line) {
        return String::new();
    }

    let mut line = RE_LITERAL_BLOCK_SPACED.replace(line, "").into_owned();
    line = RE_LITERAL_BLOCK_ATTACHED.replace(&line, "${1}:").into_owned();
    line = RE_ROLE_BEFORE.replace_all(&line, "`").into_owned();
    line = RE_ROLE_AFTER.replace_all(&line, "`").into_owned();
    line.replace("``", "`")
}

/// Collapse a separator line like `== ==` into a solid run, `====`.
///
/// Returns [`None`] if the line isn't such a separator.
pub(crate) fn normalize_separator(line: &str) -> Option<String> {
    POTENTIAL_HEADERS
        .iter()
        .find(|(regex, _)| regex.is_match(line))
        .map(|(_, marker)| line.chars().filter(|c| c == marker).collect())
}

/// Rewrite `~~~` and `+++` section underlines with `-`.
///
/// A line of tildes would otherwise open a Markdown code fence.
pub(crate) fn rewrite_fence_like_header(line: &str) -> Option<String> {
    if RE_TILDE_HEADER.is_match(line) {
        Some(line.replace('~', "-"))
    } else if RE_PLUS_HEADER.is_match(line) {
        Some(line.replace('+', "-"))
    } else {
        None
    }
}

/// Split an indented `* ` bullet into its marker and the rest of the line.
pub(crate) fn split_leading_asterisk(line: &str) -> Option<(&str, &str)> {
    let captures = RE_LEADING_ASTERISK.captures(line)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctest_prompts() {
        assert!(is_doctest(">>> x = 1"));
        assert!(is_doctest("    >>> x = 1"));
        assert!(!is_doctest(">>>x"));
        assert!(!is_doctest("\t>>> x"));
        assert_eq!(strip_doctest_prompt(">>> x = 1"), "x = 1");
        assert_eq!(strip_doctest_prompt("...     y"), "    y");
        assert_eq!(strip_doctest_prompt(">>>"), "");
        assert_eq!(strip_doctest_prompt("1"), "1");
        assert_eq!(strip_doctest_prompt("...ellipsis"), "...ellipsis");
    }

    #[test]
    fn directives() {
        assert!(is_directive_start(".. note::"));
        assert!(is_directive_start("  .. _target: http://example.com"));
        assert!(!is_directive_start("..note::"));
        assert_eq!(
            parse_directive(".. class:: Foo(bar)"),
            Some(Directive {
                kind: "class",
                content: "Foo(bar)"
            })
        );
        assert_eq!(
            parse_directive(".. note::"),
            Some(Directive {
                kind: "note",
                content: ""
            })
        );
        assert_eq!(parse_directive(".. _target: http://example.com"), None);
    }

    #[test]
    fn literal_block_markers() {
        assert_eq!(preprocess_text_line("::"), "");
        assert_eq!(preprocess_text_line("   ::"), "");
        assert_eq!(preprocess_text_line("Example::"), "Example:");
        assert_eq!(preprocess_text_line("Example ::"), "Example");
        assert_eq!(preprocess_text_line("a :: b"), "a :: b");
    }

    #[test]
    fn interpreted_text_roles() {
        assert_eq!(
            preprocess_text_line("See :class:`Foo` and `bar`:func:."),
            "See `Foo` and `bar`."
        );
        assert_eq!(
            preprocess_text_line("Use :py:meth:`~a.b` here"),
            "Use `~a.b` here"
        );
    }

    #[test]
    fn double_backticks_are_halved() {
        assert_eq!(preprocess_text_line("``literal``"), "`literal`");
    }

    #[test]
    fn separators() {
        assert_eq!(normalize_separator("== =="), Some("====".to_owned()));
        assert_eq!(normalize_separator("--- -- -"), Some("------".to_owned()));
        assert_eq!(normalize_separator("~~ ~~"), Some("~~~~".to_owned()));
        assert_eq!(normalize_separator("+ +"), Some("++".to_owned()));
        assert_eq!(normalize_separator("===="), None);
        assert_eq!(normalize_separator("= -"), None);
    }

    #[test]
    fn fence_like_headers() {
        assert_eq!(rewrite_fence_like_header("~~~~"), Some("----".to_owned()));
        assert_eq!(rewrite_fence_like_header("+++"), Some("---".to_owned()));
        assert_eq!(rewrite_fence_like_header("~~"), None);
        assert_eq!(rewrite_fence_like_header("a~~~"), None);
    }

    #[test]
    fn leading_asterisk() {
        assert_eq!(
            split_leading_asterisk("  * item"),
            Some(("  * ", "item"))
        );
        assert_eq!(split_leading_asterisk("* item"), None);
    }
}

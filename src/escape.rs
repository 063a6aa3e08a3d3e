use super::*;

/// Characters that would turn into Markdown emphasis, strikethrough, or links.
const MARKDOWN_SPECIAL_CHARS: [char; 5] = ['_', '*', '~', '[', ']'];

/// Backslash escape every Markdown special character not already escaped.
///
/// Whether a character counts as escaped depends on the input only, so
/// `\*` stays `\*` and `:param \*\*kwargs:` is left alone.
pub(crate) fn escape_markdown(text: &str) -> Cow<'_, str> {
    if !text.contains(&MARKDOWN_SPECIAL_CHARS[..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    let mut previous = None;
    for c in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&c) && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        previous = Some(c);
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_markdown("a_b"), "a\\_b");
        assert_eq!(escape_markdown("*args"), "\\*args");
        assert_eq!(escape_markdown("[x]"), "\\[x\\]");
        assert_eq!(escape_markdown("~a~"), "\\~a\\~");
    }

    #[test]
    fn already_escaped_characters_are_left_alone() {
        assert_eq!(escape_markdown(":param \\*\\*kwargs:"), ":param \\*\\*kwargs:");
        assert_eq!(escape_markdown("\\_private"), "\\_private");
    }

    #[test]
    fn consecutive_special_characters() {
        assert_eq!(escape_markdown("__init__"), "\\_\\_init\\_\\_");
        assert_eq!(escape_markdown("\\**"), "\\*\\*");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_markdown("plain text"), Cow::Borrowed(_)));
    }
}

use super::*;

/// Join normalized lines back together, collapsing runs of blank lines.
///
/// Blank lines at the start are dropped, like those at the end.
pub(crate) fn render_plaintext(lines: &LineSequence) -> String {
    let mut previous_blank = true;
    let text = lines
        .iter()
        .filter(|line| {
            let blank = is_blank(line);
            let keep = !(blank && previous_blank);
            previous_blank = blank;
            keep
        })
        .join("\n");
    text.trim_end().to_owned()
}

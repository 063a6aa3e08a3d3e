/// Configuration for converting docstrings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Number of spaces a tab expands to before indentation is measured.
    pub tab_width: usize,
    /// Put `:param ...:`-style field lines into their own paragraphs.
    pub separate_field_lists: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 8,
            separate_field_lists: true,
        }
    }
}

/*!
Parser-wide configuration that isn't tied to any single option.
 */

/// Settings for a [`Parser`][crate::Parser].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The program name shown in the usage line. If unset, the first
    /// argument of the most recent parse is used instead.
    pub program_name: Option<String>,

    /// Text appended to the usage line, usually describing the positional
    /// arguments (`filename ...`)
    pub footer: String,

    /// If set, option descriptions in the usage message are wrapped to fit
    /// this many columns
    pub wrap_width: Option<usize>,

    /// If true, a `--` argument ends option processing, and every argument
    /// after it is positional
    pub end_of_options: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            program_name: None,
            footer: String::new(),
            wrap_width: None,
            end_of_options: true,
        }
    }
}

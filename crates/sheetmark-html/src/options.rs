//! Interpretation options

use std::path::PathBuf;

/// How cells are positioned when earlier rows carry rowspans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Skip columns covered by a rowspan from an earlier row, like browsers lay out tables
    #[default]
    SkipCovered,
    /// Place cells from column 1 in every row and reject any that land in a merged region
    Reject,
}

/// Options for one interpretation
///
/// ## Example
///
/// ```rust
/// use sheetmark_html::InterpretOptions;
///
/// let options = InterpretOptions::default()
///     .with_strict(false)
///     .with_number_locale("fr-FR");
/// assert!(!options.strict);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretOptions {
    /// Reject unknown attributes and invalid values
    pub strict: bool,
    /// Default number locale when a cell has no `data-xls-number-locale`
    pub number_locale: Option<String>,
    /// Directory for images decoded from data URIs; the system temp dir if unset
    pub temp_dir: Option<PathBuf>,
    /// Append ` (2)`, ` (3)`... to repeated sheet names
    pub dedupe_sheet_names: bool,
    pub merge_policy: MergePolicy,
}

impl Default for InterpretOptions {
    fn default() -> Self {
        Self {
            strict: true,
            number_locale: None,
            temp_dir: None,
            dedupe_sheet_names: false,
            merge_policy: MergePolicy::default(),
        }
    }
}

impl InterpretOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the default number locale
    pub fn with_number_locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.number_locale = Some(locale.into());
        self
    }

    /// Set the directory for decoded images
    pub fn with_temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Enable or disable sheet name deduplication
    pub fn with_dedupe_sheet_names(mut self, dedupe: bool) -> Self {
        self.dedupe_sheet_names = dedupe;
        self
    }

    /// Set the merge policy
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = InterpretOptions::default();
        assert!(options.strict);
        assert_eq!(options.number_locale, None);
        assert!(!options.dedupe_sheet_names);
        assert_eq!(options.merge_policy, MergePolicy::SkipCovered);
    }

    #[test]
    fn test_builders() {
        let options = InterpretOptions::new()
            .with_temp_dir("/tmp/images")
            .with_merge_policy(MergePolicy::Reject)
            .with_dedupe_sheet_names(true);
        assert_eq!(options.temp_dir, Some(PathBuf::from("/tmp/images")));
        assert_eq!(options.merge_policy, MergePolicy::Reject);
        assert!(options.dedupe_sheet_names);
    }
}

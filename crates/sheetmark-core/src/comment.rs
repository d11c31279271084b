//! Cell comments (notes)
//!
//! ## Example
//!
//! ```rust
//! use sheetmark_core::{CellComment, Worksheet};
//!
//! let mut sheet = Worksheet::new("Notes");
//! sheet
//!     .set_comment("A1", CellComment::new("Finance", "Check this total"))
//!     .unwrap();
//!
//! let comment = sheet.comment("A1").unwrap();
//! assert_eq!(comment.map(|c| c.text.as_str()), Some("Check this total"));
//! ```

/// A cell comment/note
#[derive(Debug, Clone, PartialEq)]
pub struct CellComment {
    /// Author of the comment
    pub author: String,
    /// Comment text content
    pub text: String,
    /// Whether the comment box is visible by default
    pub visible: bool,
    /// Box width in points
    pub width: Option<f64>,
    /// Box height in points
    pub height: Option<f64>,
}

impl CellComment {
    /// Create a new comment with the given author and text
    ///
    /// ```rust
    /// use sheetmark_core::CellComment;
    ///
    /// let comment = CellComment::new("John Doe", "Review this value");
    /// assert_eq!(comment.author, "John Doe");
    /// assert!(!comment.visible);
    /// ```
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            visible: false,
            width: None,
            height: None,
        }
    }

    /// Create a comment with just text (empty author)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }

    /// Set whether the comment is visible by default
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the box size in points
    pub fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

//! Images anchored to cells

use std::path::{Path, PathBuf};

use crate::cell::CellAddress;

/// Where the image bytes live
#[derive(Debug)]
pub enum ImageSource {
    /// An existing file referenced by the markup
    File(PathBuf),
    /// A file decoded from an inline data URI; deleted when dropped
    Temporary(tempfile::TempPath),
}

impl ImageSource {
    /// Filesystem path of the image
    pub fn path(&self) -> &Path {
        match self {
            ImageSource::File(path) => path.as_path(),
            ImageSource::Temporary(path) => &**path,
        }
    }

    /// Check whether the file is owned by the workbook
    pub fn is_temporary(&self) -> bool {
        matches!(self, ImageSource::Temporary(_))
    }
}

/// An image anchored at a cell
#[derive(Debug)]
pub struct Drawing {
    /// Anchor cell
    pub anchor: CellAddress,
    /// Image file
    pub source: ImageSource,
    /// Display width in pixels
    pub width: Option<u32>,
    /// Display height in pixels
    pub height: Option<u32>,
}

impl Drawing {
    /// Create a drawing at `anchor`
    pub fn new(anchor: CellAddress, source: ImageSource) -> Self {
        Self {
            anchor,
            source,
            width: None,
            height: None,
        }
    }

    /// Set the display size
    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

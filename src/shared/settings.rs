use crate::library::jpeg::ScanOptions;

/// What to show and what to change for each processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub show_signature: bool,
    pub show_comment: bool,
    pub show_tail: bool,
    pub show_filename: bool,
    pub delete_tail: bool,
    pub delete_comment: bool,
    pub keep_date: bool,
}

impl Options {
    pub fn to_scan_options(&self) -> ScanOptions {
        ScanOptions {
            capture_comment: self.show_comment,
            capture_tail: self.show_tail,
        }
    }

    pub fn edits(&self) -> bool {
        self.delete_tail || self.delete_comment
    }

    /// Whether the per-file output line needs a terminating newline.
    pub fn ends_line(&self) -> bool {
        self.show_filename || self.show_signature
    }
}

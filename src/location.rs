// src/location.rs
//! Source locations inside `.vlm` files.
//!
//! A [`Location`] pins a diagnostic to a file, line and column. Lines
//! and columns are 1-indexed, matching what editors display. The file
//! name is shared via `Arc<str>` so locations stay cheap to clone as
//! they travel through error values.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
    /// Width of the offending token in characters. Zero when the
    /// producer only knows a point, not a span.
    pub length: u32,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            length: 0,
        }
    }

    pub fn with_length(file: impl Into<Arc<str>>, line: u32, column: u32, length: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            length,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_file_line_and_column() {
        let loc = Location::new("age/units.vlm", 12, 4);
        assert_eq!(loc.to_string(), "age/units.vlm:12:4");
    }

    #[test]
    fn point_locations_have_zero_length() {
        let loc = Location::new("a.vlm", 1, 1);
        assert_eq!(loc.length, 0);

        let span = Location::with_length("a.vlm", 1, 1, 7);
        assert_eq!(span.length, 7);
    }

    #[test]
    fn clones_share_the_file_name() {
        let loc = Location::new("deep/nested/mod.vlm", 3, 9);
        let copy = loc.clone();
        assert!(Arc::ptr_eq(&loc.file, &copy.file));
        assert_eq!(loc, copy);
    }
}

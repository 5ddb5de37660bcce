use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a statement (or part of a statement) in the query text.
///
/// Lines and columns are 1-based. A zeroed location means the position is
/// unknown, e.g. for nodes constructed programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }

    pub const fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

//! Problem codes shared by every crate in the workspace.
//!
//! The enumeration is generated from `resources/problem-codes.csv`.

use std::fmt;

include!(concat!(env!("OUT_DIR"), "/problems.rs"));

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

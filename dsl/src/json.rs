//! Reads and writes the declaration tree as JSON.
//!
//! Front ends that run in another process hand their declarations over in
//! this form, and the shared test fixtures are stored this way.
use std::io::{Read, Write};

use thiserror::Error;

use crate::decl::Library;

/// Errors that can occur reading or writing declarations.
#[derive(Debug, Error)]
pub enum LibraryJsonError {
    #[error("Malformed declarations: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Library {
    pub fn from_json_str(src: &str) -> Result<Self, LibraryJsonError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, LibraryJsonError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_json(&self, writer: impl Write, pretty: bool) -> Result<(), LibraryJsonError> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }
        Ok(())
    }
}

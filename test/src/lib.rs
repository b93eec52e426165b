//! Reads shared fixtures from `resources/test` at the workspace root.
use std::{fs, path::PathBuf};

use ilgen_dsl::decl::Library;

pub fn shared_resource_path(name: &'static str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("resources");
    path.push("test");
    path.push(name);
    path
}

pub fn read_shared_resource(name: &'static str) -> String {
    let path = shared_resource_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Unable to read {}: {}", path.display(), e))
}

/// Reads a declaration fixture stored as JSON.
pub fn read_shared_library(name: &'static str) -> Library {
    let src = read_shared_resource(name);
    Library::from_json_str(&src).unwrap_or_else(|e| panic!("Fixture {} is not valid: {}", name, e))
}

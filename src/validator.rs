use lazy_static::lazy_static;
use regex::Regex;

use crate::{Error, Result};

/// Grammar every resource path has to match before it becomes part of an ARN.
pub const PATH_PATTERN: &str = "^[/.a-zA-Z0-9*-]+$";

lazy_static! {
    static ref PATH_REGEX: Regex = Regex::new(PATH_PATTERN).expect("path pattern is a valid regex");
}

/// Validates a resource path against `PATH_PATTERN`.
///
/// Invalid paths are rejected as they are, they are never corrected.
pub fn validate_path(path: &str) -> Result<()> {
    if PATH_REGEX.is_match(path) {
        Ok(())
    } else {
        Err(Error::InvalidPath(path.into()))
    }
}

//! File-or-literal resolution for the input and prompt arguments
//!
//! Both the positional input and the `--prompt` value accept either a path to
//! a text file or literal text. An argument that names an existing regular
//! file readable as UTF-8 resolves to the file's contents; anything else is
//! taken verbatim. There is no escape mechanism for literal text that happens
//! to collide with a real path; the chosen interpretation is traced at debug
//! level.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// System prompt used when `--prompt` is not supplied
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps people find information.";

/// Largest file accepted as input or prompt, in bytes
///
/// A single completion request cannot usefully carry more than this; larger
/// files are rejected rather than silently truncated or treated as literal
/// text.
pub const MAX_FILE_BYTES: u64 = 8 * 1024 * 1024;

/// Resolve an argument to either file contents or the literal argument
pub fn resolve_input(argument: &str) -> Result<String> {
    let path = Path::new(argument);
    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            debug!(argument, "no readable file at argument, using literal text");
            return Ok(argument.to_string());
        }
    };

    if metadata.len() > MAX_FILE_BYTES {
        return Err(Error::InputTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_BYTES,
        });
    }

    match fs::read_to_string(path) {
        Ok(contents) => {
            debug!(path = %path.display(), bytes = contents.len(), "resolved argument to file contents");
            Ok(contents)
        }
        Err(e) => {
            // Unreadable or non-UTF-8 files fall back to the literal argument.
            debug!(path = %path.display(), error = %e, "file read failed, using literal text");
            Ok(argument.to_string())
        }
    }
}

/// Resolve the optional `--prompt` argument
///
/// An omitted prompt yields [`DEFAULT_SYSTEM_PROMPT`]; a supplied value goes
/// through the same file-or-literal policy as the input (so an explicitly
/// empty string stays empty).
pub fn resolve_prompt(argument: Option<&str>) -> Result<String> {
    match argument {
        Some(argument) => resolve_input(argument),
        None => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
    }
}

//! SVG output errors

use std::io;
use thiserror::Error;

/// Errors that can occur when writing an SVG document
#[derive(Error, Debug)]
pub enum SvgError {
    /// IO error when writing the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

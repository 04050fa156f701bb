//! Trace Loader.
//!
//! Opens trace files for the runner. The loader owns the file handle it
//! creates; the runner only borrows the reader, and the file is closed when
//! the returned reader is dropped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::common::error::{Result, SimError};

/// Opens a trace file for buffered line-by-line reading.
///
/// # Arguments
///
/// * `path` - Path to the trace file.
///
/// # Errors
///
/// Returns [`SimError::TraceOpen`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SimError::TraceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "trace opened");
    Ok(BufReader::new(file))
}

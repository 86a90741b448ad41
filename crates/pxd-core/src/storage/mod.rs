//! Disk I/O and file lifecycle for saved images.
//!
//! Bytes are streamed into a uniquely named `.part` temp file next to the
//! final path and moved into place by an atomic rename on `finalize`,
//! overwriting any existing file of the same name. A failed transfer removes
//! its temp file and leaves the final name untouched.

mod staged;

pub use staged::StagedFile;

/// Suffix of in-flight temp files; directory listings skip these.
pub const TEMP_SUFFIX: &str = ".part";

//! Breached password checker over sorted Have I Been Pwned text dumps.
//!
//! The "ordered by hash" Pwned Passwords download is a single multi-gigabyte text
//! file with one record per line:
//!
//! ```text
//! 000000005AD76BD555C1D6D771DE417A4B87E4B4:10
//! 00000000A8DAE4228F821FB418F59826079BF368:4
//! ```
//!
//! Each record starts with a 40 character hex SHA1 digest, sorted ascending, and is
//! followed by a variable width count and a `\n` or `\r\n` terminator. This library
//! looks a digest up in such a file without loading or indexing it: it binary searches
//! the byte offset range, snapping every midpoint back to the start of its line by
//! scanning for the preceding terminator.
//!
//! Lookups are O(log n) steps in the file size, each costing one backward scan bounded
//! by the length of the record the midpoint landed in.

pub mod boundary;
pub mod cancel;
pub mod candidates;
pub mod error;
pub mod key;
pub mod search;
pub mod sweep;

use std::path::PathBuf;

pub use boundary::record_start;
pub use cancel::{CancelToken, TimeoutGuard};
pub use candidates::CandidateFiles;
pub use error::Error;
pub use key::{DigestCase, HashKey};
#[cfg(feature = "tokio")]
pub use search::search_file_async;
pub use search::{Lookup, search_file, search_sorted};
pub use sweep::{FileReport, Query, Subject, Sweep, SweepOptions};

/// Environment variable name for specifying the default data directory.
pub const HIBP_DATA_DIR_ENV: &str = "HIBP_DATA_DIR";

/// The length of the hex SHA1 digest at the start of every record.
pub const PREFIX_LEN: usize = 40;

/// Carriage return, the first byte of a Windows line terminator.
pub const CR: u8 = b'\r';

/// Line feed, ends every record in both Unix and Windows files.
pub const LF: u8 = b'\n';

/// Hex lookup table for uppercase digest rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Hex lookup table for lowercase digest rendering.
pub const HEX_CHARS_LOWER: &[u8; 16] = b"0123456789abcdef";

/// Returns the default data directory from the HIBP_DATA_DIR environment variable,
/// or falls back to a `data` directory next to the running executable.
///
/// Returns `None` when neither can be determined.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HIBP_DATA_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }

    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("data"))
}

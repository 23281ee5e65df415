use std::cmp::Ordering;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::{debug, trace};

use crate::PREFIX_LEN;
use crate::boundary::{read_full, record_start, skip_record};
use crate::cancel::CancelToken;
use crate::error::Error;
use crate::key::HashKey;

/// Result of searching one file for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    NotFound,
    /// The cancel token was set before the search could finish.
    Cancelled,
}

impl Lookup {
    pub fn is_found(self) -> bool {
        self == Lookup::Found
    }
}

/// Binary searches a sorted text file for a record starting with `key`.
///
/// The search runs over byte offsets `[0, len]` rather than record indices. Each step
/// takes the upper-biased midpoint, snaps it to the start of its record with
/// [`record_start`], reads `PREFIX_LEN` bytes and compares them byte-wise with the key.
/// A short read at the end of the file is compared as is; an empty one sorts last.
///
/// The lower bound always sits on a record start: after a smaller record it moves past
/// that record's terminator. The upper bound moves to just before the record it read,
/// or just before the midpoint itself when it landed on the `\n` of a `\r\n` pair.
/// Both bounds strictly shrink on every step.
///
/// `token` is checked before every step.
pub fn search_sorted<R: Read + Seek>(
    reader: &mut R,
    len: u64,
    key: &HashKey,
    token: Option<&CancelToken>,
) -> std::io::Result<Lookup> {
    if len == 0 {
        return Ok(Lookup::NotFound);
    }

    let key = key.as_bytes();
    let mut prefix = [0u8; PREFIX_LEN];
    let mut low = 0u64;
    let mut high = len;

    while low <= high {
        if token.is_some_and(CancelToken::is_cancelled) {
            return Ok(Lookup::Cancelled);
        }

        // (low + high + 1) / 2 without overflow
        let middle = low + (high - low + 1) / 2;
        let start = record_start(reader, middle, low)?;
        let n = read_full(reader, &mut prefix)?;
        trace!(low, middle, high, start, "step");

        // nothing left to read: end of file sorts after every key
        let order = if n == 0 { Ordering::Greater } else { prefix[..n].cmp(&key[..]) };
        match order {
            Ordering::Equal => return Ok(Lookup::Found),
            Ordering::Greater => match start.min(middle).checked_sub(1) {
                Some(h) => high = h,
                None => break,
            },
            Ordering::Less => {
                let next = match prefix[..n].iter().position(|&b| b == crate::LF) {
                    Some(i) => start + i as u64 + 1,
                    None => skip_record(reader, start + n as u64)?,
                };
                low = next.max(start + 1);
            }
        }
    }

    Ok(Lookup::NotFound)
}

/// Opens `path` and searches it for `key`. The file is closed on every return path.
pub fn search_file(
    path: &Path,
    key: &HashKey,
    token: Option<&CancelToken>,
) -> Result<Lookup, Error> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
    debug!(path = %path.display(), len, %key, "searching");

    let lookup = search_sorted(&mut file, len, key, token).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), ?lookup, "search finished");
    Ok(lookup)
}

/// Async version of [`search_file`].
///
/// The whole open-and-search runs in a single `spawn_blocking` call rather than
/// going through `tokio::fs`, which would hop to the blocking pool once per seek and
/// read.
#[cfg(feature = "tokio")]
pub async fn search_file_async(
    path: std::path::PathBuf,
    key: HashKey,
    token: Option<CancelToken>,
) -> Result<Lookup, Error> {
    let task_path = path.clone();
    tokio::task::spawn_blocking(move || search_file(&task_path, &key, token.as_ref()))
        .await
        .map_err(|e| Error::io(path, std::io::Error::other(e)))?
}

//! Locating record boundaries from byte content alone.
//!
//! There is no line index: a search offset is turned into a record start by scanning
//! backward for the nearest terminator, and a record end by scanning forward.

use std::io::{self, Read, Seek, SeekFrom};

use crate::{CR, LF};

/// Bytes examined per read while scanning for a terminator. Pwned Passwords records
/// are under 64 bytes, so one window almost always covers the whole scan.
const SCAN_WINDOW: usize = 128;

/// Returns the start of the record containing `middle`, never going below `low`.
///
/// Positions `middle - 1` down to `low` are examined. A `\n` at `p` means the record
/// starts at `p + 1`; a `\r\n` pair at `p` means it starts at `p + 2`. The pair case
/// only matters when the midpoint sits on the `\n` of a Windows terminator, where the
/// returned start is `middle + 1`. If no terminator is found, `low` is returned and
/// treated as already aligned.
///
/// The reader is left positioned at the returned offset.
pub fn record_start<R: Read + Seek>(reader: &mut R, middle: u64, low: u64) -> io::Result<u64> {
    // One extra byte so a CR at the top of the window can see the LF after it.
    let mut window = [0u8; SCAN_WINDOW + 1];
    let mut end = middle;

    while end > low {
        let start = end.saturating_sub(SCAN_WINDOW as u64).max(low);
        let span = (end - start) as usize;

        reader.seek(SeekFrom::Start(start))?;
        let filled = read_full(reader, &mut window[..span + 1])?;

        for i in (0..span.min(filled)).rev() {
            let found = match window[i] {
                CR if i + 1 < filled && window[i + 1] == LF => Some(i as u64 + 2),
                LF => Some(i as u64 + 1),
                _ => None,
            };
            if let Some(delta) = found {
                let pos = start + delta;
                reader.seek(SeekFrom::Start(pos))?;
                return Ok(pos);
            }
        }

        end = start;
    }

    reader.seek(SeekFrom::Start(low))?;
    Ok(low)
}

/// Returns the offset just past the next `\n` at or after `pos`, or the end of the
/// file if the last record is unterminated.
///
/// The reader must be positioned at `pos`.
pub(crate) fn skip_record<R: Read>(reader: &mut R, mut pos: u64) -> io::Result<u64> {
    let mut chunk = [0u8; SCAN_WINDOW];
    loop {
        let n = read_full(reader, &mut chunk)?;
        if let Some(i) = chunk[..n].iter().position(|&b| b == LF) {
            return Ok(pos + i as u64 + 1);
        }
        pos += n as u64;
        if n < chunk.len() {
            return Ok(pos);
        }
    }
}

/// Reads until `buf` is full or the reader is exhausted, returning the byte count.
///
/// read() is not guaranteed to fill the buffer in a single call, so a short count
/// here always means end of file.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

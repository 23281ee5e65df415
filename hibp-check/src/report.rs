use std::io::{self, Write};

use hibp_text_search::{Error, FileReport, Lookup, PREFIX_LEN, Subject};

/// Writes the result line(s) for one file search.
pub fn write_report<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    let file = report.path.display();
    let ms = report.elapsed.as_millis();

    if report.subject == Subject::RawSecret {
        writeln!(
            out,
            "Looking for password as it looks like a SHA hash itself ({PREFIX_LEN} bytes long)"
        )?;
    }

    match (&report.outcome, report.subject) {
        (Ok(Lookup::Found), Subject::Digest) => {
            writeln!(out, "Found in {file} - time taken was {ms}ms")
        }
        (Ok(Lookup::NotFound), Subject::Digest) => {
            writeln!(out, "NOT found in {file} - time taken was {ms}ms")
        }
        (Ok(Lookup::Found), Subject::RawSecret) => {
            writeln!(out, "Found hash in {file} - time taken was {ms}ms")
        }
        (Ok(Lookup::NotFound), Subject::RawSecret) => {
            writeln!(out, "Hash NOT found in {file} - time taken was {ms}ms")
        }
        (Ok(Lookup::Cancelled), _) => {
            writeln!(out, "Search aborted in {file} after {ms}ms")
        }
        (Err(Error::Io { source, .. }), _) => {
            writeln!(out, "Error searching {file}: {source}")
        }
        (Err(e), _) => writeln!(out, "Error searching {file}: {e}"),
    }
}

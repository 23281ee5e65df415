//! Checking one secret against every candidate file in order.

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::error::Error;
use crate::key::{DigestCase, HashKey};
use crate::search::{Lookup, search_file};

/// Caller policy for a sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Case used to render the SHA1 digest. Must match the files.
    pub digest_case: DigestCase,
    /// Also look the secret itself up when it is 40 ASCII characters long, on the
    /// guess that it is already a digest. This is a heuristic: nothing guarantees a
    /// 40 character password is a hash.
    pub raw_hash_check: bool,
    /// Abort any single file search that runs longer than this.
    pub timeout: Option<Duration>,
}

/// Which key of a [`Query`] a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The SHA1 digest of the secret.
    Digest,
    /// The secret itself, searched as if it were a digest.
    RawSecret,
}

/// The keys derived from one secret.
#[derive(Debug, Clone)]
pub struct Query {
    digest: HashKey,
    raw: Option<HashKey>,
}

impl Query {
    pub fn from_secret(secret: &str, options: &SweepOptions) -> Self {
        let digest = HashKey::digest(secret, options.digest_case);
        let raw = if options.raw_hash_check { HashKey::parse(secret).ok() } else { None };
        Self { digest, raw }
    }

    pub fn digest(&self) -> &HashKey {
        &self.digest
    }

    /// The secret as a key, when the raw hash policy applies to it.
    pub fn raw(&self) -> Option<&HashKey> {
        self.raw.as_ref()
    }
}

/// Outcome of one search of one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub subject: Subject,
    pub outcome: Result<Lookup, Error>,
    pub elapsed: Duration,
}

impl FileReport {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Ok(Lookup::Found))
    }
}

/// Searches candidate files one after another, yielding a report per search.
///
/// For every file the digest is searched first, then the raw secret if the query has
/// one and the digest was not found. The iterator ends right after the first report
/// that is a match, so later files are never opened. Failed and cancelled searches
/// are reported and the sweep moves on to the next file.
///
/// Every search runs under a child of the sweep's cancel token, with its own
/// watchdog when [`SweepOptions::timeout`] is set.
#[derive(Debug)]
pub struct Sweep<'a> {
    files: std::slice::Iter<'a, PathBuf>,
    query: &'a Query,
    timeout: Option<Duration>,
    cancel: CancelToken,
    raw_pending: Option<&'a Path>,
    matched: bool,
}

impl<'a> Sweep<'a> {
    pub fn new(files: &'a [PathBuf], query: &'a Query, options: &SweepOptions) -> Self {
        Self {
            files: files.iter(),
            query,
            timeout: options.timeout,
            cancel: CancelToken::new(),
            raw_pending: None,
            matched: false,
        }
    }

    /// Uses `token` to cancel every search of this sweep, current and remaining.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    fn run(&self, path: &Path, subject: Subject, key: &HashKey) -> FileReport {
        let (token, _guard) = match self.timeout {
            Some(timeout) => {
                let (token, guard) = self.cancel.child_with_timeout(timeout);
                (token, Some(guard))
            }
            None => (self.cancel.child(), None),
        };

        let started = Instant::now();
        let outcome = search_file(path, key, Some(&token));
        let elapsed = started.elapsed();
        debug!(path = %path.display(), ?subject, ?elapsed, "file searched");

        FileReport { path: path.to_path_buf(), subject, outcome, elapsed }
    }
}

impl Iterator for Sweep<'_> {
    type Item = FileReport;

    fn next(&mut self) -> Option<FileReport> {
        if self.matched {
            return None;
        }

        let report = match (self.raw_pending.take(), self.query.raw()) {
            (Some(path), Some(raw)) => self.run(path, Subject::RawSecret, raw),
            _ => {
                let path = self.files.next()?;
                let report = self.run(path, Subject::Digest, self.query.digest());
                if self.query.raw.is_some() && matches!(report.outcome, Ok(l) if !l.is_found()) {
                    self.raw_pending = Some(path.as_path());
                }
                report
            }
        };

        if report.is_found() {
            info!(path = %report.path.display(), subject = ?report.subject, "match found, stopping");
            self.matched = true;
        }
        Some(report)
    }
}

impl FusedIterator for Sweep<'_> {}

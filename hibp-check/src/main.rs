mod error;
mod prompt;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use hibp_text_search::{CandidateFiles, DigestCase, Query, Sweep, SweepOptions, default_data_dir};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::prompt::SecretReader;

#[derive(Parser, Debug)]
#[command(name = "hibp-check")]
#[command(version, about = "Check passwords against sorted Have I Been Pwned SHA1 text dumps")]
struct Args {
    /// Files or directories to search, in order. Directories are walked recursively
    paths: Vec<PathBuf>,

    /// Don't search the default data directory ($HIBP_DATA_DIR, or `data` next to the executable)
    #[arg(long)]
    no_default_dir: bool,

    /// Render digests as lowercase hex, for dumps that use lowercase
    #[arg(long)]
    lowercase: bool,

    /// Don't also look the password up as-is when it is 40 characters long
    #[arg(long)]
    no_raw_hash: bool,

    /// Abort a single file search after this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    // Logs go to stderr so results on stdout stay clean
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let mut candidates = CandidateFiles::new();
    if !args.no_default_dir {
        candidates = candidates.with_default_dir(default_data_dir());
    }
    candidates.extend(&args.paths);
    let files = candidates.collect();

    if files.is_empty() {
        return Err(Error::NoCandidates);
    }
    info!(files = files.len(), "candidate files resolved");

    let options = SweepOptions {
        digest_case: if args.lowercase { DigestCase::Lower } else { DigestCase::Upper },
        raw_hash_check: !args.no_raw_hash,
        timeout: args.timeout_ms.map(Duration::from_millis),
    };

    let mut input = SecretReader::from_stdin();
    let mut stdout = io::stdout();

    loop {
        writeln!(stdout)?;
        writeln!(stdout, "Enter password (leave empty to quit):")?;
        stdout.flush()?;

        let Some(secret) = input.read_secret().map_err(Error::Prompt)? else {
            break;
        };
        if secret.trim().is_empty() {
            break;
        }

        let query = Query::from_secret(&secret, &options);
        writeln!(stdout, "Password SHA1 hash is: {}", query.digest())?;

        for report in Sweep::new(&files, &query, &options) {
            report::write_report(&mut stdout, &report)?;
        }
    }

    Ok(())
}

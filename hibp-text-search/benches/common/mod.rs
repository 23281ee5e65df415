use std::fs;
use std::path::PathBuf;

use hibp_text_search::{DigestCase, HashKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// A generated dump on disk, laid out like the Pwned Passwords "ordered by hash"
/// download: sorted uppercase digests, `:count` of varying width, CRLF terminators.
pub struct Dataset {
    _dir: TempDir,
    pub path: PathBuf,
    /// Keys that are in the file, in generation order (not sorted).
    pub present: Vec<HashKey>,
    /// Keys that are not in the file.
    pub absent: Vec<HashKey>,
}

impl Dataset {
    /// Writes `records` digests and keeps `sample` present and absent keys for lookups.
    /// Uses a fixed seed for reproducible benchmark results.
    pub fn generate(records: usize, sample: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(42);

        let mut keys: Vec<HashKey> = (0..records)
            .map(|i| HashKey::digest(&format!("stored-{i}-{}", rng.r#gen::<u64>()), DigestCase::Upper))
            .collect();
        let present = keys[..sample.min(records)].to_vec();
        let absent = (0..sample)
            .map(|i| HashKey::digest(&format!("absent-{i}"), DigestCase::Upper))
            .collect();

        keys.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        keys.dedup();

        let mut body = String::with_capacity(keys.len() * 52);
        for key in &keys {
            let width = rng.gen_range(0..31);
            let count: u32 = rng.gen_range(1..=u32::MAX >> width);
            body.push_str(&format!("{key}:{count}\r\n"));
        }

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("pwned-passwords-sha1-ordered-by-hash.txt");
        fs::write(&path, body).expect("Failed to write benchmark dataset");

        Self { _dir: dir, path, present, absent }
    }
}

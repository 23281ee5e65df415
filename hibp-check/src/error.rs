#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No files to search. Pass files or directories, or set HIBP_DATA_DIR.")]
    NoCandidates,

    #[error("Failed to read password: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

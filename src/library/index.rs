use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::model::Track;

/// Why the library could not be shown.
///
/// None of these are fatal: the UI renders a prompt and offers a retry.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no permission to read {0}")]
    PermissionDenied(PathBuf),
    #[error("no MP3 files found")]
    EmptyResult,
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A source of playable MP3 items.
///
/// Implementations return tracks sorted by `(folder_path, name)`.
pub trait MediaIndex {
    fn query_audio(&self) -> Result<Vec<Track>, LibraryError>;
}

use std::collections::BTreeMap;

use tracing::info;

use super::index::{LibraryError, MediaIndex};
use super::model::Track;

/// Tracks reported by the index, grouped by folder.
#[derive(Debug, Clone, Default)]
pub struct Library {
    tracks: Vec<Track>,
    /// folder_path -> indices into `tracks`, in index order.
    folders: BTreeMap<String, Vec<usize>>,
}

impl Library {
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut folders: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, t) in tracks.iter().enumerate() {
            folders.entry(t.folder_path.clone()).or_default().push(i);
        }
        Self { tracks, folders }
    }

    /// Query `index` and group the result. An empty result is reported as an error
    /// so the caller can offer a retry.
    pub fn load(index: &dyn MediaIndex) -> Result<Self, LibraryError> {
        let tracks = index.query_audio()?;
        if tracks.is_empty() {
            return Err(LibraryError::EmptyResult);
        }
        let library = Self::new(tracks);
        info!(
            tracks = library.tracks.len(),
            folders = library.folders.len(),
            "library loaded"
        );
        Ok(library)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Folder paths in ascending order.
    pub fn folders(&self) -> Vec<&str> {
        self.folders.keys().map(String::as_str).collect()
    }

    pub fn folder_len(&self, folder: &str) -> usize {
        self.folders.get(folder).map_or(0, Vec::len)
    }

    /// Tracks of `folder` whose name contains `query`, ignoring case.
    /// A blank query matches everything.
    pub fn search(&self, folder: &str, query: &str) -> Vec<&Track> {
        let Some(indices) = self.folders.get(folder) else {
            return Vec::new();
        };
        let members = indices.iter().map(|&i| &self.tracks[i]);

        if query.trim().is_empty() {
            return members.collect();
        }
        let needle = query.to_lowercase();
        members
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Label shown for a folder; the index root is shown as `/`.
pub fn folder_label(folder: &str) -> &str {
    if folder.trim().is_empty() { "/" } else { folder }
}

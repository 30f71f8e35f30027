use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use lofty::file::FileType;
use lofty::probe::Probe;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::index::{LibraryError, MediaIndex};
use super::model::{Locator, Track};

/// Media index backed by a directory tree.
pub struct DirectoryIndex {
    root: PathBuf,
    settings: LibrarySettings,
}

impl DirectoryIndex {
    pub fn new(root: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaIndex for DirectoryIndex {
    fn query_audio(&self) -> Result<Vec<Track>, LibraryError> {
        check_readable(&self.root)?;
        let tracks = scan(&self.root, &self.settings);
        info!(root = %self.root.display(), count = tracks.len(), "scanned media index");
        Ok(tracks)
    }
}

fn check_readable(root: &Path) -> Result<(), LibraryError> {
    match fs::read_dir(root) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(LibraryError::PermissionDenied(root.to_path_buf()))
        }
        Err(source) => Err(LibraryError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

fn has_mp3_extension(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Only extensionless files are worth opening; anything named `.txt` or
/// `.flac` is taken at its word.
fn should_sniff(path: &Path) -> bool {
    path.extension().is_none()
}

/// Content check standing in for a MIME type: does the file start like MPEG audio?
fn sniffs_as_mpeg(path: &Path) -> bool {
    Probe::open(path)
        .ok()
        .and_then(|probe| probe.guess_file_type().ok())
        .and_then(|probe| probe.file_type())
        .is_some_and(|ft| matches!(ft, FileType::Mpeg))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// `Music/Rock/`-style folder label for `path`'s parent, relative to `root`.
pub(super) fn relative_folder(root: &Path, path: &Path) -> String {
    let Some(parent) = path.parent() else {
        return String::new();
    };
    let Ok(rel) = parent.strip_prefix(root) else {
        return String::new();
    };

    let mut folder = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            folder.push_str(&part.to_string_lossy());
            folder.push('/');
        }
    }
    folder
}

fn scan(root: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(root).follow_links(settings.follow_links);

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_mp3 = has_mp3_extension(path, settings)
            || (settings.sniff_content && should_sniff(path) && sniffs_as_mpeg(path));
        if !is_mp3 {
            continue;
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| settings.fallback_name.clone());

        tracks.push(Track {
            name,
            folder_path: relative_folder(root, path),
            locator: Locator::from_path(path),
        });
    }

    tracks.sort_by(|a, b| {
        a.folder_path
            .cmp(&b.folder_path)
            .then_with(|| a.name.cmp(&b.name))
    });
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings() -> LibrarySettings {
        LibrarySettings::default()
    }

    #[test]
    fn has_mp3_extension_is_case_insensitive() {
        let settings = settings();
        assert!(has_mp3_extension(Path::new("/tmp/a.mp3"), &settings));
        assert!(has_mp3_extension(Path::new("/tmp/a.MP3"), &settings));
        assert!(!has_mp3_extension(Path::new("/tmp/a.flac"), &settings));
        assert!(!has_mp3_extension(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn only_extensionless_files_are_sniffed() {
        assert!(should_sniff(Path::new("/home/me/track01")));
        assert!(!should_sniff(Path::new("/home/me/notes.txt")));
        assert!(!should_sniff(Path::new("/home/me/song.flac")));
    }

    #[test]
    fn relative_folder_uses_trailing_slash_and_empty_root() {
        let root = Path::new("/music");
        assert_eq!(relative_folder(root, Path::new("/music/a.mp3")), "");
        assert_eq!(
            relative_folder(root, Path::new("/music/Rock/Live/a.mp3")),
            "Rock/Live/"
        );
    }

    #[test]
    fn query_keeps_mp3_only_sorted_by_folder_then_name() {
        let dir = tempdir().unwrap();
        let rock = dir.path().join("Rock");
        fs::create_dir_all(&rock).unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.mp3"), b"not a real mp3").unwrap();
        fs::write(rock.join("z.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("d.flac"), b"not a real flac").unwrap();

        let index = DirectoryIndex::new(dir.path(), settings());
        let tracks = index.query_audio().unwrap();

        let got: Vec<(&str, &str)> = tracks
            .iter()
            .map(|t| (t.folder_path.as_str(), t.name.as_str()))
            .collect();
        assert_eq!(got, vec![("", "a.mp3"), ("", "b.MP3"), ("Rock/", "z.mp3")]);
        assert_eq!(tracks[0].locator.to_path(), dir.path().join("a.mp3"));
    }

    #[test]
    fn query_skips_hidden_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.mp3"), b"not real").unwrap();

        let tracks = DirectoryIndex::new(dir.path(), settings())
            .query_audio()
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "visible.mp3");

        let with_hidden = LibrarySettings {
            include_hidden: true,
            ..settings()
        };
        let tracks = DirectoryIndex::new(dir.path(), with_hidden)
            .query_audio()
            .unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_keep_distinct_reopenable_locators() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xff.mp3")), b"x").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xfe.mp3")), b"y").unwrap();

        let tracks = DirectoryIndex::new(dir.path(), settings())
            .query_audio()
            .unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| t.name == "unknown.mp3"));
        assert_ne!(tracks[0].locator, tracks[1].locator);

        let mut contents: Vec<Vec<u8>> = tracks
            .iter()
            .map(|t| fs::read(t.locator.to_path()).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec![b"x".to_vec(), b"y".to_vec()]);
    }

    #[test]
    fn query_reports_missing_root_as_io_error() {
        let dir = tempdir().unwrap();
        let index = DirectoryIndex::new(dir.path().join("nope"), settings());
        assert!(matches!(index.query_audio(), Err(LibraryError::Io { .. })));
    }
}

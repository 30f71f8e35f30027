use super::*;

fn t(folder: &str, name: &str) -> Track {
    Track {
        name: name.into(),
        folder_path: folder.into(),
        locator: Locator::new(format!("file:///music/{folder}{name}")),
    }
}

/// `None` behaves like an index the user has not granted access to.
struct FixedIndex(Option<Vec<Track>>);

impl MediaIndex for FixedIndex {
    fn query_audio(&self) -> Result<Vec<Track>, LibraryError> {
        self.0
            .clone()
            .ok_or_else(|| LibraryError::PermissionDenied(std::path::PathBuf::from("/music")))
    }
}

fn sample() -> Library {
    Library::new(vec![
        t("", "intro.mp3"),
        t("Jazz/", "Blue in Green.mp3"),
        t("Jazz/", "So What.mp3"),
        t("Rock/", "Paranoid.mp3"),
    ])
}

#[test]
fn folders_are_grouped_and_sorted() {
    let lib = sample();
    assert_eq!(lib.folders(), vec!["", "Jazz/", "Rock/"]);
    assert_eq!(lib.folder_len("Jazz/"), 2);
    assert_eq!(lib.folder_len("Missing/"), 0);
}

#[test]
fn root_folder_label_is_slash() {
    assert_eq!(folder_label(""), "/");
    assert_eq!(folder_label("  "), "/");
    assert_eq!(folder_label("Jazz/"), "Jazz/");
}

#[test]
fn search_is_case_insensitive_substring_within_folder() {
    let lib = sample();
    let hits: Vec<&str> = lib
        .search("Jazz/", "GREEN")
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(hits, vec!["Blue in Green.mp3"]);

    // other folders are not searched
    assert!(lib.search("Jazz/", "paranoid").is_empty());
}

#[test]
fn blank_search_lists_whole_folder() {
    let lib = sample();
    assert_eq!(lib.search("Jazz/", "   ").len(), 2);
    assert!(lib.search("Nope/", "").is_empty());
}

#[test]
fn track_identity_is_the_locator() {
    let a = t("Jazz/", "So What.mp3");
    let mut b = a.clone();
    b.name = "renamed.mp3".into();
    assert_eq!(a, b);
    assert_ne!(a, t("Jazz/", "Other.mp3"));
}

#[test]
fn locator_round_trips_file_paths() {
    let loc = Locator::from_path(std::path::Path::new("/music/a b.mp3"));
    assert_eq!(loc.as_str(), "file:///music/a b.mp3");
    assert_eq!(loc.to_path(), std::path::PathBuf::from("/music/a b.mp3"));
    assert_eq!(
        Locator::new("/bare/path.mp3").to_path(),
        std::path::PathBuf::from("/bare/path.mp3")
    );
}

#[test]
fn locator_escapes_percent_signs() {
    let path = std::path::Path::new("/music/100% live.mp3");
    let loc = Locator::from_path(path);
    assert_eq!(loc.as_str(), "file:///music/100%25 live.mp3");
    assert_eq!(loc.to_path(), path);
}

#[test]
fn load_reports_empty_result() {
    let index = FixedIndex(Some(Vec::new()));
    assert!(matches!(Library::load(&index), Err(LibraryError::EmptyResult)));
}

#[test]
fn load_passes_permission_denied_through() {
    let index = FixedIndex(None);
    assert!(matches!(
        Library::load(&index),
        Err(LibraryError::PermissionDenied(_))
    ));
}

#[test]
fn load_groups_index_output() {
    let index = FixedIndex(Some(vec![t("", "a.mp3"), t("Jazz/", "b.mp3")]));
    let lib = Library::load(&index).unwrap();
    assert_eq!(lib.tracks().len(), 2);
    assert_eq!(lib.folders(), vec!["", "Jazz/"]);
}

//! Integration tests for playlist persistence
//!
//! Tests the store against a real directory:
//! - Playlists survive closing and reopening the store
//! - Creation and track order are kept on disk
//! - Corrupt or foreign data never blocks start-up

use cadence_core::{Track, TrackId};
use cadence_storage::{FileStore, KeyValueStore, PlaylistStore, StorageError, PLAYLISTS_KEY};
use std::path::Path;

fn track(id: &str, title: &str) -> Track {
    Track::new(id, format!("/music/{id}.mp3"), title, "Test Artist")
}

fn open(dir: &Path) -> PlaylistStore<FileStore> {
    PlaylistStore::open(FileStore::open(dir).unwrap()).unwrap()
}

#[test]
fn test_playlists_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open(dir.path());
        store.create("Workout").unwrap();
        store.create("Chill").unwrap();
        store.add_track("Workout", track("song-3", "Sprint")).unwrap();
        store.add_track("Workout", track("song-1", "Warm Up")).unwrap();
        store.add_track("Chill", track("song-2", "Drift")).unwrap();
    }

    let store = open(dir.path());

    let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Workout", "Chill"]);

    let workout = store.get("Workout").unwrap();
    let ids: Vec<&str> = workout.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["song-3", "song-1"]);
    assert_eq!(workout.tracks[0].title, "Sprint");
}

#[test]
fn test_deletions_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open(dir.path());
        store.create("Keep").unwrap();
        store.create("Drop").unwrap();
        store.add_track("Keep", track("a", "One")).unwrap();
        store.add_track("Keep", track("b", "Two")).unwrap();

        store.delete("Drop").unwrap();
        store.remove_track("Keep", &TrackId::new("a")).unwrap();
    }

    let store = open(dir.path());
    assert_eq!(store.len(), 1);
    assert!(store.get("Drop").is_none());
    assert_eq!(store.get("Keep").unwrap().tracks, vec![track("b", "Two")]);
}

#[test]
fn test_failed_operations_leave_disk_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.create("Mix").unwrap();
    store.add_track("Mix", track("a", "One")).unwrap();
    let before = store.backend().get(PLAYLISTS_KEY).unwrap();

    assert!(matches!(store.create("Mix"), Err(StorageError::DuplicateName(_))));
    assert!(matches!(
        store.add_track("Mix", track("a", "One")),
        Err(StorageError::AlreadyPresent { .. })
    ));
    assert!(matches!(
        store.remove_track("Mix", &TrackId::new("zzz")),
        Err(StorageError::TrackNotFound { .. })
    ));

    assert_eq!(store.backend().get(PLAYLISTS_KEY).unwrap(), before);
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("userPlaylists.json"), "{not json").unwrap();

    let mut store = open(dir.path());
    assert!(store.is_empty());

    // The next write replaces the corrupt data
    store.create("Fresh").unwrap();
    let reopened = open(dir.path());
    assert_eq!(reopened.list()[0].name, "Fresh");
}

#[test]
fn test_reads_data_written_by_other_front_ends() {
    let dir = tempfile::tempdir().unwrap();
    let raw = r#"{
        "Zebra": [{"src": "/z.mp3", "artist": "Z", "title": "Stripes", "img": "z.jpg", "id": "song-9"}],
        "Alpha": []
    }"#;
    std::fs::write(dir.path().join("userPlaylists.json"), raw).unwrap();

    let store = open(dir.path());

    let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Zebra", "Alpha"]);
    assert_eq!(store.get("Zebra").unwrap().tracks[0].img, "z.jpg");
}

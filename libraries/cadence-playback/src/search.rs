//! Search filtering over a track list

use cadence_core::Track;

/// Tracks whose title or artist contains `query`, case-insensitively
///
/// Keeps the input order. Surrounding whitespace in the query is ignored and
/// an empty query matches every track.
pub fn filter(tracks: &[Track], query: &str) -> Vec<Track> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tracks.to_vec();
    }

    tracks
        .iter()
        .filter(|track| {
            track.title.to_lowercase().contains(&needle)
                || track.artist.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

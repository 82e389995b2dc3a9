//! Shuffle order generation
//!
//! The shuffle order is a permutation of the active playlist's track ids,
//! produced with an in-place Fisher-Yates pass.

use cadence_core::{Track, TrackId};
use rand::Rng;
use std::collections::HashSet;

/// Uniform in-place Fisher-Yates shuffle
///
/// For `i` from `len - 1` down to 1, swaps element `i` with an element drawn
/// uniformly from `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Build a fresh shuffle order over the given tracks
pub fn shuffle_order<R: Rng + ?Sized>(tracks: &[Track], rng: &mut R) -> Vec<TrackId> {
    let mut order: Vec<TrackId> = tracks.iter().map(|track| track.id.clone()).collect();
    fisher_yates(&mut order, rng);
    order
}

/// Check that `order` contains every track id exactly once
///
/// Returns a description of the first problem found.
pub fn check_permutation(tracks: &[Track], order: &[TrackId]) -> Result<(), String> {
    if order.len() != tracks.len() {
        return Err(format!(
            "expected {} entries, got {}",
            tracks.len(),
            order.len()
        ));
    }

    let members: HashSet<&TrackId> = tracks.iter().map(|track| &track.id).collect();
    let mut seen = HashSet::with_capacity(order.len());
    for id in order {
        if !members.contains(id) {
            return Err(format!("track {id} is not in the active playlist"));
        }
        if !seen.insert(id) {
            return Err(format!("track {id} appears more than once"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("/music/{}.mp3", id), format!("Track {}", id), "Artist")
    }

    fn tracks(n: usize) -> Vec<Track> {
        (0..n).map(|i| create_test_track(&i.to_string())).collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let tracks = tracks(20);
        let mut rng = StdRng::seed_from_u64(7);
        let order = shuffle_order(&tracks, &mut rng);

        assert!(check_permutation(&tracks, &order).is_ok());
    }

    #[test]
    fn shuffle_changes_order() {
        let tracks = tracks(10);
        let original: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();

        // 10! orderings; five identical draws in a row would mean a broken shuffle
        let mut rng = StdRng::seed_from_u64(42);
        let changed = (0..5).any(|_| shuffle_order(&tracks, &mut rng) != original);
        assert!(changed);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let tracks = tracks(12);
        let a = shuffle_order(&tracks, &mut StdRng::seed_from_u64(99));
        let b = shuffle_order(&tracks, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle_order(&[], &mut rng).is_empty());

        let single = tracks(1);
        assert_eq!(shuffle_order(&single, &mut rng), vec![TrackId::new("0")]);
    }

    #[test]
    fn permutation_check_rejects_wrong_length() {
        let tracks = tracks(3);
        let order = vec![TrackId::new("0"), TrackId::new("1")];
        assert!(check_permutation(&tracks, &order).is_err());
    }

    #[test]
    fn permutation_check_rejects_duplicates_and_strangers() {
        let tracks = tracks(3);
        let dup = vec![TrackId::new("0"), TrackId::new("0"), TrackId::new("1")];
        assert!(check_permutation(&tracks, &dup).unwrap_err().contains("more than once"));

        let stranger = vec![TrackId::new("0"), TrackId::new("1"), TrackId::new("9")];
        assert!(check_permutation(&tracks, &stranger)
            .unwrap_err()
            .contains("not in the active playlist"));
    }
}

//! Rendering collaborator
//!
//! The session never formats presentation state itself beyond the progress
//! strings; it hands snapshots to a `Renderer`.

use cadence_core::{Track, TrackId};
use cadence_playback::RepeatMode;
use cadence_storage::Playlist;
use std::io::Write;

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// Presentation layer
pub trait Renderer {
    /// Song list of the current view, with the current track highlighted
    fn track_list(&mut self, tracks: &[Track], highlighted: Option<&TrackId>);

    fn now_playing(&mut self, track: Option<&Track>, is_playing: bool);

    /// Queue view: the current track and what follows it
    fn queue(&mut self, current: Option<&Track>, upcoming: &[&Track]);

    fn progress(&mut self, current: &str, total: &str, percent: f64);

    fn modes(&mut self, shuffling: bool, repeat: RepeatMode);

    /// Volume indicator: level in percent and mute state
    fn volume(&mut self, level: u8, muted: bool);

    fn playlists(&mut self, playlists: &[Playlist]);

    fn notice(&mut self, notice: &Notice);
}

/// Plain-text renderer for terminals
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Output errors are ignored: a closed terminal must not stop playback.
impl<W: Write> Renderer for TextRenderer<W> {
    fn track_list(&mut self, tracks: &[Track], highlighted: Option<&TrackId>) {
        for (index, track) in tracks.iter().enumerate() {
            let marker = if highlighted == Some(&track.id) { '>' } else { ' ' };
            writeln!(self.out, "{marker} {index:>3}. {} - {}", track.title, track.artist).ok();
        }
    }

    fn now_playing(&mut self, track: Option<&Track>, is_playing: bool) {
        let state = if is_playing { "Playing" } else { "Paused" };
        match track {
            Some(track) => writeln!(self.out, "[{state}] {} - {}", track.title, track.artist).ok(),
            None => writeln!(self.out, "[{state}] nothing selected").ok(),
        };
    }

    fn queue(&mut self, current: Option<&Track>, upcoming: &[&Track]) {
        if let Some(track) = current {
            writeln!(self.out, "Now playing: {} - {}", track.title, track.artist).ok();
        }
        if upcoming.is_empty() {
            writeln!(self.out, "Up next: (nothing)").ok();
            return;
        }
        writeln!(self.out, "Up next:").ok();
        for track in upcoming {
            writeln!(self.out, "  {} - {}", track.title, track.artist).ok();
        }
    }

    fn progress(&mut self, current: &str, total: &str, percent: f64) {
        writeln!(self.out, "{current} / {total} ({percent:.0}%)").ok();
    }

    fn modes(&mut self, shuffling: bool, repeat: RepeatMode) {
        let shuffle = if shuffling { "on" } else { "off" };
        writeln!(self.out, "shuffle: {shuffle}, repeat: {repeat:?}").ok();
    }

    fn volume(&mut self, level: u8, muted: bool) {
        if muted {
            writeln!(self.out, "volume: {level}% (muted)").ok();
        } else {
            writeln!(self.out, "volume: {level}%").ok();
        }
    }

    fn playlists(&mut self, playlists: &[Playlist]) {
        for playlist in playlists {
            writeln!(self.out, "* {} ({} tracks)", playlist.name, playlist.tracks.len()).ok();
        }
    }

    fn notice(&mut self, notice: &Notice) {
        match notice {
            Notice::Info(message) => writeln!(self.out, "{message}").ok(),
            Notice::Warning(message) => writeln!(self.out, "! {message}").ok(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(render: impl FnOnce(&mut TextRenderer<Vec<u8>>)) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        render(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn highlights_current_track() {
        let tracks = vec![
            Track::new("a", "/a.mp3", "Alpha", "X"),
            Track::new("b", "/b.mp3", "Beta", "Y"),
        ];
        let text = output(|r| r.track_list(&tracks, Some(&TrackId::new("b"))));
        assert!(text.contains("    0. Alpha - X"));
        assert!(text.contains(">   1. Beta - Y"));
    }

    #[test]
    fn empty_queue_says_so() {
        let text = output(|r| r.queue(None, &[]));
        assert_eq!(text, "Up next: (nothing)\n");
    }

    #[test]
    fn volume_shows_mute() {
        assert_eq!(output(|r| r.volume(40, false)), "volume: 40%\n");
        assert_eq!(output(|r| r.volume(40, true)), "volume: 40% (muted)\n");
    }

    #[test]
    fn warnings_are_marked() {
        let text = output(|r| r.notice(&Notice::Warning("nope".to_string())));
        assert_eq!(text, "! nope\n");
    }
}

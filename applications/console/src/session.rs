//! Player session - event dispatch
//!
//! A `Session` owns the library, the sequencer and the playlist store, and
//! maps every UI or media event to one method. Decisions are applied through
//! the media and rendering collaborators; nothing else mutates player state.

use crate::media::MediaOutput;
use crate::render::{Notice, Renderer};
use cadence_core::{format_time, progress_percent, Library, Track, TrackId};
use cadence_playback::{
    filter, volume, Direction, PlaybackSequencer, RepeatMode, SequencerConfig, TrackEnd, Volume,
};
use cadence_storage::{KeyValueStore, PlaylistStore, StorageError};
use tracing::{debug, warn};

/// Events the front end can raise
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Play the track at this index of the current view
    SelectTrack(usize),
    TogglePlayPause,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,

    /// Media element finished the current track
    TrackEnded,
    TimeUpdate { current: f64, duration: f64 },
    MetadataLoaded { duration: f64 },
    Seek(f64),

    /// Volume level in percent; values above 100 are clamped
    SetVolume(u8),
    ToggleMute,

    Search(String),
    ShowHome,
    OpenPlaylist(String),
    CreatePlaylist(String),
    DeletePlaylist(String),

    /// Add the track at `index` of the current view to a playlist
    AddToPlaylist { playlist: String, index: usize },
    RemoveFromPlaylist { playlist: String, track_id: TrackId },

    /// Redraw the queue view
    ShowQueue,
}

/// Which list the active playlist came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Search(String),
    Playlist(String),
}

/// Session tunables
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub sequencer: SequencerConfig,
    pub queue_preview_limit: usize,
    pub previous_restart_secs: f64,

    /// Initial volume level in percent
    pub volume: u8,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            sequencer: SequencerConfig::default(),
            queue_preview_limit: 10,
            previous_restart_secs: 3.0,
            volume: volume::DEFAULT_LEVEL,
        }
    }
}

pub struct Session<S: KeyValueStore, M: MediaOutput, R: Renderer> {
    library: Library,
    sequencer: PlaybackSequencer,
    playlists: PlaylistStore<S>,
    media: M,
    renderer: R,

    view: View,
    is_playing: bool,
    elapsed: f64,
    duration: f64,
    volume: Volume,

    queue_preview_limit: usize,
    previous_restart_secs: f64,
}

impl<S: KeyValueStore, M: MediaOutput, R: Renderer> Session<S, M, R> {
    /// Start a session on the home view
    ///
    /// The first library track is loaded but left paused.
    pub fn new(
        library: Library,
        playlists: PlaylistStore<S>,
        media: M,
        renderer: R,
        settings: SessionSettings,
    ) -> Self {
        let mut sequencer = PlaybackSequencer::new(settings.sequencer);
        sequencer.set_active_playlist(library.to_vec());

        let mut session = Self {
            library,
            sequencer,
            playlists,
            media,
            renderer,
            view: View::Home,
            is_playing: false,
            elapsed: 0.0,
            duration: 0.0,
            volume: Volume::new(settings.volume),
            queue_preview_limit: settings.queue_preview_limit,
            previous_restart_secs: settings.previous_restart_secs,
        };

        session.media.set_volume(session.volume.gain());
        if let Ok(track) = session.sequencer.select_index(0).cloned() {
            session.media.load(&track.src);
        }

        session.render_track_list();
        session.render_now_playing();
        session.renderer.modes(false, session.sequencer.repeat_mode());
        session
            .renderer
            .volume(session.volume.level(), session.volume.is_muted());
        session.renderer.playlists(session.playlists.list());
        session
    }

    /// Route one event to its handler
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "Dispatching event");

        match event {
            UiEvent::SelectTrack(index) => self.select_track(index),
            UiEvent::TogglePlayPause => self.toggle_play_pause(),
            UiEvent::Next => self.next(),
            UiEvent::Previous => self.previous(),
            UiEvent::ToggleShuffle => self.toggle_shuffle(),
            UiEvent::CycleRepeat => self.cycle_repeat(),
            UiEvent::TrackEnded => self.track_ended(),
            UiEvent::TimeUpdate { current, duration } => self.time_update(current, duration),
            UiEvent::MetadataLoaded { duration } => self.metadata_loaded(duration),
            UiEvent::Seek(seconds) => self.seek(seconds),
            UiEvent::SetVolume(level) => self.set_volume(level),
            UiEvent::ToggleMute => self.toggle_mute(),
            UiEvent::Search(query) => self.search(&query),
            UiEvent::ShowHome => self.show_home(),
            UiEvent::OpenPlaylist(name) => self.open_playlist(&name),
            UiEvent::CreatePlaylist(name) => self.create_playlist(&name),
            UiEvent::DeletePlaylist(name) => self.delete_playlist(&name),
            UiEvent::AddToPlaylist { playlist, index } => self.add_to_playlist(&playlist, index),
            UiEvent::RemoveFromPlaylist { playlist, track_id } => {
                self.remove_from_playlist(&playlist, &track_id);
            }
            UiEvent::ShowQueue => self.render_queue(),
        }
    }

    // ===== Accessors =====

    pub fn sequencer(&self) -> &PlaybackSequencer {
        &self.sequencer
    }

    pub fn playlists(&self) -> &PlaylistStore<S> {
        &self.playlists
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    // ===== Playback Control =====

    fn select_track(&mut self, index: usize) {
        match self.sequencer.select_index(index).cloned() {
            Ok(track) => self.load_and_play(&track),
            // Out-of-range clicks are ignored
            Err(err) => debug!(error = %err, "Ignoring selection"),
        }
    }

    fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.media.pause();
            self.is_playing = false;
            self.render_now_playing();
        } else if self.sequencer.current_track().is_none() {
            self.select_track(0);
        } else {
            self.media.play();
            self.is_playing = true;
            self.render_now_playing();
        }
    }

    fn next(&mut self) {
        if self.sequencer.repeat_mode() == RepeatMode::One && self.sequencer.current_track().is_some() {
            self.restart_current();
            return;
        }
        self.step(Direction::Next);
    }

    fn previous(&mut self) {
        if self.elapsed > self.previous_restart_secs {
            self.media.seek(0.0);
            self.elapsed = 0.0;
            self.render_progress();
            return;
        }
        self.step(Direction::Previous);
    }

    fn step(&mut self, direction: Direction) {
        match self.sequencer.step(direction).cloned() {
            Ok(track) => self.load_and_play(&track),
            Err(err) => debug!(error = %err, ?direction, "Nothing to move to"),
        }
    }

    fn track_ended(&mut self) {
        match self.sequencer.on_track_ended() {
            TrackEnd::Replay(_) => self.restart_current(),
            TrackEnd::Advance(_) => {
                if let Some(track) = self.sequencer.current_track().cloned() {
                    self.load_and_play(&track);
                }
            }
            TrackEnd::Stop => {
                self.media.pause();
                self.media.seek(0.0);
                self.is_playing = false;
                self.elapsed = 0.0;
                self.render_now_playing();
                self.render_progress();
            }
        }
    }

    fn toggle_shuffle(&mut self) {
        let shuffling = self.sequencer.toggle_shuffle();
        self.renderer.modes(shuffling, self.sequencer.repeat_mode());
        self.render_queue();
    }

    fn cycle_repeat(&mut self) {
        let repeat = self.sequencer.cycle_repeat_mode();
        self.renderer.modes(self.sequencer.is_shuffling(), repeat);
        self.render_queue();
    }

    fn time_update(&mut self, current: f64, duration: f64) {
        self.elapsed = current;
        self.duration = duration;
        self.render_progress();
    }

    fn metadata_loaded(&mut self, duration: f64) {
        self.duration = duration;
        self.render_progress();
    }

    fn seek(&mut self, seconds: f64) {
        self.media.seek(seconds);
        self.elapsed = seconds;
        self.render_progress();
    }

    fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.media.set_volume(self.volume.gain());
        self.renderer
            .volume(self.volume.level(), self.volume.is_muted());
    }

    // ===== Navigation =====

    fn search(&mut self, query: &str) {
        let results = filter(self.library.tracks(), query);
        if results.is_empty() {
            self.renderer
                .notice(&Notice::Info(format!("No results for '{}'", query.trim())));
        }
        self.set_view(View::Search(query.to_string()), results);
    }

    fn show_home(&mut self) {
        let tracks = self.library.to_vec();
        self.set_view(View::Home, tracks);
    }

    fn open_playlist(&mut self, name: &str) {
        match self.playlists.get(name) {
            Some(playlist) => {
                let view = View::Playlist(playlist.name.clone());
                let tracks = playlist.tracks.clone();
                self.set_view(view, tracks);
            }
            None => self.report(StorageError::PlaylistNotFound(name.trim().to_string())),
        }
    }

    fn set_view(&mut self, view: View, tracks: Vec<Track>) {
        self.view = view;
        self.sequencer.set_active_playlist(tracks);
        self.render_track_list();
        self.render_queue();
    }

    // ===== Playlists =====

    fn create_playlist(&mut self, name: &str) {
        match self.playlists.create(name) {
            Ok(()) => {
                self.renderer
                    .notice(&Notice::Info(format!("Playlist '{}' created", name.trim())));
                self.renderer.playlists(self.playlists.list());
            }
            Err(err) => self.report(err),
        }
    }

    fn delete_playlist(&mut self, name: &str) {
        match self.playlists.delete(name) {
            Ok(removed) => {
                self.renderer
                    .notice(&Notice::Info(format!("Playlist '{}' deleted", removed.name)));
                self.renderer.playlists(self.playlists.list());
                if self.view == View::Playlist(removed.name) {
                    self.show_home();
                }
            }
            Err(err) => self.report(err),
        }
    }

    fn add_to_playlist(&mut self, playlist: &str, index: usize) {
        let Some(track) = self.sequencer.active_playlist().get(index).cloned() else {
            self.renderer
                .notice(&Notice::Warning(format!("No track at position {index}")));
            return;
        };

        let title = track.title.clone();
        match self.playlists.add_track(playlist, track) {
            Ok(()) => {
                self.renderer.notice(&Notice::Info(format!(
                    "Added '{}' to '{}'",
                    title,
                    playlist.trim()
                )));
                self.renderer.playlists(self.playlists.list());
            }
            Err(err) => self.report(err),
        }
    }

    fn remove_from_playlist(&mut self, playlist: &str, track_id: &TrackId) {
        match self.playlists.remove_track(playlist, track_id) {
            Ok(removed) => {
                self.renderer.notice(&Notice::Info(format!(
                    "Removed '{}' from '{}'",
                    removed.title,
                    playlist.trim()
                )));
                self.renderer.playlists(self.playlists.list());
                if self.view == View::Playlist(playlist.trim().to_string()) {
                    self.refresh_playlist_view(playlist);
                }
            }
            Err(err) => self.report(err),
        }
    }

    /// Reload the open playlist after an edit, keeping the current track
    ///
    /// The selection is only lost when the current track itself was removed.
    fn refresh_playlist_view(&mut self, name: &str) {
        let Some(tracks) = self.playlists.get(name).map(|p| p.tracks.clone()) else {
            return;
        };
        let current = self.sequencer.current_track().map(|track| track.id.clone());

        self.sequencer.set_active_playlist(tracks);
        if let Some(index) = current.and_then(|id| self.sequencer.position_of(&id)) {
            if let Err(err) = self.sequencer.select_index(index) {
                debug!(error = %err, "Could not keep current track");
            }
        }

        self.render_track_list();
        self.render_now_playing();
        self.render_queue();
    }

    /// Storage errors end here as user-facing notices
    fn report(&mut self, err: StorageError) {
        if !err.is_user_error() {
            warn!(error = %err, "Playlist storage failed");
        }
        self.renderer.notice(&Notice::Warning(err.to_string()));
    }

    // ===== Internal =====

    fn load_and_play(&mut self, track: &Track) {
        self.media.load(&track.src);
        self.media.play();
        self.is_playing = true;
        self.elapsed = 0.0;
        self.duration = 0.0;

        self.render_now_playing();
        self.render_track_list();
        self.render_queue();
    }

    fn restart_current(&mut self) {
        self.media.seek(0.0);
        self.media.play();
        self.is_playing = true;
        self.elapsed = 0.0;
        self.render_now_playing();
        self.render_progress();
    }

    fn render_now_playing(&mut self) {
        self.renderer
            .now_playing(self.sequencer.current_track(), self.is_playing);
    }

    fn render_track_list(&mut self) {
        let highlighted = self.sequencer.current_track().map(|track| &track.id);
        self.renderer
            .track_list(self.sequencer.active_playlist(), highlighted);
    }

    fn render_queue(&mut self) {
        let upcoming: Vec<&Track> = self.sequencer.queue_preview(self.queue_preview_limit).collect();
        self.renderer
            .queue(self.sequencer.current_track(), &upcoming);
    }

    fn render_progress(&mut self) {
        self.renderer.progress(
            &format_time(self.elapsed),
            &format_time(self.duration),
            progress_percent(self.elapsed, self.duration),
        );
    }
}

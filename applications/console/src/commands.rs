//! Line commands for the interactive console

use crate::session::UiEvent;
use cadence_core::TrackId;
use cadence_playback::volume;

pub const HELP: &str = "\
commands:
  play <n>              play track n of the current view
  toggle | p            play / pause
  next | n              next track
  prev | b              previous track (restarts after a few seconds)
  shuffle | s           toggle shuffle
  repeat | r            cycle repeat mode (off, all, one)
  end                   simulate the current track finishing
  time <cur> <dur>      report playback position in seconds
  seek <secs>           seek within the current track
  volume <0-100>        set the volume
  mute                  toggle mute
  search <query>        filter the library
  home                  show the whole library
  queue                 show what plays next
  open <playlist>       play from a playlist
  new <playlist>        create a playlist
  delete <playlist>     delete a playlist
  add <n> <playlist>    add track n of the current view to a playlist
  remove <id> <playlist>
  help | quit";

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines and for commands handled by the
/// caller itself (`help`, `quit`).
pub fn parse_command(line: &str) -> Result<Option<UiEvent>, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "" | "help" | "quit" | "exit" => return Ok(None),
        "play" => UiEvent::SelectTrack(parse_index(rest)?),
        "toggle" | "p" => UiEvent::TogglePlayPause,
        "next" | "n" => UiEvent::Next,
        "prev" | "previous" | "b" => UiEvent::Previous,
        "shuffle" | "s" => UiEvent::ToggleShuffle,
        "repeat" | "r" => UiEvent::CycleRepeat,
        "end" => UiEvent::TrackEnded,
        "time" => {
            let (current, duration) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: time <current> <duration>".to_string())?;
            UiEvent::TimeUpdate {
                current: parse_seconds(current)?,
                duration: parse_seconds(duration.trim())?,
            }
        }
        "seek" => UiEvent::Seek(parse_seconds(rest)?),
        "volume" | "vol" => UiEvent::SetVolume(parse_volume(rest)?),
        "mute" | "m" => UiEvent::ToggleMute,
        "search" => UiEvent::Search(rest.to_string()),
        "home" => UiEvent::ShowHome,
        "queue" => UiEvent::ShowQueue,
        "open" => UiEvent::OpenPlaylist(required(rest, "open <playlist>")?),
        "new" => UiEvent::CreatePlaylist(required(rest, "new <playlist>")?),
        "delete" => UiEvent::DeletePlaylist(required(rest, "delete <playlist>")?),
        "add" => {
            let (index, playlist) = split_pair(rest, "add <n> <playlist>")?;
            UiEvent::AddToPlaylist {
                playlist,
                index: parse_index(index)?,
            }
        }
        "remove" => {
            let (track_id, playlist) = split_pair(rest, "remove <id> <playlist>")?;
            UiEvent::RemoveFromPlaylist {
                playlist,
                track_id: TrackId::new(track_id),
            }
        }
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Some(event))
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.parse()
        .map_err(|_| format!("expected a track number, got '{text}'"))
}

fn parse_seconds(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(format!("expected seconds, got '{text}'")),
    }
}

/// Volume percentage; values above 100 are clamped
fn parse_volume(text: &str) -> Result<u8, String> {
    let level: u32 = text
        .parse()
        .map_err(|_| format!("expected a volume between 0 and 100, got '{text}'"))?;
    Ok(u8::try_from(level.min(u32::from(volume::MAX_LEVEL))).unwrap_or(volume::MAX_LEVEL))
}

fn required(text: &str, usage: &str) -> Result<String, String> {
    if text.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(text.to_string())
    }
}

/// First word and the rest of the line, which may contain spaces
fn split_pair<'a>(text: &'a str, usage: &str) -> Result<(&'a str, String), String> {
    text.split_once(char::is_whitespace)
        .map(|(first, rest)| (first, rest.trim().to_string()))
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| format!("usage: {usage}"))
}
